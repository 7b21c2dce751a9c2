//! Configuration management for seqdiff
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `SEQDIFF_*` environment variables. Command line flags are applied last by
//! the binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diff::{DiffOptions, DEFAULT_CONTEXT_LINES};
use crate::error::ConfigError;

/// Global configuration for seqdiff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqDiffConfig {
    /// Diff engine configuration
    pub engine: EngineConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Configuration for the diff engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Context lines around each change in a hunk
    pub context_lines: usize,
    /// Largest LCS table the engine will build; 0 means unlimited
    pub max_table_cells: u64,
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub trim_lines: bool,
}

/// Configuration for rendered output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default width for side-by-side diff display
    pub default_width: usize,
    /// Colorize unified output on terminals
    pub color: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            max_table_cells: 25_000_000, // ~100 MB of u32 cells
            ignore_case: false,
            ignore_whitespace: false,
            trim_lines: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_width: 120,
            color: true,
        }
    }
}

impl EngineConfig {
    /// Comparison options described by this config
    pub fn options(&self) -> DiffOptions {
        DiffOptions {
            ignore_whitespace: self.ignore_whitespace,
            ignore_case: self.ignore_case,
            trim_lines: self.trim_lines,
        }
    }

    /// Table size limit, `None` when unlimited
    pub fn table_limit(&self) -> Option<u64> {
        (self.max_table_cells > 0).then_some(self.max_table_cells)
    }
}

/// Configuration loading and management
impl SeqDiffConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the given file if any and apply environment overrides.
    ///
    /// Not validated here: command line flags still layer on top, so callers
    /// validate once the final values are in place.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override with environment variables if present
    pub fn apply_env(&mut self) {
        if let Some(lines) = env_parse::<usize>("SEQDIFF_CONTEXT_LINES") {
            self.engine.context_lines = lines;
        }

        if let Some(cells) = env_parse::<u64>("SEQDIFF_MAX_TABLE_CELLS") {
            self.engine.max_table_cells = cells;
        }

        if let Some(flag) = env_flag("SEQDIFF_IGNORE_CASE") {
            self.engine.ignore_case = flag;
        }

        if let Some(flag) = env_flag("SEQDIFF_IGNORE_WHITESPACE") {
            self.engine.ignore_whitespace = flag;
        }

        if let Some(flag) = env_flag("SEQDIFF_TRIM_LINES") {
            self.engine.trim_lines = flag;
        }

        if let Some(width) = env_parse::<usize>("SEQDIFF_WIDTH") {
            self.output.default_width = width;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.default_width < 20 {
            return Err(ConfigError::Invalid(
                "default_width must be at least 20".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let val = std::env::var(key).ok()?;
    match val.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, val);
            None
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let val = std::env::var(key).ok()?;
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, val);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SeqDiffConfig::default();

        assert_eq!(config.engine.context_lines, 3);
        assert_eq!(config.engine.table_limit(), Some(25_000_000));
        assert_eq!(config.output.default_width, 120);
        assert_eq!(config.engine.options(), DiffOptions::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = SeqDiffConfig::from_toml_str(
            r#"
            [engine]
            context_lines = 5
            ignore_case = true
            max_table_cells = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.context_lines, 5);
        assert!(config.engine.options().ignore_case);
        assert_eq!(config.engine.table_limit(), None);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_bad_toml() {
        let err = SeqDiffConfig::from_toml_str("[engine]\ncontext_lines = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = SeqDiffConfig::default();
        assert!(config.validate().is_ok());

        config.output.default_width = 10;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_leaves_validation_to_caller() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seqdiff.toml");
        std::fs::write(&path, "[output]\ndefault_width = 10\n").unwrap();

        let mut config = SeqDiffConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.output.default_width, 10);
        assert!(config.validate().is_err());

        config.output.default_width = 90;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = SeqDiffConfig::load(Path::new("/nonexistent/seqdiff.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_config_loading() {
        std::env::set_var("SEQDIFF_CONTEXT_LINES", "7");
        std::env::set_var("SEQDIFF_IGNORE_WHITESPACE", "yes");
        std::env::set_var("SEQDIFF_WIDTH", "not-a-number");

        let config = SeqDiffConfig::from_env();

        assert_eq!(config.engine.context_lines, 7);
        assert!(config.engine.ignore_whitespace);
        assert_eq!(config.output.default_width, 120);

        // Cleanup
        std::env::remove_var("SEQDIFF_CONTEXT_LINES");
        std::env::remove_var("SEQDIFF_IGNORE_WHITESPACE");
        std::env::remove_var("SEQDIFF_WIDTH");
    }
}
