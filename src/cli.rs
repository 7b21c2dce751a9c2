use std::path::PathBuf;
use clap::{Parser, ValueEnum};

use crate::config::SeqDiffConfig;
use crate::diff::DiffFormat;

#[derive(Parser, Debug)]
#[command(name = "seqdiff")]
#[command(author = "seqdiff Team")]
#[command(version = "0.2.0")]
#[command(about = "Compare two text files line by line with inline change highlighting")]
#[command(long_about = "seqdiff computes an LCS-based line diff of two files, pairs removed and added lines into modified lines with character-level highlights, and prints git-style hunks, a side-by-side view, JSON, or a summary.")]
pub struct Cli {
    /// Original file
    #[arg(value_name = "LEFT", help = "Original file (use - for stdin)")]
    pub left: PathBuf,

    /// Changed file
    #[arg(value_name = "RIGHT", help = "Changed file (use - for stdin)")]
    pub right: PathBuf,

    /// Diff context lines
    #[arg(short = 'U', long, help = "Number of context lines in hunks")]
    pub context: Option<usize>,

    /// Case-insensitive comparison
    #[arg(short = 'i', long, help = "Ignore case differences")]
    pub ignore_case: bool,

    /// Whitespace-insensitive comparison
    #[arg(short = 'w', long, help = "Ignore changes in amount of whitespace")]
    pub ignore_whitespace: bool,

    /// Trim lines before comparing
    #[arg(long, help = "Ignore leading and trailing whitespace")]
    pub trim: bool,

    /// Output format
    #[arg(long, default_value = "unified", help = "Output format")]
    pub format: OutputFormat,

    /// Width for side-by-side output
    #[arg(long, help = "Total width of side-by-side output")]
    pub width: Option<usize>,

    /// Config file
    #[arg(long, value_name = "PATH", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Size guard override
    #[arg(long, value_name = "N", help = "Largest diff table to build (0 = unlimited)")]
    pub max_cells: Option<u64>,

    /// Disable colors in output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    /// Only report whether files differ
    #[arg(short = 'q', long, help = "Report only whether the files differ")]
    pub brief: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Git-style unified patch (default)
    Unified,
    /// Two columns with line numbers
    SideBySide,
    /// JSON for scripting
    Json,
    /// One-line summary
    Stats,
    /// Hunks with inline word-diff markers on modified lines
    Inline,
}

impl From<OutputFormat> for DiffFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Unified => DiffFormat::Unified,
            OutputFormat::SideBySide => DiffFormat::SideBySide,
            OutputFormat::Json => DiffFormat::Json,
            OutputFormat::Stats => DiffFormat::Stats,
            OutputFormat::Inline => DiffFormat::Inline,
        }
    }
}

impl Cli {
    /// Apply command line flags on top of a loaded configuration
    pub fn apply_to(&self, config: &mut SeqDiffConfig) {
        if let Some(context) = self.context {
            config.engine.context_lines = context;
        }
        if let Some(cells) = self.max_cells {
            config.engine.max_table_cells = cells;
        }
        if let Some(width) = self.width {
            config.output.default_width = width;
        }
        // flags only ever switch options on
        config.engine.ignore_case |= self.ignore_case;
        config.engine.ignore_whitespace |= self.ignore_whitespace;
        config.engine.trim_lines |= self.trim;
        if self.no_color {
            config.output.color = false;
        }
    }

    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        let stdin = std::path::Path::new("-");
        if self.left == stdin && self.right == stdin {
            return Err("Only one input can be read from stdin".to_string());
        }

        for path in [&self.left, &self.right] {
            if path.as_path() == stdin {
                continue;
            }
            if !path.exists() {
                return Err(format!("Path does not exist: {}", path.display()));
            }
            if path.is_dir() {
                return Err(format!("Path is a directory: {}", path.display()));
            }
        }

        if matches!(self.width, Some(w) if w < 20) {
            return Err("Width must be at least 20".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "seqdiff", "a.txt", "b.txt", "-U", "5", "-i", "--format", "side-by-side",
        ])
        .unwrap();

        assert_eq!(cli.context, Some(5));
        assert!(cli.ignore_case);
        assert!(!cli.ignore_whitespace);
        assert_eq!(cli.format, OutputFormat::SideBySide);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "seqdiff", "a", "b", "-w", "--max-cells", "0", "--no-color", "--width", "90",
        ])
        .unwrap();
        let mut config = SeqDiffConfig::default();
        cli.apply_to(&mut config);

        assert!(config.engine.ignore_whitespace);
        assert_eq!(config.engine.table_limit(), None);
        assert!(!config.output.color);
        assert_eq!(config.output.default_width, 90);
        // untouched values keep their config defaults
        assert_eq!(config.engine.context_lines, 3);
    }

    #[test]
    fn test_validate_missing_path() {
        let cli = Cli::try_parse_from(["seqdiff", "/nonexistent/a", "/nonexistent/b"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_double_stdin() {
        let cli = Cli::try_parse_from(["seqdiff", "-", "-"]).unwrap();
        assert!(cli.validate().unwrap_err().contains("stdin"));
    }
}
