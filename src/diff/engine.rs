use super::algorithms::table_cells;
use super::enhanced::{assemble, build_enhanced_lines, DEFAULT_CONTEXT_LINES};
use super::formatter::unified_lines;
use super::inline::compute_inline_diff;
use super::line::{are_texts_identical, diff_split_lines, split_lines};
use super::types::{DiffOptions, DiffResult, DiffSegment, EnhancedDiffResult, UnifiedDiffLine};
use crate::config::EngineConfig;
use crate::error::DiffError;

/// Configured entry point to the diff pipeline.
///
/// Runs the same stages as the free functions, with preset options and context
/// and an optional cap on the size of any LCS table it builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEngine {
    options: DiffOptions,
    context_lines: usize,
    max_table_cells: Option<u64>,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self {
            options: DiffOptions::default(),
            context_lines: DEFAULT_CONTEXT_LINES,
            max_table_cells: None,
        }
    }
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            options: config.options(),
            context_lines: config.context_lines,
            max_table_cells: config.table_limit(),
        }
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_context(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    pub fn with_max_table_cells(mut self, limit: Option<u64>) -> Self {
        self.max_table_cells = limit;
        self
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn context_lines(&self) -> usize {
        self.context_lines
    }

    pub fn max_table_cells(&self) -> Option<u64> {
        self.max_table_cells
    }

    fn check(&self, left_len: usize, right_len: usize) -> Result<(), DiffError> {
        let cells = table_cells(left_len, right_len);
        match self.max_table_cells {
            Some(limit) if cells > limit => {
                tracing::warn!(cells, limit, "rejecting diff over table size limit");
                Err(DiffError::InputTooLarge { cells, limit })
            }
            _ => Ok(()),
        }
    }

    /// Line diff of two texts
    pub fn diff(&self, left: &str, right: &str) -> Result<DiffResult, DiffError> {
        let left_lines = split_lines(left);
        let right_lines = split_lines(right);
        self.check(left_lines.len(), right_lines.len())?;
        Ok(diff_split_lines(&left_lines, &right_lines, &self.options))
    }

    /// Character diff of two single lines
    pub fn inline_diff(&self, left: &str, right: &str) -> Result<Vec<DiffSegment>, DiffError> {
        self.check(left.chars().count(), right.chars().count())?;
        Ok(compute_inline_diff(left, right, &self.options))
    }

    /// Enhanced, hunk-grouped diff.
    ///
    /// Modified pairs whose character table would exceed the limit are
    /// highlighted as whole lines rather than rejected.
    pub fn enhanced_diff(&self, left: &str, right: &str) -> Result<EnhancedDiffResult, DiffError> {
        let result = self.diff(left, right)?;
        let lines = build_enhanced_lines(&result, &self.options, self.max_table_cells);
        Ok(assemble(&result, lines, self.context_lines))
    }

    /// Flattened unified records
    pub fn unified_diff(&self, left: &str, right: &str) -> Result<Vec<UnifiedDiffLine>, DiffError> {
        Ok(unified_lines(&self.diff(left, right)?))
    }

    /// Whether two texts are equal under the configured options
    pub fn identical(&self, left: &str, right: &str) -> bool {
        are_texts_identical(left, right, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::types::DiffLineType;

    #[test]
    fn test_engine_defaults() {
        let engine = DiffEngine::new();
        assert_eq!(engine.context_lines(), 3);
        assert_eq!(engine.max_table_cells(), None);
        assert_eq!(*engine.options(), DiffOptions::default());
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig {
            context_lines: 1,
            max_table_cells: 0,
            ignore_case: true,
            ..Default::default()
        };
        let engine = DiffEngine::from_config(&config);

        assert_eq!(engine.context_lines(), 1);
        assert_eq!(engine.max_table_cells(), None);
        assert!(engine.options().ignore_case);
    }

    #[test]
    fn test_engine_matches_free_functions() {
        let engine = DiffEngine::new();
        let left = "a\nb\nc\nd";
        let right = "a\nB\nc\nd\ne";

        let via_engine = engine.enhanced_diff(left, right).unwrap();
        let direct = crate::diff::compute_enhanced_diff(left, right, &DiffOptions::default(), 3);
        assert_eq!(via_engine, direct);
    }

    #[test]
    fn test_size_guard_rejects_large_input() {
        let engine = DiffEngine::new().with_max_table_cells(Some(10));
        let err = engine.diff("1\n2\n3", "1\n2\n3\n4").unwrap_err();

        assert_eq!(err, DiffError::InputTooLarge { cells: 20, limit: 10 });
        assert!(err.to_string().contains("20 cells"));
    }

    #[test]
    fn test_size_guard_allows_small_input() {
        let engine = DiffEngine::new().with_max_table_cells(Some(100));
        assert!(engine.diff("a\nb", "a\nc").is_ok());
        assert!(engine.inline_diff("cat", "car").is_ok());
    }

    #[test]
    fn test_inline_guard() {
        let engine = DiffEngine::new().with_max_table_cells(Some(8));
        assert!(engine.inline_diff("abcd", "abce").is_err());
    }

    #[test]
    fn test_enhanced_degrades_long_modified_lines() {
        let engine = DiffEngine::new().with_max_table_cells(Some(20));
        let result = engine.enhanced_diff("x\nlonger old line", "x\nlonger new line").unwrap();

        let modified = result
            .lines()
            .find(|l| l.kind == DiffLineType::Modified)
            .unwrap();
        assert_eq!(modified.left_segments.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_engine_options() {
        let engine = DiffEngine::new().with_options(DiffOptions::new().ignore_case(true));
        assert!(engine.identical("ABC", "abc"));
        let unified = engine.unified_diff("ABC", "abc").unwrap();
        assert_eq!(unified.len(), 1);
        assert_eq!(unified[0].prefix, ' ');
    }
}
