//! Diff computation and formatting module
//!
//! The pipeline runs strictly downward: normalization, LCS table, backtrack,
//! aligned line result, modified-line pairing with character spans, hunk
//! grouping and finally text rendering. Every stage is a pure function of its
//! inputs, so any of them may be called concurrently from separate threads.

pub mod algorithms;
pub mod engine;
pub mod enhanced;
pub mod formatter;
pub mod hunks;
pub mod inline;
pub mod line;
pub mod normalize;
pub mod types;

// Re-export the main types for easier use
pub use algorithms::{EditOp, LcsTable};
pub use engine::DiffEngine;
pub use enhanced::{compute_enhanced_diff, DEFAULT_CONTEXT_LINES};
pub use formatter::{
    format_hunk_header, get_unified_diff, parse_hunk_header, DiffFormat, DiffFormatter,
    HunkHeader,
};
pub use hunks::group_hunks;
pub use inline::compute_inline_diff;
pub use line::{are_texts_identical, compute_diff, split_lines};
pub use types::{
    DiffHunk, DiffLine, DiffLineType, DiffOptions, DiffResult, DiffSegment, DiffStats, DiffType,
    EnhancedDiffLine, EnhancedDiffResult, EnhancedDiffStats, UnifiedDiffLine,
};

/// Convenience function to render a git-style patch with default settings
pub fn generate_unified_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    let result = compute_enhanced_diff(old, new, &DiffOptions::default(), DEFAULT_CONTEXT_LINES);
    DiffFormatter::format_patch(&result, old_label, new_label)
}

/// Convenience function to get diff statistics
pub fn get_diff_stats(old: &str, new: &str) -> DiffStats {
    compute_diff(old, new, &DiffOptions::default()).stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convenience_functions() {
        let old = "line1\nline2\nline3";
        let new = "line1\nmodified\nline3";

        let unified = generate_unified_diff(old, new, "old.txt", "new.txt");
        assert!(unified.contains("--- old.txt"));
        assert!(unified.contains("+modified"));

        let stats = get_diff_stats(old, new);
        assert_eq!(stats.added_lines, 1);
        assert_eq!(stats.removed_lines, 1);
    }
}
