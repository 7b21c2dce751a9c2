//! Result types produced by the diff pipeline
//!
//! Every structure here is created fresh per call and owned by the caller.
//! Field names serialize in camelCase so JSON output can be consumed directly
//! by a rendering layer.

use serde::{Deserialize, Serialize};

/// Options that affect equality testing only. Original values are always
/// carried into the results untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiffOptions {
    /// Collapse whitespace runs and ignore leading/trailing whitespace
    pub ignore_whitespace: bool,
    /// Compare case-insensitively
    pub ignore_case: bool,
    /// Trim each line before comparing
    pub trim_lines: bool,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_whitespace(mut self, enabled: bool) -> Self {
        self.ignore_whitespace = enabled;
        self
    }

    pub fn ignore_case(mut self, enabled: bool) -> Self {
        self.ignore_case = enabled;
        self
    }

    pub fn trim_lines(mut self, enabled: bool) -> Self {
        self.trim_lines = enabled;
        self
    }
}

/// Kind of a basic diff entry or character segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    Equal,
    Insert,
    Delete,
}

impl DiffType {
    /// Prefix used in unified output
    pub fn prefix(&self) -> char {
        match self {
            Self::Equal => ' ',
            Self::Insert => '+',
            Self::Delete => '-',
        }
    }
}

/// A maximal run of same-type characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    #[serde(rename = "type")]
    pub kind: DiffType,
    pub value: String,
}

impl DiffSegment {
    pub fn new(kind: DiffType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn equal(value: impl Into<String>) -> Self {
        Self::new(DiffType::Equal, value)
    }

    pub fn insert(value: impl Into<String>) -> Self {
        Self::new(DiffType::Insert, value)
    }

    pub fn delete(value: impl Into<String>) -> Self {
        Self::new(DiffType::Delete, value)
    }
}

/// One side of an aligned line diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    /// `None` only for the placeholder that keeps both sides index-aligned
    pub line_number: Option<usize>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: DiffType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<DiffSegment>>,
}

impl DiffLine {
    pub fn numbered(line_number: usize, content: impl Into<String>, kind: DiffType) -> Self {
        Self {
            line_number: Some(line_number),
            content: content.into(),
            kind,
            segments: None,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            line_number: None,
            content: String::new(),
            kind: DiffType::Equal,
            segments: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.line_number.is_none()
    }
}

/// Aggregate line and character counts for a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    /// `max(left line count, right line count)` of the raw inputs
    pub total_lines: usize,
    pub added_lines: usize,
    pub removed_lines: usize,
    pub unchanged_lines: usize,
    pub added_chars: usize,
    pub removed_chars: usize,
}

impl DiffStats {
    pub fn total_changes(&self) -> usize {
        self.added_lines + self.removed_lines
    }

    pub fn net_change(&self) -> isize {
        self.added_lines as isize - self.removed_lines as isize
    }

    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }
}

/// Index-aligned line diff of two texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub left_lines: Vec<DiffLine>,
    pub right_lines: Vec<DiffLine>,
    pub stats: DiffStats,
}

/// Classification of a line in the enhanced view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineType {
    Equal,
    Modified,
    Delete,
    Insert,
}

/// A line in the enhanced view, carrying both sides at once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedDiffLine {
    pub left_line_number: Option<usize>,
    pub right_line_number: Option<usize>,
    pub left_content: String,
    pub right_content: String,
    #[serde(rename = "type")]
    pub kind: DiffLineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_segments: Option<Vec<DiffSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_segments: Option<Vec<DiffSegment>>,
}

impl EnhancedDiffLine {
    pub fn is_change(&self) -> bool {
        self.kind != DiffLineType::Equal
    }
}

/// A contiguous, context-padded group of lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
    pub start_left: usize,
    pub start_right: usize,
    pub count_left: usize,
    pub count_right: usize,
    pub lines: Vec<EnhancedDiffLine>,
}

impl DiffHunk {
    /// True when the hunk holds no changed line at all
    pub fn is_pure_context(&self) -> bool {
        self.lines.iter().all(|line| !line.is_change())
    }
}

/// Stats for the enhanced view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedDiffStats {
    #[serde(flatten)]
    pub base: DiffStats,
    pub hunk_count: usize,
    pub modified_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedDiffResult {
    pub hunks: Vec<DiffHunk>,
    pub stats: EnhancedDiffStats,
}

impl EnhancedDiffResult {
    /// Iterate every line of every hunk in order
    pub fn lines(&self) -> impl Iterator<Item = &EnhancedDiffLine> {
        self.hunks.iter().flat_map(|hunk| hunk.lines.iter())
    }
}

/// A flattened line of unified output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedDiffLine {
    pub prefix: char,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: DiffType,
}
