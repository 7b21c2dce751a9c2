//! Line-level diff and the aligned result builder

use super::algorithms::{diff_by, EditOp};
use super::normalize::{normalize_line, normalize_lines};
use super::types::{DiffLine, DiffOptions, DiffResult, DiffStats, DiffType};

/// Split a text into lines.
///
/// Splits on `\n` and strips one trailing `\r` per line, so CRLF input reads
/// the same as LF input. An empty text is a single empty line and a trailing
/// terminator yields a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Line diff of two full texts
pub fn compute_diff(left: &str, right: &str, options: &DiffOptions) -> DiffResult {
    let left_lines = split_lines(left);
    let right_lines = split_lines(right);
    diff_split_lines(&left_lines, &right_lines, options)
}

/// Line diff of two pre-split texts
pub(crate) fn diff_split_lines(left: &[&str], right: &[&str], options: &DiffOptions) -> DiffResult {
    let left_keys = normalize_lines(left, options);
    let right_keys = normalize_lines(right, options);
    let ops = diff_by(&left_keys, &right_keys, |a, b| a == b);

    let result = build_result(&ops, left, right);
    tracing::debug!(
        left_lines = left.len(),
        right_lines = right.len(),
        added = result.stats.added_lines,
        removed = result.stats.removed_lines,
        "computed line diff"
    );
    result
}

/// Turn an edit script into index-aligned left/right arrays plus stats
fn build_result(ops: &[EditOp], left: &[&str], right: &[&str]) -> DiffResult {
    let mut left_lines = Vec::with_capacity(ops.len());
    let mut right_lines = Vec::with_capacity(ops.len());
    let mut stats = DiffStats {
        total_lines: left.len().max(right.len()),
        ..Default::default()
    };

    let mut left_num = 1usize;
    let mut right_num = 1usize;

    for op in ops {
        match *op {
            EditOp::Equal { left: l, right: r } => {
                left_lines.push(DiffLine::numbered(left_num, line_at(left, l), DiffType::Equal));
                right_lines.push(DiffLine::numbered(right_num, line_at(right, r), DiffType::Equal));
                left_num += 1;
                right_num += 1;
                stats.unchanged_lines += 1;
            }
            EditOp::Delete { left: l } => {
                let content = line_at(left, l);
                stats.removed_lines += 1;
                stats.removed_chars += content.chars().count();
                left_lines.push(DiffLine::numbered(left_num, content, DiffType::Delete));
                right_lines.push(DiffLine::placeholder());
                left_num += 1;
            }
            EditOp::Insert { right: r } => {
                let content = line_at(right, r);
                stats.added_lines += 1;
                stats.added_chars += content.chars().count();
                left_lines.push(DiffLine::placeholder());
                right_lines.push(DiffLine::numbered(right_num, content, DiffType::Insert));
                right_num += 1;
            }
        }
    }

    DiffResult {
        left_lines,
        right_lines,
        stats,
    }
}

fn line_at<'a>(lines: &[&'a str], index: usize) -> &'a str {
    lines.get(index).copied().unwrap_or("")
}

/// Compare the two whole texts under the normalizer, without a table.
///
/// The texts are normalized as single values, so trimming only touches their
/// outer ends and whitespace collapse treats line breaks as whitespace.
pub fn are_texts_identical(left: &str, right: &str, options: &DiffOptions) -> bool {
    normalize_line(left, options) == normalize_line(right, options)
}
