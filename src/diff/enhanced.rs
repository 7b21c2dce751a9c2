//! Enhanced diff: pairs deletions with insertions into modified lines
//!
//! The basic line diff is re-read in lockstep, cut into runs (every equal line
//! on its own, every maximal stretch of changes as one run), and within each
//! change run the first `min(deletes, inserts)` deletions are paired with the
//! insertions at the same position. Pairing is purely positional.

use super::algorithms::table_cells;
use super::hunks::group_hunks;
use super::inline::compute_side_segments;
use super::line::compute_diff;
use super::types::{
    DiffLineType, DiffOptions, DiffResult, DiffSegment, DiffType, EnhancedDiffLine,
    EnhancedDiffResult, EnhancedDiffStats,
};

/// Default number of context lines around each change
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// A line change recovered from the aligned arrays
#[derive(Debug, Clone, Copy)]
enum RawChange<'a> {
    Equal {
        left_number: Option<usize>,
        right_number: Option<usize>,
        left: &'a str,
        right: &'a str,
    },
    Delete {
        number: usize,
        content: &'a str,
    },
    Insert {
        number: usize,
        content: &'a str,
    },
}

/// Enhanced diff of two full texts
pub fn compute_enhanced_diff(
    left: &str,
    right: &str,
    options: &DiffOptions,
    context_lines: usize,
) -> EnhancedDiffResult {
    let result = compute_diff(left, right, options);
    let lines = build_enhanced_lines(&result, options, None);
    assemble(&result, lines, context_lines)
}

/// Group enhanced lines into hunks and attach the combined stats
pub(crate) fn assemble(
    result: &DiffResult,
    lines: Vec<EnhancedDiffLine>,
    context_lines: usize,
) -> EnhancedDiffResult {
    let modified_lines = lines
        .iter()
        .filter(|line| line.kind == DiffLineType::Modified)
        .count();
    let hunks = group_hunks(&lines, context_lines);

    tracing::debug!(
        lines = lines.len(),
        modified = modified_lines,
        hunks = hunks.len(),
        "grouped enhanced diff"
    );

    EnhancedDiffResult {
        stats: EnhancedDiffStats {
            base: result.stats,
            hunk_count: hunks.len(),
            modified_lines,
        },
        hunks,
    }
}

/// Build the flat enhanced line sequence.
///
/// `inline_limit` caps the character table for a modified pair; a pair above
/// it is highlighted as a whole-line delete/insert instead.
pub(crate) fn build_enhanced_lines(
    result: &DiffResult,
    options: &DiffOptions,
    inline_limit: Option<u64>,
) -> Vec<EnhancedDiffLine> {
    let changes = raw_changes(result);
    let mut lines = Vec::with_capacity(changes.len());
    let mut run: Vec<RawChange<'_>> = Vec::new();

    for change in changes {
        match change {
            RawChange::Equal {
                left_number,
                right_number,
                left,
                right,
            } => {
                flush_run(&mut run, &mut lines, options, inline_limit);
                lines.push(EnhancedDiffLine {
                    left_line_number: left_number,
                    right_line_number: right_number,
                    left_content: left.to_string(),
                    right_content: right.to_string(),
                    kind: DiffLineType::Equal,
                    left_segments: None,
                    right_segments: None,
                });
            }
            other => run.push(other),
        }
    }
    flush_run(&mut run, &mut lines, options, inline_limit);

    lines
}

fn raw_changes(result: &DiffResult) -> Vec<RawChange<'_>> {
    let len = result.left_lines.len().max(result.right_lines.len());
    let mut changes = Vec::with_capacity(len);

    for index in 0..len {
        let left = result.left_lines.get(index);
        let right = result.right_lines.get(index);

        let deleted = left.and_then(|l| match (l.line_number, l.kind) {
            (Some(number), DiffType::Delete) => Some(RawChange::Delete {
                number,
                content: l.content.as_str(),
            }),
            _ => None,
        });
        let inserted = right.and_then(|r| match (r.line_number, r.kind) {
            (Some(number), DiffType::Insert) => Some(RawChange::Insert {
                number,
                content: r.content.as_str(),
            }),
            _ => None,
        });

        let change = deleted.or(inserted).unwrap_or_else(|| RawChange::Equal {
            left_number: left.and_then(|l| l.line_number),
            right_number: right.and_then(|r| r.line_number),
            left: left.map(|l| l.content.as_str()).unwrap_or(""),
            right: right.map(|r| r.content.as_str()).unwrap_or(""),
        });
        changes.push(change);
    }

    changes
}

/// Resolve a change run into modified, deleted and inserted lines
fn flush_run(
    run: &mut Vec<RawChange<'_>>,
    lines: &mut Vec<EnhancedDiffLine>,
    options: &DiffOptions,
    inline_limit: Option<u64>,
) {
    if run.is_empty() {
        return;
    }

    let mut deletes = Vec::new();
    let mut inserts = Vec::new();
    for change in run.drain(..) {
        match change {
            RawChange::Delete { number, content } => deletes.push((number, content)),
            RawChange::Insert { number, content } => inserts.push((number, content)),
            RawChange::Equal { .. } => {}
        }
    }

    let paired = deletes.len().min(inserts.len());

    for (&(left_number, left), &(right_number, right)) in
        deletes.iter().zip(inserts.iter()).take(paired)
    {
        let (left_segments, right_segments) = pair_segments(left, right, options, inline_limit);
        lines.push(EnhancedDiffLine {
            left_line_number: Some(left_number),
            right_line_number: Some(right_number),
            left_content: left.to_string(),
            right_content: right.to_string(),
            kind: DiffLineType::Modified,
            left_segments: Some(left_segments),
            right_segments: Some(right_segments),
        });
    }

    for &(number, content) in &deletes[paired..] {
        lines.push(EnhancedDiffLine {
            left_line_number: Some(number),
            right_line_number: None,
            left_content: content.to_string(),
            right_content: String::new(),
            kind: DiffLineType::Delete,
            left_segments: None,
            right_segments: None,
        });
    }

    for &(number, content) in &inserts[paired..] {
        lines.push(EnhancedDiffLine {
            left_line_number: None,
            right_line_number: Some(number),
            left_content: String::new(),
            right_content: content.to_string(),
            kind: DiffLineType::Insert,
            left_segments: None,
            right_segments: None,
        });
    }
}

fn pair_segments(
    left: &str,
    right: &str,
    options: &DiffOptions,
    inline_limit: Option<u64>,
) -> (Vec<DiffSegment>, Vec<DiffSegment>) {
    let cells = table_cells(left.chars().count(), right.chars().count());
    match inline_limit {
        Some(limit) if cells > limit => {
            tracing::debug!(cells, limit, "inline diff over limit, highlighting whole line");
            (whole_line(DiffType::Delete, left), whole_line(DiffType::Insert, right))
        }
        _ => compute_side_segments(left, right, options),
    }
}

fn whole_line(kind: DiffType, content: &str) -> Vec<DiffSegment> {
    if content.is_empty() {
        Vec::new()
    } else {
        vec![DiffSegment::new(kind, content)]
    }
}
