//! Context-windowed hunk grouping

use super::types::{DiffHunk, EnhancedDiffLine};

/// Group enhanced lines into git-style hunks.
///
/// Each changed line opens a window of `context_lines` on either side, clamped
/// to the sequence. Windows that touch or overlap merge. With no changes at all
/// a single hunk spans the whole input.
pub fn group_hunks(lines: &[EnhancedDiffLine], context_lines: usize) -> Vec<DiffHunk> {
    if lines.is_empty() {
        return Vec::new();
    }

    let ranges = change_ranges(lines, context_lines);
    if ranges.is_empty() {
        return vec![make_hunk(lines)];
    }

    ranges
        .into_iter()
        .map(|(start, end)| make_hunk(&lines[start..=end]))
        .collect()
}

/// Inclusive index ranges covering every change plus its context
fn change_ranges(lines: &[EnhancedDiffLine], context_lines: usize) -> Vec<(usize, usize)> {
    let last = lines.len() - 1;
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for (index, _) in lines.iter().enumerate().filter(|(_, line)| line.is_change()) {
        let start = index.saturating_sub(context_lines);
        let end = index.saturating_add(context_lines).min(last);

        match ranges.last_mut() {
            Some((_, last_end)) if start <= last_end.saturating_add(1) => {
                *last_end = (*last_end).max(end);
            }
            _ => ranges.push((start, end)),
        }
    }

    ranges
}

fn make_hunk(lines: &[EnhancedDiffLine]) -> DiffHunk {
    let first = lines.first();
    DiffHunk {
        start_left: first.and_then(|l| l.left_line_number).unwrap_or(1),
        start_right: first.and_then(|l| l.right_line_number).unwrap_or(1),
        count_left: lines.iter().filter(|l| l.left_line_number.is_some()).count(),
        count_right: lines.iter().filter(|l| l.right_line_number.is_some()).count(),
        lines: lines.to_vec(),
    }
}
