//! Character-level diff with segment merging

use super::algorithms::{diff_by, EditOp};
use super::normalize::chars_equal;
use super::types::{DiffOptions, DiffSegment, DiffType};

/// Character diff of two single lines.
///
/// Equal segments carry the left-hand text. No two adjacent segments share a
/// type.
pub fn compute_inline_diff(left: &str, right: &str, options: &DiffOptions) -> Vec<DiffSegment> {
    if left.is_empty() && right.is_empty() {
        return Vec::new();
    }
    if left.is_empty() {
        return vec![DiffSegment::insert(right)];
    }
    if right.is_empty() {
        return vec![DiffSegment::delete(left)];
    }

    let left_chars: Vec<char> = left.chars().collect();
    let right_chars: Vec<char> = right.chars().collect();
    let ops = char_ops(&left_chars, &right_chars, options);

    let mut segments = Vec::new();
    for op in ops {
        let (kind, ch) = match op {
            EditOp::Equal { left, .. } => (DiffType::Equal, left_chars[left]),
            EditOp::Delete { left } => (DiffType::Delete, left_chars[left]),
            EditOp::Insert { right } => (DiffType::Insert, right_chars[right]),
        };
        push_char(&mut segments, kind, ch);
    }
    segments
}

/// Character diff split per side.
///
/// The left side holds equal and delete segments with equal text taken from
/// the left line; the right side holds equal and insert segments with equal
/// text taken from the right line. The two only differ in equal text when case
/// folding is active.
pub fn compute_side_segments(
    left: &str,
    right: &str,
    options: &DiffOptions,
) -> (Vec<DiffSegment>, Vec<DiffSegment>) {
    let left_chars: Vec<char> = left.chars().collect();
    let right_chars: Vec<char> = right.chars().collect();

    let mut left_segments = Vec::new();
    let mut right_segments = Vec::new();

    for op in char_ops(&left_chars, &right_chars, options) {
        match op {
            EditOp::Equal { left, right } => {
                push_char(&mut left_segments, DiffType::Equal, left_chars[left]);
                push_char(&mut right_segments, DiffType::Equal, right_chars[right]);
            }
            EditOp::Delete { left } => {
                push_char(&mut left_segments, DiffType::Delete, left_chars[left]);
            }
            EditOp::Insert { right } => {
                push_char(&mut right_segments, DiffType::Insert, right_chars[right]);
            }
        }
    }

    (left_segments, right_segments)
}

fn char_ops(left: &[char], right: &[char], options: &DiffOptions) -> Vec<EditOp> {
    diff_by(left, right, |a, b| chars_equal(*a, *b, options))
}

/// Append a character, extending the last segment when the type matches
fn push_char(segments: &mut Vec<DiffSegment>, kind: DiffType, ch: char) {
    match segments.last_mut() {
        Some(last) if last.kind == kind => last.value.push(ch),
        _ => segments.push(DiffSegment::new(kind, ch.to_string())),
    }
}
