use std::sync::OnceLock;

use regex::Regex;

use super::line::compute_diff;
use super::types::{
    DiffHunk, DiffLineType, DiffOptions, DiffResult, DiffSegment, DiffType, EnhancedDiffLine,
    EnhancedDiffResult, EnhancedDiffStats, UnifiedDiffLine,
};

/// Different output formats for diffs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffFormat {
    Unified,
    SideBySide,
    Json,
    Stats,
    Inline,
}

/// Render a hunk header in git style
pub fn format_hunk_header(hunk: &DiffHunk) -> String {
    header_line(hunk.start_left, hunk.count_left, hunk.start_right, hunk.count_right)
}

fn header_line(
    start_left: usize,
    count_left: usize,
    start_right: usize,
    count_right: usize,
) -> String {
    format!("@@ -{start_left},{count_left} +{start_right},{count_right} @@")
}

/// Numbers parsed back out of a hunk header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub start_left: usize,
    pub count_left: usize,
    pub start_right: usize,
    pub count_right: usize,
}

fn hunk_header_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@")
            .expect("hunk header pattern is valid")
    })
}

/// Parse a hunk header. An omitted count means 1, as in git output.
pub fn parse_hunk_header(header: &str) -> Option<HunkHeader> {
    let caps = hunk_header_regex().captures(header.trim_start())?;
    let number = |idx: usize| -> Option<usize> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(1),
        }
    };

    Some(HunkHeader {
        start_left: number(1)?,
        count_left: number(2)?,
        start_right: number(3)?,
        count_right: number(4)?,
    })
}

/// Flatten the basic line diff into prefixed records. Placeholders are skipped.
pub fn get_unified_diff(left: &str, right: &str, options: &DiffOptions) -> Vec<UnifiedDiffLine> {
    unified_lines(&compute_diff(left, right, options))
}

pub(crate) fn unified_lines(result: &DiffResult) -> Vec<UnifiedDiffLine> {
    let len = result.left_lines.len().max(result.right_lines.len());
    let mut out = Vec::with_capacity(len);

    for index in 0..len {
        let left = result.left_lines.get(index);
        let right = result.right_lines.get(index);

        let record = match (left, right) {
            (Some(l), _) if !l.is_placeholder() && l.kind == DiffType::Delete => {
                Some((DiffType::Delete, l.content.clone()))
            }
            (_, Some(r)) if !r.is_placeholder() && r.kind == DiffType::Insert => {
                Some((DiffType::Insert, r.content.clone()))
            }
            (Some(l), _) if !l.is_placeholder() => Some((DiffType::Equal, l.content.clone())),
            _ => None,
        };

        if let Some((kind, content)) = record {
            out.push(UnifiedDiffLine {
                prefix: kind.prefix(),
                content,
                kind,
            });
        }
    }

    out
}

/// Formats enhanced diff results into text
pub struct DiffFormatter;

impl DiffFormatter {
    /// Format as a git-style patch.
    ///
    /// Hunks without any change are omitted. Inside a block of consecutive
    /// changes all removals are printed before all additions.
    pub fn format_patch(result: &EnhancedDiffResult, old_label: &str, new_label: &str) -> String {
        let mut output = Vec::new();
        output.push(format!("--- {}", old_label));
        output.push(format!("+++ {}", new_label));

        // right line number minus left line number past the hunks seen so far
        let mut offset: isize = 0;
        for hunk in result.hunks.iter().filter(|h| !h.is_pure_context()) {
            output.push(Self::patch_header(hunk, offset));
            offset += hunk.count_right as isize - hunk.count_left as isize;

            let mut block: Vec<&EnhancedDiffLine> = Vec::new();
            for line in &hunk.lines {
                if line.is_change() {
                    block.push(line);
                    continue;
                }
                Self::flush_block(&mut block, &mut output);
                output.push(format!(" {}", line.left_content));
            }
            Self::flush_block(&mut block, &mut output);
        }

        output.join("\n")
    }

    /// Hunk header for patch output.
    ///
    /// A side with no lines in the hunk names the line the change follows on
    /// that side (0 at the top of the file), which is what patch(1) reads.
    fn patch_header(hunk: &DiffHunk, offset: isize) -> String {
        let first_left = hunk.lines.iter().find_map(|l| l.left_line_number);
        let first_right = hunk.lines.iter().find_map(|l| l.right_line_number);

        let start_left = match (first_left, first_right) {
            (Some(n), _) => n,
            (None, Some(n)) => (n - 1).checked_add_signed(-offset).unwrap_or(0),
            (None, None) => hunk.start_left,
        };
        let start_right = match (first_right, first_left) {
            (Some(n), _) => n,
            (None, Some(n)) => (n - 1).checked_add_signed(offset).unwrap_or(0),
            (None, None) => hunk.start_right,
        };

        header_line(start_left, hunk.count_left, start_right, hunk.count_right)
    }

    fn flush_block(block: &mut Vec<&EnhancedDiffLine>, output: &mut Vec<String>) {
        for line in block.iter().filter(|l| l.left_line_number.is_some()) {
            output.push(format!("-{}", line.left_content));
        }
        for line in block.iter().filter(|l| l.right_line_number.is_some()) {
            output.push(format!("+{}", line.right_content));
        }
        block.clear();
    }

    /// Format as a two-column view with line numbers
    pub fn format_side_by_side(result: &EnhancedDiffResult, width: usize) -> String {
        let half_width = width.saturating_sub(3) / 2; // Account for separator " | "
        let mut output = Vec::new();

        for (idx, hunk) in result.hunks.iter().enumerate() {
            if idx > 0 {
                output.push("...".to_string());
            }
            output.push(format_hunk_header(hunk));

            for line in &hunk.lines {
                let (left_marker, right_marker) = match line.kind {
                    DiffLineType::Equal => (' ', ' '),
                    DiffLineType::Delete => ('-', ' '),
                    DiffLineType::Insert => (' ', '+'),
                    DiffLineType::Modified => ('~', '~'),
                };
                let left = Self::cell(line.left_line_number, left_marker, &line.left_content);
                let right = Self::cell(line.right_line_number, right_marker, &line.right_content);

                output.push(format!(
                    "{} | {}",
                    Self::pad(&Self::truncate_line(&left, half_width), half_width),
                    Self::truncate_line(&right, half_width)
                ));
            }
        }

        output.join("\n")
    }

    fn cell(number: Option<usize>, marker: char, content: &str) -> String {
        match number {
            Some(n) => format!("{:>4} {} {}", n, marker, content),
            None => String::new(),
        }
    }

    /// Format hunks with word-diff markers on modified lines.
    ///
    /// Modified lines print once, prefixed `~`, with removed text as `[-..-]`
    /// and added text as `{+..+}`.
    pub fn format_inline(result: &EnhancedDiffResult) -> String {
        let mut output = Vec::new();

        // right line number minus left line number past the hunks seen so far
        let mut offset: isize = 0;
        for hunk in result.hunks.iter().filter(|h| !h.is_pure_context()) {
            output.push(Self::patch_header(hunk, offset));
            offset += hunk.count_right as isize - hunk.count_left as isize;
            for line in &hunk.lines {
                let rendered = match line.kind {
                    DiffLineType::Equal => format!(" {}", line.left_content),
                    DiffLineType::Delete => format!("-{}", line.left_content),
                    DiffLineType::Insert => format!("+{}", line.right_content),
                    DiffLineType::Modified => format!(
                        "~{}",
                        Self::interleave(
                            line.left_segments.as_deref().unwrap_or_default(),
                            line.right_segments.as_deref().unwrap_or_default(),
                        )
                    ),
                };
                output.push(rendered);
            }
        }

        output.join("\n")
    }

    /// Merge per-side segments back into one marked-up line.
    ///
    /// Equal characters correspond one to one across the sides even when the
    /// equal runs are cut at different places, so the walk is per character.
    fn interleave(left: &[DiffSegment], right: &[DiffSegment]) -> String {
        let left_chars = Self::tagged_chars(left);
        let right_chars = Self::tagged_chars(right);
        let (mut i, mut j) = (0, 0);
        let mut out = String::new();

        loop {
            let mut removed = String::new();
            while let Some(&(false, ch)) = left_chars.get(i) {
                removed.push(ch);
                i += 1;
            }
            let mut added = String::new();
            while let Some(&(false, ch)) = right_chars.get(j) {
                added.push(ch);
                j += 1;
            }
            if !removed.is_empty() {
                out.push_str(&format!("[-{}-]", removed));
            }
            if !added.is_empty() {
                out.push_str(&format!("{{+{}+}}", added));
            }

            match (left_chars.get(i), right_chars.get(j)) {
                (Some(&(_, ch)), Some(_)) => {
                    out.push(ch);
                    i += 1;
                    j += 1;
                }
                (Some(&(_, ch)), None) => {
                    out.push(ch);
                    i += 1;
                }
                (None, Some(&(_, ch))) => {
                    out.push(ch);
                    j += 1;
                }
                (None, None) => break,
            }
        }

        out
    }

    fn tagged_chars(segments: &[DiffSegment]) -> Vec<(bool, char)> {
        segments
            .iter()
            .flat_map(|seg| {
                let equal = seg.kind == DiffType::Equal;
                seg.value.chars().map(move |ch| (equal, ch))
            })
            .collect()
    }

    /// Format diff statistics as a summary
    pub fn format_stats(stats: &EnhancedDiffStats) -> String {
        let base = &stats.base;

        if base.total_changes() == 0 {
            return "No changes".to_string();
        }

        let mut parts = Vec::new();

        if base.added_lines > 0 {
            parts.push(format!(
                "{} insertion{}",
                base.added_lines,
                if base.added_lines == 1 { "" } else { "s" }
            ));
        }

        if base.removed_lines > 0 {
            parts.push(format!(
                "{} deletion{}",
                base.removed_lines,
                if base.removed_lines == 1 { "" } else { "s" }
            ));
        }

        if stats.modified_lines > 0 {
            parts.push(format!("{} modified", stats.modified_lines));
        }

        if stats.hunk_count > 0 {
            parts.push(format!(
                "{} hunk{}",
                stats.hunk_count,
                if stats.hunk_count == 1 { "" } else { "s" }
            ));
        }

        parts.join(", ")
    }

    /// Format as pretty-printed JSON
    pub fn format_json(result: &EnhancedDiffResult) -> serde_json::Result<String> {
        serde_json::to_string_pretty(result)
    }

    /// Format with the specified format type
    pub fn format(
        result: &EnhancedDiffResult,
        format: DiffFormat,
        old_label: &str,
        new_label: &str,
        width: Option<usize>,
    ) -> serde_json::Result<String> {
        Ok(match format {
            DiffFormat::Unified => Self::format_patch(result, old_label, new_label),
            DiffFormat::SideBySide => Self::format_side_by_side(result, width.unwrap_or(80)),
            DiffFormat::Stats => Self::format_stats(&result.stats),
            DiffFormat::Json => Self::format_json(result)?,
            DiffFormat::Inline => Self::format_inline(result),
        })
    }

    fn truncate_line(line: &str, max_width: usize) -> String {
        let len = line.chars().count();
        if len <= max_width {
            return line.to_string();
        }
        if max_width > 3 {
            let kept: String = line.chars().take(max_width - 3).collect();
            format!("{}...", kept)
        } else {
            line.chars().take(max_width).collect()
        }
    }

    fn pad(line: &str, width: usize) -> String {
        let len = line.chars().count();
        format!("{}{}", line, " ".repeat(width.saturating_sub(len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::enhanced::compute_enhanced_diff;

    fn create_test_diff() -> EnhancedDiffResult {
        compute_enhanced_diff(
            "line1\nline2\nline3",
            "line1\nmodified\nline3",
            &DiffOptions::default(),
            3,
        )
    }

    #[test]
    fn test_format_hunk_header() {
        let hunk = DiffHunk {
            start_left: 1,
            start_right: 1,
            count_left: 4,
            count_right: 5,
            lines: Vec::new(),
        };
        assert_eq!(format_hunk_header(&hunk), "@@ -1,4 +1,5 @@");
    }

    #[test]
    fn test_parse_hunk_header() {
        let parsed = parse_hunk_header("@@ -1,4 +1,5 @@ fn main()").unwrap();
        assert_eq!(
            parsed,
            HunkHeader {
                start_left: 1,
                count_left: 4,
                start_right: 1,
                count_right: 5,
            }
        );

        let short = parse_hunk_header("@@ -3 +7 @@").unwrap();
        assert_eq!(short.count_left, 1);
        assert_eq!(short.start_right, 7);

        assert!(parse_hunk_header("--- a/file").is_none());
    }

    #[test]
    fn test_unified_skips_placeholders() {
        let lines = get_unified_diff("a\nb\nc", "a\nx\nc", &DiffOptions::default());
        let rendered: Vec<String> = lines
            .iter()
            .map(|l| format!("{}{}", l.prefix, l.content))
            .collect();

        assert_eq!(rendered, vec![" a", "-b", "+x", " c"]);
        assert_eq!(lines[1].kind, DiffType::Delete);
    }

    #[test]
    fn test_format_patch() {
        let result = create_test_diff();
        let formatted = DiffFormatter::format_patch(&result, "old.txt", "new.txt");

        assert_eq!(
            formatted,
            "--- old.txt\n+++ new.txt\n@@ -1,3 +1,3 @@\n line1\n-line2\n+modified\n line3"
        );
    }

    #[test]
    fn test_format_patch_groups_removals_first() {
        let result = compute_enhanced_diff("a\nb\nz", "x\ny\nz", &DiffOptions::default(), 3);
        let formatted = DiffFormatter::format_patch(&result, "l", "r");
        let body: Vec<&str> = formatted.lines().skip(3).collect();

        assert_eq!(body, vec!["-a", "-b", "+x", "+y", " z"]);
    }

    #[test]
    fn test_format_patch_zero_context_starts() {
        let left = "1\n2\n3\n4\n5\n6\n7\n8\n9";
        let right = "1\n2\nnew\n3\n4\n5\n6\n7\n9";
        let result = compute_enhanced_diff(left, right, &DiffOptions::default(), 0);
        let formatted = DiffFormatter::format_patch(&result, "l", "r");
        let headers: Vec<&str> = formatted.lines().filter(|l| l.starts_with("@@")).collect();

        // insertion after left line 2, deletion of left 8 which follows right 8
        assert_eq!(headers, vec!["@@ -2,0 +3,1 @@", "@@ -8,1 +8,0 @@"]);
        // the grouper itself keeps its default start of 1
        assert_eq!(result.hunks[0].start_left, 1);
    }

    #[test]
    fn test_format_patch_insert_at_top() {
        let result = compute_enhanced_diff("b", "a\nb", &DiffOptions::default(), 0);
        let formatted = DiffFormatter::format_patch(&result, "l", "r");
        assert_eq!(formatted, "--- l\n+++ r\n@@ -0,0 +1,1 @@\n+a");
    }

    #[test]
    fn test_format_patch_identical_has_no_hunks() {
        let result = compute_enhanced_diff("same", "same", &DiffOptions::default(), 3);
        let formatted = DiffFormatter::format_patch(&result, "a", "b");
        assert_eq!(formatted, "--- a\n+++ b");
    }

    #[test]
    fn test_format_side_by_side() {
        let result = create_test_diff();
        let formatted = DiffFormatter::format_side_by_side(&result, 80);

        assert!(formatted.contains("   2 ~ line2"));
        assert!(formatted.contains("   2 ~ modified"));
        assert!(formatted.lines().skip(1).all(|l| l.contains(" | ")));
    }

    #[test]
    fn test_format_inline() {
        let result = compute_enhanced_diff(
            "let cat = 1;\nkeep",
            "let car = 1;\nkeep",
            &DiffOptions::default(),
            3,
        );
        let formatted = DiffFormatter::format_inline(&result);

        assert_eq!(formatted, "@@ -1,2 +1,2 @@\n~let ca[-t-]{+r+} = 1;\n keep");
    }

    #[test]
    fn test_interleave_whole_line_fallback() {
        let left = [DiffSegment::delete("old")];
        let right = [DiffSegment::insert("new")];
        assert_eq!(DiffFormatter::interleave(&left, &right), "[-old-]{+new+}");
    }

    #[test]
    fn test_interleave_uneven_equal_runs() {
        let left = [DiffSegment::equal("ac")];
        let right = [
            DiffSegment::equal("a"),
            DiffSegment::insert("b"),
            DiffSegment::equal("c"),
        ];
        assert_eq!(DiffFormatter::interleave(&left, &right), "a{+b+}c");
    }

    #[test]
    fn test_truncate_line_on_char_boundary() {
        assert_eq!(DiffFormatter::truncate_line("héllo wörld", 8), "héllo...");
        assert_eq!(DiffFormatter::truncate_line("short", 8), "short");
    }

    #[test]
    fn test_format_stats() {
        let result = create_test_diff();
        let stats = DiffFormatter::format_stats(&result.stats);

        assert_eq!(stats, "1 insertion, 1 deletion, 1 modified, 1 hunk");

        let same = compute_enhanced_diff("x", "x", &DiffOptions::default(), 3);
        assert_eq!(DiffFormatter::format_stats(&same.stats), "No changes");
    }

    #[test]
    fn test_format_json() {
        let result = create_test_diff();
        let json = DiffFormatter::format(&result, DiffFormat::Json, "a", "b", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["stats"]["modifiedLines"], 1);
        assert_eq!(value["hunks"][0]["lines"][1]["type"], "modified");
    }
}
