//! Comparison projections for lines and characters
//!
//! Transforms run in a fixed order: trim, then whitespace collapse, then
//! lower-casing. Only the projection is compared; callers keep the original.

use std::borrow::Cow;

use super::types::DiffOptions;

/// Normalize a line for equality testing
pub fn normalize_line<'a>(line: &'a str, options: &DiffOptions) -> Cow<'a, str> {
    let mut value = Cow::Borrowed(line);

    if options.trim_lines {
        value = match value {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
        };
    }

    if options.ignore_whitespace {
        value = Cow::Owned(collapse_whitespace(&value));
    }

    if options.ignore_case {
        value = Cow::Owned(value.to_lowercase());
    }

    value
}

/// Compare two characters. Only case folding applies at this level.
///
/// Folding uses the full lowercase mapping, so a char whose lowercase form
/// expands to several chars matches the same way it would inside a line.
pub fn chars_equal(a: char, b: char, options: &DiffOptions) -> bool {
    if a == b {
        return true;
    }
    options.ignore_case && a.to_lowercase().eq(b.to_lowercase())
}

/// Replace every whitespace run with one space and drop it at both ends
fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for word in value.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Pre-compute normalized projections for a list of lines
pub fn normalize_lines<'a>(lines: &[&'a str], options: &DiffOptions) -> Vec<Cow<'a, str>> {
    lines.iter().map(|line| normalize_line(line, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_options_is_identity() {
        let options = DiffOptions::default();
        assert_eq!(normalize_line("  Hello  World ", &options), "  Hello  World ");
        assert!(matches!(normalize_line("x", &options), Cow::Borrowed(_)));
    }

    #[test]
    fn test_trim_only() {
        let options = DiffOptions::new().trim_lines(true);
        assert_eq!(normalize_line("\t a  b \n", &options), "a  b");
    }

    #[test]
    fn test_collapse_whitespace() {
        let options = DiffOptions::new().ignore_whitespace(true);
        assert_eq!(normalize_line("a \t  b", &options), "a b");
        assert_eq!(normalize_line("line2  ", &options), "line2");
        assert_eq!(normalize_line("   ", &options), "");
    }

    #[test]
    fn test_all_transforms() {
        let options = DiffOptions::new()
            .trim_lines(true)
            .ignore_whitespace(true)
            .ignore_case(true);
        assert_eq!(normalize_line("  Foo   BAR ", &options), "foo bar");
    }

    #[test]
    fn test_chars_equal() {
        let folded = DiffOptions::new().ignore_case(true);
        assert!(chars_equal('Q', 'q', &folded));
        assert!(!chars_equal('Q', 'q', &DiffOptions::default()));
        // whitespace options never touch characters
        let ws = DiffOptions::new().ignore_whitespace(true).trim_lines(true);
        assert!(!chars_equal(' ', '\t', &ws));
    }

    #[test]
    fn test_char_folding_matches_line_folding() {
        let folded = DiffOptions::new().ignore_case(true);
        for (a, b) in [('\u{130}', 'i'), ('A', 'a'), ('\u{1E9E}', '\u{DF}'), ('\u{130}', '\u{130}')] {
            let line_equal =
                normalize_line(&a.to_string(), &folded) == normalize_line(&b.to_string(), &folded);
            assert_eq!(chars_equal(a, b, &folded), line_equal, "{a:?} vs {b:?}");
        }
        assert!(!chars_equal('\u{130}', 'i', &folded));
    }
}
