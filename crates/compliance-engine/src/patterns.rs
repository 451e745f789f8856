//! Label literals and line helpers shared by the brand-kit extractors

/// Label line introducing the primary typeface (matched on the whole trimmed line)
pub const PRIMARY_LABEL: &str = "primary";

/// Label line introducing the secondary typeface
pub const SECONDARY_LABEL: &str = "secondary";

/// Phrase that opens the logo clear-space section (case-insensitive)
pub const SAFE_ZONE_MARKER: &str = "the safe zone";

/// Phrase identifying the sentence that carries the clear-space measurement
pub const SAFE_ZONE_VALUE_MARKER: &str = "x is";

/// Answer lines from yes/no example grids that close a section
pub const SECTION_STOP_WORDS: &[&str] = &["yes", "no"];

/// Page-level gate for logo colours. Matched case-sensitively against raw page text.
pub const LOGO_COLOUR_GATE: &str = "primary";

/// Prefix of a hex colour token line
pub const COLOUR_TOKEN_PREFIX: char = '#';

/// Split page text into lines using universal-newline rules.
///
/// Recognises `\n`, `\r\n`, `\r` and the other Unicode line boundaries
/// (vertical tab, form feed, file/group/record separators, NEL, LS, PS).
/// A trailing line break does not produce a trailing empty line.
pub fn page_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
                end += 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// True when the whole trimmed line equals `label`, ignoring case
pub fn is_label_line(line: &str, label: &str) -> bool {
    line.trim().to_lowercase() == label
}

/// Case-insensitive substring test; `needle` must already be lowercase
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// The trimmed line if it looks like a colour token (`#...`), no validation beyond the prefix
pub fn colour_token(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed.starts_with(COLOUR_TOKEN_PREFIX).then_some(trimmed)
}

/// All colour tokens of one page, in line order
pub fn page_colour_tokens(page: &str) -> impl Iterator<Item = String> + '_ {
    page_lines(page)
        .into_iter()
        .filter_map(colour_token)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lines_handles_mixed_line_endings() {
        assert_eq!(page_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(page_lines("a\u{2028}b\x0cc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_page_lines_keeps_blank_lines_but_no_trailing_one() {
        assert_eq!(page_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(page_lines("\n"), vec![""]);
        assert!(page_lines("").is_empty());
    }

    #[test]
    fn test_is_label_line_is_whole_line_match() {
        assert!(is_label_line("  PRIMARY ", PRIMARY_LABEL));
        assert!(!is_label_line("primary colours", PRIMARY_LABEL));
    }

    #[test]
    fn test_colour_token() {
        assert_eq!(colour_token("  #AABBCC "), Some("#AABBCC"));
        assert_eq!(colour_token("#fff"), Some("#fff"));
        assert_eq!(colour_token("Colour #AABBCC"), None);
    }

    #[test]
    fn test_page_colour_tokens_in_line_order() {
        let tokens: Vec<String> = page_colour_tokens("#1\ntext\n #2").collect();
        assert_eq!(tokens, vec!["#1", "#2"]);
    }
}
