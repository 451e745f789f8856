// Colour token extraction (logo colours and full palette)
use crate::patterns::{page_colour_tokens, LOGO_COLOUR_GATE};
use shared_types::{ColourPalette, LogoColours};

/// Collects colour tokens from pages whose raw text contains "primary".
///
/// The gate is case-sensitive: a page that only says "Primary" or "PRIMARY"
/// contributes nothing, unlike the case-insensitive font and safe-zone labels.
pub fn extract_logo_colours<S: AsRef<str>>(pages: &[S]) -> LogoColours {
    let colours = pages
        .iter()
        .map(AsRef::as_ref)
        .filter(|text| text.contains(LOGO_COLOUR_GATE))
        .flat_map(page_colour_tokens)
        .collect();

    LogoColours { colours }
}

/// Collects every colour token in the document, page by page, line by line
pub fn extract_colour_palette<S: AsRef<str>>(pages: &[S]) -> ColourPalette {
    let colours = pages
        .iter()
        .map(AsRef::as_ref)
        .flat_map(page_colour_tokens)
        .collect();

    ColourPalette { colours }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_logo_colours_picked_when_primary_present() {
        let page = ["Brand colours (primary and secondary)", "#112233", "Body", "#AABBCC"].join("\n");
        let colours = extract_logo_colours(&[page]);
        assert_eq!(colours.colours, vec!["#112233", "#AABBCC"]);
    }

    #[test]
    fn test_logo_colours_skipped_when_primary_absent() {
        let page = ["Brand colours", "#112233", "#AABBCC"].join("\n");
        assert!(extract_logo_colours(&[page]).colours.is_empty());
    }

    /// The gate only accepts lowercase "primary". Title-case or upper-case
    /// pages are skipped even though the font extractor would accept the same
    /// label. Pinned here so a change to the gate is a deliberate one.
    #[test]
    fn test_logo_colour_gate_is_case_sensitive() {
        for heading in ["Primary colours", "PRIMARY", "Primary"] {
            let page = format!("{}\n#112233", heading);
            assert!(
                extract_logo_colours(&[page]).colours.is_empty(),
                "heading {:?} should not open the gate",
                heading
            );
        }
    }

    #[test]
    fn test_logo_colours_gate_is_per_page() {
        let pages = ["primary logo\n#111111", "Secondary only\n#222222", "#333333 primary\n#444444"];
        let colours = extract_logo_colours(&pages);
        assert_eq!(colours.colours, vec!["#111111", "#333333 primary", "#444444"]);
    }

    #[test]
    fn test_palette_collects_all_hash_lines() {
        let pages = ["Intro\n#000000", "#FFFFFF\nFooter"];
        let palette = extract_colour_palette(&pages);
        assert_eq!(palette.colours, vec!["#000000", "#FFFFFF"]);
    }

    #[test]
    fn test_palette_tokens_are_trimmed_and_not_validated() {
        let palette = extract_colour_palette(&["   #abc  \n#GGGGGGGG\n # \nnot #123"]);
        assert_eq!(palette.colours, vec!["#abc", "#GGGGGGGG", "#"]);
    }

    #[test]
    fn test_palette_unconditional() {
        let palette = extract_colour_palette(&["#AABBCC"]);
        assert_eq!(palette.colours, vec!["#AABBCC"]);
    }

    proptest! {
        /// Property: pages without lowercase "primary" never yield logo colours
        #[test]
        fn no_gate_no_logo_colours(lines in prop::collection::vec("#?[A-Z0-9 ]{0,10}", 0..20)) {
            let page = lines.join("\n");
            prop_assert!(extract_logo_colours(&[page]).colours.is_empty());
        }

        /// Property: palette preserves page and line order and every token starts with '#'
        #[test]
        fn palette_order_preserved(
            pages in prop::collection::vec(prop::collection::vec("[0-9A-F]{6}", 0..6), 0..5),
        ) {
            let texts: Vec<String> = pages
                .iter()
                .map(|tokens| tokens.iter().map(|t| format!("#{}\nlabel", t)).collect::<Vec<_>>().join("\n"))
                .collect();
            let expected: Vec<String> = pages.iter().flatten().map(|t| format!("#{}", t)).collect();

            let palette = extract_colour_palette(&texts);
            prop_assert!(palette.colours.iter().all(|c| c.starts_with('#')));
            prop_assert_eq!(palette.colours, expected);
        }

        /// Property: logo colours are a subsequence of the palette in the same order
        #[test]
        fn logo_colours_subset_of_palette(
            pages in prop::collection::vec(("[a-z ]{0,12}", prop::collection::vec("[0-9a-f]{3}", 0..4)), 0..5),
        ) {
            let texts: Vec<String> = pages
                .iter()
                .map(|(heading, tokens)| {
                    let mut lines = vec![heading.clone()];
                    lines.extend(tokens.iter().map(|t| format!("#{}", t)));
                    lines.join("\n")
                })
                .collect();

            let logo = extract_logo_colours(&texts).colours;
            let palette = extract_colour_palette(&texts).colours;

            let mut remaining = palette.iter();
            for colour in &logo {
                prop_assert!(remaining.any(|c| c == colour));
            }
        }
    }
}
