// Typeface extraction from "Primary" / "Secondary" label lines
use crate::patterns::{is_label_line, page_lines, PRIMARY_LABEL, SECONDARY_LABEL};
use shared_types::FontStyles;

/// Finds label lines that read exactly "primary" or "secondary" (any case)
/// and takes the following line as the font name.
///
/// Later labels overwrite earlier ones. A label on the last line of a page
/// has no following line and is ignored.
pub fn extract_font_styles<S: AsRef<str>>(pages: &[S]) -> FontStyles {
    let mut styles = FontStyles::default();

    for page in pages {
        let lines = page_lines(page.as_ref());

        for pair in lines.windows(2) {
            let (label, next) = (pair[0], pair[1]);
            if is_label_line(label, PRIMARY_LABEL) {
                styles.primary = Some(next.trim().to_string());
            } else if is_label_line(label, SECONDARY_LABEL) {
                styles.secondary = Some(next.trim().to_string());
            }
        }
    }

    styles
}
