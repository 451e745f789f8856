// Logo clear-space ("safe zone") extraction
use crate::patterns::{
    contains_ignore_case, page_lines, SAFE_ZONE_MARKER, SAFE_ZONE_VALUE_MARKER,
    SECTION_STOP_WORDS,
};
use shared_types::LogoSafeZone;

/// Section scanner state
enum SectionScan<'a> {
    /// Looking for the line that opens the section
    Searching,
    /// Collecting trimmed lines until a terminator
    Buffering(Vec<&'a str>),
}

/// A blank line or a bare "yes"/"no" closes the section and is not part of it
fn is_section_terminator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || SECTION_STOP_WORDS
            .iter()
            .any(|word| trimmed.eq_ignore_ascii_case(word))
}

/// Collect the safe-zone section of one page.
///
/// Returns `None` when no line opens the section. Reaching the end of the
/// page while buffering closes the section with whatever was collected.
fn buffer_section<'a>(lines: &[&'a str]) -> Option<Vec<&'a str>> {
    let mut state = SectionScan::Searching;

    for &line in lines {
        state = match state {
            SectionScan::Searching if contains_ignore_case(line, SAFE_ZONE_MARKER) => {
                SectionScan::Buffering(vec![line.trim()])
            }
            SectionScan::Searching => SectionScan::Searching,
            SectionScan::Buffering(buffer) if is_section_terminator(line) => {
                return Some(buffer);
            }
            SectionScan::Buffering(mut buffer) => {
                buffer.push(line.trim());
                SectionScan::Buffering(buffer)
            }
        };
    }

    match state {
        SectionScan::Searching => None,
        SectionScan::Buffering(buffer) => Some(buffer),
    }
}

/// Split the joined section into the measurement sentence and the rest.
///
/// The measurement is the first period-delimited fragment mentioning "x is".
/// Only its first occurrence is cut out of the requirements text. Without a
/// measurement the whole section becomes the requirements.
fn split_section(section: &str) -> LogoSafeZone {
    let value = section
        .split('.')
        .find(|fragment| contains_ignore_case(fragment, SAFE_ZONE_VALUE_MARKER))
        .map(|fragment| fragment.trim().to_string());

    let requirements = match &value {
        Some(value) => section.replacen(value.as_str(), "", 1).trim().to_string(),
        None => section.trim().to_string(),
    };

    LogoSafeZone {
        value,
        requirements: Some(requirements),
    }
}

/// Extracts the logo safe-zone rule from the first page mentioning "the safe zone".
///
/// Later pages are never consulted, even if they carry their own section.
/// Returns an empty [`LogoSafeZone`] when no page mentions it.
pub fn extract_logo_safezone<S: AsRef<str>>(pages: &[S]) -> LogoSafeZone {
    let Some(page) = pages
        .iter()
        .map(AsRef::as_ref)
        .find(|text| contains_ignore_case(text.trim(), SAFE_ZONE_MARKER))
    else {
        return LogoSafeZone::default();
    };

    let lines = page_lines(page);
    let section = buffer_section(&lines).unwrap_or_default().join(" ");

    split_section(&section)
}
