pub mod extractors;
pub mod patterns;
pub mod prompt;

pub use prompt::{build_compliance_prompt, PromptBuilder, PromptStyle};

use shared_types::{BrandKitDocument, ComplianceRecord};
use tracing::debug;

/// ComplianceEngine entry point
///
/// Runs the four brand-kit extractors over a document's page texts and merges
/// their results. Extraction never fails: missing sections show up as absent
/// keys or empty lists in the [`ComplianceRecord`].
pub struct ComplianceEngine;

impl ComplianceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Extract brand guidelines from ordered page texts
    pub fn extract<S: AsRef<str>>(&self, pages: &[S]) -> ComplianceRecord {
        let record = ComplianceRecord {
            font_styles: extractors::extract_font_styles(pages),
            logo_safezone: extractors::extract_logo_safezone(pages),
            logo_colour: extractors::extract_logo_colours(pages),
            logo_colour_palette: extractors::extract_colour_palette(pages),
        };

        debug!(
            pages = pages.len(),
            primary_font = record.font_styles.primary.is_some(),
            secondary_font = record.font_styles.secondary.is_some(),
            safe_zone = !record.logo_safezone.is_empty(),
            logo_colours = record.logo_colour.colours.len(),
            palette_colours = record.logo_colour_palette.colours.len(),
            "Extracted brand compliance data"
        );

        record
    }

    pub fn extract_document(&self, document: &BrandKitDocument) -> ComplianceRecord {
        self.extract(&document.text_content)
    }

    /// Extract from text that is already one page, such as a pasted guideline excerpt
    pub fn extract_text(&self, text: &str) -> ComplianceRecord {
        self.extract(&[text])
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}
