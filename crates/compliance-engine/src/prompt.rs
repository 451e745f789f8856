//! Compliance prompt templates
//!
//! Renders a [`ComplianceRecord`] into the instruction text sent alongside the
//! marketing image. Defaults for missing fields are chosen here, never by the
//! extractors.

use shared_types::ComplianceRecord;

/// Colour lists are cut to this many entries in the prompt
pub const MAX_PROMPT_COLOURS: usize = 10;

/// Placeholder for a typeface the brand kit did not name
pub const UNKNOWN_FONT: &str = "Unknown";

/// Placeholder for a missing safe-zone field
pub const NOT_AVAILABLE: &str = "N/A";

/// Prompt dialect, tuned to the model family that receives it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// Bold-label layout used with GPT-4o
    #[default]
    Gpt,
    /// Markdown-heading layout used with Qwen2.5-VL
    Qwen,
}

impl PromptStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt => "gpt",
            Self::Qwen => "qwen",
        }
    }
}

impl std::fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt" | "gpt-4o" | "openai" => Ok(Self::Gpt),
            "qwen" | "qwen-vl" => Ok(Self::Qwen),
            other => Err(format!("Unknown prompt style '{}'. Use 'gpt' or 'qwen'", other)),
        }
    }
}

/// Builds compliance prompts for one style, optionally naming the brand
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    style: PromptStyle,
    brand_name: Option<String>,
}

impl PromptBuilder {
    pub fn new(style: PromptStyle) -> Self {
        Self {
            style,
            brand_name: None,
        }
    }

    /// Name the brand whose guidelines are being checked
    pub fn brand_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.brand_name = (!name.trim().is_empty()).then(|| name.trim().to_string());
        self
    }

    pub fn build(&self, record: &ComplianceRecord) -> String {
        let fields = GuidelineFields::from_record(record);
        let brand = self.brand_line();
        match self.style {
            PromptStyle::Gpt => render_gpt(&fields, &brand),
            PromptStyle::Qwen => render_qwen(&fields, &brand),
        }
    }

    fn brand_line(&self) -> String {
        match &self.brand_name {
            Some(name) => format!("- **Brand**: {}\n\n", name),
            None => String::new(),
        }
    }
}

/// Render a prompt with the given style and no brand name
pub fn build_compliance_prompt(record: &ComplianceRecord, style: PromptStyle) -> String {
    PromptBuilder::new(style).build(record)
}

/// Comma-joined list of at most [`MAX_PROMPT_COLOURS`] tokens, `...` marking a cut
pub fn summarize_colours(colours: &[String]) -> String {
    let shown = colours
        .iter()
        .take(MAX_PROMPT_COLOURS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if colours.len() > MAX_PROMPT_COLOURS {
        format!("{}...", shown)
    } else {
        shown
    }
}

/// Record values with placeholders applied
struct GuidelineFields<'a> {
    primary_font: &'a str,
    secondary_font: &'a str,
    safe_zone_size: &'a str,
    safe_zone_requirements: &'a str,
    logo_colours: String,
    palette: String,
}

impl<'a> GuidelineFields<'a> {
    fn from_record(record: &'a ComplianceRecord) -> Self {
        Self {
            primary_font: record.font_styles.primary.as_deref().unwrap_or(UNKNOWN_FONT),
            secondary_font: record
                .font_styles
                .secondary
                .as_deref()
                .unwrap_or(UNKNOWN_FONT),
            safe_zone_size: record.logo_safezone.value.as_deref().unwrap_or(NOT_AVAILABLE),
            safe_zone_requirements: record
                .logo_safezone
                .requirements
                .as_deref()
                .unwrap_or(NOT_AVAILABLE),
            logo_colours: summarize_colours(&record.logo_colour.colours),
            palette: summarize_colours(&record.logo_colour_palette.colours),
        }
    }
}

fn render_gpt(fields: &GuidelineFields<'_>, brand: &str) -> String {
    format!(
        "You are a brand compliance assistant. A user has uploaded a marketing image. \
Your task is to check the image against the following brand guidelines and assess whether it follows them.\n\n\
**Instructions:**\n\
1. For each of the four criteria below, assign 1 point if it is clearly satisfied and 0 if not.\n\
2. After evaluating, return a total score out of 4.\n\
3. For each criterion, briefly explain why the point was given or not.\n\n\
**Brand Guidelines:**\n\
{brand}\
- **Font Styles**:\n  - Primary font: {primary}\n  - Secondary font: {secondary}\n\n\
- **Logo Safe Zone**:\n  - Size: {size}\n  - Requirements: {requirements}\n\n\
- **Approved Logo Colours**:\n  {logo}\n\n\
- **Approved Colour Palette (image should primarily use these colours)**:\n  {palette}\n\n\
**Your Response Format:**\n\
- Font Style: ✅ or ❌ – explanation\n\
- Logo Safe Zone: ✅ or ❌ – explanation\n\
- Logo Colour: ✅ or ❌ – explanation\n\
- Colour Palette: ✅ or ❌ – explanation\n\
**Total Score: X/4**",
        brand = brand,
        primary = fields.primary_font,
        secondary = fields.secondary_font,
        size = fields.safe_zone_size,
        requirements = fields.safe_zone_requirements,
        logo = fields.logo_colours,
        palette = fields.palette,
    )
}

fn render_qwen(fields: &GuidelineFields<'_>, brand: &str) -> String {
    format!(
        "You are a brand compliance assistant. A user has uploaded a marketing image. \
Check the image against the following brand guidelines and decide whether it follows them.\n\n\
### Instructions\n\
1. For each of the four criteria, assign 1 point if satisfied and 0 if not.\n\
2. After evaluating all four, return a total score out of 4.\n\
3. For each criterion, explain briefly why it passed (✅) or failed (❌).\n\n\
### Brand Guidelines\n\
{brand}\
- **Font Styles**\n  - Primary font: {primary}\n  - Secondary font: {secondary}\n\n\
- **Logo Safe Zone**\n  - Size: {size}\n  - Requirements: {requirements}\n\n\
- **Approved Logo Colours**\n  {logo}\n\n\
- **Approved Colour Palette (the image should primarily use these colours)**\n  {palette}\n\n\
### Response Format\n\
- Font Style: ✅/❌ – explanation\n\
- Logo Safe Zone: ✅/❌ – explanation\n\
- Logo Colour: ✅/❌ – explanation\n\
- Colour Palette: ✅/❌ – explanation\n\
**Total Score: X/4**",
        brand = brand,
        primary = fields.primary_font,
        secondary = fields.secondary_font,
        size = fields.safe_zone_size,
        requirements = fields.safe_zone_requirements,
        logo = fields.logo_colours,
        palette = fields.palette,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{ColourPalette, FontStyles, LogoColours, LogoSafeZone};

    fn sample_record() -> ComplianceRecord {
        ComplianceRecord {
            font_styles: FontStyles {
                primary: Some("Roboto".to_string()),
                secondary: Some("Inter".to_string()),
            },
            logo_safezone: LogoSafeZone {
                value: Some("X is cap height".to_string()),
                requirements: Some("Keep clear.".to_string()),
            },
            logo_colour: LogoColours {
                colours: vec!["#112233".to_string()],
            },
            logo_colour_palette: ColourPalette {
                colours: vec!["#112233".to_string(), "#445566".to_string()],
            },
        }
    }

    #[test]
    fn test_gpt_prompt_lists_guidelines() {
        let prompt = build_compliance_prompt(&sample_record(), PromptStyle::Gpt);

        assert!(prompt.starts_with("You are a brand compliance assistant."));
        assert!(prompt.contains("  - Primary font: Roboto\n"));
        assert!(prompt.contains("  - Secondary font: Inter\n"));
        assert!(prompt.contains("  - Size: X is cap height\n"));
        assert!(prompt.contains("  - Requirements: Keep clear.\n"));
        assert!(prompt.contains("**Approved Logo Colours**:\n  #112233\n"));
        assert!(prompt.contains("these colours)**:\n  #112233, #445566\n"));
        assert!(prompt.ends_with("**Total Score: X/4**"));
    }

    #[test]
    fn test_qwen_prompt_uses_headings() {
        let prompt = build_compliance_prompt(&sample_record(), PromptStyle::Qwen);

        assert!(prompt.contains("### Instructions\n"));
        assert!(prompt.contains("### Brand Guidelines\n"));
        assert!(prompt.contains("- Font Style: ✅/❌ – explanation\n"));
        assert!(prompt.contains("  - Primary font: Roboto\n"));
        assert!(!prompt.contains("**Instructions:**"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let prompt = build_compliance_prompt(&ComplianceRecord::default(), PromptStyle::Gpt);

        assert!(prompt.contains("Primary font: Unknown"));
        assert!(prompt.contains("Secondary font: Unknown"));
        assert!(prompt.contains("Size: N/A"));
        assert!(prompt.contains("Requirements: N/A"));
    }

    #[test]
    fn test_colour_lists_truncated_after_ten() {
        let colours: Vec<String> = (0..12).map(|i| format!("#{:06X}", i)).collect();
        let summary = summarize_colours(&colours);

        assert!(summary.starts_with("#000000, #000001"));
        assert!(summary.contains("#000009..."));
        assert!(!summary.contains("#00000A"));

        let exactly_ten = summarize_colours(&colours[..10]);
        assert!(!exactly_ten.ends_with("..."));
        assert_eq!(summarize_colours(&[]), "");
    }

    #[test]
    fn test_prompt_style_parsing() {
        assert_eq!("GPT".parse::<PromptStyle>(), Ok(PromptStyle::Gpt));
        assert_eq!(" qwen ".parse::<PromptStyle>(), Ok(PromptStyle::Qwen));
        assert!("llama".parse::<PromptStyle>().is_err());
        assert_eq!(PromptStyle::Qwen.to_string(), "qwen");
    }

    #[test]
    fn test_brand_name_line() {
        let prompt = PromptBuilder::new(PromptStyle::Gpt)
            .brand_name("Neurons")
            .build(&sample_record());
        assert!(prompt.contains("**Brand Guidelines:**\n- **Brand**: Neurons\n\n- **Font Styles**"));

        let unnamed = PromptBuilder::new(PromptStyle::Gpt)
            .brand_name("   ")
            .build(&sample_record());
        assert!(!unnamed.contains("**Brand**"));
    }
}
