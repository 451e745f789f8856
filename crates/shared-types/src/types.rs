use serde::{Deserialize, Serialize};

/// Per-page text of an uploaded brand kit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandKitDocument {
    pub id: String,
    pub filename: String,
    pub pages: u32,
    pub text_content: Vec<String>, // Per-page text
    pub created_at: u64,
}

impl BrandKitDocument {
    pub fn new(filename: impl Into<String>, text_content: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            filename: filename.into(),
            pages: text_content.len() as u32,
            text_content,
            created_at: chrono::Utc::now().timestamp() as u64,
        }
    }
}

/// Primary/secondary typefaces named in the brand kit.
///
/// A missing label leaves its key out of the serialized map entirely;
/// substituting a default name is up to whoever renders the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontStyles {
    #[serde(rename = "Primary", default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(rename = "Secondary", default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

impl FontStyles {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

/// Logo clear-space rule.
///
/// `value` is the sentence carrying the "x is ..." measurement, `requirements`
/// is the rest of the same section with that sentence taken out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoSafeZone {
    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "Requirements", default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

impl LogoSafeZone {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.requirements.is_none()
    }
}

/// Colour tokens found on pages that talk about "primary" colours
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoColours {
    #[serde(rename = "Logo colours", default)]
    pub colours: Vec<String>,
}

/// Every colour token in the document, in reading order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourPalette {
    #[serde(rename = "Colours", default)]
    pub colours: Vec<String>,
}

/// Everything extracted from one brand kit, keyed the way the prompt builder
/// and the HTTP API expect it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    #[serde(default)]
    pub font_styles: FontStyles,
    #[serde(default)]
    pub logo_safezone: LogoSafeZone,
    #[serde(default)]
    pub logo_colour: LogoColours,
    #[serde(default)]
    pub logo_colour_palette: ColourPalette,
}

/// Outcome of sending an image and a compliance prompt to a vision model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub model: String,
    pub prompt_used: String,
    pub model_output: String,
    pub evaluated_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_record_uses_fixed_key_names() {
        let record = ComplianceRecord {
            font_styles: FontStyles {
                primary: Some("Roboto".to_string()),
                secondary: None,
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
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "font_styles": {"Primary": "Roboto"},
                "logo_safezone": {"Value": "X is cap height", "Requirements": "Keep clear."},
                "logo_colour": {"Logo colours": ["#112233"]},
                "logo_colour_palette": {"Colours": ["#112233", "#445566"]}
            })
        );
    }

    #[test]
    fn test_empty_record_serializes_empty_maps() {
        let value = serde_json::to_value(ComplianceRecord::default()).unwrap();
        assert_eq!(value["font_styles"], json!({}));
        assert_eq!(value["logo_safezone"], json!({}));
        assert_eq!(value["logo_colour"], json!({"Logo colours": []}));
    }

    #[test]
    fn test_record_deserializes_partial_input() {
        let record: ComplianceRecord =
            serde_json::from_value(json!({"font_styles": {"Secondary": "Inter"}})).unwrap();
        assert_eq!(record.font_styles.secondary.as_deref(), Some("Inter"));
        assert!(record.logo_safezone.is_empty());
        assert!(record.logo_colour_palette.colours.is_empty());
    }

    #[test]
    fn test_brand_kit_document_counts_pages() {
        let doc = BrandKitDocument::new("kit.pdf", vec!["a".into(), "b".into()]);
        assert_eq!(doc.pages, 2);
        assert_eq!(doc.filename, "kit.pdf");
        assert!(!doc.id.is_empty());
    }
}
