//! Registry of vision models selectable by name on the evaluate route

use std::sync::Arc;

use compliance_engine::PromptStyle;
use tracing::{info, warn};
use vision_client::{ComplianceEvaluator, EvaluatorError, OpenAiEvaluator};

use crate::config::ModelSettings;

/// Public name of the OpenAI GPT-4o model
pub const CHATGPT_4O: &str = "ChatGPT-4o";

/// Public name of the Qwen2.5-VL 3B model
pub const QWEN_3B: &str = "Qwen-3b";

/// A model name, the prompt dialect it expects, and its client if configured
pub struct RegisteredModel {
    pub name: String,
    pub style: PromptStyle,
    pub evaluator: Option<Arc<dyn ComplianceEvaluator>>,
}

impl RegisteredModel {
    pub fn is_available(&self) -> bool {
        self.evaluator.is_some()
    }
}

#[derive(Default)]
pub struct ModelRegistry {
    models: Vec<RegisteredModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model name; `None` keeps the name known but unavailable
    pub fn register(
        &mut self,
        name: impl Into<String>,
        style: PromptStyle,
        evaluator: Option<Arc<dyn ComplianceEvaluator>>,
    ) -> &mut Self {
        let name = name.into();
        self.models.retain(|m| m.name != name);
        self.models.push(RegisteredModel {
            name,
            style,
            evaluator,
        });
        self
    }

    /// Look a model up by its exact public name
    pub fn get(&self, name: &str) -> Option<&RegisteredModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredModel> {
        self.models.iter()
    }

    /// Build the registry for the configured endpoints.
    ///
    /// Both public model names are always registered so that an unconfigured
    /// model answers "unavailable" rather than "unknown".
    pub fn from_settings(settings: &ModelSettings) -> Result<Self, EvaluatorError> {
        let mut registry = Self::new();

        let openai = match &settings.openai {
            Some(config) => {
                info!("Registering {} ({} at {})", CHATGPT_4O, config.model, config.base_url);
                Some(Arc::new(OpenAiEvaluator::new(config.clone())?) as Arc<dyn ComplianceEvaluator>)
            }
            None => {
                warn!("OPENAI_API_KEY not set; {} is unavailable", CHATGPT_4O);
                None
            }
        };
        registry.register(CHATGPT_4O, PromptStyle::Gpt, openai);

        let qwen = match &settings.qwen {
            Some(config) => {
                info!("Registering {} ({} at {})", QWEN_3B, config.model, config.base_url);
                Some(Arc::new(OpenAiEvaluator::new(config.clone())?) as Arc<dyn ComplianceEvaluator>)
            }
            None => None,
        };
        registry.register(QWEN_3B, PromptStyle::Qwen, qwen);

        Ok(registry)
    }
}
