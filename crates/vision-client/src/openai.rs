//! OpenAI-compatible chat-completions client
//!
//! Works against api.openai.com (GPT-4o) and any server speaking the same
//! wire format, such as a vLLM deployment of Qwen2.5-VL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::EvaluatorError;
use crate::image::to_data_url;
use crate::ComplianceEvaluator;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Connection and sampling settings for [`OpenAiEvaluator`]
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL up to and including the API version, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// `detail` hint for the image part ("low", "high", "auto")
    pub image_detail: String,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
            temperature: 0.2,
            image_detail: "high".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Content {
    Text { r#type: String, text: String },
    Image { r#type: String, image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
    detail: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Evaluator backed by an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiEvaluator {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiEvaluator {
    pub fn new(config: OpenAiConfig) -> Result<Self, EvaluatorError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request(&self, image: &[u8], prompt: &str) -> Result<ChatRequest, EvaluatorError> {
        Ok(ChatRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    Content::Text {
                        r#type: "text".to_string(),
                        text: prompt.to_string(),
                    },
                    Content::Image {
                        r#type: "image_url".to_string(),
                        image_url: ImageUrl {
                            url: to_data_url(image)?,
                            detail: self.config.image_detail.clone(),
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        })
    }
}

/// First non-empty message content of a completion
fn first_content(response: ChatResponse) -> Result<String, EvaluatorError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(EvaluatorError::EmptyResponse)
}

#[async_trait]
impl ComplianceEvaluator for OpenAiEvaluator {
    async fn evaluate(&self, image: &[u8], prompt: &str) -> Result<String, EvaluatorError> {
        let request = self.build_request(image, prompt)?;
        debug!(
            "Sending {} byte image and {} char prompt to {}",
            image.len(),
            prompt.len(),
            self.config.model
        );

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EvaluatorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = first_content(completion)?;
        info!("Model {} returned {} chars", self.config.model, content.len());
        Ok(content)
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}
