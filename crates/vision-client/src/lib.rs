//! Vision model clients
//!
//! The compliance service only ever talks to [`ComplianceEvaluator`]; concrete
//! clients are built once at startup and handed in, so tests can swap in a
//! fake without touching any global state.

pub mod error;
pub mod image;
pub mod openai;

pub use error::EvaluatorError;
pub use openai::{OpenAiConfig, OpenAiEvaluator};

use async_trait::async_trait;

/// Scores a marketing image against a compliance prompt
#[async_trait]
pub trait ComplianceEvaluator: Send + Sync {
    /// Send image bytes and prompt to the model, returning its free-text answer
    async fn evaluate(&self, image: &[u8], prompt: &str) -> Result<String, EvaluatorError>;

    /// Model identifier for logging
    fn model_id(&self) -> &str;
}
