//! Server configuration
//!
//! Network and limit settings come from the command line; model credentials
//! come from the environment (optionally seeded from a `.env` file).

use std::time::Duration;

use clap::Parser;
use vision_client::openai::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Command-line arguments for the brand compliance server
#[derive(Parser, Debug)]
#[command(name = "brandcheck-server")]
#[command(about = "Brand compliance API: brand-kit extraction and vision-model scoring")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Model call timeout in milliseconds
    #[arg(long, default_value = "90000")]
    pub timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    pub rate_limit: u32,

    /// Maximum upload size per request, in megabytes
    #[arg(long, default_value = "25")]
    pub max_upload_mb: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Vision model endpoints available to the evaluate route
#[derive(Debug, Clone, Default)]
pub struct ModelSettings {
    /// GPT-4o via the OpenAI API; `None` when no API key is configured
    pub openai: Option<OpenAiConfig>,
    /// Qwen2.5-VL behind an OpenAI-compatible server; `None` when no base URL is configured
    pub qwen: Option<OpenAiConfig>,
}

impl ModelSettings {
    /// Read settings from process environment variables
    pub fn from_env(timeout: Duration) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), timeout)
    }

    /// Read settings through an arbitrary key lookup
    ///
    /// Recognised keys: `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`,
    /// `QWEN_BASE_URL`, `QWEN_MODEL`, `QWEN_API_KEY`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F, timeout: Duration) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai = get("OPENAI_API_KEY").map(|key| OpenAiConfig {
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: Some(key),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
            ..OpenAiConfig::default()
        });

        let qwen = get("QWEN_BASE_URL").map(|base_url| OpenAiConfig {
            base_url,
            api_key: get("QWEN_API_KEY"),
            model: get("QWEN_MODEL").unwrap_or_else(|| "Qwen/Qwen2.5-VL-3B-Instruct".to_string()),
            max_tokens: 512,
            timeout,
            ..OpenAiConfig::default()
        });

        Self { openai, qwen }
    }
}
