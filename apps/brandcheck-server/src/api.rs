//! API handlers for the brand compliance server
//!
//! Provides REST endpoints for:
//! - Brand-kit requirement extraction
//! - Compliance prompt building
//! - Vision-model evaluation of a marketing image

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use compliance_engine::{ComplianceEngine, PromptBuilder, PromptStyle};
use shared_pdf::{load_brand_kit, PageTextSource};
use shared_types::{ComplianceRecord, EvaluationReport};

use crate::error::ServerError;
use crate::upload::{UploadField, UploadForm};
use crate::AppState;

/// Root banner response
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Handler: GET /
pub async fn handle_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Brand Compliance API is running",
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "brandcheck-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Model list response
#[derive(Serialize)]
pub struct ModelListResponse {
    pub success: bool,
    pub models: Vec<ModelInfo>,
    pub count: usize,
}

/// Model metadata
#[derive(Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub prompt_style: String,
    pub available: bool,
    /// Upstream model id, when configured
    pub model_id: Option<String>,
}

/// Handler: GET /models
pub async fn handle_list_models(State(state): State<AppState>) -> Json<ModelListResponse> {
    let models: Vec<ModelInfo> = state
        .models
        .iter()
        .map(|m| ModelInfo {
            name: m.name.clone(),
            prompt_style: m.style.to_string(),
            available: m.is_available(),
            model_id: m.evaluator.as_ref().map(|e| e.model_id().to_string()),
        })
        .collect();

    let count = models.len();

    Json(ModelListResponse {
        success: true,
        models,
        count,
    })
}

/// Extraction response, keyed the way existing clients read it
#[derive(Serialize)]
pub struct ExtractResponse {
    #[serde(rename = "Requirements")]
    pub requirements: ComplianceRecord,
    pub message: &'static str,
}

/// Handler: POST /extract_brand_compliance
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ServerError> {
    let form = UploadForm::collect(multipart).await?;
    let file = form.file("file")?;

    let record = extract_record(state.text_source.clone(), file).await?;

    Ok(Json(ExtractResponse {
        requirements: record,
        message: "Requirements",
    }))
}

/// Prompt response
#[derive(Serialize)]
pub struct PromptResponse {
    #[serde(rename = "Prompt")]
    pub prompt: String,
    pub message: &'static str,
}

/// Handler: POST /build_compliance_prompt
///
/// Optional form fields: `prompt_style` (`gpt` or `qwen`, default `gpt`) and
/// `brand_name`.
pub async fn handle_build_prompt(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PromptResponse>, ServerError> {
    let form = UploadForm::collect(multipart).await?;
    let file = form.file("file")?;

    let style = match form.optional_text("prompt_style")? {
        Some(raw) => raw.parse::<PromptStyle>().map_err(ServerError::InvalidRequest)?,
        None => PromptStyle::default(),
    };
    let mut builder = PromptBuilder::new(style);
    if let Some(name) = form.optional_text("brand_name")? {
        builder = builder.brand_name(name);
    }

    let record = extract_record(state.text_source.clone(), file).await?;
    let prompt = builder.build(&record);
    debug!("Built {} prompt ({} chars)", style, prompt.len());

    Ok(Json(PromptResponse {
        prompt,
        message: "Brand compliance prompt successfully generated.",
    }))
}

/// Handler: POST /evaluate_brand_compliance_wAPI
///
/// Responds with the [`EvaluationReport`]: model name, prompt used, raw model
/// output and the unix time the evaluation finished.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationReport>, ServerError> {
    let form = UploadForm::collect(multipart).await?;
    let brand_kit = form.file("brand_kit")?;
    let image = form.file("image_file")?;
    let model_name = form.text("model_name")?;

    // Resolve the model before doing any PDF work
    let model = state
        .models
        .get(&model_name)
        .ok_or_else(|| ServerError::UnknownModel(model_name.clone()))?;
    let evaluator = model
        .evaluator
        .clone()
        .ok_or_else(|| ServerError::ModelUnavailable(model_name.clone()))?;
    let style = model.style;

    info!(
        "Evaluate request: model={}, brand_kit={}, image={} bytes",
        model_name,
        brand_kit.file_name_or("brand_kit.pdf"),
        image.bytes.len()
    );

    let record = extract_record(state.text_source.clone(), brand_kit).await?;
    let prompt = PromptBuilder::new(style).build(&record);

    let timeout = Duration::from_millis(state.model_timeout_ms);
    let model_output = tokio::time::timeout(timeout, evaluator.evaluate(&image.bytes, &prompt))
        .await
        .map_err(|_| ServerError::Timeout(state.model_timeout_ms))??;

    info!(
        "Model {} ({}) returned {} chars",
        model_name,
        evaluator.model_id(),
        model_output.len()
    );

    Ok(Json(EvaluationReport {
        model: model_name,
        prompt_used: prompt,
        model_output,
        evaluated_at: chrono::Utc::now().timestamp() as u64,
    }))
}

/// Decode an uploaded brand kit and run the extractors off the async runtime
async fn extract_record(
    source: Arc<dyn PageTextSource>,
    file: &UploadField,
) -> Result<ComplianceRecord, ServerError> {
    let filename = file.file_name_or("brand_kit.pdf").to_string();
    let bytes = file.bytes.clone();

    let (document, record) = tokio::task::spawn_blocking(move || {
        let document = load_brand_kit(source.as_ref(), &filename, &bytes)?;
        let record = ComplianceEngine::new().extract_document(&document);
        Ok::<_, ServerError>((document, record))
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Extraction task failed: {}", e)))??;

    info!(
        "Extracted brand kit '{}' ({} pages, id {})",
        document.filename, document.pages, document.id
    );
    Ok(record)
}
