//! Brand Compliance Server
//!
//! Reads brand guidelines out of an uploaded brand-kit PDF and scores
//! marketing images against them with a vision model. Provides REST API
//! endpoints for:
//!
//! - Requirement extraction (fonts, logo safe zone, logo colours, palette)
//! - Compliance prompt building
//! - Vision-model evaluation (GPT-4o, Qwen2.5-VL)
//!
//! ## Architecture
//!
//! Handlers stay thin: PDF text comes from an injected [`PageTextSource`],
//! extraction is done by `compliance-engine`, and each registered model is an
//! injected `ComplianceEvaluator`. The server adds:
//!
//! - Rate limiting via tower-governor
//! - Request ids (`x-request-id`) on every request span and response
//! - Upload size limits

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::HeaderName,
    routing::{get, post},
    Router,
};
use clap::Parser;
use shared_pdf::{LopdfTextSource, PageTextSource};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod config;
mod error;
mod models;
mod upload;

use api::{
    handle_build_prompt, handle_evaluate, handle_extract, handle_health, handle_list_models,
    handle_root,
};
use config::{Args, ModelSettings};
use models::ModelRegistry;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Brand-kit text extraction backend
    pub text_source: Arc<dyn PageTextSource>,
    /// Vision models selectable by name
    pub models: Arc<ModelRegistry>,
    /// Model call timeout in milliseconds
    pub model_timeout_ms: u64,
}

/// Build the application router without the per-IP rate limiter
pub fn routes(state: AppState, body_limit: usize) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let tracing_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id));

    Router::new()
        // Status
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/models", get(handle_list_models))
        // API endpoints
        .route("/extract_brand_compliance", post(handle_extract))
        .route("/build_compliance_prompt", post(handle_build_prompt))
        .route("/evaluate_brand_compliance_wAPI", post(handle_evaluate))
        // Apply middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(tracing_layers)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting brand compliance server on {}:{}", args.host, args.port);

    // Model clients are built once and shared by every request
    let settings = ModelSettings::from_env(Duration::from_millis(args.timeout_ms));
    let registry = ModelRegistry::from_settings(&settings)?;

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit.saturating_mul(2))
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    // Create shared state
    let state = AppState {
        text_source: Arc::new(LopdfTextSource::new()),
        models: Arc::new(registry),
        model_timeout_ms: args.timeout_ms,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes(state.clone(), args.max_upload_bytes())
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Model timeout: {}ms", args.timeout_ms);
    info!("Upload limit: {} MB", args.max_upload_mb);
    for model in state.models.iter() {
        info!(
            "Model {}: {}",
            model.name,
            if model.is_available() {
                "available"
            } else {
                "not configured"
            }
        );
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
