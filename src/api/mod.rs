//! HTTP surface
//!
//! Endpoints:
//! - POST /api/simplify        - single text, 502 on inference failure
//! - POST /api/simplify-batch  - list of texts, per-item fallback on failure
//! - GET  /health              - mode, model and cache size

use actix_cors::Cors;
use actix_web::{error::JsonPayloadError, web, App, HttpRequest, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{ApiError, ValidationError};
use crate::middleware::RequestId;
use crate::models::{
    HealthResponse, SimplifyBatchRequest, SimplifyBatchResponse, SimplifyRequest, SimplifyResponse,
};
use crate::pipeline::RequestPipeline;

/// Model label reported when no inference provider is configured.
pub const FALLBACK_MODEL_LABEL: &str = "fallback-algorithm";

/// State shared by every worker.
pub struct AppState {
    pub pipeline: RequestPipeline,
}

impl AppState {
    pub fn new(pipeline: RequestPipeline) -> Self {
        Self { pipeline }
    }

    pub fn model_label(&self) -> &str {
        self.pipeline.model_name().unwrap_or(FALLBACK_MODEL_LABEL)
    }
}

pub async fn simplify(
    state: web::Data<AppState>,
    payload: web::Json<SimplifyRequest>,
) -> Result<HttpResponse, ApiError> {
    let grade = payload.validate()?;
    if let Some(page_id) = payload.page_id.as_deref() {
        tracing::debug!(page_id, "simplify request");
    }

    let result = state.pipeline.resolve(&payload.text, grade).await?;

    Ok(HttpResponse::Ok().json(SimplifyResponse {
        success: true,
        simplified_text: result.text,
        grade,
        from_cache: result.from_cache,
        latency: result.latency_ms,
    }))
}

pub async fn simplify_batch(
    state: web::Data<AppState>,
    payload: web::Json<SimplifyBatchRequest>,
) -> Result<HttpResponse, ApiError> {
    let grade = payload.validate()?;
    if let Some(page_id) = payload.page_id.as_deref() {
        tracing::debug!(page_id, items = payload.batch.len(), "batch request");
    }

    let outcome = state.pipeline.resolve_batch(&payload.batch, grade).await;

    Ok(HttpResponse::Ok().json(SimplifyBatchResponse {
        success: true,
        results: outcome.results,
        grade,
        latency: outcome.latency_ms,
    }))
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        model: state.model_label().to_string(),
        gemini_enabled: state.pipeline.inference_enabled(),
        cache_size: state.pipeline.cache_size(),
    })
}

/// Body deserialisation failures become 422 validation errors.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from(ValidationError::Malformed(err.to_string())).into()
}

/// Registers routes and extractor config. Shared by the server and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health))
        .service(
            web::scope("/api")
                .route("/simplify", web::post().to(simplify))
                .route("/simplify-batch", web::post().to(simplify_batch)),
        );
}

pub fn start_api_server(
    config: &AppConfig,
    state: Arc<AppState>,
) -> std::io::Result<actix_web::dev::Server> {
    let bind_addr = config.bind_addr();
    let data = web::Data::from(state);

    info!(
        bind = %bind_addr,
        model = %data.model_label(),
        gemini_enabled = data.pipeline.inference_enabled(),
        "Starting FocusFlow backend"
    );

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(data.clone())
            .wrap(cors)
            .wrap(RequestId)
            .configure(configure)
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
