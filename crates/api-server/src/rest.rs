//! REST API handlers for campaign runs and operational endpoints.

use crate::normalize;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use outreach_core::config::CampaignDefaults;
use outreach_core::directories::default_directories;
use outreach_core::types::{CampaignRun, CampaignTone, DirectoryTarget};
use outreach_engine::CampaignOrchestrator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<CampaignOrchestrator>,
    pub defaults: CampaignDefaults,
    pub node_id: String,
    pub start_time: Instant,
}

/// Documented shape of `POST /v1/run`. Handlers accept any JSON object and
/// coerce it, so every field is optional on the wire.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunCampaignBody {
    pub target_url: Option<String>,
    /// Array of strings or a single comma-separated string.
    #[schema(value_type = Option<Vec<String>>)]
    pub keywords: Option<Value>,
    pub tone: Option<CampaignTone>,
    pub company_name: Option<String>,
    pub contact_email: Option<String>,
    pub logo_url: Option<String>,
    pub custom_pitch: Option<String>,
    /// Omit to use the built-in catalog.
    pub directories: Option<Vec<DirectoryTarget>>,
    pub dry_run: Option<bool>,
}

/// POST /v1/run: Generate assets and submit to every directory in order.
#[utoipa::path(
    post,
    path = "/v1/run",
    tag = "Campaigns",
    request_body = RunCampaignBody,
    responses(
        (status = 200, description = "Run completed; per-directory outcomes in results", body = CampaignRun),
        (status = 400, description = "Campaign request rejected", body = ErrorResponse),
        (status = 500, description = "Run failed before any submission", body = ErrorResponse),
    )
)]
pub async fn run_campaign(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<CampaignRun>, (StatusCode, Json<ErrorResponse>)> {
    let (request, options) = match normalize::campaign_request(&body, &state.defaults) {
        Ok(normalized) => normalized,
        Err(e) => {
            warn!(error = %e, "Campaign request validation failed");
            metrics::counter!("api.validation_errors").increment(1);
            return Err(invalid_request(e.to_string()));
        }
    };

    info!(
        target_url = %request.target_url,
        directories = request.directories.len(),
        dry_run = options.dry_run,
        "Campaign run requested"
    );

    match state.orchestrator.run(&request, options).await {
        Ok(run) => Ok(Json(run)),
        Err(e) if e.is_validation() => {
            metrics::counter!("api.validation_errors").increment(1);
            Err(invalid_request(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "Campaign run failed");
            metrics::counter!("api.errors").increment(1);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "campaign_run_failed".to_string(),
                    message: e.to_string(),
                }),
            ))
        }
    }
}

fn invalid_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_campaign_request".to_string(),
            message,
        }),
    )
}

/// GET /v1/directories: Built-in directory catalog.
#[utoipa::path(
    get,
    path = "/v1/directories",
    tag = "Campaigns",
    responses(
        (status = 200, description = "Default directory targets", body = [DirectoryTarget]),
    )
)]
pub async fn list_directories() -> Json<Vec<DirectoryTarget>> {
    Json(default_directories())
}

/// GET /health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready: Readiness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to accept traffic"))
)]
pub async fn readiness() -> StatusCode {
    // Nothing to warm up: the orchestrator is built before the router exists.
    StatusCode::OK
}

/// GET /live: Liveness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}
