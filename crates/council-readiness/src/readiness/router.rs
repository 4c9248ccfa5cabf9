use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::DepartmentMetric;
use super::policy::ScoreWeights;
use super::service::{ReadinessService, ReadinessServiceError};
use crate::roster::{DelegateRecord, Department};

/// Department counts plus optional per-request weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub departments: Vec<DepartmentMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,
}

/// Raw registrations to aggregate before scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    pub delegates: Vec<DelegateRecord>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,
}

/// Router builder exposing the readiness endpoints.
pub fn readiness_router(service: Arc<ReadinessService>) -> Router {
    Router::new()
        .route("/api/v1/readiness/status", post(status_handler))
        .route("/api/v1/readiness/score", post(score_handler))
        .route("/api/v1/readiness/report", post(report_handler))
        .route("/api/v1/readiness/roster", post(roster_handler))
        .with_state(service)
}

pub(crate) async fn status_handler(
    State(service): State<Arc<ReadinessService>>,
    axum::Json(metric): axum::Json<DepartmentMetric>,
) -> Response {
    let status = service.department_status(&metric);
    (StatusCode::OK, axum::Json(status)).into_response()
}

pub(crate) async fn score_handler(
    State(service): State<Arc<ReadinessService>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    match service.score(&request.departments, request.weights) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(ReadinessServiceError::from(error)),
    }
}

pub(crate) async fn report_handler(
    State(service): State<Arc<ReadinessService>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    match service.report(&request.departments, request.weights) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(ReadinessServiceError::from(error)),
    }
}

pub(crate) async fn roster_handler(
    State(service): State<Arc<ReadinessService>>,
    axum::Json(request): axum::Json<RosterRequest>,
) -> Response {
    match service.roster_report(&request.delegates, &request.departments, request.weights) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ReadinessServiceError) -> Response {
    warn!(%error, "readiness request rejected");
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
