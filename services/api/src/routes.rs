use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use bl_tracker::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

const MISSING_LABEL: &str = "the \"libelle\" field is missing or not a non-empty string";

#[derive(Debug, Deserialize)]
pub(crate) struct LabelCorrectionRequest {
    /// Kept loosely typed so a wrong type is reported like a missing field.
    #[serde(default, alias = "label")]
    pub(crate) libelle: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LabelCorrectionResponse {
    pub(crate) success: bool,
    pub(crate) message: &'static str,
    pub(crate) data: LabelCorrectionData,
}

#[derive(Debug, Serialize)]
pub(crate) struct LabelCorrectionData {
    pub(crate) original: String,
    pub(crate) corrected: String,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/correction/libelle", post(correct_label_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn correct_label_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LabelCorrectionRequest>, JsonRejection>,
) -> Result<Json<LabelCorrectionResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "label correction body rejected");
        AppError::InvalidRequest(format!("invalid JSON body: {}", rejection.body_text()))
    })?;

    let original = match request.libelle {
        Some(Value::String(label)) if !label.is_empty() => label,
        other => {
            warn!(received = ?other, "label correction request without a usable label");
            return Err(AppError::InvalidRequest(MISSING_LABEL.to_string()));
        }
    };

    let corrected = state.corrector.correct(&original);
    debug!(%original, %corrected, "label corrected");

    Ok(Json(LabelCorrectionResponse {
        success: true,
        message: "label corrected",
        data: LabelCorrectionData {
            original,
            corrected,
        },
    }))
}
