//! HTTP surface of the agent.
//!
//! | Route | Method | Body |
//! |-------|--------|------|
//! | `/check` | POST | JSON list of connection groups; starts the run |
//! | `/results` | GET | Every recorded success, in completion order |
//! | `/status` | GET | Engine phase and counters |
//! | `/failed` | GET | Targets retired by the failure drain |

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use netpol_validator::connection::parse_groups;
use netpol_validator::engine::EngineStatus;
use netpol_validator::queue::PermanentFailure;
use netpol_validator::{ResultRecord, ValidatorError};

use crate::app::AgentState;

pub const CHECK_ACCEPTED: &str = "Check Request received, processing...";

pub fn router(state: AgentState) -> Router {
    Router::new()
        .route("/check", post(check))
        .route("/results", get(results))
        .route("/status", get(status))
        .route("/failed", get(failed))
        .with_state(state)
}

/// Errors returned to the caller of `/check`.
#[derive(Debug)]
pub enum ApiError {
    Rejected(ValidatorError),
    AlreadySubmitted,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(e) => {
                let status = if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, e.to_string()).into_response()
            }
            ApiError::AlreadySubmitted => (
                StatusCode::CONFLICT,
                "A check request was already submitted to this agent",
            )
                .into_response(),
        }
    }
}

async fn check(State(state): State<AgentState>, body: Bytes) -> Result<&'static str, ApiError> {
    let targets = parse_groups(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected check request");
        ApiError::Rejected(e)
    })?;

    if !state.claim_run() {
        tracing::warn!("Duplicate check request ignored");
        return Err(ApiError::AlreadySubmitted);
    }

    tracing::info!(targets = targets.len(), "Check request accepted");
    state.spawn_run(targets);
    Ok(CHECK_ACCEPTED)
}

async fn results(State(state): State<AgentState>) -> Json<Vec<ResultRecord>> {
    Json(state.engine.results())
}

async fn status(State(state): State<AgentState>) -> Json<EngineStatus> {
    Json(state.engine.status())
}

async fn failed(State(state): State<AgentState>) -> Json<Vec<PermanentFailure>> {
    Json(state.engine.permanent_failures())
}
