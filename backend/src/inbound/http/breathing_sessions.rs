//! Breathing session HTTP handlers.
//!
//! ```text
//! POST /api/v1/breathing/sessions
//! PATCH /api/v1/breathing/sessions/{id}
//! POST /api/v1/breathing/sessions/{id}/complete
//! POST /api/v1/breathing/sessions/{id}/cancel
//! ```
//!
//! Every route requires an authenticated session; the session id in the path
//! is only resolved within the calling user's own rows.

use actix_web::{patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CancelSessionRequest, CompleteSessionRequest, SessionPayload, StartSessionRequest,
    UpdateSessionRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require_field};

/// Request payload for starting a breathing session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequestBody {
    pub technique_id: Option<i32>,
    pub sound_enabled: Option<bool>,
    pub vibration_enabled: Option<bool>,
}

/// Request payload for progress updates and finish transitions.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgressRequestBody {
    pub cycles_completed: Option<i32>,
}

/// Session payload returned by every lifecycle route.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    pub id: i32,
    pub technique_id: i32,
    #[schema(format = "date-time")]
    pub started_at: String,
    #[schema(format = "date-time")]
    pub completed_at: Option<String>,
    pub completed: bool,
    /// Wall-clock seconds between start and end; absent while running.
    pub duration_seconds: Option<i32>,
    pub cycles_completed: Option<i32>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

/// Response wrapper shared by the four lifecycle routes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseBody {
    pub session: SessionBody,
}

impl From<SessionPayload> for SessionBody {
    fn from(value: SessionPayload) -> Self {
        Self {
            id: value.id,
            technique_id: value.technique_id,
            started_at: value.started_at.to_rfc3339(),
            completed_at: value.completed_at.map(|ended| ended.to_rfc3339()),
            completed: value.completed,
            duration_seconds: value.duration_seconds,
            cycles_completed: value.cycles_completed,
            sound_enabled: value.sound_enabled,
            vibration_enabled: value.vibration_enabled,
        }
    }
}

impl From<SessionPayload> for SessionResponseBody {
    fn from(value: SessionPayload) -> Self {
        Self {
            session: value.into(),
        }
    }
}

/// Start a breathing session for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/breathing/sessions",
    request_body = StartSessionRequestBody,
    responses(
        (status = 200, description = "Session started", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Technique not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breathing"],
    operation_id = "startBreathingSession",
    security(("SessionCookie" = []))
)]
#[post("/breathing/sessions")]
pub async fn start_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StartSessionRequestBody>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let technique_id = require_field(payload.technique_id, FieldName::new("techniqueId"))?;

    let response = state
        .sessions
        .start(StartSessionRequest {
            user_id,
            technique_id,
            sound_enabled: payload.sound_enabled,
            vibration_enabled: payload.vibration_enabled,
        })
        .await?;
    Ok(web::Json(response.session.into()))
}

/// Overwrite the reported cycle count of a running session.
#[utoipa::path(
    patch,
    path = "/api/v1/breathing/sessions/{id}",
    params(("id" = i32, Path, description = "Session id")),
    request_body = SessionProgressRequestBody,
    responses(
        (status = 200, description = "Progress recorded", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Session not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breathing"],
    operation_id = "updateBreathingSession",
    security(("SessionCookie" = []))
)]
#[patch("/breathing/sessions/{id}")]
pub async fn update_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SessionProgressRequestBody>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    let user_id = session.require_user_id()?;
    let session_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let cycles_completed = require_field(
        payload.into_inner().cycles_completed,
        FieldName::new("cyclesCompleted"),
    )?;

    let response = state
        .sessions
        .update(UpdateSessionRequest {
            user_id,
            session_id,
            cycles_completed,
        })
        .await?;
    Ok(web::Json(response.session.into()))
}

/// Mark a session completed, stamping its end time and final duration.
#[utoipa::path(
    post,
    path = "/api/v1/breathing/sessions/{id}/complete",
    params(("id" = i32, Path, description = "Session id")),
    request_body = SessionProgressRequestBody,
    responses(
        (status = 200, description = "Session completed", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Session not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breathing"],
    operation_id = "completeBreathingSession",
    security(("SessionCookie" = []))
)]
#[post("/breathing/sessions/{id}/complete")]
pub async fn complete_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SessionProgressRequestBody>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    let user_id = session.require_user_id()?;
    let session_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let cycles_completed = require_field(
        payload.into_inner().cycles_completed,
        FieldName::new("cyclesCompleted"),
    )?;

    let response = state
        .sessions
        .complete(CompleteSessionRequest {
            user_id,
            session_id,
            cycles_completed,
        })
        .await?;
    Ok(web::Json(response.session.into()))
}

/// End a session without marking it completed.
#[utoipa::path(
    post,
    path = "/api/v1/breathing/sessions/{id}/cancel",
    params(("id" = i32, Path, description = "Session id")),
    request_body = SessionProgressRequestBody,
    responses(
        (status = 200, description = "Session cancelled", body = SessionResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Session not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breathing"],
    operation_id = "cancelBreathingSession",
    security(("SessionCookie" = []))
)]
#[post("/breathing/sessions/{id}/cancel")]
pub async fn cancel_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SessionProgressRequestBody>,
) -> ApiResult<web::Json<SessionResponseBody>> {
    let user_id = session.require_user_id()?;
    let session_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let cycles_completed = require_field(
        payload.into_inner().cycles_completed,
        FieldName::new("cyclesCompleted"),
    )?;

    let response = state
        .sessions
        .cancel(CancelSessionRequest {
            user_id,
            session_id,
            cycles_completed,
        })
        .await?;
    Ok(web::Json(response.session.into()))
}

#[cfg(test)]
#[path = "breathing_sessions_tests.rs"]
mod tests;
