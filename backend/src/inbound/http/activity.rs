//! Habit activity HTTP handlers.
//!
//! ```text
//! POST /api/v1/activity/tap {"activityType":"RESIST"}
//! GET /api/v1/activity/counts
//! ```

use std::str::FromStr;

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{GetActivityCountsRequest, TapActivityRequest};
use crate::domain::{ActivityCounts, ActivityKind, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

/// Request payload for logging a tap.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TapRequestBody {
    /// One of `RESIST`, `SMOKED`, or `SPORT`.
    pub activity_type: Option<String>,
}

/// Per-kind totals returned by both activity routes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCountsBody {
    pub resist: i64,
    pub smoked: i64,
    pub sport: i64,
}

impl From<ActivityCounts> for ActivityCountsBody {
    fn from(value: ActivityCounts) -> Self {
        Self {
            resist: value.resist,
            smoked: value.smoked,
            sport: value.sport,
        }
    }
}

/// Response payload for a logged tap.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TapResponseBody {
    pub activity_id: i32,
    pub counts: ActivityCountsBody,
}

/// Response payload for the counts read.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCountsResponseBody {
    pub counts: ActivityCountsBody,
}

fn parse_activity_kind(raw: String) -> Result<ActivityKind, Error> {
    ActivityKind::from_str(raw.as_str()).map_err(|_| {
        Error::invalid_request("activityType must be RESIST, SMOKED, or SPORT").with_details(
            json!({
                "field": "activityType",
                "value": raw,
                "code": "invalid_activity_type",
            }),
        )
    })
}

/// Log one habit tap for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/activity/tap",
    request_body = TapRequestBody,
    responses(
        (status = 200, description = "Tap logged", body = TapResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 429, description = "Tapped too recently", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["activity"],
    operation_id = "tapActivity",
    security(("SessionCookie" = []))
)]
#[post("/activity/tap")]
pub async fn tap_activity(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TapRequestBody>,
) -> ApiResult<web::Json<TapResponseBody>> {
    let user_id = session.require_user_id()?;
    let raw = require_field(
        payload.into_inner().activity_type,
        FieldName::new("activityType"),
    )?;
    let kind = parse_activity_kind(raw)?;

    let response = state.activity.tap(TapActivityRequest { user_id, kind }).await?;
    Ok(web::Json(TapResponseBody {
        activity_id: response.activity_id,
        counts: response.counts.into(),
    }))
}

/// Read the authenticated user's per-kind totals.
#[utoipa::path(
    get,
    path = "/api/v1/activity/counts",
    responses(
        (status = 200, description = "Per-kind totals", body = ActivityCountsResponseBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["activity"],
    operation_id = "getActivityCounts",
    security(("SessionCookie" = []))
)]
#[get("/activity/counts")]
pub async fn activity_counts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ActivityCountsResponseBody>> {
    let user_id = session.require_user_id()?;
    let response = state
        .activity
        .counts(GetActivityCountsRequest { user_id })
        .await?;
    Ok(web::Json(ActivityCountsResponseBody {
        counts: response.counts.into(),
    }))
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
