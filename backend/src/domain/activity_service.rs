//! Activity tap service.
//!
//! Implements the tap driving port over the activity log repository. The
//! rate limit is enforced per kind with a half-open window: a tap is
//! rejected only when another tap of the same kind lies strictly inside the
//! last [`TAP_RATE_LIMIT_SECONDS`] seconds, so a tap exactly at the boundary
//! succeeds.
//!
//! The check and the insert are two statements without a transaction;
//! concurrent taps inside one window can both pass the check. The log is
//! append-only and the limit is a debounce, so the occasional extra row is
//! acceptable.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    ActivityLogRepository, ActivityLogRepositoryError, ActivityTap, GetActivityCountsRequest,
    GetActivityCountsResponse, TapActivityRequest, TapActivityResponse,
};
use crate::domain::{ActivityCounts, Error, TAP_RATE_LIMIT_SECONDS, UserId};

fn map_repository_error(error: ActivityLogRepositoryError) -> Error {
    match error {
        ActivityLogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("activity log repository unavailable: {message}"))
        }
        ActivityLogRepositoryError::Query { message } => {
            Error::internal(format!("activity log repository error: {message}"))
        }
    }
}

/// Activity service implementing the tap driving port.
#[derive(Clone)]
pub struct ActivityTapService<R> {
    activity_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ActivityTapService<R> {
    /// Create a new tap service over the activity log repository.
    pub fn new(activity_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_repo,
            clock,
        }
    }
}

impl<R> ActivityTapService<R>
where
    R: ActivityLogRepository,
{
    async fn load_counts(&self, user_id: &UserId) -> Result<ActivityCounts, Error> {
        let pairs = self
            .activity_repo
            .count_by_kind(user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(ActivityCounts::from_pairs(pairs))
    }
}

#[async_trait]
impl<R> ActivityTap for ActivityTapService<R>
where
    R: ActivityLogRepository,
{
    async fn tap(&self, request: TapActivityRequest) -> Result<TapActivityResponse, Error> {
        let now = self.clock.utc();
        let cutoff = now - Duration::seconds(TAP_RATE_LIMIT_SECONDS);

        let recently_tapped = self
            .activity_repo
            .has_tap_after(&request.user_id, request.kind, cutoff)
            .await
            .map_err(map_repository_error)?;
        if recently_tapped {
            return Err(Error::rate_limited(format!(
                "{} tapped too recently",
                request.kind
            ))
            .with_details(json!({ "retryAfterSeconds": TAP_RATE_LIMIT_SECONDS })));
        }

        let activity_id = self
            .activity_repo
            .append(&request.user_id, request.kind, now)
            .await
            .map_err(map_repository_error)?;

        Ok(TapActivityResponse {
            activity_id,
            counts: self.load_counts(&request.user_id).await?,
        })
    }

    async fn counts(
        &self,
        request: GetActivityCountsRequest,
    ) -> Result<GetActivityCountsResponse, Error> {
        Ok(GetActivityCountsResponse {
            counts: self.load_counts(&request.user_id).await?,
        })
    }
}

#[cfg(test)]
#[path = "activity_service_tests.rs"]
mod tests;
