//! Port for the append-only activity log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ActivityKind, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity log repository adapters.
    pub enum ActivityLogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "activity log repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "activity log repository query failed: {message}",
    }
}

/// Port for appending taps and reading per-kind totals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Whether the user has a tap of this kind strictly after `cutoff`.
    ///
    /// The comparison is strictly greater, so a tap logged exactly at the
    /// cutoff does not count as recent.
    async fn has_tap_after(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        cutoff: DateTime<Utc>,
    ) -> Result<bool, ActivityLogRepositoryError>;

    /// Append one tap and return its assigned id.
    async fn append(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        logged_at: DateTime<Utc>,
    ) -> Result<i32, ActivityLogRepositoryError>;

    /// Count the user's taps grouped by kind.
    ///
    /// Kinds the user has never tapped are absent from the result.
    async fn count_by_kind(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(ActivityKind, i64)>, ActivityLogRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the activity log.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityLogRepository;

#[async_trait]
impl ActivityLogRepository for FixtureActivityLogRepository {
    async fn has_tap_after(
        &self,
        _user_id: &UserId,
        _kind: ActivityKind,
        _cutoff: DateTime<Utc>,
    ) -> Result<bool, ActivityLogRepositoryError> {
        Ok(false)
    }

    async fn append(
        &self,
        _user_id: &UserId,
        _kind: ActivityKind,
        _logged_at: DateTime<Utc>,
    ) -> Result<i32, ActivityLogRepositoryError> {
        Ok(1)
    }

    async fn count_by_kind(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<(ActivityKind, i64)>, ActivityLogRepositoryError> {
        Ok(Vec::new())
    }
}
