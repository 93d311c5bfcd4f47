//! PostgreSQL-backed `ActivityLogRepository` implementation using Diesel ORM.
//!
//! The log is append-only: rows are inserted and counted, never updated. The
//! recency check compares `logged_at` strictly greater than the cutoff, which
//! gives the rate limit its half-open window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ActivityLogRepository, ActivityLogRepositoryError};
use crate::domain::{ActivityKind, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewActivityLogRow;
use super::pool::{DbPool, PoolError};
use super::schema::activity_logs;

/// Diesel-backed implementation of the activity log repository port.
#[derive(Clone)]
pub struct DieselActivityLogRepository {
    pool: DbPool,
}

impl DieselActivityLogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ActivityLogRepositoryError {
    map_basic_pool_error(error, |message| {
        ActivityLogRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> ActivityLogRepositoryError {
    map_basic_diesel_error(
        error,
        ActivityLogRepositoryError::query,
        ActivityLogRepositoryError::connection,
    )
}

/// Parse grouped-count rows, rejecting codes the enum does not know.
fn parse_counts(
    rows: Vec<(String, i64)>,
) -> Result<Vec<(ActivityKind, i64)>, ActivityLogRepositoryError> {
    rows.into_iter()
        .map(|(code, count)| {
            let kind: ActivityKind = code
                .parse()
                .map_err(|err: crate::domain::ParseActivityKindError| {
                    ActivityLogRepositoryError::query(err.to_string())
                })?;
            Ok((kind, count))
        })
        .collect()
}

#[async_trait]
impl ActivityLogRepository for DieselActivityLogRepository {
    async fn has_tap_after(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        cutoff: DateTime<Utc>,
    ) -> Result<bool, ActivityLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            activity_logs::table.filter(
                activity_logs::user_id
                    .eq(user_id.as_uuid())
                    .and(activity_logs::activity_type.eq(kind.as_str()))
                    .and(activity_logs::logged_at.gt(cutoff)),
            ),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn append(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        logged_at: DateTime<Utc>,
    ) -> Result<i32, ActivityLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewActivityLogRow {
            user_id: *user_id.as_uuid(),
            activity_type: kind.as_str(),
            logged_at,
        };

        diesel::insert_into(activity_logs::table)
            .values(&new_row)
            .returning(activity_logs::id)
            .get_result::<i32>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn count_by_kind(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(ActivityKind, i64)>, ActivityLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, i64)> = activity_logs::table
            .filter(activity_logs::user_id.eq(user_id.as_uuid()))
            .group_by(activity_logs::activity_type)
            .select((activity_logs::activity_type, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        parse_counts(rows)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and count row parsing.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            ActivityLogRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, ActivityLogRepositoryError::Query { .. }));
    }

    #[rstest]
    fn parse_counts_accepts_known_codes() {
        let parsed = parse_counts(vec![("RESIST".to_owned(), 7), ("SPORT".to_owned(), 2)])
            .expect("known codes parse");

        assert_eq!(parsed, vec![(ActivityKind::Resist, 7), (ActivityKind::Sport, 2)]);
    }

    #[rstest]
    fn parse_counts_rejects_unknown_codes() {
        let error = parse_counts(vec![("JUGGLE".to_owned(), 1)]).expect_err("unknown code fails");

        assert!(matches!(error, ActivityLogRepositoryError::Query { .. }));
        assert!(error.to_string().contains("JUGGLE"));
    }
}
