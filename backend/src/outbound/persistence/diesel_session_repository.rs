//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.
//!
//! Persists breathing sessions through validated domain constructors. The
//! stored `duration_seconds` column is rewritten from the derived domain
//! value on every save so it can never drift from the timestamps.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{BreathingSession, NewBreathingSession, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BreathingSessionRow, BreathingSessionUpdate, NewBreathingSessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::breathing_sessions;

/// Diesel-backed implementation of the session repository port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionRepositoryError {
    map_basic_pool_error(error, |message| {
        SessionRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> SessionRepositoryError {
    map_basic_diesel_error(
        error,
        SessionRepositoryError::query,
        SessionRepositoryError::connection,
    )
}

/// Convert a database row into a domain session.
///
/// The stored duration column is ignored; the entity derives it from the
/// timestamps.
fn row_to_session(row: BreathingSessionRow) -> BreathingSession {
    BreathingSession::from_parts(
        row.id,
        UserId::from_uuid(row.user_id),
        row.technique_id,
        row.started_at,
        row.completed_at,
        row.completed,
        row.cycles_completed,
        row.sound_enabled,
        row.vibration_enabled,
    )
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn create(
        &self,
        session: &NewBreathingSession,
    ) -> Result<BreathingSession, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewBreathingSessionRow {
            user_id: *session.user_id.as_uuid(),
            technique_id: session.technique_id,
            started_at: session.started_at,
            completed: false,
            cycles_completed: Some(0),
            sound_enabled: session.sound_enabled,
            vibration_enabled: session.vibration_enabled,
        };

        let row = diesel::insert_into(breathing_sessions::table)
            .values(&new_row)
            .returning(BreathingSessionRow::as_returning())
            .get_result::<BreathingSessionRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_session(row))
    }

    async fn find_for_user(
        &self,
        session_id: i32,
        user_id: &UserId,
    ) -> Result<Option<BreathingSession>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = breathing_sessions::table
            .filter(
                breathing_sessions::id
                    .eq(session_id)
                    .and(breathing_sessions::user_id.eq(user_id.as_uuid())),
            )
            .select(BreathingSessionRow::as_select())
            .first::<BreathingSessionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_session))
    }

    async fn save(&self, session: &BreathingSession) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = BreathingSessionUpdate {
            completed_at: session.completed_at(),
            duration_seconds: session.duration_seconds(),
            completed: session.completed(),
            cycles_completed: session.cycles_completed(),
            sound_enabled: session.sound_enabled(),
            vibration_enabled: session.vibration_enabled(),
        };

        diesel::update(breathing_sessions::table.filter(breathing_sessions::id.eq(session.id())))
            .set(&update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn finished_row() -> BreathingSessionRow {
        let started_at = Utc::now();
        BreathingSessionRow {
            id: 42,
            user_id: Uuid::new_v4(),
            technique_id: 5,
            started_at,
            completed_at: Some(started_at + Duration::seconds(185)),
            // Stale on purpose; the domain must recompute.
            duration_seconds: Some(1),
            completed: true,
            cycles_completed: Some(7),
            sound_enabled: true,
            vibration_enabled: false,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, SessionRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, SessionRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_ignores_stored_duration(finished_row: BreathingSessionRow) {
        let session = row_to_session(finished_row);

        assert_eq!(session.duration_seconds(), Some(185));
        assert!(session.completed());
        assert_eq!(session.cycles_completed(), Some(7));
    }
}
