//! Port for breathing session persistence.

use async_trait::async_trait;

use crate::domain::{BreathingSession, NewBreathingSession, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "session repository query failed: {message}",
    }
}

/// Port for writing and reading breathing sessions.
///
/// Lookups are always scoped to the owning user; a session belonging to a
/// different user is indistinguishable from a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new session and return it with its assigned id.
    async fn create(
        &self,
        session: &NewBreathingSession,
    ) -> Result<BreathingSession, SessionRepositoryError>;

    /// Find a session by id, scoped to its owner.
    async fn find_for_user(
        &self,
        session_id: i32,
        user_id: &UserId,
    ) -> Result<Option<BreathingSession>, SessionRepositoryError>;

    /// Persist the current state of an existing session.
    ///
    /// Adapters write the derived duration alongside the timestamps on every
    /// save, not only at completion.
    async fn save(&self, session: &BreathingSession) -> Result<(), SessionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise session persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionRepository;

#[async_trait]
impl SessionRepository for FixtureSessionRepository {
    async fn create(
        &self,
        session: &NewBreathingSession,
    ) -> Result<BreathingSession, SessionRepositoryError> {
        Ok(BreathingSession::from_parts(
            1,
            session.user_id.clone(),
            session.technique_id,
            session.started_at,
            None,
            false,
            Some(0),
            session.sound_enabled,
            session.vibration_enabled,
        ))
    }

    async fn find_for_user(
        &self,
        _session_id: i32,
        _user_id: &UserId,
    ) -> Result<Option<BreathingSession>, SessionRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _session: &BreathingSession) -> Result<(), SessionRepositoryError> {
        Ok(())
    }
}
