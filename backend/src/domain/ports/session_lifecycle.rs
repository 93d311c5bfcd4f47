//! Driving port for the breathing session lifecycle.
//!
//! Covers the four state transitions a client performs: start a session,
//! report progress, complete, and cancel. Every request names the calling
//! user; a session owned by someone else is reported as missing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BreathingSession, Error, UserId};

/// Serializable session projection for driving ports.
///
/// `duration_seconds` is the derived value; it is `None` while the session
/// is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub id: i32,
    pub technique_id: i32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub duration_seconds: Option<i32>,
    pub cycles_completed: Option<i32>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

impl From<BreathingSession> for SessionPayload {
    fn from(value: BreathingSession) -> Self {
        Self {
            id: value.id(),
            technique_id: value.technique_id(),
            started_at: value.started_at(),
            completed_at: value.completed_at(),
            completed: value.completed(),
            duration_seconds: value.duration_seconds(),
            cycles_completed: value.cycles_completed(),
            sound_enabled: value.sound_enabled(),
            vibration_enabled: value.vibration_enabled(),
        }
    }
}

/// Request to start a session.
///
/// Absent cue toggles default to enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub user_id: UserId,
    pub technique_id: i32,
    pub sound_enabled: Option<bool>,
    pub vibration_enabled: Option<bool>,
}

/// Response from starting a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session: SessionPayload,
}

/// Request to record mid-session progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub user_id: UserId,
    pub session_id: i32,
    pub cycles_completed: i32,
}

/// Response from recording progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionResponse {
    pub session: SessionPayload,
}

/// Request to finish a session as completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionRequest {
    pub user_id: UserId,
    pub session_id: i32,
    pub cycles_completed: i32,
}

/// Response from completing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionResponse {
    pub session: SessionPayload,
}

/// Request to cancel a running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSessionRequest {
    pub user_id: UserId,
    pub session_id: i32,
    pub cycles_completed: i32,
}

/// Response from cancelling a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSessionResponse {
    pub session: SessionPayload,
}

/// Driving port for session state transitions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionLifecycle: Send + Sync {
    /// Start a session against an existing technique.
    async fn start(&self, request: StartSessionRequest) -> Result<StartSessionResponse, Error>;

    /// Overwrite the reported cycle count of a running session.
    async fn update(&self, request: UpdateSessionRequest) -> Result<UpdateSessionResponse, Error>;

    /// Mark a session completed and stamp its end time.
    async fn complete(
        &self,
        request: CompleteSessionRequest,
    ) -> Result<CompleteSessionResponse, Error>;

    /// End a session without marking it completed.
    async fn cancel(&self, request: CancelSessionRequest) -> Result<CancelSessionResponse, Error>;
}

/// Fixture lifecycle implementation for tests that do not need persistence.
///
/// `start` succeeds with a canned session; transitions on existing sessions
/// report not-found because the fixture stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionLifecycle;

#[async_trait]
impl SessionLifecycle for FixtureSessionLifecycle {
    async fn start(&self, request: StartSessionRequest) -> Result<StartSessionResponse, Error> {
        Ok(StartSessionResponse {
            session: SessionPayload {
                id: 1,
                technique_id: request.technique_id,
                started_at: Utc::now(),
                completed_at: None,
                completed: false,
                duration_seconds: None,
                cycles_completed: Some(0),
                sound_enabled: request.sound_enabled.unwrap_or(true),
                vibration_enabled: request.vibration_enabled.unwrap_or(true),
            },
        })
    }

    async fn update(&self, _request: UpdateSessionRequest) -> Result<UpdateSessionResponse, Error> {
        Err(Error::not_found("session not found"))
    }

    async fn complete(
        &self,
        _request: CompleteSessionRequest,
    ) -> Result<CompleteSessionResponse, Error> {
        Err(Error::not_found("session not found"))
    }

    async fn cancel(&self, _request: CancelSessionRequest) -> Result<CancelSessionResponse, Error> {
        Err(Error::not_found("session not found"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Duration;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    fn payload_reflects_derived_duration() {
        let started_at = Utc::now();
        let mut session =
            BreathingSession::from_parts(7, UserId::random(), 5, started_at, None, false, Some(0), true, true);
        session.finish(true, started_at + Duration::seconds(120), 6);

        let payload = SessionPayload::from(session);

        assert_eq!(payload.duration_seconds, Some(120));
        assert!(payload.completed);
        assert_eq!(payload.cycles_completed, Some(6));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_start_defaults_missing_toggles() {
        let lifecycle = FixtureSessionLifecycle;
        let response = lifecycle
            .start(StartSessionRequest {
                user_id: UserId::random(),
                technique_id: 5,
                sound_enabled: None,
                vibration_enabled: Some(false),
            })
            .await
            .expect("fixture start succeeds");

        assert!(response.session.sound_enabled);
        assert!(!response.session.vibration_enabled);
        assert!(response.session.duration_seconds.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_transitions_report_not_found() {
        let lifecycle = FixtureSessionLifecycle;
        let err = lifecycle
            .complete(CompleteSessionRequest {
                user_id: UserId::random(),
                session_id: 42,
                cycles_completed: 3,
            })
            .await
            .expect_err("fixture complete fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
