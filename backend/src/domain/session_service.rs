//! Breathing session lifecycle service.
//!
//! Implements the four session transitions over the session and catalog
//! repositories. All timestamps come from the injected clock so the
//! transitions are deterministic under test.
//!
//! Ownership is enforced here: lookups go through the user-scoped repository
//! read, so a session belonging to another user surfaces as not-found rather
//! than forbidden.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CancelSessionRequest, CancelSessionResponse, CatalogRepository, CatalogRepositoryError,
    CompleteSessionRequest, CompleteSessionResponse, SessionLifecycle, SessionPayload,
    SessionRepository, SessionRepositoryError, StartSessionRequest, StartSessionResponse,
    UpdateSessionRequest, UpdateSessionResponse,
};
use crate::domain::{BreathingSession, Error, NewBreathingSession, UserId};

fn map_session_repository_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionRepositoryError::Query { message } => {
            Error::internal(format!("session repository error: {message}"))
        }
    }
}

fn map_catalog_repository_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalog repository unavailable: {message}"))
        }
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
    }
}

/// Session service implementing the lifecycle driving port.
#[derive(Clone)]
pub struct SessionLifecycleService<S, C> {
    session_repo: Arc<S>,
    catalog_repo: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<S, C> SessionLifecycleService<S, C> {
    /// Create a new lifecycle service over the two repositories.
    pub fn new(session_repo: Arc<S>, catalog_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repo,
            catalog_repo,
            clock,
        }
    }
}

impl<S, C> SessionLifecycleService<S, C>
where
    S: SessionRepository,
{
    async fn load_owned_session(
        &self,
        session_id: i32,
        user_id: &UserId,
    ) -> Result<BreathingSession, Error> {
        self.session_repo
            .find_for_user(session_id, user_id)
            .await
            .map_err(map_session_repository_error)?
            .ok_or_else(|| Error::not_found(format!("session {session_id} not found")))
    }

    async fn save_and_project(&self, session: BreathingSession) -> Result<SessionPayload, Error> {
        self.session_repo
            .save(&session)
            .await
            .map_err(map_session_repository_error)?;
        Ok(SessionPayload::from(session))
    }
}

#[async_trait]
impl<S, C> SessionLifecycle for SessionLifecycleService<S, C>
where
    S: SessionRepository,
    C: CatalogRepository,
{
    async fn start(&self, request: StartSessionRequest) -> Result<StartSessionResponse, Error> {
        let technique = self
            .catalog_repo
            .find_technique(request.technique_id)
            .await
            .map_err(map_catalog_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("technique {} not found", request.technique_id))
            })?;

        let new_session = NewBreathingSession::new(
            request.user_id,
            technique.id(),
            self.clock.utc(),
            request.sound_enabled.unwrap_or(true),
            request.vibration_enabled.unwrap_or(true),
        );

        let session = self
            .session_repo
            .create(&new_session)
            .await
            .map_err(map_session_repository_error)?;

        Ok(StartSessionResponse {
            session: SessionPayload::from(session),
        })
    }

    async fn update(&self, request: UpdateSessionRequest) -> Result<UpdateSessionResponse, Error> {
        let mut session = self
            .load_owned_session(request.session_id, &request.user_id)
            .await?;
        session.record_progress(request.cycles_completed);

        Ok(UpdateSessionResponse {
            session: self.save_and_project(session).await?,
        })
    }

    async fn complete(
        &self,
        request: CompleteSessionRequest,
    ) -> Result<CompleteSessionResponse, Error> {
        let mut session = self
            .load_owned_session(request.session_id, &request.user_id)
            .await?;
        session.finish(true, self.clock.utc(), request.cycles_completed);

        Ok(CompleteSessionResponse {
            session: self.save_and_project(session).await?,
        })
    }

    async fn cancel(&self, request: CancelSessionRequest) -> Result<CancelSessionResponse, Error> {
        let mut session = self
            .load_owned_session(request.session_id, &request.user_id)
            .await?;
        session.finish(false, self.clock.utc(), request.cycles_completed);

        Ok(CancelSessionResponse {
            session: self.save_and_project(session).await?,
        })
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
