//! Cookie-session access for HTTP handlers.
//!
//! Handlers never touch `actix_session` directly; they extract a
//! [`SessionContext`] and ask it for the authenticated user. The session
//! stores a single value, the user id written at login.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Extractor exposing the cookie session as domain operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated user's id after login.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Require an authenticated user id or fail with `401 Unauthorized`.
    ///
    /// A stored id that no longer parses is dropped from the session and
    /// treated as anonymous, forcing a fresh login.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        UserId::new(raw).map_err(|error| {
            tracing::warn!("discarding session with invalid user id: {error}");
            self.0.remove(USER_ID_KEY);
            Error::unauthorized("login required")
        })
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
