//! Driving port for login use-cases.
//!
//! Inbound adapters call this to establish an identity without knowing the
//! backing infrastructure. There are no passwords: supplying a display name
//! either finds the matching user or creates one.

use async_trait::async_trait;

use crate::domain::{DisplayName, Error, User, UserId};

/// Domain use-case port for login-by-display-name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Find or create the user for this display name.
    async fn login(&self, display_name: &DisplayName) -> Result<User, Error>;
}

/// In-memory login used until persistence is wired, and by handler tests.
///
/// Every display name maps to the same fixed user id, so tests get a
/// deterministic identity without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

/// Fixed identity produced by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, display_name: &DisplayName) -> Result<User, Error> {
        let id = UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        Ok(User::new(id, display_name.clone()))
    }
}
