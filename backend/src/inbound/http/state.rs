//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ActivityTap, CatalogQuery, FixtureActivityTap, FixtureCatalogQuery, FixtureLoginService,
    FixtureSessionLifecycle, LoginService, SessionLifecycle,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub catalog: Arc<dyn CatalogQuery>,
    pub sessions: Arc<dyn SessionLifecycle>,
    pub activity: Arc<dyn ActivityTap>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        login: Arc<dyn LoginService>,
        catalog: Arc<dyn CatalogQuery>,
        sessions: Arc<dyn SessionLifecycle>,
        activity: Arc<dyn ActivityTap>,
    ) -> Self {
        Self {
            login,
            catalog,
            sessions,
            activity,
        }
    }

    /// Fixture-backed state for handler tests and development without a
    /// database.
    pub fn fixture() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            catalog: Arc::new(FixtureCatalogQuery),
            sessions: Arc::new(FixtureSessionLifecycle),
            activity: Arc::new(FixtureActivityTap),
        }
    }
}
