//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_log_repository;
mod activity_tap;
mod catalog_query;
mod catalog_repository;
mod login_service;
mod session_lifecycle;
mod session_repository;

#[cfg(test)]
pub use activity_log_repository::MockActivityLogRepository;
pub use activity_log_repository::{
    ActivityLogRepository, ActivityLogRepositoryError, FixtureActivityLogRepository,
};
#[cfg(test)]
pub use activity_tap::MockActivityTap;
pub use activity_tap::{
    ActivityTap, FixtureActivityTap, GetActivityCountsRequest, GetActivityCountsResponse,
    TapActivityRequest, TapActivityResponse,
};
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::{
    CatalogQuery, CategoryPayload, CategoryWithTechniquesPayload, FixtureCatalogQuery,
    GetCategoryTechniquesRequest, GetCategoryTechniquesResponse, GetTechniqueRequest,
    GetTechniqueResponse, ListCategoriesResponse, TechniquePayload,
};
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
pub use catalog_repository::{CatalogRepository, CatalogRepositoryError, FixtureCatalogRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use session_lifecycle::MockSessionLifecycle;
pub use session_lifecycle::{
    CancelSessionRequest, CancelSessionResponse, CompleteSessionRequest, CompleteSessionResponse,
    FixtureSessionLifecycle, SessionLifecycle, SessionPayload, StartSessionRequest,
    StartSessionResponse, UpdateSessionRequest, UpdateSessionResponse,
};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{FixtureSessionRepository, SessionRepository, SessionRepositoryError};
