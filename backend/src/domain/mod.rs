//! Domain model and services for the wellness backend.
//!
//! The domain is transport and storage agnostic: entities validate their own
//! invariants, services implement the driving ports, and all infrastructure
//! access goes through the ports in [`ports`].

mod activity;
mod activity_service;
mod breathing_session;
mod catalog;
mod catalog_service;
mod error;
pub mod ports;
mod session_service;
mod user;

pub use activity::{
    ActivityCounts, ActivityKind, ActivityLog, ParseActivityKindError, TAP_RATE_LIMIT_SECONDS,
};
pub use activity_service::ActivityTapService;
pub use breathing_session::{BreathingSession, NewBreathingSession};
pub use catalog::{
    BreathOrigin, BreathingPhases, CatalogValidationError, Category, CategoryWithTechniques,
    ParseBreathOriginError, Technique, TechniqueDraft,
};
pub use catalog_service::CatalogQueryService;
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use session_service::SessionLifecycleService;
pub use user::{DISPLAY_NAME_MAX, DisplayName, User, UserId, UserValidationError};
