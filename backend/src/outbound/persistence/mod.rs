//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! The adapters are thin: they translate between Diesel row structs and
//! domain types and map database errors to port error types. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay internal to this
//! module.

mod diesel_activity_log_repository;
mod diesel_basic_error_mapping;
mod diesel_catalog_repository;
mod diesel_login_service;
mod diesel_session_repository;
mod models;
mod pool;
mod schema;

pub use diesel_activity_log_repository::DieselActivityLogRepository;
pub use diesel_catalog_repository::DieselCatalogRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_session_repository::DieselSessionRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
