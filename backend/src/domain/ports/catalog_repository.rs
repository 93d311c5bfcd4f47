//! Port for reading breathing catalog reference data.

use async_trait::async_trait;

use crate::domain::{CategoryWithTechniques, Technique};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalog repository adapters.
    pub enum CatalogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalog repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "catalog repository query failed: {message}",
    }
}

/// Port for reading categories and techniques.
///
/// The catalog is immutable reference data, so this port is read-only.
/// Listings are ordered by primary key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List every category with its techniques.
    async fn list_categories(&self) -> Result<Vec<CategoryWithTechniques>, CatalogRepositoryError>;

    /// Find one category with its techniques.
    async fn find_category(
        &self,
        category_id: i32,
    ) -> Result<Option<CategoryWithTechniques>, CatalogRepositoryError>;

    /// Find one technique by id.
    async fn find_technique(
        &self,
        technique_id: i32,
    ) -> Result<Option<Technique>, CatalogRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogRepository;

#[async_trait]
impl CatalogRepository for FixtureCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<CategoryWithTechniques>, CatalogRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_category(
        &self,
        _category_id: i32,
    ) -> Result<Option<CategoryWithTechniques>, CatalogRepositoryError> {
        Ok(None)
    }

    async fn find_technique(
        &self,
        _technique_id: i32,
    ) -> Result<Option<Technique>, CatalogRepositoryError> {
        Ok(None)
    }
}
