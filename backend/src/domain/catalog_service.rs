//! Catalog domain service.
//!
//! Implements the catalog read port over the catalog repository, turning
//! entities into the serializable projections the inbound adapters serve.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    CatalogQuery, CatalogRepository, CatalogRepositoryError, GetCategoryTechniquesRequest,
    GetCategoryTechniquesResponse, GetTechniqueRequest, GetTechniqueResponse,
    ListCategoriesResponse, TechniquePayload,
};

fn map_repository_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalog repository unavailable: {message}"))
        }
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
    }
}

/// Catalog service implementing the read driving port.
#[derive(Clone)]
pub struct CatalogQueryService<R> {
    catalog_repo: Arc<R>,
}

impl<R> CatalogQueryService<R> {
    /// Create a new query service over the catalog repository.
    pub fn new(catalog_repo: Arc<R>) -> Self {
        Self { catalog_repo }
    }
}

#[async_trait]
impl<R> CatalogQuery for CatalogQueryService<R>
where
    R: CatalogRepository,
{
    async fn list_categories(&self) -> Result<ListCategoriesResponse, Error> {
        let categories = self
            .catalog_repo
            .list_categories()
            .await
            .map_err(map_repository_error)?;

        Ok(ListCategoriesResponse {
            categories: categories.into_iter().map(Into::into).collect(),
        })
    }

    async fn category_techniques(
        &self,
        request: GetCategoryTechniquesRequest,
    ) -> Result<GetCategoryTechniquesResponse, Error> {
        let found = self
            .catalog_repo
            .find_category(request.category_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("category {} not found", request.category_id))
            })?;

        Ok(GetCategoryTechniquesResponse {
            category: found.category.into(),
            techniques: found.techniques.into_iter().map(Into::into).collect(),
        })
    }

    async fn technique_detail(
        &self,
        request: GetTechniqueRequest,
    ) -> Result<GetTechniqueResponse, Error> {
        let technique = self
            .catalog_repo
            .find_technique(request.technique_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("technique {} not found", request.technique_id))
            })?;

        Ok(GetTechniqueResponse {
            technique: TechniquePayload::from(technique),
        })
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
