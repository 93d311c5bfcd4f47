//! PostgreSQL-backed `CatalogRepository` implementation using Diesel ORM.
//!
//! Loads catalog reference data through validated domain constructors.
//! Listings order by primary key; the stored `position` column is ignored.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};
use crate::domain::{
    BreathOrigin, BreathingPhases, Category, CategoryWithTechniques, Technique, TechniqueDraft,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CategoryRow, TechniqueRow};
use super::pool::{DbPool, PoolError};
use super::schema::{breathing_categories, breathing_techniques};

/// Diesel-backed implementation of the catalog repository port.
#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogRepositoryError {
    map_basic_pool_error(error, |message| {
        CatalogRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogRepositoryError::query,
        CatalogRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain category.
fn row_to_category(row: CategoryRow) -> Result<Category, CatalogRepositoryError> {
    Category::new(
        row.id,
        row.name,
        row.display_name,
        row.description,
        row.position,
    )
    .map_err(|err| CatalogRepositoryError::query(err.to_string()))
}

/// Convert a database row into a validated domain technique.
fn row_to_technique(row: TechniqueRow) -> Result<Technique, CatalogRepositoryError> {
    let breath_origin: BreathOrigin = row
        .breath_origin
        .parse()
        .map_err(|err: crate::domain::ParseBreathOriginError| {
            CatalogRepositoryError::query(err.to_string())
        })?;

    Technique::new(TechniqueDraft {
        id: row.id,
        category_id: row.category_id,
        display_name: row.display_name,
        phases: BreathingPhases {
            inhale_seconds: row.inhale_seconds,
            hold_after_inhale_seconds: row.hold_after_inhale_seconds,
            exhale_seconds: row.exhale_seconds,
            hold_after_exhale_seconds: row.hold_after_exhale_seconds,
        },
        recommended_minutes: row.recommended_minutes,
        posture: row.posture,
        breath_origin,
        instructions: row.instructions,
        sound_cue_default: row.sound_cue_default,
        haptic_cue_default: row.haptic_cue_default,
    })
    .map_err(|err| CatalogRepositoryError::query(err.to_string()))
}

#[async_trait]
impl CatalogRepository for DieselCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<CategoryWithTechniques>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let category_rows: Vec<CategoryRow> = breathing_categories::table
            .order(breathing_categories::id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let technique_rows: Vec<TechniqueRow> = breathing_techniques::table
            .order(breathing_techniques::id.asc())
            .select(TechniqueRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let techniques = technique_rows
            .into_iter()
            .map(row_to_technique)
            .collect::<Result<Vec<_>, _>>()?;

        category_rows
            .into_iter()
            .map(|row| {
                let category = row_to_category(row)?;
                let techniques = techniques
                    .iter()
                    .filter(|technique| technique.category_id() == category.id())
                    .cloned()
                    .collect();
                Ok(CategoryWithTechniques {
                    category,
                    techniques,
                })
            })
            .collect()
    }

    async fn find_category(
        &self,
        category_id: i32,
    ) -> Result<Option<CategoryWithTechniques>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = breathing_categories::table
            .filter(breathing_categories::id.eq(category_id))
            .select(CategoryRow::as_select())
            .first::<CategoryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let category = row_to_category(row)?;

        let technique_rows: Vec<TechniqueRow> = breathing_techniques::table
            .filter(breathing_techniques::category_id.eq(category_id))
            .order(breathing_techniques::id.asc())
            .select(TechniqueRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let techniques = technique_rows
            .into_iter()
            .map(row_to_technique)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CategoryWithTechniques {
            category,
            techniques,
        }))
    }

    async fn find_technique(
        &self,
        technique_id: i32,
    ) -> Result<Option<Technique>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = breathing_techniques::table
            .filter(breathing_techniques::id.eq(technique_id))
            .select(TechniqueRow::as_select())
            .first::<TechniqueRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_technique).transpose()
    }
}
