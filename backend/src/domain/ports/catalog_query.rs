//! Driving port for catalog reads.
//!
//! Inbound adapters call this to serve the three catalog screens: the
//! category list, one category's techniques, and a single technique's
//! detail. Payloads carry the derived presentation fields (cycle duration
//! and the breath-origin label) so handlers never compute them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryWithTechniques, Error, Technique};

/// Serializable category projection for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub id: i32,
    pub name: Option<String>,
    pub display_name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryPayload {
    fn from(value: Category) -> Self {
        Self {
            id: value.id(),
            name: value.name().map(str::to_owned),
            display_name: value.display_name().to_owned(),
            description: value.description().map(str::to_owned),
        }
    }
}

/// Serializable technique projection for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniquePayload {
    pub id: i32,
    pub category_id: i32,
    pub display_name: String,
    pub inhale_seconds: i32,
    pub hold_after_inhale_seconds: i32,
    pub exhale_seconds: i32,
    pub hold_after_exhale_seconds: i32,
    pub cycle_duration_seconds: i32,
    pub recommended_minutes: i32,
    pub posture: String,
    pub breath_origin: String,
    pub breath_origin_label: String,
    pub instructions: String,
    pub sound_cue_default: bool,
    pub haptic_cue_default: bool,
}

impl From<Technique> for TechniquePayload {
    fn from(value: Technique) -> Self {
        let phases = value.phases();
        Self {
            id: value.id(),
            category_id: value.category_id(),
            display_name: value.display_name().to_owned(),
            inhale_seconds: phases.inhale_seconds,
            hold_after_inhale_seconds: phases.hold_after_inhale_seconds,
            exhale_seconds: phases.exhale_seconds,
            hold_after_exhale_seconds: phases.hold_after_exhale_seconds,
            cycle_duration_seconds: phases.cycle_duration_seconds(),
            recommended_minutes: value.recommended_minutes(),
            posture: value.posture().to_owned(),
            breath_origin: value.breath_origin().as_str().to_owned(),
            breath_origin_label: value.breath_origin().label().to_owned(),
            instructions: value.instructions().to_owned(),
            sound_cue_default: value.sound_cue_default(),
            haptic_cue_default: value.haptic_cue_default(),
        }
    }
}

/// One category with its technique projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithTechniquesPayload {
    pub category: CategoryPayload,
    pub techniques: Vec<TechniquePayload>,
}

impl From<CategoryWithTechniques> for CategoryWithTechniquesPayload {
    fn from(value: CategoryWithTechniques) -> Self {
        Self {
            category: value.category.into(),
            techniques: value.techniques.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response from listing all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategoryWithTechniquesPayload>,
}

/// Request for one category's techniques.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCategoryTechniquesRequest {
    pub category_id: i32,
}

/// Response with one category's techniques.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCategoryTechniquesResponse {
    pub category: CategoryPayload,
    pub techniques: Vec<TechniquePayload>,
}

/// Request for one technique's detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTechniqueRequest {
    pub technique_id: i32,
}

/// Response with one technique's detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTechniqueResponse {
    pub technique: TechniquePayload,
}

/// Driving port for catalog read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// List every category with its techniques, ordered by id.
    async fn list_categories(&self) -> Result<ListCategoriesResponse, Error>;

    /// Read one category and its techniques.
    async fn category_techniques(
        &self,
        request: GetCategoryTechniquesRequest,
    ) -> Result<GetCategoryTechniquesResponse, Error>;

    /// Read one technique's detail.
    async fn technique_detail(
        &self,
        request: GetTechniqueRequest,
    ) -> Result<GetTechniqueResponse, Error>;
}

/// Fixture query implementation for tests that do not need the catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogQuery;

#[async_trait]
impl CatalogQuery for FixtureCatalogQuery {
    async fn list_categories(&self) -> Result<ListCategoriesResponse, Error> {
        Ok(ListCategoriesResponse {
            categories: Vec::new(),
        })
    }

    async fn category_techniques(
        &self,
        _request: GetCategoryTechniquesRequest,
    ) -> Result<GetCategoryTechniquesResponse, Error> {
        Err(Error::not_found("category not found"))
    }

    async fn technique_detail(
        &self,
        _request: GetTechniqueRequest,
    ) -> Result<GetTechniqueResponse, Error> {
        Err(Error::not_found("technique not found"))
    }
}
