//! Breathing catalog HTTP handlers.
//!
//! ```text
//! GET /api/v1/breathing/categories
//! GET /api/v1/breathing/categories/{id}/techniques
//! GET /api/v1/breathing/techniques/{id}
//! ```
//!
//! Catalog reads are public: the mobile client shows the technique picker
//! before the user logs in.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{
    CategoryPayload, CategoryWithTechniquesPayload, GetCategoryTechniquesRequest,
    GetTechniqueRequest, TechniquePayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Category payload returned by catalog reads.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    pub id: i32,
    pub name: Option<String>,
    pub display_name: String,
    pub description: Option<String>,
}

/// Technique payload with derived presentation fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueBody {
    pub id: i32,
    pub category_id: i32,
    pub display_name: String,
    pub inhale_seconds: i32,
    pub hold_after_inhale_seconds: i32,
    pub exhale_seconds: i32,
    pub hold_after_exhale_seconds: i32,
    /// Sum of the four phase durations.
    pub cycle_duration_seconds: i32,
    pub recommended_minutes: i32,
    pub posture: String,
    pub breath_origin: String,
    pub breath_origin_label: String,
    pub instructions: String,
    pub sound_cue_default: bool,
    pub haptic_cue_default: bool,
}

/// One category with its techniques.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithTechniquesBody {
    pub category: CategoryBody,
    pub techniques: Vec<TechniqueBody>,
}

/// Response payload for the category listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesResponseBody {
    pub categories: Vec<CategoryWithTechniquesBody>,
}

/// Response payload for one category's techniques.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTechniquesResponseBody {
    pub category: CategoryBody,
    pub techniques: Vec<TechniqueBody>,
}

/// Response payload for one technique's detail.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueResponseBody {
    pub technique: TechniqueBody,
}

impl From<CategoryPayload> for CategoryBody {
    fn from(value: CategoryPayload) -> Self {
        Self {
            id: value.id,
            name: value.name,
            display_name: value.display_name,
            description: value.description,
        }
    }
}

impl From<TechniquePayload> for TechniqueBody {
    fn from(value: TechniquePayload) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            display_name: value.display_name,
            inhale_seconds: value.inhale_seconds,
            hold_after_inhale_seconds: value.hold_after_inhale_seconds,
            exhale_seconds: value.exhale_seconds,
            hold_after_exhale_seconds: value.hold_after_exhale_seconds,
            cycle_duration_seconds: value.cycle_duration_seconds,
            recommended_minutes: value.recommended_minutes,
            posture: value.posture,
            breath_origin: value.breath_origin,
            breath_origin_label: value.breath_origin_label,
            instructions: value.instructions,
            sound_cue_default: value.sound_cue_default,
            haptic_cue_default: value.haptic_cue_default,
        }
    }
}

impl From<CategoryWithTechniquesPayload> for CategoryWithTechniquesBody {
    fn from(value: CategoryWithTechniquesPayload) -> Self {
        Self {
            category: value.category.into(),
            techniques: value.techniques.into_iter().map(Into::into).collect(),
        }
    }
}

/// List all breathing categories with their techniques.
#[utoipa::path(
    get,
    path = "/api/v1/breathing/categories",
    responses(
        (status = 200, description = "Categories with nested techniques", body = ListCategoriesResponseBody),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breathing"],
    operation_id = "listBreathingCategories",
    security([])
)]
#[get("/breathing/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ListCategoriesResponseBody>> {
    let response = state.catalog.list_categories().await?;
    Ok(web::Json(ListCategoriesResponseBody {
        categories: response.categories.into_iter().map(Into::into).collect(),
    }))
}

/// Read one category and its techniques.
#[utoipa::path(
    get,
    path = "/api/v1/breathing/categories/{id}/techniques",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category with techniques", body = CategoryTechniquesResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breathing"],
    operation_id = "getCategoryTechniques",
    security([])
)]
#[get("/breathing/categories/{id}/techniques")]
pub async fn category_techniques(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CategoryTechniquesResponseBody>> {
    let category_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let response = state
        .catalog
        .category_techniques(GetCategoryTechniquesRequest { category_id })
        .await?;
    Ok(web::Json(CategoryTechniquesResponseBody {
        category: response.category.into(),
        techniques: response.techniques.into_iter().map(Into::into).collect(),
    }))
}

/// Read one technique's detail.
#[utoipa::path(
    get,
    path = "/api/v1/breathing/techniques/{id}",
    params(("id" = i32, Path, description = "Technique id")),
    responses(
        (status = 200, description = "Technique detail", body = TechniqueResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["breathing"],
    operation_id = "getTechnique",
    security([])
)]
#[get("/breathing/techniques/{id}")]
pub async fn technique_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TechniqueResponseBody>> {
    let technique_id = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let response = state
        .catalog
        .technique_detail(GetTechniqueRequest { technique_id })
        .await?;
    Ok(web::Json(TechniqueResponseBody {
        technique: response.technique.into(),
    }))
}
