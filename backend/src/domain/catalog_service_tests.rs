//! Tests for the catalog service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockCatalogRepository;
use crate::domain::{
    BreathOrigin, BreathingPhases, Category, CategoryWithTechniques, ErrorCode, Technique,
    TechniqueDraft,
};

fn sample_category() -> Category {
    Category::new(
        1,
        Some("calm".to_owned()),
        "Calming".to_owned(),
        Some("Techniques for winding down.".to_owned()),
        Some(1),
    )
    .expect("valid category")
}

fn sample_technique(id: i32) -> Technique {
    Technique::new(TechniqueDraft {
        id,
        category_id: 1,
        display_name: "Box breathing".to_owned(),
        phases: BreathingPhases {
            inhale_seconds: 4,
            hold_after_inhale_seconds: 4,
            exhale_seconds: 4,
            hold_after_exhale_seconds: 4,
        },
        recommended_minutes: 5,
        posture: "seated".to_owned(),
        breath_origin: BreathOrigin::Abdomen,
        instructions: "Breathe in a steady square rhythm.".to_owned(),
        sound_cue_default: true,
        haptic_cue_default: true,
    })
    .expect("valid technique")
}

#[tokio::test]
async fn list_categories_projects_payloads() {
    let mut repo = MockCatalogRepository::new();
    repo.expect_list_categories().times(1).return_once(|| {
        Ok(vec![CategoryWithTechniques {
            category: sample_category(),
            techniques: vec![sample_technique(5)],
        }])
    });

    let service = CatalogQueryService::new(Arc::new(repo));
    let response = service.list_categories().await.expect("list succeeds");

    assert_eq!(response.categories.len(), 1);
    let entry = &response.categories[0];
    assert_eq!(entry.category.display_name, "Calming");
    assert_eq!(entry.techniques[0].cycle_duration_seconds, 16);
}

#[tokio::test]
async fn category_techniques_returns_not_found_when_missing() {
    let mut repo = MockCatalogRepository::new();
    repo.expect_find_category().times(1).return_once(|_| Ok(None));

    let service = CatalogQueryService::new(Arc::new(repo));
    let error = service
        .category_techniques(GetCategoryTechniquesRequest { category_id: 9 })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().contains('9'));
}

#[tokio::test]
async fn technique_detail_carries_label_and_cycle_duration() {
    let mut repo = MockCatalogRepository::new();
    repo.expect_find_technique()
        .times(1)
        .return_once(|_| Ok(Some(sample_technique(5))));

    let service = CatalogQueryService::new(Arc::new(repo));
    let response = service
        .technique_detail(GetTechniqueRequest { technique_id: 5 })
        .await
        .expect("detail succeeds");

    assert_eq!(response.technique.breath_origin_label, "abdominal breathing");
    assert_eq!(response.technique.cycle_duration_seconds, 16);
}

#[tokio::test]
async fn connection_errors_map_to_service_unavailable() {
    let mut repo = MockCatalogRepository::new();
    repo.expect_list_categories()
        .times(1)
        .return_once(|| Err(CatalogRepositoryError::connection("pool unavailable")));

    let service = CatalogQueryService::new(Arc::new(repo));
    let error = service.list_categories().await.expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn query_errors_map_to_internal() {
    let mut repo = MockCatalogRepository::new();
    repo.expect_find_technique()
        .times(1)
        .return_once(|_| Err(CatalogRepositoryError::query("broken sql")));

    let service = CatalogQueryService::new(Arc::new(repo));
    let error = service
        .technique_detail(GetTechniqueRequest { technique_id: 5 })
        .await
        .expect_err("internal");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
