//! Tests for habit activity HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use super::*;
use crate::domain::TAP_RATE_LIMIT_SECONDS;
use crate::domain::ports::{
    FixtureCatalogQuery, FixtureLoginService, FixtureSessionLifecycle, MockActivityTap,
};
use crate::inbound::http::users::LoginRequestBody;

fn test_app_with(
    activity: Arc<dyn crate::domain::ports::ActivityTap>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(FixtureCatalogQuery),
        Arc::new(FixtureSessionLifecycle),
        activity,
    );
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(crate::inbound::http::users::login)
                .service(tap_activity)
                .service(activity_counts),
        )
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with(Arc::new(crate::domain::ports::FixtureActivityTap))
}

async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequestBody {
            display_name: "Ada Lovelace".into(),
        })
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn tap_returns_the_updated_counts() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/activity/tap")
        .cookie(cookie)
        .set_json(serde_json::json!({ "activityType": "RESIST" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["activityId"], 1);
    assert_eq!(body["counts"]["resist"], 1);
    assert_eq!(body["counts"]["smoked"], 0);
    assert_eq!(body["counts"]["sport"], 0);
}

#[actix_web::test]
async fn tap_rejects_unknown_activity_types() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/activity/tap")
        .cookie(cookie)
        .set_json(serde_json::json!({ "activityType": "JUGGLE" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "activityType must be RESIST, SMOKED, or SPORT"
    );
    assert_eq!(body["details"]["value"], "JUGGLE");
    assert_eq!(body["details"]["code"], "invalid_activity_type");
}

#[actix_web::test]
async fn tap_requires_an_activity_type() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/activity/tap")
        .cookie(cookie)
        .set_json(serde_json::json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "activityType");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn rapid_taps_are_rate_limited() {
    let mut activity = MockActivityTap::new();
    activity.expect_tap().times(1).return_once(|_| {
        Err(
            Error::rate_limited("RESIST tapped too recently").with_details(serde_json::json!({
                "retryAfterSeconds": TAP_RATE_LIMIT_SECONDS,
            })),
        )
    });
    let app = actix_test::init_service(test_app_with(Arc::new(activity))).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/activity/tap")
        .cookie(cookie)
        .set_json(serde_json::json!({ "activityType": "RESIST" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "rate_limited");
    assert_eq!(body["details"]["retryAfterSeconds"], 3);
}

#[actix_web::test]
async fn counts_returns_the_fixture_zeros() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/activity/counts")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["counts"]["resist"], 0);
    assert_eq!(body["counts"]["smoked"], 0);
    assert_eq!(body["counts"]["sport"], 0);
}

#[actix_web::test]
async fn activity_routes_require_an_authenticated_session() {
    let app = actix_test::init_service(test_app()).await;

    let tap_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/activity/tap")
            .set_json(serde_json::json!({ "activityType": "RESIST" }))
            .to_request(),
    )
    .await;
    assert_eq!(tap_res.status(), StatusCode::UNAUTHORIZED);

    let counts_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/activity/counts")
            .to_request(),
    )
    .await;
    assert_eq!(counts_res.status(), StatusCode::UNAUTHORIZED);
}
