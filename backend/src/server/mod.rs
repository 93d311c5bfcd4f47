//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{ActivityTapService, CatalogQueryService, SessionLifecycleService};
use crate::inbound::http::activity::{activity_counts, tap_activity};
use crate::inbound::http::breathing_sessions::{
    cancel_session, complete_session, start_session, update_session,
};
use crate::inbound::http::catalog::{category_techniques, list_categories, technique_detail};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::login;
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DieselActivityLogRepository, DieselCatalogRepository, DieselLoginService,
    DieselSessionRepository,
};

/// Build the shared HTTP state from the configured pool, falling back to
/// fixture ports when no database is attached.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            let clock: Arc<dyn mockable::Clock> = Arc::new(mockable::DefaultClock);
            let catalog_repo = Arc::new(DieselCatalogRepository::new(pool.clone()));
            let session_repo = Arc::new(DieselSessionRepository::new(pool.clone()));
            let activity_repo = Arc::new(DieselActivityLogRepository::new(pool.clone()));

            web::Data::new(HttpState::new(
                Arc::new(DieselLoginService::new(pool.clone())),
                Arc::new(CatalogQueryService::new(catalog_repo.clone())),
                Arc::new(SessionLifecycleService::new(
                    session_repo,
                    catalog_repo,
                    clock.clone(),
                )),
                Arc::new(ActivityTapService::new(activity_repo, clock)),
            ))
        }
        None => web::Data::new(HttpState::fixture()),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(list_categories)
        .service(category_techniques)
        .service(technique_detail)
        .service(start_session)
        .service(update_session)
        .service(complete_session)
        .service(cancel_session)
        .service(tap_activity)
        .service(activity_counts);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
