//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: all inbound HTTP paths, the domain type schema wrappers
//! from `inbound::http::schemas`, and the session cookie security scheme.
//! The generated specification backs the Swagger UI served in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Breathe backend API",
        description = "HTTP interface for the breathing catalog, guided session \
                       lifecycle, habit tap logging, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::catalog::list_categories,
        crate::inbound::http::catalog::category_techniques,
        crate::inbound::http::catalog::technique_detail,
        crate::inbound::http::breathing_sessions::start_session,
        crate::inbound::http::breathing_sessions::update_session,
        crate::inbound::http::breathing_sessions::complete_session,
        crate::inbound::http::breathing_sessions::cancel_session,
        crate::inbound::http::activity::tap_activity,
        crate::inbound::http::activity::activity_counts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Login and identity"),
        (name = "breathing", description = "Technique catalog and guided sessions"),
        (name = "activity", description = "Habit tap logging"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
