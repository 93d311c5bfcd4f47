//! User login handlers.
//!
//! ```text
//! POST /api/v1/login {"displayName":"Ada Lovelace"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{DisplayName, Error, User, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON: `{"displayName":"Ada Lovelace"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub display_name: String,
}

/// User payload returned by login and profile reads.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub display_name: String,
}

impl From<User> for UserResponseBody {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            display_name: value.display_name().to_string(),
        }
    }
}

fn map_display_name_error(err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyDisplayName => "empty_display_name",
        UserValidationError::DisplayNameTooLong { .. } => "display_name_too_long",
        UserValidationError::EmptyId | UserValidationError::InvalidId => "invalid_display_name",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "displayName", "code": code }))
}

/// Log in by display name, creating the user on first sight, and establish a
/// session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Login success", body = UserResponseBody, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let display_name =
        DisplayName::new(payload.into_inner().display_name).map_err(map_display_name_error)?;
    let user = state.login.login(&display_name).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(UserResponseBody::from(user)))
}
