//! Shared helpers for handler tests.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};

/// Session middleware matching the server's cookie settings, minus TLS.
///
/// Uses the production cookie name and `SameSite` policy with a throwaway
/// key and the `Secure` flag off, so tests run over plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_same_site(SameSite::Lax)
        .cookie_secure(false)
        .build()
}
