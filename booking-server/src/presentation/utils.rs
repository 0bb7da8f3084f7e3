use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};
use serde::Serialize;
use uuid::Uuid;

use crate::application::auth_service::AuthService;
use crate::data::user_repository::SqliteUserRepository;
use crate::domain::error::DomainError;
use crate::infrastructure::security::SessionKeys;

pub const SESSION_COOKIE: &str = "session";

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// The user the session middleware resolved for this request. Extraction
/// fails with `Unauthenticated`, which answers with a redirect to the
/// login form.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::Unauthenticated.into())),
        }
    }
}

/// Resolves a session cookie value to its user. Invalid, expired, or
/// stale tokens (including a vanished user) all resolve to anonymous.
pub async fn resolve_session(
    token: &str,
    keys: &SessionKeys,
    auth_service: &AuthService<SqliteUserRepository>,
) -> Option<AuthenticatedUser> {
    let claims = keys.verify(token).ok()?;
    let user_id = Uuid::parse_str(&claims.sub).ok()?;
    let user = auth_service.get_user(user_id).await.ok()?;

    Some(AuthenticatedUser {
        id: user.id,
        name: user.name,
    })
}
