use actix_web::{HttpResponse, get, post, web};
use tera::Context;
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::data::user_repository::SqliteUserRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{LoginForm, SignupForm};
use crate::presentation::templates::render;
use crate::presentation::utils::{removal_cookie, see_other, session_cookie};

fn render_signup(error: Option<&str>) -> Result<HttpResponse, DomainError> {
    let mut ctx = Context::new();
    ctx.insert("error", &error);
    render("signup.html", &ctx)
}

fn render_login(error: Option<&str>) -> Result<HttpResponse, DomainError> {
    let mut ctx = Context::new();
    ctx.insert("error", &error);
    render("login.html", &ctx)
}

#[get("/signup")]
pub async fn signup_form() -> Result<HttpResponse, DomainError> {
    render_signup(None)
}

#[post("/signup")]
pub async fn signup(
    service: web::Data<AuthService<SqliteUserRepository>>,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, DomainError> {
    let form = form.into_inner();
    match service
        .register(form.name, form.phone, form.email, form.password)
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, "user registered");
            Ok(see_other("/login"))
        }
        Err(
            err @ (DomainError::DuplicatePhone
            | DomainError::MissingField(_)
            | DomainError::InvalidField(_)),
        ) => render_signup(Some(&err.to_string())),
        Err(err) => Err(err),
    }
}

#[get("/login")]
pub async fn login_form() -> Result<HttpResponse, DomainError> {
    render_login(None)
}

#[post("/login")]
pub async fn login(
    service: web::Data<AuthService<SqliteUserRepository>>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, DomainError> {
    match service.login(&form.phone, &form.password).await {
        Ok(token) => {
            info!(phone = %form.phone, "user logged in");
            Ok(HttpResponse::SeeOther()
                .insert_header((actix_web::http::header::LOCATION, "/"))
                .cookie(session_cookie(token))
                .finish())
        }
        Err(DomainError::InvalidCredentials) => {
            render_login(Some(&DomainError::InvalidCredentials.to_string()))
        }
        Err(err) => Err(err),
    }
}

#[get("/logout")]
pub async fn logout() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(removal_cookie())
        .finish()
}
