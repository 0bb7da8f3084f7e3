use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use once_cell::sync::Lazy;
use tera::{Context, Tera};

use crate::domain::error::DomainError;

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../../templates/base.html")),
        ("index.html", include_str!("../../templates/index.html")),
        ("signup.html", include_str!("../../templates/signup.html")),
        ("login.html", include_str!("../../templates/login.html")),
        ("book.html", include_str!("../../templates/book.html")),
        (
            "book_carwash.html",
            include_str!("../../templates/book_carwash.html"),
        ),
    ])
    .expect("built-in templates must parse");
    tera
});

pub fn render(name: &str, ctx: &Context) -> Result<HttpResponse, DomainError> {
    let body = TEMPLATES
        .render(name, ctx)
        .map_err(|e| DomainError::Internal(format!("template error: {}", e)))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
