use actix_web::{HttpResponse, get, post, web};
use tera::Context;
use tracing::info;

use crate::application::booking_service::BookingService;
use crate::data::booking_repository::SqliteBookingRepository;
use crate::domain::booking::BookingKind;
use crate::domain::error::DomainError;
use crate::presentation::dto::BookingForm;
use crate::presentation::templates::render;
use crate::presentation::utils::{AuthenticatedUser, see_other};

fn render_form(
    template: &str,
    user: &AuthenticatedUser,
    error: Option<&str>,
) -> Result<HttpResponse, DomainError> {
    let mut ctx = Context::new();
    ctx.insert("user", user);
    ctx.insert("error", &error);
    render(template, &ctx)
}

#[get("/book")]
pub async fn booking_form(user: AuthenticatedUser) -> Result<HttpResponse, DomainError> {
    render_form("book.html", &user, None)
}

#[post("/book")]
pub async fn create_booking(
    user: AuthenticatedUser,
    service: web::Data<BookingService<SqliteBookingRepository>>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, DomainError> {
    submit(user, service, form.into_inner(), BookingKind::Generic, "book.html").await
}

#[get("/book/car-wash")]
pub async fn carwash_form(user: AuthenticatedUser) -> Result<HttpResponse, DomainError> {
    render_form("book_carwash.html", &user, None)
}

#[post("/book/car-wash")]
pub async fn create_carwash_booking(
    user: AuthenticatedUser,
    service: web::Data<BookingService<SqliteBookingRepository>>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, DomainError> {
    submit(
        user,
        service,
        form.into_inner(),
        BookingKind::CarWash,
        "book_carwash.html",
    )
    .await
}

async fn submit(
    user: AuthenticatedUser,
    service: web::Data<BookingService<SqliteBookingRepository>>,
    pairs: Vec<(String, String)>,
    kind: BookingKind,
    template: &str,
) -> Result<HttpResponse, DomainError> {
    let form = BookingForm::from_pairs(pairs);
    match service.create_booking(user.id, form, kind).await {
        Ok(booking) => {
            info!(booking_id = %booking.id, user_id = %user.id, "booking submitted");
            Ok(see_other("/"))
        }
        Err(err @ (DomainError::MissingField(_) | DomainError::InvalidField(_))) => {
            render_form(template, &user, Some(&err.to_string()))
        }
        Err(err) => Err(err),
    }
}
