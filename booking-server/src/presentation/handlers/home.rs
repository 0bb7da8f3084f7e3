use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use tera::Context;

use crate::application::booking_service::BookingService;
use crate::data::booking_repository::SqliteBookingRepository;
use crate::domain::error::DomainError;
use crate::presentation::templates::render;
use crate::presentation::utils::AuthenticatedUser;

#[derive(Serialize)]
struct CatalogueEntry {
    name: &'static str,
    price: u32,
}

const SERVICES: &[CatalogueEntry] = &[
    CatalogueEntry { name: "Car Wash", price: 10 },
    CatalogueEntry { name: "Full Detailing", price: 60 },
    CatalogueEntry { name: "Haircut", price: 15 },
    CatalogueEntry { name: "Shave", price: 8 },
];

#[get("/")]
pub async fn home(
    user: Option<AuthenticatedUser>,
    bookings: web::Data<BookingService<SqliteBookingRepository>>,
) -> Result<HttpResponse, DomainError> {
    let owned = match &user {
        Some(user) => bookings.list_bookings(user.id).await?,
        None => Vec::new(),
    };

    let mut ctx = Context::new();
    ctx.insert("user", &user);
    ctx.insert("services", SERVICES);
    ctx.insert("bookings", &owned);
    render("index.html", &ctx)
}
