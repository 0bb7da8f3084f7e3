pub mod auth;
pub mod booking;
pub mod home;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home)
        .service(auth::signup_form)
        .service(auth::signup)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::logout)
        .service(booking::booking_form)
        .service(booking::create_booking)
        .service(booking::carwash_form)
        .service(booking::create_carwash_booking);
}
