use std::sync::Arc;

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use booking_server::application::auth_service::AuthService;
use booking_server::application::booking_service::BookingService;
use booking_server::data::booking_repository::SqliteBookingRepository;
use booking_server::data::user_repository::SqliteUserRepository;
use booking_server::infrastructure::config::AppConfig;
use booking_server::infrastructure::database::{create_pool, run_migrations};
use booking_server::infrastructure::logging::init_logging;
use booking_server::infrastructure::security::SessionKeys;
use booking_server::presentation::handlers;
use booking_server::presentation::middleware::{
    RequestIdMiddleware, SessionMiddleware, TimingMiddleware,
};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let pool = create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepository::new(pool.clone()));

    let keys = SessionKeys::new(config.session_secret.clone());
    let auth_service = AuthService::new(Arc::clone(&user_repo), keys.clone());
    let booking_service = BookingService::new(Arc::clone(&booking_repo));

    info!(host = %config.host, port = config.port, "starting booking server");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(TimingMiddleware)
            .wrap(SessionMiddleware::new(keys.clone()))
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(booking_service.clone()))
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
