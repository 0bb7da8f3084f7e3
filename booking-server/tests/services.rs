use std::sync::Arc;

use booking_server::application::auth_service::AuthService;
use booking_server::application::booking_service::BookingService;
use booking_server::data::booking_repository::SqliteBookingRepository;
use booking_server::data::user_repository::SqliteUserRepository;
use booking_server::domain::booking::BookingKind;
use booking_server::domain::error::DomainError;
use booking_server::domain::user::User;
use booking_server::infrastructure::database::run_migrations;
use booking_server::infrastructure::security::SessionKeys;
use booking_server::presentation::dto::BookingForm;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

// One connection so every handle sees the same in-memory database.
async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

fn auth_service(pool: &SqlitePool) -> AuthService<SqliteUserRepository> {
    AuthService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        SessionKeys::new("test-secret".into()),
    )
}

fn booking_service(pool: &SqlitePool) -> BookingService<SqliteBookingRepository> {
    BookingService::new(Arc::new(SqliteBookingRepository::new(pool.clone())))
}

async fn register_ana(auth: &AuthService<SqliteUserRepository>) -> User {
    auth.register("Ana".into(), "555-1".into(), "a@x.com".into(), "p1".into())
        .await
        .expect("signup")
}

fn generic_form(pairs: &[(&str, &str)]) -> BookingForm {
    BookingForm::from_pairs(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect(),
    )
}

fn full_form() -> BookingForm {
    generic_form(&[
        ("service_type", "Car Wash"),
        ("date", "2024-05-01"),
        ("time", "10:00"),
        ("location", "Downtown"),
        ("package", "Basic"),
        ("payment_method", "Cash"),
        ("payment_status", "Unpaid"),
        ("addons", "Wax"),
        ("addons", "Polish"),
    ])
}

async fn user_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn booking_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn duplicate_phone_is_rejected_without_writing() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);

    register_ana(&auth).await;
    let err = auth
        .register("Ben".into(), "555-1".into(), "b@x.com".into(), "p2".into())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::DuplicatePhone));
    assert_eq!(user_count(&pool).await, 1);
}

#[tokio::test]
async fn login_after_signup_resolves_to_the_same_user() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);

    let user = register_ana(&auth).await;
    let token = auth.login("555-1", "p1").await.expect("login");

    let claims = auth.keys().verify(&token).expect("valid session token");
    assert_eq!(claims.sub, user.id.to_string());

    let resolved = auth.get_user(user.id).await.expect("user exists");
    assert_eq!(resolved.name, "Ana");
    assert_eq!(resolved.phone, "555-1");
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);

    register_ana(&auth).await;
    let err = auth.login("555-1", "wrong").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    // Unknown phone looks exactly the same from the outside.
    let err = auth.login("555-9", "p1").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn booking_is_owned_by_submitter_and_pending() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);
    let bookings = booking_service(&pool);

    let ana = register_ana(&auth).await;
    let booking = bookings
        .create_booking(ana.id, full_form(), BookingKind::Generic)
        .await
        .expect("booking");

    assert_eq!(booking.user_id, ana.id);
    assert_eq!(booking.status, "Pending");
    assert_eq!(booking.addons, vec!["Wax", "Polish"]);
    assert!(booking.vehicle.is_none());

    let stored = bookings.list_bookings(ana.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, booking.id);
    assert_eq!(stored[0].service_type, "Car Wash");
    assert_eq!(stored[0].addons, vec!["Wax", "Polish"]);
}

#[tokio::test]
async fn listing_returns_most_recent_first() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);
    let bookings = booking_service(&pool);

    let ana = register_ana(&auth).await;
    for service in ["First", "Second", "Third"] {
        let mut form = full_form();
        form.service_type = Some(service.to_owned());
        bookings
            .create_booking(ana.id, form, BookingKind::Generic)
            .await
            .unwrap();
    }

    let stored = bookings.list_bookings(ana.id).await.unwrap();
    let services: Vec<&str> = stored.iter().map(|b| b.service_type.as_str()).collect();
    assert_eq!(services, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn listing_is_empty_for_a_user_without_bookings() {
    let pool = test_pool().await;
    let bookings = booking_service(&pool);
    assert!(bookings.list_bookings(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_field_names_the_field() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);
    let bookings = booking_service(&pool);

    let ana = register_ana(&auth).await;
    let mut form = full_form();
    form.location = None;

    let err = bookings
        .create_booking(ana.id, form, BookingKind::Generic)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MissingField("location")));
    assert_eq!(booking_count(&pool).await, 0);
}

#[tokio::test]
async fn invalid_date_is_rejected() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);
    let bookings = booking_service(&pool);

    let ana = register_ana(&auth).await;
    let mut form = full_form();
    form.date = Some("not-a-date".into());

    let err = bookings
        .create_booking(ana.id, form, BookingKind::Generic)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidField("date")));
    assert_eq!(booking_count(&pool).await, 0);
}

#[tokio::test]
async fn carwash_requires_vehicle_fields() {
    let pool = test_pool().await;
    let auth = auth_service(&pool);
    let bookings = booking_service(&pool);

    let ana = register_ana(&auth).await;
    let err = bookings
        .create_booking(ana.id, full_form(), BookingKind::CarWash)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MissingField("car_make")));
    assert_eq!(booking_count(&pool).await, 0);

    let mut form = full_form();
    form.car_make = Some("Toyota".into());
    form.car_type = Some("Sedan".into());
    form.vehicle_number = Some("ABC-123".into());
    form.color = Some("Red".into());

    let booking = bookings
        .create_booking(ana.id, form, BookingKind::CarWash)
        .await
        .expect("car-wash booking");
    let vehicle = booking.vehicle.expect("vehicle details");
    assert_eq!(vehicle.car_make, "Toyota");
    assert_eq!(vehicle.vehicle_number, "ABC-123");
    assert_eq!(vehicle.color.as_deref(), Some("Red"));
    assert_eq!(vehicle.promo_code, None);

    // The vehicle details survive the round trip through the store.
    let stored = bookings.list_bookings(ana.id).await.unwrap();
    assert_eq!(stored[0].vehicle.as_ref().unwrap().car_make, "Toyota");
}
