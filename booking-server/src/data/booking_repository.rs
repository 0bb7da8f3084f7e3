use crate::domain::booking::{Booking, VehicleDetails};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError>;
    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Booking>, DomainError>;
}

#[derive(Clone)]
pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Flat row shape of the `bookings` table. Add-ons live here as a single
/// delimited string; the split/join happens only at this boundary.
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    service_type: String,
    date: NaiveDate,
    time: NaiveTime,
    location: String,
    package: String,
    addons: String,
    payment_method: String,
    payment_status: String,
    status: String,
    car_make: Option<String>,
    car_type: Option<String>,
    vehicle_number: Option<String>,
    color: Option<String>,
    special_instructions: Option<String>,
    promo_code: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        let vehicle = match (row.car_make, row.car_type, row.vehicle_number) {
            (Some(car_make), Some(car_type), Some(vehicle_number)) => Some(VehicleDetails {
                car_make,
                car_type,
                vehicle_number,
                color: row.color,
                special_instructions: row.special_instructions,
                promo_code: row.promo_code,
            }),
            _ => None,
        };

        Booking {
            id: row.id,
            user_id: row.user_id,
            service_type: row.service_type,
            date: row.date,
            time: row.time,
            location: row.location,
            package: row.package,
            addons: split_addons(&row.addons),
            payment_method: row.payment_method,
            payment_status: row.payment_status,
            status: row.status,
            vehicle,
            created_at: row.created_at,
        }
    }
}

fn join_addons(addons: &[String]) -> String {
    addons.join(", ")
}

fn split_addons(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let vehicle = booking.vehicle.as_ref();
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, service_type, date, time, location, package,
                addons, payment_method, payment_status, status,
                car_make, car_type, vehicle_number, color,
                special_instructions, promo_code, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(&booking.service_type)
        .bind(booking.date)
        .bind(booking.time)
        .bind(&booking.location)
        .bind(&booking.package)
        .bind(join_addons(&booking.addons))
        .bind(&booking.payment_method)
        .bind(&booking.payment_status)
        .bind(&booking.status)
        .bind(vehicle.map(|v| v.car_make.as_str()))
        .bind(vehicle.map(|v| v.car_type.as_str()))
        .bind(vehicle.map(|v| v.vehicle_number.as_str()))
        .bind(vehicle.and_then(|v| v.color.as_deref()))
        .bind(vehicle.and_then(|v| v.special_instructions.as_deref()))
        .bind(vehicle.and_then(|v| v.promo_code.as_deref()))
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create booking: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(booking_id = %booking.id, user_id = %booking.user_id, "booking created");
        Ok(booking)
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Booking>, DomainError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, service_type, date, time, location, package,
                   addons, payment_method, payment_status, status,
                   car_make, car_type, vehicle_number, color,
                   special_instructions, promo_code, created_at
            FROM bookings
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list bookings for {}: {}", owner, e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}
