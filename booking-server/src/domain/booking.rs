use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Initial lifecycle status of every booking. No transition flow exists;
/// bookings are write-once.
pub const STATUS_PENDING: &str = "Pending";

/// Which booking form a submission came from. The car-wash form carries
/// vehicle details on top of the common fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Generic,
    CarWash,
}

/// Vehicle attributes captured by the car-wash variant of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub car_make: String,
    pub car_type: String,
    pub vehicle_number: String,
    pub color: Option<String>,
    pub special_instructions: Option<String>,
    pub promo_code: Option<String>,
}

/// A single service reservation owned by exactly one user.
///
/// Both form variants share this shape; `vehicle` is populated only for
/// car-wash submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub package: String,
    pub addons: Vec<String>,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub vehicle: Option<VehicleDetails>,
    pub created_at: DateTime<Utc>,
}
