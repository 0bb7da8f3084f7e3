use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::data::booking_repository::BookingRepository;
use crate::domain::booking::{Booking, BookingKind, STATUS_PENDING, VehicleDetails};
use crate::domain::error::DomainError;
use crate::presentation::dto::BookingForm;

#[derive(Clone)]
pub struct BookingService<R: BookingRepository + 'static> {
    repo: Arc<R>,
}

impl<R> BookingService<R>
where
    R: BookingRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validates a submitted form and persists one booking owned by
    /// `owner`. Every mandatory field must be present and non-blank; the
    /// car-wash variant additionally requires the vehicle fields. Status
    /// is always `Pending`.
    #[instrument(skip(self, form))]
    pub async fn create_booking(
        &self,
        owner: Uuid,
        form: BookingForm,
        kind: BookingKind,
    ) -> Result<Booking, DomainError> {
        let service_type = require(form.service_type, "service_type")?;
        let date_raw = require(form.date, "date")?;
        let time_raw = require(form.time, "time")?;
        let location = require(form.location, "location")?;
        let package = require(form.package, "package")?;
        let payment_method = require(form.payment_method, "payment_method")?;
        let payment_status = require(form.payment_status, "payment_status")?;

        let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
            .map_err(|_| DomainError::InvalidField("date"))?;
        let time = parse_time(&time_raw)?;

        let vehicle = match kind {
            BookingKind::Generic => None,
            BookingKind::CarWash => Some(VehicleDetails {
                car_make: require(form.car_make, "car_make")?,
                car_type: require(form.car_type, "car_type")?,
                vehicle_number: require(form.vehicle_number, "vehicle_number")?,
                color: optional(form.color),
                special_instructions: optional(form.special_instructions),
                promo_code: optional(form.promo_code),
            }),
        };

        let addons = form
            .addons
            .into_iter()
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty())
            .collect();

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: owner,
            service_type,
            date,
            time,
            location,
            package,
            addons,
            payment_method,
            payment_status,
            status: STATUS_PENDING.to_owned(),
            vehicle,
            created_at: Utc::now(),
        };
        self.repo.create(booking).await
    }

    /// All bookings owned by `owner`, most recently created first.
    pub async fn list_bookings(&self, owner: Uuid) -> Result<Vec<Booking>, DomainError> {
        self.repo.find_by_owner(owner).await
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, DomainError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(DomainError::MissingField(field))
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

// The HTML time input submits HH:MM, but accept seconds too.
fn parse_time(raw: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| DomainError::InvalidField("time"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_blank_values() {
        assert!(matches!(
            require(None, "location"),
            Err(DomainError::MissingField("location"))
        ));
        assert!(matches!(
            require(Some("   ".into()), "location"),
            Err(DomainError::MissingField("location"))
        ));
        assert_eq!(require(Some(" Downtown ".into()), "location").unwrap(), "Downtown");
    }

    #[test]
    fn optional_drops_blank_values() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" Red ".into())), Some("Red".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn time_accepts_both_form_precisions() {
        assert!(parse_time("10:00").is_ok());
        assert!(parse_time("10:00:30").is_ok());
        assert!(matches!(
            parse_time("25:99"),
            Err(DomainError::InvalidField("time"))
        ));
    }
}
