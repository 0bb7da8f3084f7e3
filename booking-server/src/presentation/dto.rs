use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
}

// ======================= BOOKINGS =======================

/// Raw booking submission. Collected from url-encoded pairs rather than a
/// derived struct because the add-ons checkbox group repeats its key,
/// which a plain form deserializer cannot express.
#[derive(Debug, Default)]
pub struct BookingForm {
    pub service_type: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub package: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub addons: Vec<String>,
    pub car_make: Option<String>,
    pub car_type: Option<String>,
    pub vehicle_number: Option<String>,
    pub color: Option<String>,
    pub special_instructions: Option<String>,
    pub promo_code: Option<String>,
}

impl BookingForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "service_type" => form.service_type = Some(value),
                "date" => form.date = Some(value),
                "time" => form.time = Some(value),
                "location" => form.location = Some(value),
                "package" => form.package = Some(value),
                "payment_method" => form.payment_method = Some(value),
                "payment_status" => form.payment_status = Some(value),
                "addons" => form.addons.push(value),
                "car_make" => form.car_make = Some(value),
                "car_type" => form.car_type = Some(value),
                "vehicle_number" => form.vehicle_number = Some(value),
                "color" => form.color = Some(value),
                "special_instructions" => form.special_instructions = Some(value),
                "promo_code" => form.promo_code = Some(value),
                _ => {}
            }
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::BookingForm;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn repeated_addon_keys_accumulate_in_order() {
        let form = BookingForm::from_pairs(pairs(&[
            ("service_type", "Car Wash"),
            ("addons", "Wax"),
            ("addons", "Polish"),
        ]));
        assert_eq!(form.service_type.as_deref(), Some("Car Wash"));
        assert_eq!(form.addons, vec!["Wax", "Polish"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let form = BookingForm::from_pairs(pairs(&[("csrf_token", "abc"), ("date", "2024-05-01")]));
        assert_eq!(form.date.as_deref(), Some("2024-05-01"));
        assert!(form.addons.is_empty());
    }
}
