use crate::core::filter::offers_home_delivery;
use crate::domain::model::{AppointmentBadge, AppointmentOnly, Availability};
use chrono::NaiveTime;

pub const PREPARED_MEALS_MARKER: &str = "Prepared meals";
pub const ATTN_PREFIX: &str = "Attn:";
pub const NO_PHONE: &str = "No phone number available";
pub const NO_TIME: &str = "N/A";

pub fn prepared_meals_badge(food_format: Option<&str>) -> Availability {
    Availability::from_flag(food_format.is_some_and(|f| f.contains(PREPARED_MEALS_MARKER)))
}

pub fn home_delivery_badge(distribution_model: Option<&str>) -> Availability {
    Availability::from_flag(offers_home_delivery(distribution_model))
}

pub fn appointment_badge(appointment_only: AppointmentOnly) -> AppointmentBadge {
    match appointment_only {
        AppointmentOnly::Yes => AppointmentBadge::Required,
        AppointmentOnly::No | AppointmentOnly::Unknown => AppointmentBadge::NotRequired,
    }
}

/// `"Partner: Downtown Pantry"` becomes `"Downtown Pantry"`.
pub fn display_name(name: &str) -> String {
    match name.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => name.to_string(),
    }
}

pub fn display_address(address: Option<&str>) -> String {
    let address = address.unwrap_or_default();
    match address.strip_prefix(ATTN_PREFIX) {
        Some(rest) => rest.trim_start().to_string(),
        None => address.to_string(),
    }
}

pub fn display_phone(phone: Option<&str>) -> String {
    non_blank(phone).unwrap_or(NO_PHONE).to_string()
}

/// `"09:00:00"`, `"17:30:00"` renders as `"09:00 - 17:30"`.
pub fn hours_range(start_time: Option<&str>, end_time: Option<&str>) -> String {
    format!("{} - {}", hour_minute(start_time), hour_minute(end_time))
}

fn hour_minute(time: Option<&str>) -> &str {
    match non_blank(time) {
        Some(t) => t.get(..5).unwrap_or(t),
        None => NO_TIME,
    }
}

/// `"09:00:00"` renders as `"9:00 AM"`; unparseable values yield `None`.
pub fn format_time_12hr(time: Option<&str>) -> Option<String> {
    let raw = non_blank(time)?.trim();
    let parsed = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok());

    match parsed {
        Some(t) => Some(t.format("%-I:%M %p").to_string()),
        None => {
            tracing::warn!("Time formatting error: unrecognised time '{}'", raw);
            None
        }
    }
}

pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
