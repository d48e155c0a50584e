use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Literal stored in place of a missing day-of-week.
pub const NULL_DAY: &str = "Null";
/// Day value that matches every requested day.
pub const AS_NEEDED_DAY: &str = "As Needed";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgencyType {
    Market,
    ShoppingPartner,
}

/// Nullable appointment-only flag as stored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentOnly {
    #[serde(rename = "required")]
    Yes,
    #[serde(rename = "not_required")]
    No,
    #[default]
    Unknown,
}

impl AppointmentOnly {
    /// `1`, `true` and `yes` are truthy; `0`, `false` and `no` are falsy.
    /// Also accepts its own serialized labels.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "required" => AppointmentOnly::Yes,
            "0" | "false" | "no" | "not_required" => AppointmentOnly::No,
            _ => AppointmentOnly::Unknown,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for AppointmentOnly {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<RawFlag> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawFlag::Bool(true)) | Some(RawFlag::Int(1)) => AppointmentOnly::Yes,
            Some(RawFlag::Bool(false)) | Some(RawFlag::Int(0)) => AppointmentOnly::No,
            Some(RawFlag::Float(f)) if f == 1.0 => AppointmentOnly::Yes,
            Some(RawFlag::Float(f)) if f == 0.0 => AppointmentOnly::No,
            Some(RawFlag::Text(text)) => AppointmentOnly::from_raw(&text),
            _ => AppointmentOnly::Unknown,
        })
    }
}

/// One row of the agency × hours × service × culture join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRow {
    pub agency_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agency_type: AgencyType,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub frequency: Option<String>,
    pub distribution_model: Option<String>,
    pub food_format: Option<String>,
    #[serde(default)]
    pub appointment_only: AppointmentOnly,
    pub pantry_requirements: Option<String>,
    pub service: Option<String>,
    pub culture: Option<String>,
}

impl JoinRow {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn day_or_null(&self) -> &str {
        self.day_of_week.as_deref().unwrap_or(NULL_DAY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Not available")]
    NotAvailable,
}

impl Availability {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Availability::Available
        } else {
            Availability::NotAvailable
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::NotAvailable => write!(f, "Not available"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentBadge {
    #[serde(rename = "Required")]
    Required,
    #[serde(rename = "Not required")]
    NotRequired,
}

impl fmt::Display for AppointmentBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentBadge::Required => write!(f, "Required"),
            AppointmentBadge::NotRequired => write!(f, "Not required"),
        }
    }
}

/// Display-badge shape returned by the nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyAgency {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agency_type: AgencyType,
    pub address: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
    pub day: String,
    pub hours: String,
    pub frequency: Option<String>,
    pub distribution_model: Option<String>,
    pub prepared_meals: Availability,
    pub appointment: AppointmentBadge,
    pub home_delivery: Availability,
    pub pantry_requirements: Option<String>,
    pub wraparound_services: BTreeSet<String>,
    pub cultures_served: BTreeSet<String>,
}

/// Raw-field shape returned by the expert query and fed to the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredAgency {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agency_type: AgencyType,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
    pub day_of_week: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub frequency: Option<String>,
    pub distribution_model: Option<String>,
    pub food_format: Option<String>,
    pub appointment_only: AppointmentOnly,
    pub pantry_requirements: Option<String>,
    pub wraparound_services: BTreeSet<String>,
    pub cultures_served: BTreeSet<String>,
}

/// Directory entry: one distinct (id, name) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyListing {
    pub id: String,
    pub name: String,
}

/// Contact card for a single agency looked up by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyProfile {
    pub agency_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agency_type: AgencyType,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointment_only_from_raw() {
        assert_eq!(AppointmentOnly::from_raw("1"), AppointmentOnly::Yes);
        assert_eq!(AppointmentOnly::from_raw(" Yes "), AppointmentOnly::Yes);
        assert_eq!(AppointmentOnly::from_raw("0"), AppointmentOnly::No);
        assert_eq!(AppointmentOnly::from_raw("no"), AppointmentOnly::No);
        assert_eq!(AppointmentOnly::from_raw(""), AppointmentOnly::Unknown);
        assert_eq!(AppointmentOnly::from_raw("maybe"), AppointmentOnly::Unknown);
    }

    #[test]
    fn test_badges_serialize_to_display_labels() {
        assert_eq!(
            serde_json::to_string(&Availability::NotAvailable).unwrap(),
            "\"Not available\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentBadge::Required).unwrap(),
            "\"Required\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentOnly::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_join_row_deserializes_null_appointment_as_unknown() {
        let row: JoinRow = serde_json::from_value(serde_json::json!({
            "agency_id": "A1",
            "name": "Pantry",
            "type": "market",
            "address": null,
            "phone": null,
            "latitude": 38.9,
            "longitude": -77.0,
            "day_of_week": null,
            "start_time": null,
            "end_time": null,
            "frequency": null,
            "distribution_model": null,
            "food_format": null,
            "appointment_only": null,
            "pantry_requirements": null,
            "service": null,
            "culture": null
        }))
        .unwrap();

        assert_eq!(row.appointment_only, AppointmentOnly::Unknown);
        assert_eq!(row.day_or_null(), NULL_DAY);
        assert!(row.coordinates().is_some());
    }
}
