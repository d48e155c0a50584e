use crate::core::filter::DayFilter;
use crate::domain::model::{AgencyType, AppointmentOnly, Coordinates, JoinRow};
use std::collections::{BTreeSet, HashMap};

/// What identifies one output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// One record per agency id.
    PerAgency,
    /// One record per agency hours entry; only the service/culture
    /// cross-product is collapsed.
    PerHoursEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RowKey {
    Agency(String),
    HoursEntry {
        agency_id: String,
        day: String,
        start_time: Option<String>,
        end_time: Option<String>,
        frequency: Option<String>,
        distribution_model: Option<String>,
        food_format: Option<String>,
        appointment_only: AppointmentOnly,
        pantry_requirements: Option<String>,
    },
}

impl RowKey {
    fn for_row(row: &JoinRow, policy: KeyPolicy) -> Self {
        match policy {
            KeyPolicy::PerAgency => RowKey::Agency(row.agency_id.clone()),
            KeyPolicy::PerHoursEntry => RowKey::HoursEntry {
                agency_id: row.agency_id.clone(),
                day: row.day_or_null().to_string(),
                start_time: row.start_time.clone(),
                end_time: row.end_time.clone(),
                frequency: row.frequency.clone(),
                distribution_model: row.distribution_model.clone(),
                food_format: row.food_format.clone(),
                appointment_only: row.appointment_only,
                pantry_requirements: row.pantry_requirements.clone(),
            },
        }
    }
}

/// One logical agency built from its join rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AgencyRecord {
    pub agency_id: String,
    pub name: String,
    pub agency_type: AgencyType,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub coordinates: Coordinates,
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

impl AgencyRecord {
    fn seed(row: &JoinRow, coordinates: Coordinates) -> Self {
        Self {
            agency_id: row.agency_id.clone(),
            name: row.name.clone(),
            agency_type: row.agency_type,
            address: row.address.clone(),
            phone: row.phone.clone(),
            coordinates,
            day_of_week: row.day_or_null().to_string(),
            start_time: row.start_time.clone(),
            end_time: row.end_time.clone(),
            frequency: row.frequency.clone(),
            distribution_model: row.distribution_model.clone(),
            food_format: row.food_format.clone(),
            appointment_only: row.appointment_only,
            pantry_requirements: row.pantry_requirements.clone(),
            wraparound_services: BTreeSet::new(),
            cultures_served: BTreeSet::new(),
        }
    }

    fn absorb(&mut self, row: &JoinRow) {
        if let Some(service) = row.service.as_deref().filter(|s| !s.trim().is_empty()) {
            self.wraparound_services.insert(service.to_string());
        }
        if let Some(culture) = row.culture.as_deref().filter(|c| !c.trim().is_empty()) {
            self.cultures_served.insert(culture.to_string());
        }
    }
}

/// Folds join rows for the requested day into agency records, in first-seen order.
///
/// Rows without coordinates cannot be placed and are skipped.
pub fn aggregate_rows(rows: &[JoinRow], day: &DayFilter<'_>, policy: KeyPolicy) -> Vec<AgencyRecord> {
    let mut index: HashMap<RowKey, usize> = HashMap::new();
    let mut records: Vec<AgencyRecord> = Vec::new();

    for row in rows {
        if !day.matches(row.day_or_null()) {
            continue;
        }

        let Some(coordinates) = row.coordinates() else {
            tracing::debug!("Skipping row for agency {} without coordinates", row.agency_id);
            continue;
        };

        let key = RowKey::for_row(row, policy);
        let slot = *index.entry(key).or_insert_with(|| {
            records.push(AgencyRecord::seed(row, coordinates));
            records.len() - 1
        });
        records[slot].absorb(row);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::CaseSensitivity;

    fn row(id: &str, day: Option<&str>, start: &str, service: Option<&str>, culture: Option<&str>) -> JoinRow {
        JoinRow {
            agency_id: id.to_string(),
            name: format!("Agency {}", id),
            agency_type: AgencyType::Market,
            address: Some("1 Main St".to_string()),
            phone: None,
            latitude: Some(38.9),
            longitude: Some(-77.0),
            day_of_week: day.map(str::to_string),
            start_time: Some(start.to_string()),
            end_time: Some("12:00:00".to_string()),
            frequency: None,
            distribution_model: None,
            food_format: None,
            appointment_only: AppointmentOnly::Unknown,
            pantry_requirements: None,
            service: service.map(str::to_string),
            culture: culture.map(str::to_string),
        }
    }

    #[test]
    fn test_cross_product_collapses_per_agency() {
        let rows = vec![
            row("A1", Some("Monday"), "09:00:00", Some("Produce Box"), Some("Latino")),
            row("A1", Some("Monday"), "09:00:00", Some("Clothing"), Some("Latino")),
            row("A1", Some("Monday"), "09:00:00", Some("Clothing"), Some("Ethiopian")),
        ];
        let day = DayFilter::new("monday", CaseSensitivity::Insensitive);

        let records = aggregate_rows(&rows, &day, KeyPolicy::PerAgency);

        assert_eq!(records.len(), 1);
        let services: Vec<_> = records[0].wraparound_services.iter().cloned().collect();
        assert_eq!(services, vec!["Clothing", "Produce Box"]);
        assert_eq!(records[0].cultures_served.len(), 2);
    }

    #[test]
    fn test_first_row_seeds_scalars() {
        let rows = vec![
            row("A1", Some("Monday"), "09:00:00", None, None),
            row("A1", Some("Monday"), "14:00:00", None, None),
        ];
        let day = DayFilter::new("Monday", CaseSensitivity::Insensitive);

        let records = aggregate_rows(&rows, &day, KeyPolicy::PerAgency);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_time.as_deref(), Some("09:00:00"));
    }

    #[test]
    fn test_per_hours_entry_keeps_distinct_hours() {
        let rows = vec![
            row("A1", Some("Monday"), "09:00:00", Some("Clothing"), None),
            row("A1", Some("Monday"), "09:00:00", Some("Produce Box"), None),
            row("A1", Some("Monday"), "14:00:00", Some("Clothing"), None),
        ];
        let day = DayFilter::new("monday", CaseSensitivity::Exact);

        let records = aggregate_rows(&rows, &day, KeyPolicy::PerHoursEntry);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].wraparound_services.len(), 2);
        assert_eq!(records[1].wraparound_services.len(), 1);
    }

    #[test]
    fn test_null_day_and_missing_coordinates_are_dropped() {
        let mut no_coords = row("A2", Some("Monday"), "09:00:00", None, None);
        no_coords.latitude = None;
        let rows = vec![row("A1", None, "09:00:00", None, None), no_coords];
        let day = DayFilter::new("monday", CaseSensitivity::Insensitive);

        assert!(aggregate_rows(&rows, &day, KeyPolicy::PerAgency).is_empty());

        let null_day = DayFilter::new("null", CaseSensitivity::Insensitive);
        let records = aggregate_rows(&rows, &null_day, KeyPolicy::PerAgency);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].day_of_week, "Null");
    }

    #[test]
    fn test_output_follows_first_seen_order() {
        let rows = vec![
            row("B", Some("Monday"), "09:00:00", None, None),
            row("A", Some("Monday"), "09:00:00", None, None),
            row("B", Some("Monday"), "09:00:00", Some("Clothing"), None),
        ];
        let day = DayFilter::new("monday", CaseSensitivity::Insensitive);

        let ids: Vec<_> = aggregate_rows(&rows, &day, KeyPolicy::PerAgency)
            .into_iter()
            .map(|r| r.agency_id)
            .collect();
        assert_eq!(ids, vec!["B", "A"]);
    }
}
