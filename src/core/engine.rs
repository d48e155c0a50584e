use crate::core::aggregate::{aggregate_rows, AgencyRecord, KeyPolicy};
use crate::core::distance::distance_miles;
use crate::core::filter::{passes_home_delivery, within_radius, CaseSensitivity, DayFilter};
use crate::core::normalize;
use crate::core::rank::rank_by_distance;
use crate::domain::model::{Coordinates, FilteredAgency, JoinRow, NearbyAgency};

pub const DEFAULT_RADIUS_MILES: f64 = 5.0;

/// Named engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    pub key_policy: KeyPolicy,
    pub as_needed: CaseSensitivity,
}

impl EngineProfile {
    /// Raw listing: one record per hours entry, exact "As Needed" match.
    pub const NEARBY: EngineProfile = EngineProfile {
        key_policy: KeyPolicy::PerHoursEntry,
        as_needed: CaseSensitivity::Exact,
    };

    /// One record per agency, case-insensitive "As Needed" match.
    pub const FILTERED: EngineProfile = EngineProfile {
        key_policy: KeyPolicy::PerAgency,
        as_needed: CaseSensitivity::Insensitive,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgencyQuery<'a> {
    pub origin: Coordinates,
    pub radius_miles: f64,
    pub day: &'a str,
    pub home_delivery: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedAgency {
    pub record: AgencyRecord,
    pub distance: f64,
}

impl RankedAgency {
    pub fn into_nearby(self) -> NearbyAgency {
        let RankedAgency { record, distance } = self;
        NearbyAgency {
            name: normalize::display_name(&record.name),
            address: normalize::display_address(record.address.as_deref()),
            phone: normalize::display_phone(record.phone.as_deref()),
            hours: normalize::hours_range(record.start_time.as_deref(), record.end_time.as_deref()),
            prepared_meals: normalize::prepared_meals_badge(record.food_format.as_deref()),
            appointment: normalize::appointment_badge(record.appointment_only),
            home_delivery: normalize::home_delivery_badge(record.distribution_model.as_deref()),
            id: record.agency_id,
            agency_type: record.agency_type,
            latitude: record.coordinates.latitude,
            longitude: record.coordinates.longitude,
            distance,
            day: record.day_of_week,
            frequency: record.frequency,
            distribution_model: record.distribution_model,
            pantry_requirements: record.pantry_requirements,
            wraparound_services: record.wraparound_services,
            cultures_served: record.cultures_served,
        }
    }

    pub fn into_filtered(self) -> FilteredAgency {
        let RankedAgency { record, distance } = self;
        FilteredAgency {
            id: record.agency_id,
            name: record.name,
            agency_type: record.agency_type,
            address: record.address,
            phone: record.phone,
            latitude: record.coordinates.latitude,
            longitude: record.coordinates.longitude,
            distance,
            day_of_week: record.day_of_week,
            start_time: record.start_time,
            end_time: record.end_time,
            frequency: record.frequency,
            distribution_model: record.distribution_model,
            food_format: record.food_format,
            appointment_only: record.appointment_only,
            pantry_requirements: record.pantry_requirements,
            wraparound_services: record.wraparound_services,
            cultures_served: record.cultures_served,
        }
    }
}

/// Stateless resolution engine: aggregate, filter, rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionEngine {
    profile: EngineProfile,
}

impl ResolutionEngine {
    pub fn new(profile: EngineProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> EngineProfile {
        self.profile
    }

    pub fn resolve(&self, rows: &[JoinRow], query: &AgencyQuery<'_>) -> Vec<RankedAgency> {
        let day = DayFilter::new(query.day, self.profile.as_needed);
        let records = aggregate_rows(rows, &day, self.profile.key_policy);
        let aggregated = records.len();

        let mut ranked: Vec<RankedAgency> = records
            .into_iter()
            .filter_map(|record| {
                let distance = distance_miles(query.origin, record.coordinates);
                if !within_radius(distance, query.radius_miles) {
                    return None;
                }
                if !passes_home_delivery(query.home_delivery, record.distribution_model.as_deref()) {
                    return None;
                }
                Some(RankedAgency { record, distance })
            })
            .collect();

        rank_by_distance(&mut ranked, |a| a.distance);

        tracing::debug!(
            "Resolved {} rows into {} records, {} within {} miles for {}",
            rows.len(),
            aggregated,
            ranked.len(),
            query.radius_miles,
            query.day
        );

        ranked
    }
}

/// Display-badge listing, one entry per matching hours entry.
pub fn resolve_nearby(
    rows: &[JoinRow],
    origin: Coordinates,
    radius_miles: f64,
    day: &str,
    home_delivery: bool,
) -> Vec<NearbyAgency> {
    let query = AgencyQuery {
        origin,
        radius_miles,
        day,
        home_delivery,
    };
    ResolutionEngine::new(EngineProfile::NEARBY)
        .resolve(rows, &query)
        .into_iter()
        .map(RankedAgency::into_nearby)
        .collect()
}

/// Raw-field listing, one entry per agency.
pub fn resolve_filtered(
    rows: &[JoinRow],
    origin: Coordinates,
    max_distance_miles: f64,
    day: &str,
) -> Vec<FilteredAgency> {
    let query = AgencyQuery {
        origin,
        radius_miles: max_distance_miles,
        day,
        home_delivery: false,
    };
    ResolutionEngine::new(EngineProfile::FILTERED)
        .resolve(rows, &query)
        .into_iter()
        .map(RankedAgency::into_filtered)
        .collect()
}
