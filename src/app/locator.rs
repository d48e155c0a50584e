use crate::config::toml_config::LocatorConfig;
use crate::core::directory::{find_agency, list_agencies};
use crate::core::engine::{resolve_filtered, resolve_nearby};
use crate::core::summary::{summarize, title_case_day};
use crate::domain::model::{AgencyListing, AgencyProfile, Coordinates, FilteredAgency, NearbyAgency};
use crate::domain::ports::{Geocoder, RowSource};
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{require_query_param, validate_coordinates, validate_query_radius};

/// Parameters of a nearby search, as received from the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub day: Option<String>,
    pub radius: Option<f64>,
    pub home_delivery: bool,
}

/// Validates requests, geocodes, loads rows and runs the engine.
pub struct LocatorService<G: Geocoder, R: RowSource> {
    geocoder: G,
    rows: R,
    default_radius_miles: f64,
    default_max_distance_miles: f64,
}

impl<G: Geocoder, R: RowSource> LocatorService<G, R> {
    pub fn new(geocoder: G, rows: R, config: &LocatorConfig) -> Self {
        Self {
            geocoder,
            rows,
            default_radius_miles: config.default_radius_miles(),
            default_max_distance_miles: config.default_max_distance_miles(),
        }
    }

    pub fn default_max_distance_miles(&self) -> f64 {
        self.default_max_distance_miles
    }

    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        match self.geocoder.resolve(address).await? {
            Some(coordinates) => {
                tracing::debug!(
                    "Geocoded '{}' to ({}, {}) via {}",
                    address,
                    coordinates.latitude,
                    coordinates.longitude,
                    self.geocoder.provider()
                );
                Ok(coordinates)
            }
            None => {
                tracing::warn!("No location found for '{}'", address);
                Err(LocatorError::LocationNotFound {
                    query: address.to_string(),
                })
            }
        }
    }

    async fn requester_origin(&self, request: &SearchRequest) -> Result<Coordinates> {
        if let Some(address) = request.address.as_deref().filter(|a| !a.trim().is_empty()) {
            return self.geocode(address).await;
        }

        match (request.lat, request.lng) {
            (Some(lat), Some(lng)) => {
                validate_coordinates(lat, lng)?;
                Ok(Coordinates::new(lat, lng))
            }
            _ => Err(LocatorError::InvalidQuery {
                field: "address".to_string(),
                reason: "Address or coordinates are required".to_string(),
            }),
        }
    }

    /// Nearby search with display badges; an address takes precedence over lat/lng.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<NearbyAgency>> {
        let day = require_query_param("day", request.day.as_deref())?;
        let radius = request.radius.unwrap_or(self.default_radius_miles);
        validate_query_radius("radius", radius)?;

        let origin = self.requester_origin(request).await?;
        let rows = self.rows.load_rows(None).await?;
        let agencies = resolve_nearby(&rows, origin, radius, day, request.home_delivery);

        tracing::info!(
            "🔍 Nearby search for {} within {} miles: {} of {} rows matched",
            day,
            radius,
            agencies.len(),
            rows.len()
        );
        Ok(agencies)
    }

    /// Expert query: one raw record per agency, sorted by distance.
    pub async fn expert_query(
        &self,
        address: Option<&str>,
        day: Option<&str>,
        max_distance: Option<f64>,
    ) -> Result<Vec<FilteredAgency>> {
        let address = require_query_param("address", address)?;
        let day = require_query_param("day_of_week", day)?;
        let max_distance = max_distance.unwrap_or(self.default_max_distance_miles);
        validate_query_radius("max_distance", max_distance)?;

        let origin = self.geocode(address).await?;
        let rows = self.rows.load_rows(Some(day)).await?;
        let agencies = resolve_filtered(&rows, origin, max_distance, day);

        tracing::info!(
            "🔍 Expert query for {} within {} miles: {} agencies",
            day,
            max_distance,
            agencies.len()
        );
        Ok(agencies)
    }

    /// Expert query rendered as a spoken paragraph.
    pub async fn voice_summary(
        &self,
        address: &str,
        day: &str,
        max_distance: Option<f64>,
    ) -> Result<String> {
        let agencies = self.expert_query(Some(address), Some(day), max_distance).await?;
        Ok(summarize(&agencies, &title_case_day(day)))
    }

    /// Every distinct agency (id, name) in the row source.
    pub async fn list_agencies(&self) -> Result<Vec<AgencyListing>> {
        let rows = self.rows.load_rows(None).await?;
        let agencies = list_agencies(&rows);
        tracing::info!("📋 Listed {} agencies from {} rows", agencies.len(), rows.len());
        Ok(agencies)
    }

    /// Looks up one agency's contact card; `Ok(None)` when the id is unknown.
    pub async fn agency(&self, agency_id: &str) -> Result<Option<AgencyProfile>> {
        let agency_id = require_query_param("agency_id", Some(agency_id))?;
        let rows = self.rows.load_rows(None).await?;
        let profile = find_agency(&rows, agency_id);
        if profile.is_none() {
            tracing::warn!("Agency '{}' not found", agency_id);
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::geocoder::StaticGeocoder;
    use crate::domain::model::{AgencyType, AppointmentOnly, JoinRow};

    struct MemoryRows(Vec<JoinRow>);

    impl RowSource for MemoryRows {
        async fn load_rows(&self, day: Option<&str>) -> Result<Vec<JoinRow>> {
            Ok(self
                .0
                .iter()
                .filter(|row| {
                    day.map_or(true, |d| {
                        row.day_of_week
                            .as_deref()
                            .is_some_and(|rd| rd.eq_ignore_ascii_case(d))
                    })
                })
                .cloned()
                .collect())
        }
    }

    fn row(id: &str, day: &str, lat: f64) -> JoinRow {
        JoinRow {
            agency_id: id.to_string(),
            name: format!("Agency {}", id),
            agency_type: AgencyType::Market,
            address: Some("1 Main St".to_string()),
            phone: None,
            latitude: Some(lat),
            longitude: Some(-77.0),
            day_of_week: Some(day.to_string()),
            start_time: Some("09:00:00".to_string()),
            end_time: Some("11:00:00".to_string()),
            frequency: None,
            distribution_model: None,
            food_format: None,
            appointment_only: AppointmentOnly::No,
            pantry_requirements: None,
            service: None,
            culture: None,
        }
    }

    fn service() -> LocatorService<StaticGeocoder, MemoryRows> {
        let geocoder = StaticGeocoder::new([("20001".to_string(), Coordinates::new(38.9, -77.0))]);
        let rows = MemoryRows(vec![
            row("A1", "Monday", 38.91),
            row("A2", "Tuesday", 38.91),
            row("A3", "Monday", 39.5),
        ]);
        LocatorService::new(geocoder, rows, &LocatorConfig::default())
    }

    #[tokio::test]
    async fn test_search_requires_day() {
        let request = SearchRequest {
            lat: Some(38.9),
            lng: Some(-77.0),
            ..Default::default()
        };
        assert!(matches!(
            service().search(&request).await,
            Err(LocatorError::InvalidQuery { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_requires_a_location() {
        let request = SearchRequest {
            day: Some("Monday".to_string()),
            ..Default::default()
        };
        let err = service().search(&request).await.unwrap_err();
        assert!(err.to_string().contains("Address or coordinates are required"));
    }

    #[tokio::test]
    async fn test_search_by_coordinates() {
        let request = SearchRequest {
            lat: Some(38.9),
            lng: Some(-77.0),
            day: Some("monday".to_string()),
            ..Default::default()
        };
        let result = service().search(&request).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "A1");
    }

    #[tokio::test]
    async fn test_unknown_address_is_location_not_found() {
        let request = SearchRequest {
            address: Some("99999".to_string()),
            day: Some("Monday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service().search(&request).await,
            Err(LocatorError::LocationNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_voice_summary_uses_title_cased_day() {
        let text = service().voice_summary("20001", "monday", None).await.unwrap();
        assert!(text.starts_with("I found 1 food site near you for Monday."));

        let text = service().voice_summary("20001", "sunday", None).await.unwrap();
        assert!(text.contains("open on Sunday"));
    }

    #[tokio::test]
    async fn test_list_agencies_spans_all_days() {
        let agencies = service().list_agencies().await.unwrap();
        let ids: Vec<&str> = agencies.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "A3"]);
        assert_eq!(agencies[1].name, "Agency A2");
    }

    #[tokio::test]
    async fn test_agency_lookup() {
        let profile = service().agency("A2").await.unwrap().unwrap();
        assert_eq!(profile.name, "Agency A2");
        assert_eq!(profile.address.as_deref(), Some("1 Main St"));

        assert!(service().agency("missing").await.unwrap().is_none());
        assert!(matches!(
            service().agency("  ").await,
            Err(LocatorError::InvalidQuery { .. })
        ));
    }

    #[tokio::test]
    async fn test_voice_summary_honours_max_distance() {
        // A3 sits ~41 miles north of the origin
        let text = service().voice_summary("20001", "monday", Some(50.0)).await.unwrap();
        assert!(text.starts_with("I found 2 food sites near you for Monday."));
    }
}
