use crate::domain::model::Coordinates;
use crate::domain::ports::Geocoder;
use crate::utils::error::{LocatorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const GOOGLE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_USER_AGENT: &str = "food_assistance_locator";

fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}

/// OpenStreetMap Nominatim search.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    country_codes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        country_codes: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
            endpoint: endpoint.into(),
            country_codes,
        })
    }

    fn parse_place(place: &NominatimPlace) -> Result<Coordinates> {
        let parse = |field: &str, value: &str| {
            value.parse::<f64>().map_err(|e| LocatorError::GeocoderError {
                provider: "nominatim".to_string(),
                message: format!("invalid {} '{}': {}", field, value, e),
            })
        };
        Ok(Coordinates::new(parse("lat", &place.lat)?, parse("lon", &place.lon)?))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    fn provider(&self) -> &str {
        "nominatim"
    }

    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", "1")]);
        if let Some(codes) = &self.country_codes {
            request = request.query(&[("countrycodes", codes.as_str())]);
        }

        tracing::debug!("Geocoding '{}' via Nominatim", query);
        let places: Vec<NominatimPlace> = request.send().await?.error_for_status()?.json().await?;

        places.first().map(Self::parse_place).transpose()
    }
}

/// Google Maps Geocoding API.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLocation,
}

#[derive(Debug, Deserialize)]
struct GoogleLocation {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout, DEFAULT_USER_AGENT)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    fn provider(&self) -> &str {
        "google"
    }

    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>> {
        tracing::debug!("Geocoding '{}' via Google", query);
        let response: GoogleResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("address", query), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.status.as_str() {
            "OK" => Ok(response
                .results
                .first()
                .map(|r| Coordinates::new(r.geometry.location.lat, r.geometry.location.lng))),
            "ZERO_RESULTS" => Ok(None),
            status => Err(LocatorError::GeocoderError {
                provider: "google".to_string(),
                message: match response.error_message {
                    Some(message) => format!("{}: {}", status, message),
                    None => status.to_string(),
                },
            }),
        }
    }
}

/// Fixed lookup table, keyed case-insensitively on the trimmed query.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    pub fn new(places: impl IntoIterator<Item = (String, Coordinates)>) -> Self {
        Self {
            places: places
                .into_iter()
                .map(|(k, v)| (Self::key(&k), v))
                .collect(),
        }
    }

    fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    fn provider(&self) -> &str {
        "static"
    }

    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>> {
        Ok(self.places.get(&Self::key(query)).copied())
    }
}
