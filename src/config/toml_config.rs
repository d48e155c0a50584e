use crate::adapters::geocoder::{
    GoogleGeocoder, NominatimGeocoder, StaticGeocoder, DEFAULT_USER_AGENT, GOOGLE_ENDPOINT,
    NOMINATIM_ENDPOINT,
};
use crate::core::engine::DEFAULT_RADIUS_MILES;
use crate::domain::model::Coordinates;
use crate::domain::ports::Geocoder;
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocatorConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_radius_miles: Option<f64>,
    pub default_max_distance_miles: Option<f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: Some(DEFAULT_RADIUS_MILES),
            default_max_distance_miles: Some(DEFAULT_RADIUS_MILES),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    pub rows_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderProvider {
    #[default]
    Nominatim,
    Google,
    Static,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default)]
    pub provider: GeocoderProvider,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
    pub country_codes: Option<String>,
    pub timeout_seconds: Option<u64>,
    /// 靜態地點表：查詢字串 -> [緯度, 經度]
    pub places: Option<HashMap<String, [f64; 2]>>,
}

impl LocatorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LocatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LocatorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LocatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得預設搜尋半徑 (英里)
    pub fn default_radius_miles(&self) -> f64 {
        self.search.default_radius_miles.unwrap_or(DEFAULT_RADIUS_MILES)
    }

    /// 取得專家查詢的預設最大距離 (英里)
    pub fn default_max_distance_miles(&self) -> f64 {
        self.search
            .default_max_distance_miles
            .unwrap_or(DEFAULT_RADIUS_MILES)
    }

    pub fn rows_path(&self) -> Option<&str> {
        self.data.rows_path.as_deref()
    }

    pub fn geocoder_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoder.timeout_seconds.unwrap_or(10))
    }

    /// 依設定建立地理編碼器
    pub fn build_geocoder(&self) -> Result<Box<dyn Geocoder>> {
        let settings = &self.geocoder;
        let geocoder: Box<dyn Geocoder> = match settings.provider {
            GeocoderProvider::Nominatim => Box::new(NominatimGeocoder::new(
                settings.endpoint.as_deref().unwrap_or(NOMINATIM_ENDPOINT),
                settings.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
                settings.country_codes.clone(),
                self.geocoder_timeout(),
            )?),
            GeocoderProvider::Google => {
                let api_key = validation::validate_required_field("geocoder.api_key", &settings.api_key)?;
                Box::new(GoogleGeocoder::new(
                    settings.endpoint.as_deref().unwrap_or(GOOGLE_ENDPOINT),
                    api_key.clone(),
                    self.geocoder_timeout(),
                )?)
            }
            GeocoderProvider::Static => {
                let places = validation::validate_required_field("geocoder.places", &settings.places)?;
                Box::new(StaticGeocoder::new(
                    places
                        .iter()
                        .map(|(query, [lat, lon])| (query.clone(), Coordinates::new(*lat, *lon))),
                ))
            }
        };

        tracing::debug!("Using {} geocoder", geocoder.provider());
        Ok(geocoder)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_positive_distance(
            "search.default_radius_miles",
            self.default_radius_miles(),
        )?;
        validation::validate_positive_distance(
            "search.default_max_distance_miles",
            self.default_max_distance_miles(),
        )?;

        if let Some(path) = self.rows_path() {
            validation::validate_path("data.rows_path", path)?;
        }

        if let Some(endpoint) = &self.geocoder.endpoint {
            validation::validate_url("geocoder.endpoint", endpoint)?;
        }

        if let Some(user_agent) = &self.geocoder.user_agent {
            validation::validate_non_empty_string("geocoder.user_agent", user_agent)?;
        }

        if let Some(timeout) = self.geocoder.timeout_seconds {
            validation::validate_range("geocoder.timeout_seconds", timeout, 1, 120)?;
        }

        match self.geocoder.provider {
            GeocoderProvider::Google => {
                let api_key =
                    validation::validate_required_field("geocoder.api_key", &self.geocoder.api_key)?;
                if api_key.starts_with("${") {
                    return Err(LocatorError::InvalidConfigValueError {
                        field: "geocoder.api_key".to_string(),
                        value: api_key.clone(),
                        reason: "Environment variable is not set".to_string(),
                    });
                }
            }
            GeocoderProvider::Static => {
                let places =
                    validation::validate_required_field("geocoder.places", &self.geocoder.places)?;
                for (query, [lat, lon]) in places {
                    validation::validate_coordinates(*lat, *lon).map_err(|_| {
                        LocatorError::InvalidConfigValueError {
                            field: format!("geocoder.places.{}", query),
                            value: format!("[{}, {}]", lat, lon),
                            reason: "Coordinates out of range".to_string(),
                        }
                    })?;
                }
            }
            GeocoderProvider::Nominatim => {}
        }

        Ok(())
    }
}

impl Validate for LocatorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
