use crate::app::locator::SearchRequest;
use crate::config::toml_config::LocatorConfig;
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Display-badge listing as JSON
    Nearby,
    /// One raw record per agency as JSON
    Expert,
    /// Spoken summary text
    Voice,
    /// Distinct agency ids and names as JSON
    Agencies,
    /// One agency's contact card as JSON (needs --agency-id)
    Agency,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "food-site-finder")]
#[command(about = "Find food assistance sites open near an address on a given day")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV file of agency join rows (overrides data.rows_path)
    #[arg(long)]
    pub rows: Option<String>,

    /// Address or ZIP code to search from
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Day of the week, e.g. Monday
    #[arg(long)]
    pub day: Option<String>,

    /// Search radius in miles (max distance in expert and voice modes)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Only list sites offering home delivery (nearby mode)
    #[arg(long)]
    pub home_delivery: bool,

    /// Agency id to look up (agency mode)
    #[arg(long)]
    pub agency_id: Option<String>,

    #[arg(long, value_enum, default_value = "nearby")]
    pub mode: OutputMode,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入 TOML 配置並套用命令列覆蓋設定
    pub fn load_locator_config(&self) -> Result<LocatorConfig> {
        let mut config = match &self.config {
            Some(path) => LocatorConfig::from_file(path)?,
            None => LocatorConfig::default(),
        };

        if let Some(rows) = &self.rows {
            config.data.rows_path = Some(rows.clone());
            tracing::info!("🔧 Rows file overridden to: {}", rows);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn search_request(&self) -> SearchRequest {
        SearchRequest {
            address: self.address.clone(),
            lat: self.lat,
            lng: self.lng,
            day: self.day.clone(),
            radius: self.radius,
            home_delivery: self.home_delivery,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // 目錄模式不需要地點與日期
        match self.mode {
            OutputMode::Agencies => return Ok(()),
            OutputMode::Agency => {
                validation::require_query_param("agency_id", self.agency_id.as_deref())?;
                return Ok(());
            }
            _ => {}
        }

        validation::require_query_param("day", self.day.as_deref())?;

        if let Some(radius) = self.radius {
            validation::validate_query_radius("radius", radius)?;
        }

        let has_address = self.address.as_deref().is_some_and(|a| !a.trim().is_empty());
        match self.mode {
            OutputMode::Expert | OutputMode::Voice if !has_address => Err(LocatorError::InvalidQuery {
                field: "address".to_string(),
                reason: "Expert and voice modes need an address to geocode".to_string(),
            }),
            OutputMode::Nearby if !has_address && (self.lat.is_none() || self.lng.is_none()) => {
                Err(LocatorError::InvalidQuery {
                    field: "address".to_string(),
                    reason: "Address or coordinates are required".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
