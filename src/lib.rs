pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputMode};

pub use adapters::{CsvRowSource, GoogleGeocoder, NominatimGeocoder, StaticGeocoder};
pub use app::{handle_tool_call, LocatorService, SearchRequest, ToolCallRequest, ToolCallResponse};
pub use config::LocatorConfig;
pub use core::{resolve_filtered, resolve_nearby, summarize, EngineProfile, ResolutionEngine};
pub use domain::model::{
    AgencyListing, AgencyProfile, Coordinates, FilteredAgency, JoinRow, NearbyAgency,
};
pub use utils::error::{LocatorError, Result};
