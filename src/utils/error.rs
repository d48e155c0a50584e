use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid query parameter '{field}': {reason}")]
    InvalidQuery { field: String, reason: String },

    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    #[error("Agency not found: {agency_id}")]
    AgencyNotFound { agency_id: String },

    #[error("Geocoder '{provider}' failed: {message}")]
    GeocoderError { provider: String, message: String },

    #[error("Tool call error: {message}")]
    ToolCallError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Request,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LocatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LocatorError::HttpError(_) | LocatorError::GeocoderError { .. } => {
                ErrorCategory::Network
            }
            LocatorError::CsvError(_) | LocatorError::SerializationError(_) => ErrorCategory::Data,
            LocatorError::ConfigError { .. }
            | LocatorError::InvalidConfigValueError { .. }
            | LocatorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LocatorError::InvalidQuery { .. }
            | LocatorError::LocationNotFound { .. }
            | LocatorError::AgencyNotFound { .. }
            | LocatorError::ToolCallError { .. } => ErrorCategory::Request,
            LocatorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LocatorError::HttpError(_) | LocatorError::GeocoderError { .. } => {
                "Check network connectivity and the geocoder endpoint, then retry"
            }
            LocatorError::CsvError(_) => {
                "Check that the agency rows file has the expected header and columns"
            }
            LocatorError::IoError(_) => "Check that the file exists and is readable",
            LocatorError::SerializationError(_) => "Check that the JSON payload is well formed",
            LocatorError::ConfigError { .. }
            | LocatorError::InvalidConfigValueError { .. }
            | LocatorError::MissingConfigError { .. } => {
                "Fix the configuration file or command line flags"
            }
            LocatorError::InvalidQuery { .. } => {
                "Provide an address or coordinates together with a day of the week"
            }
            LocatorError::LocationNotFound { .. } => "Try a different address or ZIP code",
            LocatorError::AgencyNotFound { .. } => "List agencies to find a valid agency id",
            LocatorError::ToolCallError { .. } => {
                "Send a getFoodSites tool call with address and day_of_week arguments"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LocatorError::LocationNotFound { query } => {
                format!("Could not find a location for '{}'", query)
            }
            LocatorError::InvalidQuery { field, reason } => {
                format!("The request is missing or has an invalid '{}': {}", field, reason)
            }
            LocatorError::HttpError(_) | LocatorError::GeocoderError { .. } => {
                "The location service is currently unreachable".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;
