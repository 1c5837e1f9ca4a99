use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Location not found: {location}")]
    LocationNotFound { location: String },

    #[error("{service} lookup unavailable: {message}")]
    LookupUnavailable { service: String, message: String },

    #[error("No rainfall data: {message}")]
    NoRainfallData { message: String },

    #[error("Invalid upload format: {message}")]
    InvalidUploadFormat { message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// 錯誤分類，用於日誌與退出碼判斷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Location,
    Network,
    Data,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HarvestError {
    pub fn lookup_unavailable(service: &str, message: impl Into<String>) -> Self {
        Self::LookupUnavailable {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_upload(message: impl Into<String>) -> Self {
        Self::InvalidUploadFormat {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LocationNotFound { .. } => ErrorCategory::Location,
            Self::LookupUnavailable { .. } | Self::ApiError(_) => ErrorCategory::Network,
            Self::NoRainfallData { .. } => ErrorCategory::Data,
            Self::InvalidUploadFormat { .. } | Self::CsvError(_) => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ZipError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常是暫時性的，使用者可以稍後再試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Location | ErrorCategory::Data | ErrorCategory::Input => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::LocationNotFound { .. } => "Please enter a valid city or town name",
            Self::LookupUnavailable { .. } | Self::ApiError(_) => {
                "Check your location input or internet connection and try again"
            }
            Self::NoRainfallData { .. } => {
                "Try a nearby location, or upload a CSV with the annual rainfall value"
            }
            Self::InvalidUploadFormat { .. } | Self::CsvError(_) => {
                "Ensure the CSV has one number (total rainfall in mm) in the first cell"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            Self::IoError(_) => "Check that the file exists and the output path is writable",
            Self::ZipError(_) | Self::SerializationError(_) => {
                "Retry without --bundle or choose a different output path"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::LocationNotFound { location } => {
                format!("Location '{}' not found. Please enter a valid city or town.", location)
            }
            Self::LookupUnavailable { service, .. } => {
                format!("Failed to retrieve data from the {} service.", service)
            }
            Self::NoRainfallData { .. } => "No daily rainfall data found.".to_string(),
            Self::InvalidUploadFormat { .. } => {
                "Ensure the CSV has one number (total rainfall in mm) in the first cell."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
