//! Error types for moon phase computation and configuration loading.

/// Result type for astronomical resolution.
pub type ResolutionResult<T> = Result<T, AstronomicalResolutionError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Raised when the ephemeris model cannot produce a position or an event
/// for the given observer and instant.
///
/// There is no local recovery: the whole snapshot computation fails and the
/// caller decides what to do with the cycle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AstronomicalResolutionError {
    #[error("Invalid observer: {0}")]
    InvalidObserver(String),

    #[error("Instant out of range: {0}")]
    InstantOutOfRange(String),

    #[error("Non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("UTC/TT conversion failed: {0}")]
    TimeScale(#[from] siderust::time::ConversionError),

    #[error("Moon never rises within {window_hours} hours of the search start")]
    NeverRises { window_hours: f64 },

    #[error("Moon never sets within {window_hours} hours of the search start")]
    NeverSets { window_hours: f64 },

    #[error("No {event} found within {window_days} days of the search start")]
    EventNotFound {
        event: &'static str,
        window_days: f64,
    },
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config at '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<AstronomicalResolutionError> for ConfigError {
    fn from(err: AstronomicalResolutionError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

impl From<String> for ConfigError {
    fn from(s: String) -> Self {
        ConfigError::Invalid(s)
    }
}
