//! Error types and handling for `TempView`

use thiserror::Error;

/// Main error type for the `TempView` pipeline and web layer
#[derive(Error, Debug)]
pub enum TempViewError {
    /// The geocoder returned no match for the location
    #[error("Location not found: {location}")]
    NotFound { location: String },

    /// The weather response carried no usable daily series
    #[error("No daily data returned: {message}")]
    NoData { message: String },

    /// An outbound request could not complete
    #[error("Transport error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The daily series violated its parallel-array contract
    #[error("Malformed daily series: {message}")]
    Shape { message: String },

    /// Chart rendering or PNG encoding failed
    #[error("Chart rendering failed: {message}")]
    Render { message: String },

    /// CSV export failed
    #[error("Export error: {message}")]
    Export { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TempViewError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(location: S) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    /// Create a new no-data error
    pub fn no_data<S: Into<String>>(message: S) -> Self {
        Self::NoData {
            message: message.into(),
        }
    }

    /// Create a new transport error, optionally tagged with the HTTP status
    pub fn transport<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        Self::Transport {
            message: message.into(),
            status,
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn shape<S: Into<String>>(message: S) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status reported by the upstream service, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            TempViewError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TempViewError::NotFound { .. } => "City not found".to_string(),
            TempViewError::NoData { .. } => "No daily data returned".to_string(),
            TempViewError::Transport { message, status } => match status {
                Some(code) => format!("Weather service returned HTTP {code}: {message}"),
                None => format!("Unable to reach the weather service: {message}"),
            },
            TempViewError::Validation { message } => message.clone(),
            TempViewError::Shape { .. }
            | TempViewError::Render { .. }
            | TempViewError::Export { .. } => {
                "The weather data could not be displayed".to_string()
            }
            TempViewError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TempViewError::Io { .. } => "File operation failed.".to_string(),
        }
    }
}

impl From<reqwest::Error> for TempViewError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        TempViewError::transport(err.to_string(), status)
    }
}
