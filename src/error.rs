//! Error types and handling for the weather-alert service

use thiserror::Error;

/// Main error type for the weather-alert service
#[derive(Error, Debug)]
pub enum WeatherAlertError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The upstream forecast API was unreachable or returned a non-success
    /// status for one location
    #[error("Upstream weather API unavailable for {location}: {message}")]
    Upstream { location: String, message: String },

    /// The upstream forecast API answered with a payload we could not parse.
    /// Callers treat this the same as [`WeatherAlertError::Upstream`]: the
    /// affected location degrades to "no data" and the batch continues.
    #[error("Malformed forecast response for {location}: {message}")]
    MalformedResponse { location: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherAlertError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error for a single location
    pub fn upstream<L: Into<String>, S: Into<String>>(location: L, message: S) -> Self {
        Self::Upstream {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new malformed-response error for a single location
    pub fn malformed<L: Into<String>, S: Into<String>>(location: L, message: S) -> Self {
        Self::MalformedResponse {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for errors that degrade a single location instead of failing
    /// the whole alert computation.
    #[must_use]
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            WeatherAlertError::Upstream { .. } | WeatherAlertError::MalformedResponse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherAlertError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WeatherAlertError::Upstream { location, .. } => {
                format!("Weather data for {location} is temporarily unavailable.")
            }
            WeatherAlertError::MalformedResponse { location, .. } => {
                format!("Received unexpected weather data for {location}.")
            }
            WeatherAlertError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherAlertError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherAlertError::config("missing locations");
        assert!(matches!(config_err, WeatherAlertError::Config { .. }));

        let upstream_err = WeatherAlertError::upstream("dublin", "connection refused");
        assert!(matches!(upstream_err, WeatherAlertError::Upstream { .. }));

        let validation_err = WeatherAlertError::validation("days_ahead out of range");
        assert!(matches!(
            validation_err,
            WeatherAlertError::Validation { .. }
        ));
    }

    #[test]
    fn test_degradable_errors() {
        assert!(WeatherAlertError::upstream("dublin", "503").is_degradable());
        assert!(WeatherAlertError::malformed("dublin", "bad json").is_degradable());
        assert!(!WeatherAlertError::config("test").is_degradable());
        assert!(!WeatherAlertError::validation("test").is_degradable());
    }

    #[test]
    fn test_user_messages() {
        let upstream_err = WeatherAlertError::upstream("Dublin", "timeout");
        assert!(upstream_err.user_message().contains("Dublin"));

        let validation_err = WeatherAlertError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let alert_err: WeatherAlertError = io_err.into();
        assert!(matches!(alert_err, WeatherAlertError::Io { .. }));
    }
}
