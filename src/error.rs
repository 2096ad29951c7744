//! Error types and handling for `CampScout`

use thiserror::Error;

/// Main error type for the `CampScout` engine
#[derive(Error, Debug)]
pub enum CampScoutError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors (caller contract violations)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The requested base site does not exist in the catalog
    #[error("Base site not found: {site_id}")]
    BaseSiteNotFound { site_id: String },

    /// The base site's forecast could not be retrieved
    #[error("Base forecast missing for site {site_id}: {message}")]
    BaseForecastMissing { site_id: String, message: String },

    /// The base site's weather does not cover the requested window
    #[error("No weather data for base site {site_id} over the requested window")]
    BaseWindowUncovered { site_id: String },
}

impl CampScoutError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CampScoutError::Config { .. } => {
                "Configuration error. Please check the engine configuration values.".to_string()
            }
            CampScoutError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CampScoutError::BaseSiteNotFound { site_id } => {
                format!("Base site '{site_id}' is not in the catalog.")
            }
            CampScoutError::BaseForecastMissing { site_id, .. } => {
                format!(
                    "No forecast available for base site '{site_id}'. A recommendation needs a base comparison."
                )
            }
            CampScoutError::BaseWindowUncovered { site_id } => {
                format!("Weather data for base site '{site_id}' does not cover the requested days.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = CampScoutError::config("bad weight decay");
        assert!(matches!(config_err, CampScoutError::Config { .. }));

        let validation_err = CampScoutError::validation("radius must be positive");
        assert!(matches!(validation_err, CampScoutError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let validation_err = CampScoutError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let base_err = CampScoutError::BaseForecastMissing {
            site_id: "lakeview".to_string(),
            message: "timeout".to_string(),
        };
        assert!(base_err.user_message().contains("lakeview"));
        assert!(base_err.to_string().contains("Base forecast missing"));
    }
}
