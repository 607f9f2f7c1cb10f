//! Error types for the story harness
//!
//! Only conditions that abort the whole run are errors. Per-step failures
//! are reported as values (see `testing::StepFailure`) so the driver loop
//! keeps going.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the story harness
#[derive(Error, Debug)]
pub enum Error {
    // === Setup Errors ===
    #[error("Failed to get JWT token: status {status}, body: {body}")]
    Authentication { status: u16, body: String },

    #[error("Authentication response has no 'accessToken' field: status {status}, body: {body}")]
    MissingToken { status: u16, body: String },

    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    // === Transport Errors ===
    #[error("HTTP request {method} {url} failed: {message}")]
    Transport {
        method: String,
        url: String,
        message: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // === Scenario Errors ===
    #[error("{failed} of {total} scenario steps failed")]
    ScenarioFailed { failed: usize, total: usize },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an authentication error from the observed response
    pub fn authentication(status: u16, body: &str) -> Self {
        Self::Authentication {
            status,
            body: body.to_string(),
        }
    }

    /// Create a transport error for a request that never produced a response
    pub fn transport(method: &str, url: &str, err: &reqwest::Error) -> Self {
        Self::Transport {
            method: method.to_string(),
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Whether this error happened before any scenario step could run
    ///
    /// Step-level transport failures never surface as `Error`, so a
    /// `Transport` error here always comes from the login request.
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            Error::Authentication { .. }
                | Error::MissingToken { .. }
                | Error::InvalidToken(_)
                | Error::Transport { .. }
                | Error::ClientBuild(_)
                | Error::Config(_)
                | Error::ConfigParse(_)
                | Error::FileRead { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_error_includes_status_and_body() {
        let err = Error::authentication(401, "{\"error\":\"bad creds\"}");
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("bad creds"));
        assert!(err.is_setup_failure());
    }

    #[test]
    fn test_json_error_is_not_setup_failure() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(!err.is_setup_failure());
    }
}
