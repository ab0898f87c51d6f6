//! HTTP-backed oracle for a locally served text-generation model.
//!
//! Speaks the local model server's protocol: `POST /generate` with a JSON
//! body `{"prompt": ..., "max_length": ..., "temperature": ...}`, answered
//! with `{"generated_text": ...}`.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use textgate_core::{Oracle, OracleError};
use thiserror::Error;
use tracing::debug;

/// Errors from the HTTP oracle backend.
///
/// Converted to the opaque [`OracleError`] at the trait boundary; the
/// validator only ever sees the message.
#[derive(Error, Debug)]
pub enum HttpOracleError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("model server returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode model response: {0}")]
    Decode(String),
}

impl From<HttpOracleError> for OracleError {
    fn from(err: HttpOracleError) -> Self {
        OracleError::new(err.to_string())
    }
}

/// Configuration for the HTTP oracle.
#[derive(Debug, Clone)]
pub struct HttpOracleConfig {
    /// Full URL of the generation endpoint
    pub endpoint: String,

    /// Request timeout. The validator has no timeout of its own; this is
    /// the only cancellation policy in play.
    pub timeout: Duration,

    /// Maximum response length requested from the model
    pub max_length: u32,

    /// Temperature (0.0 for deterministic classification)
    pub temperature: f32,
}

impl Default for HttpOracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/generate".to_string(),
            timeout: Duration::from_secs(30),
            max_length: 200,
            temperature: 0.0,
        }
    }
}

/// Request body for the model server.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_length: u32,
    temperature: f32,
}

/// Response body from the model server.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

/// A synchronous oracle backed by an HTTP text-generation endpoint.
pub struct HttpOracle {
    config: HttpOracleConfig,
    client: reqwest::blocking::Client,
}

impl HttpOracle {
    /// Build an oracle from a config.
    pub fn new(config: HttpOracleConfig) -> Result<Self, HttpOracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HttpOracleError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Build an oracle for an endpoint with default settings.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Result<Self, HttpOracleError> {
        Self::new(HttpOracleConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        })
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn generate(&self, prompt: &str) -> Result<String, HttpOracleError> {
        debug!(endpoint = %self.config.endpoint, "sending risk-assessment prompt");

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&GenerateRequest {
                prompt,
                max_length: self.config.max_length,
                temperature: self.config.temperature,
            })
            .send()
            .map_err(|e| HttpOracleError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(HttpOracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| HttpOracleError::Decode(e.to_string()))?;
        Ok(body.generated_text)
    }
}

impl Oracle for HttpOracle {
    fn assess(&self, prompt: &str) -> Result<String, OracleError> {
        self.generate(prompt).map_err(OracleError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_local_server() {
        let config = HttpOracleConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8000/generate");
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn request_body_matches_server_schema() {
        let request = GenerateRequest {
            prompt: "check this",
            max_length: 200,
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "check this");
        assert_eq!(json["max_length"], 200);
    }

    #[test]
    fn response_body_decodes() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"generated_text": "OK, no issues found"}"#).unwrap();
        assert_eq!(body.generated_text, "OK, no issues found");
    }

    #[test]
    fn backend_errors_convert_to_oracle_errors() {
        let err = HttpOracleError::Api {
            status: 500,
            message: "model not loaded".to_string(),
        };
        let oracle_err = OracleError::from(err);
        assert!(oracle_err.to_string().contains("status 500"));
    }

    #[test]
    fn unreachable_server_fails_the_call() {
        // Port 9 (discard) is not serving HTTP; the call must surface an
        // error, which the validator then maps to a fail-closed rejection.
        let oracle = HttpOracle::new(HttpOracleConfig {
            endpoint: "http://127.0.0.1:9/generate".to_string(),
            timeout: Duration::from_millis(200),
            ..Default::default()
        })
        .unwrap();
        assert!(oracle.assess("ping").is_err());
    }
}
