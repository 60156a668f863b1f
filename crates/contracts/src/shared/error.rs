//! Error taxonomy for everything crossing the fetch boundary.

use super::validation::FieldErrors;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure: no response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered but the payload does not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),

    /// Structured field-level rejection (HTTP 422 style).
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: FieldErrors,
    },

    /// Any other non-success response.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// Error body shape used by the backend for non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// Classify a non-success HTTP response.
    ///
    /// A body carrying a non-empty `errors` object is a validation failure
    /// regardless of the exact 4xx status; everything else is `Server`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_status_message(status).to_string());

        if (400..500).contains(&status) {
            if let Some(errors) = parsed.errors {
                let errors = FieldErrors::from_map(errors);
                if !errors.is_empty() {
                    return ApiError::Validation { message, errors };
                }
            }
        }

        ApiError::Server { status, message }
    }

    pub fn schema(err: impl std::fmt::Display) -> Self {
        ApiError::Schema(err.to_string())
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        ApiError::Network(err.to_string())
    }

    /// Field errors to map onto form controls, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Unable to reach the server. Check your connection.".to_string()
            }
            ApiError::Schema(_) => FALLBACK_MESSAGE.to_string(),
            ApiError::Validation { message, .. } | ApiError::Server { message, .. } => {
                if message.trim().is_empty() {
                    FALLBACK_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
        }
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        401 => "Your session has expired.",
        403 => "You are not allowed to perform this action.",
        404 => "The requested record was not found.",
        422 => "The given data was invalid.",
        500..=599 => "The server encountered an error.",
        _ => FALLBACK_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_422_with_errors_is_validation() {
        let body = r#"{"message":"The given data was invalid.","errors":{"name":["The name has already been taken."]}}"#;
        let err = ApiError::from_response(422, body);
        let errors = err.field_errors().expect("validation errors");
        assert_eq!(errors.first("name"), Some("The name has already been taken."));
        assert_eq!(err.user_message(), "The given data was invalid.");
    }

    #[test]
    fn test_4xx_without_errors_is_server() {
        let err = ApiError::from_response(409, r#"{"message":"Category has products"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 409,
                message: "Category has products".to_string()
            }
        );
    }

    #[test]
    fn test_unparseable_body_uses_status_fallback() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err.user_message(), "The server encountered an error.");
    }

    #[test]
    fn test_500_with_errors_is_not_validation() {
        let body = r#"{"message":"boom","errors":{"name":["x"]}}"#;
        assert!(matches!(
            ApiError::from_response(500, body),
            ApiError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn test_network_message_is_friendly() {
        let err = ApiError::network("TypeError: Failed to fetch");
        assert!(err.user_message().contains("Unable to reach"));
    }
}
