//! Error types for the wingpay library

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for wingpay operations
pub type Result<T> = std::result::Result<T, WingPayError>;

/// Main error type for wingpay operations
#[derive(Error, Debug)]
pub enum WingPayError {
    /// Missing or malformed client configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Request payload failed validation; carries the first violated
    /// rule's message
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Token acquisition failed or an operation ran without a token
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// Server-reported failure, normalized to a single message
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// HTTP transport error, surfaced unchanged
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WingPayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}

/// Normalize a server error body into a single [`WingPayError`].
///
/// Strict priority chain over the response JSON: a non-empty `errors`
/// list wins with its first entry's `message`; then `message` plus
/// `reason` concatenated; then `message` alone; otherwise the HTTP
/// status stands in for a body the gateway never shaped.
pub fn remote_error(status: StatusCode, body: &Value) -> WingPayError {
    if let Some(first) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        if let Some(message) = first.get("message").and_then(Value::as_str) {
            return WingPayError::remote(message);
        }
    }

    let message = body.get("message").and_then(Value::as_str);
    let reason = body.get("reason").and_then(Value::as_str);
    match (message, reason) {
        (Some(message), Some(reason)) => WingPayError::remote(format!("{} {}", message, reason)),
        (Some(message), None) => WingPayError::remote(message),
        _ => WingPayError::remote(format!("HTTP {}", status)),
    }
}

/// Drain a non-success response into a normalized error.
///
/// A body that is not JSON falls through to the bare-status form, the
/// same terminal case as a JSON body with no recognized fields.
pub(crate) async fn error_from_response(response: reqwest::Response) -> WingPayError {
    let status = response.status();
    match response.json::<Value>().await {
        Ok(body) => remote_error(status, &body),
        Err(_) => remote_error(status, &Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_errors_list_wins_over_message_and_reason() {
        let body = json!({
            "errors": [{"message": "a"}],
            "message": "b",
            "reason": "c"
        });
        let err = remote_error(StatusCode::BAD_REQUEST, &body);
        assert!(matches!(err, WingPayError::Remote { ref message } if message == "a"));
    }

    #[test]
    fn test_message_and_reason_concatenated() {
        let body = json!({"message": "Invalid order", "reason": "duplicate UID"});
        let err = remote_error(StatusCode::CONFLICT, &body);
        assert_eq!(err.to_string(), "Remote error: Invalid order duplicate UID");
    }

    #[test]
    fn test_message_alone() {
        let body = json!({"message": "Invalid order"});
        let err = remote_error(StatusCode::BAD_REQUEST, &body);
        assert_eq!(err.to_string(), "Remote error: Invalid order");
    }

    #[test]
    fn test_empty_errors_list_falls_through_to_message() {
        let body = json!({"errors": [], "message": "b", "reason": "c"});
        let err = remote_error(StatusCode::BAD_REQUEST, &body);
        assert!(matches!(err, WingPayError::Remote { ref message } if message == "b c"));
    }

    #[test]
    fn test_unrecognized_body_carries_status() {
        let body = json!({"detail": "nothing we know"});
        let err = remote_error(StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert_eq!(err.to_string(), "Remote error: HTTP 500 Internal Server Error");
    }

    #[test]
    fn test_error_helpers() {
        assert!(matches!(
            WingPayError::config("missing clientId"),
            WingPayError::Config { .. }
        ));
        assert!(matches!(
            WingPayError::validation("The UID field is required."),
            WingPayError::Validation { .. }
        ));
        assert!(matches!(
            WingPayError::authentication("empty token"),
            WingPayError::Authentication { .. }
        ));
    }
}
