//! controller::error
//!
//! Errors returned by controller API calls.

use thiserror::Error;

/// Errors from controller operations.
///
/// Client-side failures (bad URL, network, undecodable body) are kept apart
/// from responses the controller rejected, so handlers can special-case the
/// few statuses that get friendlier text.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 401 from the controller.
    #[error("401 Unauthorized\n{0}")]
    Unauthorized(String),

    /// 403 from the controller.
    #[error("403 Forbidden\n{0}")]
    Forbidden(String),

    /// 404 from the controller.
    #[error("404 Not Found\n{0}")]
    NotFound(String),

    /// 409 from the controller.
    #[error("409 Conflict\n{0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("{status}\n{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error detail from the response body
        message: String,
    },

    /// The controller URL could not be used.
    #[error("invalid controller URL '{0}'")]
    InvalidUrl(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode controller response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-success status and its body.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = extract_message(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            code => ApiError::Api {
                status: code,
                message,
            },
        }
    }

    /// True for 404 responses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Pull a readable message out of an error body.
///
/// The controller answers with `{"detail": "..."}` for most failures and
/// with `{"field": ["problem", ...]}` for validation errors.
fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let Some(object) = value.as_object() else {
        return body.trim().to_string();
    };

    if let Some(detail) = object.get("detail").and_then(|d| d.as_str()) {
        return detail.to_string();
    }

    let mut lines = Vec::new();
    for (field, problems) in object {
        let text = match problems {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from).unwrap_or_else(|| item.to_string()))
                .collect::<Vec<_>>()
                .join(" "),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("{}: {}", field, text));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn detail_message_is_extracted() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"detail": "Not found."}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "404 Not Found\nNot found.");
    }

    #[test]
    fn field_errors_are_listed() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"username": ["This field is required."]}"#,
        );
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "username: This field is required.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plain_bodies_pass_through() {
        let err = ApiError::from_status(StatusCode::CONFLICT, "already exists\n");
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "already exists"));
    }
}
