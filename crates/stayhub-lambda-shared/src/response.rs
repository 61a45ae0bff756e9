//! API Gateway proxy response envelope.

use std::collections::HashMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Message returned for unmatched resources and methods.
pub const MESSAGE_METHOD_NOT_ALLOWED: &str = "method not allowed";

const FALLBACK_ERROR_BODY: &str = r#"{"error":"internal error"}"#;

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Response handed back to API Gateway.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use stayhub_lambda_shared::ApiResponse;
///
/// let response = ApiResponse::error(StatusCode::BAD_REQUEST, "invalid hotel data");
/// assert_eq!(response.status_code, 400);
/// assert_eq!(response.body, r#"{"error":"invalid hotel data"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiResponse {
    fn with_body(status: StatusCode, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            http::header::CONTENT_TYPE.as_str().to_string(),
            "application/json".to_string(),
        );
        Self {
            status_code: status.as_u16(),
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    /// JSON-encode `value` as the body.
    ///
    /// An encoding failure becomes a 500 error response.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::with_body(status, body),
            Err(e) => {
                error!(error = %e, "failed to encode response body");
                Self::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }

    /// A response with no body.
    pub fn empty(status: StatusCode) -> Self {
        Self::with_body(status, String::new())
    }

    /// An `{"error": message}` response.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let body = serde_json::to_string(&ErrorBody::new(message))
            .unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_string());
        Self::with_body(status, body)
    }

    /// The fixed response for unmatched resources and methods.
    pub fn method_not_allowed() -> Self {
        Self::error(StatusCode::METHOD_NOT_ALLOWED, MESSAGE_METHOD_NOT_ALLOWED)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Parse the body back into JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
