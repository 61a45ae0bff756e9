//! API Gateway proxy request envelope.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use http::Method;
use serde::{Deserialize, Serialize};

/// The subset of an API Gateway REST proxy event the router needs.
///
/// `resource` is the route template the gateway matched (e.g. `/hotel`);
/// `path` is the literal request path (e.g. `/hotel/available`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub resource: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    pub http_method: String,

    /// The gateway sends `null` rather than an empty object when there is no query.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Error reading the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub message: String,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid request body: {}", self.message)
    }
}

impl std::error::Error for RequestError {}

impl GatewayRequest {
    /// Build a request for `method` on `resource`, with the path equal to the resource.
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self {
            path: Some(resource.clone()),
            resource: Some(resource),
            http_method: method.as_str().to_string(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = false;
        self
    }

    pub fn resource(&self) -> &str {
        self.resource.as_deref().unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    /// The HTTP method, or `None` if the gateway sent something unparseable.
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.http_method.as_bytes()).ok()
    }

    /// A query parameter, if present.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// A query parameter, or the empty string when absent.
    pub fn query_or_empty(&self, name: &str) -> &str {
        self.query(name).unwrap_or_default()
    }

    /// The request body as text, decoding base64 bodies. A missing body is empty.
    pub fn body_text(&self) -> Result<Cow<'_, str>, RequestError> {
        let body = self.body.as_deref().unwrap_or_default();
        if !self.is_base64_encoded {
            return Ok(Cow::Borrowed(body));
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(body)
            .map_err(|e| RequestError {
                message: e.to_string(),
            })?;
        String::from_utf8(bytes)
            .map(Cow::Owned)
            .map_err(|e| RequestError {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_gateway_proxy_event() {
        let event = json!({
            "resource": "/hotel",
            "path": "/hotel/available",
            "httpMethod": "GET",
            "headers": { "Accept": "application/json" },
            "queryStringParameters": { "date": "2024-01-01", "city": "NYC" },
            "requestContext": { "requestId": "abc" },
            "body": null,
            "isBase64Encoded": false
        });

        let request: GatewayRequest = serde_json::from_value(event).unwrap();
        assert_eq!(request.resource(), "/hotel");
        assert_eq!(request.path(), "/hotel/available");
        assert_eq!(request.method(), Some(Method::GET));
        assert_eq!(request.query("city"), Some("NYC"));
        assert_eq!(request.body_text().unwrap(), "");
    }

    #[test]
    fn null_query_parameters_are_empty() {
        let event = json!({
            "resource": "/user",
            "httpMethod": "GET",
            "queryStringParameters": null
        });

        let request: GatewayRequest = serde_json::from_value(event).unwrap();
        assert_eq!(request.query("userId"), None);
        assert_eq!(request.query_or_empty("userId"), "");
        assert_eq!(request.path(), "");
    }

    #[test]
    fn missing_method_is_rejected() {
        let result = serde_json::from_value::<GatewayRequest>(json!({ "resource": "/user" }));
        assert!(result.is_err());
    }

    #[test]
    fn decodes_base64_body() {
        let mut request = GatewayRequest::new(Method::POST, "/user");
        request.body = Some("eyJ1c2VySWQiOiJ1MSJ9".to_string());
        request.is_base64_encoded = true;

        assert_eq!(request.body_text().unwrap(), r#"{"userId":"u1"}"#);
    }

    #[test]
    fn rejects_invalid_base64_body() {
        let mut request = GatewayRequest::new(Method::POST, "/user");
        request.body = Some("%%%".to_string());
        request.is_base64_encoded = true;

        let err = request.body_text().unwrap_err();
        assert!(err.to_string().contains("invalid request body"));
    }

    #[test]
    fn builder_sets_path_and_query() {
        let request = GatewayRequest::new(Method::GET, "/hotel")
            .with_path("/hotel/available")
            .with_query("city", "LA");

        assert_eq!(request.resource(), "/hotel");
        assert_eq!(request.path(), "/hotel/available");
        assert_eq!(request.http_method, "GET");
        assert_eq!(request.query("city"), Some("LA"));
    }
}
