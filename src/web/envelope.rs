//! Transport-neutral request and response shapes.
//!
//! The dispatcher only ever sees an [`ApiRequest`] and produces an
//! [`ApiResponse`]; the axum routes and the `/invoke` gateway entry point
//! translate to and from these.

use std::collections::{BTreeMap, HashMap};

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::models::messenger_api_models::ErrorBody;

pub const INVALID_REQUEST: &str = "Invalid request";

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: HashMap::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn action(&self) -> Option<&str> {
        self.query.get("action").map(String::as_str)
    }
}

/// Serverless-style invocation event accepted by `POST /invoke`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default = "default_http_method")]
    pub http_method: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

fn default_http_method() -> String {
    "GET".to_string()
}

impl InvocationEvent {
    /// `None` when `httpMethod` is not a valid method token.
    pub fn into_request(self) -> Option<ApiRequest> {
        let method = self.http_method.trim().to_ascii_uppercase();
        let method = Method::from_bytes(method.as_bytes()).ok()?;
        Some(ApiRequest {
            method,
            query: self.query_string_parameters.unwrap_or_default(),
            body: self.body,
        })
    }
}

/// The four-field response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiResponse {
    /// Answer to a cross-origin preflight: permissive headers, empty body.
    pub fn preflight() -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "GET, POST, OPTIONS".to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type".to_string(),
            ),
        ]);
        Self {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    /// A JSON response with the standard content-type and open CORS header.
    pub fn json(status: StatusCode, body: String) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);
        Self {
            status_code: status.as_u16(),
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let payload = ErrorBody {
            error: message.into(),
        };
        // A struct with a single String field always serializes.
        let body = serde_json::to_string(&payload)
            .unwrap_or_else(|_| String::from(r#"{"error":"internal error"}"#));
        Self::json(status, body)
    }

    pub fn invalid_request() -> Self {
        Self::error(StatusCode::BAD_REQUEST, INVALID_REQUEST)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();
        // The envelope decides the content type, including "none" for preflight.
        headers.remove(CONTENT_TYPE);
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "envelope_header_dropped"),
            }
        }
        response
    }
}
