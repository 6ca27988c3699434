use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection, QueryRejection},
        Query, State,
    },
    http::{Method, StatusCode},
    Json,
};

use crate::config::AppConfig;
use crate::web::dispatcher;
use crate::web::envelope::{ApiRequest, ApiResponse, InvocationEvent};

/// Plain HTTP entry point: method, query string and body go straight to the
/// dispatcher and the envelope comes back as the HTTP response.
///
/// Extraction failures are taken as values so that every answer, including
/// an unreadable body, still goes out as an envelope.
pub async fn messenger_handler(
    State(config): State<Arc<AppConfig>>,
    method: Method,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResponse {
    // Preflight answers before anything else about the request is looked at.
    if method == Method::OPTIONS {
        return ApiResponse::preflight();
    }

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return undecodable("query", rejection.body_text()),
    };

    // Only POST reads its body.
    let body = if method == Method::POST {
        match decode_body(body) {
            Ok(body) => Some(body),
            Err(message) => return undecodable("body", message),
        }
    } else {
        None
    };

    let request = ApiRequest {
        method,
        query,
        body,
    };
    dispatcher::dispatch(&config, request).await
}

/// Gateway entry point: takes a serverless invocation event and answers with
/// the envelope itself as JSON.
pub async fn invoke_handler(
    State(config): State<Arc<AppConfig>>,
    event: Result<Json<InvocationEvent>, JsonRejection>,
) -> Json<ApiResponse> {
    let event = match event {
        Ok(Json(event)) => event,
        Err(rejection) => return Json(undecodable("event", rejection.body_text())),
    };
    let Some(request) = event.into_request() else {
        tracing::warn!("invoke_invalid_http_method");
        return Json(ApiResponse::invalid_request());
    };
    Json(dispatcher::dispatch(&config, request).await)
}

fn decode_body(body: Result<Bytes, BytesRejection>) -> Result<String, String> {
    let bytes = body.map_err(|rejection| rejection.body_text())?;
    String::from_utf8(bytes.to_vec()).map_err(|err| err.to_string())
}

fn undecodable(part: &'static str, message: String) -> ApiResponse {
    tracing::warn!(part, error = %message, "messenger_request_undecodable");
    ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, message)
}
