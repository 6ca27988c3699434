use std::sync::Arc;

use axum::{
    routing::{any, get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::AppConfig;
use crate::web::routes::{health, messenger};

/// Builds the application router over a shared configuration.
pub fn build_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", any(messenger::messenger_handler))
        .route("/api/messenger", any(messenger::messenger_handler))
        .route("/invoke", post(messenger::invoke_handler))
        .route("/health", get(health::health_handler))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(config)
}
