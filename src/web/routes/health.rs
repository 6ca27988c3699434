use axum::Json;
use serde_json::Value;

pub fn build_id() -> &'static str {
    option_env!("MESSENGER_BUILD_ID").unwrap_or("dev")
}

/// Liveness only; does not open a store connection.
pub async fn health_handler() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "build": build_id(),
    }))
}
