//! Routes one [`ApiRequest`] to exactly one operation.

use axum::http::{Method, StatusCode};
use serde_json::{Map, Value};
use sqlx::SqliteConnection;

use crate::config::AppConfig;
use crate::database::connection;
use crate::error::Result;
use crate::models::messenger_api_models::{
    AddContactBody, ContactList, MessageList, SendMessageBody,
};
use crate::services::{contact_list_service, contact_service, message_service, thread_service};
use crate::web::envelope::{ApiRequest, ApiResponse};
use crate::web::middleware::identity::{parse_id_param, CallerIdentity};

/// `contactId` used when the query has none; matches no user.
const NO_CONTACT: i64 = 0;

/// Every operation the dispatcher can run, with its decoded inputs.
#[derive(Debug, Clone)]
pub enum Operation {
    ListContacts,
    ReadThread { contact_id: i64 },
    SendMessage(SendMessageBody),
    AddContact(AddContactBody),
}

impl Operation {
    /// Maps (method, action) to an operation.
    ///
    /// `Ok(None)` means nothing matched (a 400). A POST body that is not a
    /// JSON object, or whose fields have the wrong types, is an `Err` (a 500).
    pub fn from_request(request: &ApiRequest) -> Result<Option<Self>> {
        match request.method {
            Method::GET => Ok(match request.action() {
                Some("contacts") => Some(Operation::ListContacts),
                Some("messages") => Some(Operation::ReadThread {
                    contact_id: parse_id_param(&request.query, "contactId").unwrap_or(NO_CONTACT),
                }),
                _ => None,
            }),
            Method::POST => {
                let body = parse_post_body(request.body.as_deref())?;
                let action = body.get("action").and_then(Value::as_str).map(str::to_owned);
                let operation = match action.as_deref() {
                    Some("send_message") => Some(Operation::SendMessage(serde_json::from_value(
                        Value::Object(body),
                    )?)),
                    Some("add_contact") => Some(Operation::AddContact(serde_json::from_value(
                        Value::Object(body),
                    )?)),
                    _ => None,
                };
                Ok(operation)
            }
            _ => Ok(None),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListContacts => "contacts",
            Operation::ReadThread { .. } => "messages",
            Operation::SendMessage(_) => "send_message",
            Operation::AddContact(_) => "add_contact",
        }
    }
}

/// A missing or blank body counts as `{}`.
fn parse_post_body(raw: Option<&str>) -> Result<Map<String, Value>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("{}");
    Ok(serde_json::from_str(raw)?)
}

/// Handles one request end to end. Never fails: errors become 400/500 envelopes.
pub async fn dispatch(config: &AppConfig, request: ApiRequest) -> ApiResponse {
    if request.method == Method::OPTIONS {
        return ApiResponse::preflight();
    }

    let caller = CallerIdentity::from_query(&request.query, config.default_user_id);

    let operation = match Operation::from_request(&request) {
        Ok(Some(operation)) => operation,
        Ok(None) => {
            tracing::warn!(
                method = %request.method,
                action = ?request.action(),
                "messenger_invalid_request"
            );
            return ApiResponse::invalid_request();
        }
        Err(err) => {
            tracing::error!(error = %err, method = %request.method, "messenger_request_rejected");
            return ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    let action = operation.name();
    match run(config, caller, operation).await {
        Ok(body) => ApiResponse::json(StatusCode::OK, body),
        Err(err) => {
            tracing::error!(
                error = %err,
                user_id = caller.user_id,
                action,
                "messenger_operation_failed"
            );
            ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Opens the request's connection, runs the operation and closes the
/// connection whatever the outcome.
async fn run(config: &AppConfig, caller: CallerIdentity, operation: Operation) -> Result<String> {
    let mut conn = connection::open_connection(&config.database_url).await?;
    let result = execute(&mut conn, caller, operation).await;
    if let Err(err) = sqlx::Connection::close(conn).await {
        tracing::warn!(error = %err, "messenger_connection_close_failed");
    }
    result
}

async fn execute(
    conn: &mut SqliteConnection,
    caller: CallerIdentity,
    operation: Operation,
) -> Result<String> {
    match operation {
        Operation::ListContacts => list_contacts(conn, caller).await,
        Operation::ReadThread { contact_id } => read_thread(conn, caller, contact_id).await,
        Operation::SendMessage(body) => send_message(conn, caller, body).await,
        Operation::AddContact(body) => add_contact(conn, caller, body).await,
    }
}

async fn list_contacts(conn: &mut SqliteConnection, caller: CallerIdentity) -> Result<String> {
    let contacts = contact_list_service::list_contacts(conn, caller.user_id).await?;
    Ok(serde_json::to_string(&ContactList { contacts })?)
}

async fn read_thread(
    conn: &mut SqliteConnection,
    caller: CallerIdentity,
    contact_id: i64,
) -> Result<String> {
    let messages = thread_service::read_thread(conn, caller.user_id, contact_id).await?;
    Ok(serde_json::to_string(&MessageList { messages })?)
}

async fn send_message(
    conn: &mut SqliteConnection,
    caller: CallerIdentity,
    body: SendMessageBody,
) -> Result<String> {
    let sent = message_service::send_message(conn, caller.user_id, body).await?;
    Ok(serde_json::to_string(&sent)?)
}

async fn add_contact(
    conn: &mut SqliteConnection,
    caller: CallerIdentity,
    body: AddContactBody,
) -> Result<String> {
    let added = contact_service::add_contact(conn, caller.user_id, body).await?;
    Ok(serde_json::to_string(&added)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(action: &str) -> ApiRequest {
        ApiRequest::new(Method::GET).with_query("action", action)
    }

    fn post(body: &str) -> ApiRequest {
        ApiRequest::new(Method::POST).with_body(body)
    }

    #[test]
    fn get_actions_resolve() {
        assert!(matches!(
            Operation::from_request(&get("contacts")).unwrap(),
            Some(Operation::ListContacts)
        ));
        assert!(matches!(
            Operation::from_request(&get("messages").with_query("contactId", "3")).unwrap(),
            Some(Operation::ReadThread { contact_id: 3 })
        ));
    }

    #[test]
    fn malformed_contact_id_defaults_to_zero() {
        assert!(matches!(
            Operation::from_request(&get("messages").with_query("contactId", "x")).unwrap(),
            Some(Operation::ReadThread { contact_id: 0 })
        ));
        assert!(matches!(
            Operation::from_request(&get("messages")).unwrap(),
            Some(Operation::ReadThread { contact_id: 0 })
        ));
    }

    #[test]
    fn post_actions_resolve_from_body() {
        let op = Operation::from_request(&post(
            r#"{"action":"send_message","receiverId":2,"text":"hi","type":"sticker"}"#,
        ))
        .unwrap();
        match op {
            Some(Operation::SendMessage(body)) => {
                assert_eq!(body.text.as_deref(), Some("hi"));
                assert_eq!(body.message_type.as_deref(), Some("sticker"));
            }
            other => panic!("unexpected operation: {other:?}"),
        }

        let op = Operation::from_request(&post(r#"{"action":"add_contact","name":"Alice"}"#))
            .unwrap();
        match op {
            Some(Operation::AddContact(body)) => {
                assert_eq!(body.name.as_deref(), Some("Alice"));
                assert!(body.phone.is_none());
            }
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn unmatched_requests_resolve_to_none() {
        assert!(Operation::from_request(&ApiRequest::new(Method::GET)).unwrap().is_none());
        assert!(Operation::from_request(&get("profile")).unwrap().is_none());
        assert!(Operation::from_request(&ApiRequest::new(Method::POST)).unwrap().is_none());
        assert!(Operation::from_request(&post(r#"{"action":"delete"}"#)).unwrap().is_none());
        assert!(Operation::from_request(&ApiRequest::new(Method::DELETE)).unwrap().is_none());
        // GET does not look at the body, POST does not look at the query.
        assert!(Operation::from_request(&post("{}").with_query("action", "contacts"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn malformed_post_body_is_an_error() {
        assert!(Operation::from_request(&post("{not json")).is_err());
        assert!(Operation::from_request(&post("[1,2]")).is_err());
        assert!(Operation::from_request(&post(r#"{"action":"add_contact","name":5}"#)).is_err());
    }

    #[tokio::test]
    async fn options_never_touches_the_store() {
        let config = AppConfig::with_database_url("sqlite:///nonexistent-dir/never/opened.db");
        let request = ApiRequest::new(Method::OPTIONS).with_query("action", "contacts");
        let res = dispatch(&config, request).await;
        assert_eq!(res.status_code, 200);
        assert!(res.body.is_empty());
    }

    #[tokio::test]
    async fn store_failure_becomes_500() {
        let config = AppConfig::with_database_url("sqlite:///nonexistent-dir/never/opened.db");
        let res = dispatch(&config, get("contacts")).await;
        assert_eq!(res.status_code, 500);
        let body: Value = serde_json::from_str(&res.body).unwrap();
        assert!(body["error"].is_string());
    }
}
