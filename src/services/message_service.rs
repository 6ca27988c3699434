use serde_json::Value;
use sqlx::SqliteConnection;

use crate::database::messages_repo;
use crate::error::{MessengerError, Result};
use crate::models::messenger_api_models::{SendMessageBody, SendMessageResult, DEFAULT_MESSAGE_TYPE};

/// Stores one unread message from `sender_id`. The store assigns the id and
/// the creation time; a receiver that does not exist fails on the foreign key.
pub async fn send_message(
    conn: &mut SqliteConnection,
    sender_id: i64,
    body: SendMessageBody,
) -> Result<SendMessageResult> {
    let receiver_id = parse_receiver_id(body.receiver_id.as_ref())?;
    let text = body.text.unwrap_or_default();
    let message_type = body
        .message_type
        .unwrap_or_else(|| DEFAULT_MESSAGE_TYPE.to_string());

    let inserted = messages_repo::insert_message(
        conn,
        messages_repo::NewMessage {
            sender_id,
            receiver_id,
            text: &text,
            message_type: &message_type,
        },
    )
    .await?;

    tracing::info!(
        user_id = sender_id,
        receiver_id,
        message_id = inserted.id,
        "message_sent"
    );

    Ok(SendMessageResult {
        success: true,
        message_id: inserted.id,
        time: inserted.time,
    })
}

fn parse_receiver_id(raw: Option<&Value>) -> Result<i64> {
    let value = match raw {
        None | Some(Value::Null) => return Err(MessengerError::MissingField("receiverId")),
        Some(value) => value,
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| MessengerError::InvalidNumber {
        field: "receiverId",
        value: value.to_string(),
    })
}
