use sqlx::SqliteConnection;

use crate::models::{InsertedMessageRow, ThreadMessageRow};

pub const SQL_LIST_THREAD: &str = r#"
SELECT
  id,
  sender_id,
  text,
  message_type,
  strftime('%H:%M', created_at) AS time
FROM messages
WHERE (sender_id = ?1 AND receiver_id = ?2)
   OR (sender_id = ?2 AND receiver_id = ?1)
ORDER BY created_at ASC, id ASC
"#;

/// Every message exchanged between the two users, oldest first.
pub async fn list_thread(
    conn: &mut SqliteConnection,
    user_id: i64,
    contact_id: i64,
) -> sqlx::Result<Vec<ThreadMessageRow>> {
    sqlx::query_as::<_, ThreadMessageRow>(SQL_LIST_THREAD)
        .bind(user_id)
        .bind(contact_id)
        .fetch_all(conn)
        .await
}

const SQL_MARK_READ: &str = r#"
UPDATE messages
SET is_read = 1
WHERE sender_id = ?1
  AND receiver_id = ?2
  AND is_read = 0
"#;

/// Flags every unread message `sender_id -> receiver_id` as read.
pub async fn mark_read(
    conn: &mut SqliteConnection,
    sender_id: i64,
    receiver_id: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_MARK_READ)
        .bind(sender_id)
        .bind(receiver_id)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}

pub struct NewMessage<'a> {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: &'a str,
    pub message_type: &'a str,
}

const SQL_INSERT_MESSAGE: &str = r#"
INSERT INTO messages (
  sender_id,
  receiver_id,
  text,
  message_type
) VALUES (?1, ?2, ?3, ?4)
RETURNING id, strftime('%H:%M', created_at) AS time
"#;

pub async fn insert_message(
    conn: &mut SqliteConnection,
    msg: NewMessage<'_>,
) -> sqlx::Result<InsertedMessageRow> {
    sqlx::query_as::<_, InsertedMessageRow>(SQL_INSERT_MESSAGE)
        .bind(msg.sender_id)
        .bind(msg.receiver_id)
        .bind(msg.text)
        .bind(msg.message_type)
        .fetch_one(conn)
        .await
}
