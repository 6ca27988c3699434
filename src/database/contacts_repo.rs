use sqlx::SqliteConnection;

use crate::models::ContactSummaryRow;

/// Contacts owned by `?1` with the latest message of each pair (either
/// direction) and the number of unread messages from the contact to `?1`.
/// Pairs without messages sort last; ties fall back to the contact id.
pub const SQL_LIST_CONTACT_SUMMARIES: &str = r#"
SELECT
  u.id,
  u.name,
  u.avatar,
  c.is_online,
  COALESCE(latest.text, '') AS last_message,
  COALESCE(strftime('%H:%M', latest.created_at), '') AS last_time,
  (
    SELECT COUNT(*)
    FROM messages m
    WHERE m.sender_id = u.id
      AND m.receiver_id = ?1
      AND m.is_read = 0
  ) AS unread_count
FROM contacts c
JOIN users u ON u.id = c.contact_user_id
LEFT JOIN messages latest ON latest.id = (
  SELECT m.id
  FROM messages m
  WHERE (m.sender_id = u.id AND m.receiver_id = ?1)
     OR (m.sender_id = ?1 AND m.receiver_id = u.id)
  ORDER BY m.created_at DESC, m.id DESC
  LIMIT 1
)
WHERE c.user_id = ?1
ORDER BY
  latest.created_at IS NULL,
  latest.created_at DESC,
  latest.id DESC,
  u.id ASC
"#;

pub async fn list_contact_summaries(
    conn: &mut SqliteConnection,
    viewer_id: i64,
) -> sqlx::Result<Vec<ContactSummaryRow>> {
    sqlx::query_as::<_, ContactSummaryRow>(SQL_LIST_CONTACT_SUMMARIES)
        .bind(viewer_id)
        .fetch_all(conn)
        .await
}

pub struct NewContactEdge {
    pub user_id: i64,
    pub contact_user_id: i64,
    pub is_online: bool,
}

const SQL_INSERT_CONTACT_EDGE: &str = r#"
INSERT INTO contacts (
  user_id,
  contact_user_id,
  is_online
) VALUES (?1, ?2, ?3)
"#;

pub async fn insert_contact_edge(
    conn: &mut SqliteConnection,
    edge: NewContactEdge,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_CONTACT_EDGE)
        .bind(edge.user_id)
        .bind(edge.contact_user_id)
        .bind(edge.is_online)
        .execute(conn)
        .await?;
    Ok(res.rows_affected())
}
