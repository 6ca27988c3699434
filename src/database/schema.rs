use sqlx::SqliteConnection;

const SQL_CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  avatar TEXT NOT NULL DEFAULT '👤',
  phone TEXT
)
"#;

const SQL_CREATE_CONTACTS: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
  user_id INTEGER NOT NULL REFERENCES users(id),
  contact_user_id INTEGER NOT NULL REFERENCES users(id),
  is_online INTEGER NOT NULL DEFAULT 0,
  PRIMARY KEY (user_id, contact_user_id)
)
"#;

const SQL_CREATE_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  sender_id INTEGER NOT NULL REFERENCES users(id),
  receiver_id INTEGER NOT NULL REFERENCES users(id),
  text TEXT NOT NULL DEFAULT '',
  message_type TEXT NOT NULL DEFAULT 'text',
  is_read INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)
"#;

const SQL_CREATE_MESSAGES_PAIR_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_messages_pair
  ON messages (sender_id, receiver_id, created_at)
"#;

const SQL_CREATE_CONTACTS_OWNER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_contacts_owner
  ON contacts (user_id)
"#;

const SCHEMA: &[&str] = &[
    SQL_CREATE_USERS,
    SQL_CREATE_CONTACTS,
    SQL_CREATE_MESSAGES,
    SQL_CREATE_MESSAGES_PAIR_INDEX,
    SQL_CREATE_CONTACTS_OWNER_INDEX,
];

/// Creates the three tables and their lookup indexes if they are missing.
/// Returns the number of statements applied.
pub async fn ensure_schema(conn: &mut SqliteConnection) -> sqlx::Result<usize> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(SCHEMA.len())
}
