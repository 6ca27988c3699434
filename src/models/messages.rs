use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ThreadMessageRow {
    pub id: i64,
    pub sender_id: i64,
    pub text: String,
    pub message_type: String,
    pub time: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct InsertedMessageRow {
    pub id: i64,
    pub time: String,
}
