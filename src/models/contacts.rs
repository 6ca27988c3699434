use sqlx::FromRow;

/// One row of the contact-list aggregation: the contact's user record plus
/// the latest exchanged message and the unread count towards the viewer.
#[derive(Debug, Clone, FromRow)]
pub struct ContactSummaryRow {
    pub id: i64,
    pub name: String,
    pub avatar: String,
    pub is_online: bool,
    pub last_message: String,
    pub last_time: String,
    pub unread_count: i64,
}
