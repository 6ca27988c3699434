use sqlx::SqliteConnection;

use crate::database::contacts_repo;
use crate::models::messenger_api_models::ContactSummary;
use crate::models::ContactSummaryRow;

/// Contact list of `viewer_id`, most recently active conversation first.
///
/// Unread counts are derived at query time, so a thread read racing this call
/// may or may not be reflected.
pub async fn list_contacts(
    conn: &mut SqliteConnection,
    viewer_id: i64,
) -> sqlx::Result<Vec<ContactSummary>> {
    let rows = contacts_repo::list_contact_summaries(conn, viewer_id).await?;
    tracing::debug!(user_id = viewer_id, contacts = rows.len(), "contact_list_loaded");
    Ok(rows.into_iter().map(to_summary).collect())
}

fn to_summary(row: ContactSummaryRow) -> ContactSummary {
    ContactSummary {
        id: row.id,
        name: row.name,
        avatar: row.avatar,
        online: row.is_online,
        last_message: row.last_message,
        time: row.last_time,
        unread: row.unread_count,
    }
}
