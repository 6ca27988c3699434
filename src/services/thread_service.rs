use sqlx::{Connection, SqliteConnection};

use crate::database::messages_repo;
use crate::models::messenger_api_models::ThreadMessage;
use crate::models::ThreadMessageRow;

/// Loads the conversation between `viewer_id` and `contact_id`, oldest first,
/// and marks everything the contact sent to the viewer as read.
///
/// Both statements share one transaction: opening a thread is what
/// acknowledges receipt, so a second read finds nothing left to mark.
pub async fn read_thread(
    conn: &mut SqliteConnection,
    viewer_id: i64,
    contact_id: i64,
) -> sqlx::Result<Vec<ThreadMessage>> {
    let mut tx = conn.begin().await?;
    let rows = messages_repo::list_thread(&mut *tx, viewer_id, contact_id).await?;
    let marked = messages_repo::mark_read(&mut *tx, contact_id, viewer_id).await?;
    tx.commit().await?;

    tracing::debug!(
        user_id = viewer_id,
        contact_id,
        messages = rows.len(),
        marked_read = marked,
        "thread_loaded"
    );

    Ok(rows
        .into_iter()
        .map(|row| to_thread_message(row, viewer_id))
        .collect())
}

fn to_thread_message(row: ThreadMessageRow, viewer_id: i64) -> ThreadMessage {
    ThreadMessage {
        id: row.id,
        is_mine: row.sender_id == viewer_id,
        text: row.text,
        message_type: row.message_type,
        time: row.time,
    }
}
