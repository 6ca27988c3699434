use sqlx::{Connection, SqliteConnection};

use crate::database::{contacts_repo, users_repo};
use crate::error::{MessengerError, Result};
use crate::models::messenger_api_models::{AddContactBody, AddContactResult, DEFAULT_AVATAR};

/// Creates a brand-new user and links it into `owner_id`'s contact list.
///
/// Only the owner -> new user edge is written. Both inserts run in one
/// transaction; if the edge insert fails the user insert is rolled back when
/// the transaction is dropped.
pub async fn add_contact(
    conn: &mut SqliteConnection,
    owner_id: i64,
    body: AddContactBody,
) -> Result<AddContactResult> {
    let name = body.name.ok_or(MessengerError::MissingField("name"))?;
    let avatar = body.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string());

    let mut tx = conn.begin().await?;
    let contact_id = users_repo::insert_user(
        &mut *tx,
        users_repo::NewUser {
            name: &name,
            avatar: &avatar,
            phone: body.phone.as_deref(),
        },
    )
    .await?;
    contacts_repo::insert_contact_edge(
        &mut *tx,
        contacts_repo::NewContactEdge {
            user_id: owner_id,
            contact_user_id: contact_id,
            is_online: false,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = owner_id, contact_id, "contact_added");

    Ok(AddContactResult {
        success: true,
        contact_id,
    })
}
