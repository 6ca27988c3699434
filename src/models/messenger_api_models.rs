use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MESSAGE_TYPE: &str = "text";
pub const DEFAULT_AVATAR: &str = "👤";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: i64,
    pub name: String,
    pub avatar: String,
    pub online: bool,
    pub last_message: String,
    pub time: String,
    pub unread: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContactList {
    pub contacts: Vec<ContactSummary>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessage {
    pub id: i64,
    pub is_mine: bool,
    pub text: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageList {
    pub messages: Vec<ThreadMessage>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResult {
    pub success: bool,
    pub message_id: i64,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddContactResult {
    pub success: bool,
    pub contact_id: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `POST action=send_message`.
///
/// `receiverId` stays a raw JSON value: clients send it both as a number and
/// as a numeric string.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    #[serde(default)]
    pub receiver_id: Option<Value>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub message_type: Option<String>,
}

/// Body of `POST action=add_contact`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AddContactBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}
