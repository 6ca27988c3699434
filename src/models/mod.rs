pub mod contacts;
pub mod messages;
pub mod messenger_api_models;

pub use contacts::ContactSummaryRow;
pub use messages::{InsertedMessageRow, ThreadMessageRow};
