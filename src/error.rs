//! Crate error type.
//!
//! Every failure below the dispatcher ends up as a 500 whose `error` field is
//! the `Display` text of one of these variants, so the variants carry the raw
//! driver/parser text rather than a friendlier rewording.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessengerError {
    /// Connection failures, constraint violations and anything else the store raises.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request body, or a field of the wrong JSON type.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, MessengerError>;
