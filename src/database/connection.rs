use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;

/// Opens a dedicated connection for one request. There is no pool: the
/// caller owns the connection and closes it when the request is done.
pub async fn open_connection(database_url: &str) -> sqlx::Result<SqliteConnection> {
    SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .connect()
        .await
}
