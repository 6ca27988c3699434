use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://messenger.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Viewer used when a request carries no usable `userId`.
pub const DEFAULT_USER_ID: i64 = 1;

/// Process configuration, read from the environment (and `.env`) once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub default_user_id: i64,
    /// Run `CREATE TABLE IF NOT EXISTS` for the three tables before serving.
    pub bootstrap_schema: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_user_id: DEFAULT_USER_ID,
            bootstrap_schema: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.database_url);
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let default_user_id = env::var("MESSENGER_DEFAULT_USER_ID")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.default_user_id);
        let bootstrap_schema = env::var("MESSENGER_BOOTSTRAP_SCHEMA")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.bootstrap_schema);

        Self {
            database_url,
            host,
            port,
            default_user_id,
            bootstrap_schema,
        }
    }

    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
