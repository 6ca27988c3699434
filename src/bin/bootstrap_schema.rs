use dotenvy::dotenv;

use messenger::database::{connection, schema};
use messenger::AppConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    let mut conn = match connection::open_connection(&config.database_url).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("schema bootstrap failed: cannot open {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    match schema::ensure_schema(&mut conn).await {
        Ok(applied) => {
            println!(
                "schema bootstrap: database={}, statements={}",
                config.database_url, applied
            );
        }
        Err(e) => {
            eprintln!("schema bootstrap failed: {}", e);
            std::process::exit(1);
        }
    }
}
