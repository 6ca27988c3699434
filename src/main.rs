use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use messenger::database::{connection, schema};
use messenger::AppConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    tracing::info!(
        database_url = %config.database_url,
        default_user_id = config.default_user_id,
        "messenger_config_loaded"
    );

    if config.bootstrap_schema {
        let mut conn = connection::open_connection(&config.database_url)
            .await
            .expect("cannot open database for schema bootstrap");
        schema::ensure_schema(&mut conn)
            .await
            .expect("schema bootstrap failed");
        if let Err(err) = sqlx::Connection::close(conn).await {
            tracing::warn!(error = %err, "bootstrap_connection_close_failed");
        }
    }

    let host = config.host.clone();
    let port = config.port;
    let app = messenger::build_router(Arc::new(config));

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("cannot parse HOST/PORT");

    // Fall back to the next port when the configured one is taken.
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::warn!(error = %e, %addr, "bind_failed_trying_next_port");
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("cannot parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().expect("listener has no local address");
    tracing::info!(addr = %bound_addr, "messenger_listening");

    axum::serve(listener, app).await.expect("server error");
}
