use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::ServerConfig;

/// Main entry point for the RxDesk reference server
///
/// Serves the REST API the `rxdesk` client talks to. State is kept in memory and starts with
/// a single admin account.
///
/// # Environment Variables
/// - `RXDESK_REST_ADDR`: REST server address (default: "0.0.0.0:8080")
/// - `RXDESK_ADMIN_USERNAME`: seeded account name (default: "admin")
/// - `RXDESK_ADMIN_PASSWORD`: seeded account password (default: "admin")
///
/// # Errors
/// Returns an error if logging cannot be initialised, the address cannot be bound, or the
/// server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rxdesk=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServerConfig::from_env();
    tracing::info!("++ Starting RxDesk on {}", cfg.addr);

    api_rest::serve(cfg).await
}
