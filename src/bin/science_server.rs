// Science calculators web server
//
// Usage: cargo run --bin science_server
// Configuration comes from PORT, BIND_ADDR, PUBLIC_BASE_URL, STATIC_DIR, SITE_NAME.

use science_calculators::{create_router, AppState, SiteConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "science_calculators=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting science calculators server...");

    let config = SiteConfig::from_env()?;
    config.log_summary();
    let addr = config.socket_addr();

    let state = AppState::new(config)?;
    tracing::info!("{} calculators registered", state.registry.len());

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
