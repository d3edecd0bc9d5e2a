mod api;
mod auth;
mod db;
mod router;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

fn load_config() -> beprod_core::Config {
    beprod_core::config::load_dotenv();
    beprod_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = load_config();
    config.log_summary();

    let pool = db::init_pg_pool(&config.postgres)
        .await
        .context("failed to initialize PostgreSQL")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let port = config.server.port;

    let state = Arc::new(state::AppState { pool, config });
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
