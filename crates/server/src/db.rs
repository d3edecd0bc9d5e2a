use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Create the PostgreSQL connection pool and run migrations.
pub async fn init_pg_pool(config: &beprod_core::config::PostgresConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_string())
        .await?;
    info!("PostgreSQL connected: {}", config.host);

    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("Database migrations applied");

    Ok(pool)
}
