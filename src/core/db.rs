use std::time::Duration;

use sqlx::{pool::PoolOptions, Pool, Postgres};

use crate::settings::Config;

pub async fn init_pool(config: &Config) -> anyhow::Result<Pool<Postgres>> {
    let pool = PoolOptions::new()
        .min_connections(5)
        .max_connections(100)
        .idle_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Apply every pending migration under `./migrations`.
pub async fn run_migrations(pool: &Pool<Postgres>) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
