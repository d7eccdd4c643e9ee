use std::{str::FromStr, sync::Arc};

use poem::listener::TcpListener;
use tracing::Level;
use wedding_backoffice::{
    core::db::{init_pool, run_migrations},
    init_openapi_route,
    settings::get_config,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config()?;

    let log_level = Level::from_str(&config.log_level).unwrap_or(Level::DEBUG);
    // Logging to File
    let file_appender = tracing_appender::rolling::daily("./logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(log_level)
        .init();

    // Logging to Console
    // tracing_subscriber::fmt().with_max_level(log_level).init();

    tracing::info!("run with env {} on {}:{}", config.env, config.host, config.port);

    // Init Database Connection
    tracing::info!("Init Postgres connection");
    let pool = init_pool(&config).await?;
    run_migrations(&pool).await?;
    // Init Redis Connection
    tracing::info!("Init Redis connection on {}", config.redis_url.clone());
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    // Init App State
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
        config: config.clone(),
    });

    let app = init_openapi_route(app_state.clone(), &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await?;
    Ok(())
}
