use tokio::process::Command;

use crate::settings::Config;

/// Run the `sqlx` CLI, failing when it exits non-zero.
async fn sqlx_cli(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("sqlx").args(args).status().await?;
    if !status.success() {
        anyhow::bail!("sqlx {} exited with {}", args.join(" "), status);
    }
    Ok(())
}

pub async fn db_generate(migration_name: &str) -> anyhow::Result<()> {
    sqlx_cli(&["migrate", "add", migration_name, "-r"]).await
}

pub async fn db_list(config: &Config) -> anyhow::Result<()> {
    sqlx_cli(&["migrate", "info", "-D", &config.database_url]).await
}

pub async fn db_migrate(config: &Config) -> anyhow::Result<()> {
    sqlx_cli(&["migrate", "run", "-D", &config.database_url]).await
}

pub async fn db_revert(config: &Config) -> anyhow::Result<()> {
    sqlx_cli(&["migrate", "revert", "-D", &config.database_url]).await
}
