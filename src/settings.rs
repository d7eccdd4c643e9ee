use std::env;

use serde::Deserialize;
use tracing::info;

fn default_log_level() -> String {
    "debug".to_string()
}

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_exp: u16,
    pub jwt_refresh_exp: u16,
    pub redis_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
    Ok(envy::from_env::<Config>()?)
}
