use std::env;

use serde::Deserialize;
use tracing::info;

use crate::layout::settings::LayoutSettings;

fn default_session_exp() -> u64 {
    60 * 60
}

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    pub database_url: String,
    pub redis_url: String,
    /// Seconds a session written by [`crate::core::session::add_session`] lives.
    #[serde(default = "default_session_exp")]
    pub session_exp: u64,
    /// AdminLTE layout settings as a JSON object.
    pub layout_settings: Option<String>,
}

impl Config {
    pub fn layout_settings(&self) -> LayoutSettings {
        match &self.layout_settings {
            Some(raw) => LayoutSettings::from_json_or_default(raw),
            None => LayoutSettings::default(),
        }
    }
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environment as environment variable");
    }
    let config = envy::from_env::<Config>()?;
    Ok(config)
}
