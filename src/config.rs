use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

use crate::core::constants::DEFAULT_APP_ID;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Prefix of every anchor message this deployment produces.
    pub app_id: String,
    pub balance_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            log_level: "info".to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            balance_cache_ttl_secs: 3600,
        }
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(defaults.port),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            app_id: env::var("ANCHOR_APP_ID")
                .ok()
                .filter(|v| !v.is_empty() && !v.contains(':') && !v.contains(char::is_whitespace))
                .unwrap_or(defaults.app_id),
            balance_cache_ttl_secs: env::var("BALANCE_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.balance_cache_ttl_secs),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
