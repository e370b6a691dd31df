// Process settings, read from the environment (optionally via a .env file).
//
// Identity values are only checked for presence. A wrong token or id is
// reported by Discord when it is first used, not here.

use crate::core::configuration::SeedPolicy;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/bot.db";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub token: String,
    pub application_id: String,
    pub guild_id: String,
    pub database_url: String,
    pub seed_policy: SeedPolicy,
}

impl BotSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(SettingsError::Missing(key))
        };

        let parse_u64 = |key: &'static str, default: u64| match lookup(key) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::Invalid { key, value }),
            None => Ok(default),
        };

        let defaults = SeedPolicy::default();
        let max_attempts = parse_u64("SEED_MAX_ATTEMPTS", defaults.max_attempts as u64)?;
        let max_attempts = u32::try_from(max_attempts).map_err(|_| SettingsError::Invalid {
            key: "SEED_MAX_ATTEMPTS",
            value: max_attempts.to_string(),
        })?;
        let delay_ms = parse_u64(
            "SEED_RETRY_DELAY_MS",
            defaults.initial_delay.as_millis() as u64,
        )?;

        Ok(Self {
            token: required("TOKEN")?,
            application_id: required("CLIENT_ID")?,
            guild_id: required("GUILD_ID")?,
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            seed_policy: SeedPolicy {
                max_attempts,
                initial_delay: Duration::from_millis(delay_ms),
            },
        })
    }
}
