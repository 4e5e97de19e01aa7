//! Runtime settings: built-in defaults, overridden by `RUSTY_TRIPS__*`
//! environment variables (`.env` is loaded first).

use config::{Config, ConfigError, Environment};
use rt_core::AccessPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub database_url: String,
    #[serde(default)]
    pub policy: AccessPolicy,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix("RUSTY_TRIPS").separator("__"))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let defaults = AccessPolicy::default();
        Config::builder()
            .set_default("bind_address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "sqlite:rusty_trips.db")?
            .set_default("policy.enforce_ownership", defaults.enforce_ownership)?
            .set_default(
                "policy.guard_activity_mutations",
                defaults.guard_activity_mutations,
            )?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
