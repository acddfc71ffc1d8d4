use crate::core::errors::{Error, Result};
use log::{info, warn};
use std::env;

/*-------------------------------------------------------------------------------------------------
  Configuration
-------------------------------------------------------------------------------------------------*/

/// Identity of the managed IP set, read from the environment once per invocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub ip_set_id: String,
    pub ip_set_name: String,
}

impl Config {
    /// Read the target IP set identity from the `IP_SET_ID` and `IP_SET_NAME`
    /// environment variables. Both are required.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ip_set_id: require_env_var("IP_SET_ID")?,
            ip_set_name: require_env_var("IP_SET_NAME")?,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

fn require_env_var(env_var: &str) -> Result<String> {
    env::var(env_var)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::Config(format!("{} is not set", env_var)))
}

/// Get and parse an environment variable value or return a default value.
pub fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
