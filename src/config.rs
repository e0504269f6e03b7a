use std::time::Duration;

use clap::Args;

use crate::adapters::remote::{
    client::{DEFAULT_BASE_URL, DEFAULT_PLACES_PATH},
    NetworkConfig,
};

/// Settings shared by every command
///
/// Each option can also be set through the environment.
#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Base URL of the places API
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Path of the places resource, appended to the base URL
    #[arg(long, env = "PLACES_PATH", default_value = DEFAULT_PLACES_PATH)]
    pub places_path: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "API_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn network(&self) -> NetworkConfig {
        NetworkConfig {
            base_url: self.api_base_url.clone(),
            places_path: self.places_path.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
