//! API Config

use std::time::Duration;

use clap::Args;

/// Canteen API settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the canteen API
    #[arg(
        long,
        env = "CANTEEN_API_URL",
        default_value = "http://localhost:5000/api"
    )]
    pub api_url: String,

    /// Bearer token of the signed-in user
    #[arg(long, env = "CANTEEN_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CANTEEN_REQUEST_TIMEOUT_SECONDS", default_value_t = 15u64)]
    pub request_timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
