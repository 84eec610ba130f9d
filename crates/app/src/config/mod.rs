//! Client configuration

use clap::Args;

pub mod api;
pub mod logging;
pub mod session;

pub use api::ApiConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use session::SessionConfig;

/// Canteen client configuration, read from flags or the environment.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// API connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Signed-in user settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
