//! Log subscriber installation

use crate::error::ConfigError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global `fmt` subscriber
///
/// `RUST_LOG` wins over `filter` when set. Hosts that bring their own
/// subscriber skip this.
///
/// # Errors
/// Returns [`ConfigError::Logging`] if `filter` is not a valid directive or a
/// global subscriber is already installed.
pub fn init(filter: &str) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env) => env,
        Err(_) => EnvFilter::try_new(filter).map_err(|err| ConfigError::Logging(err.to_string()))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|err| ConfigError::Logging(err.to_string()))
}
