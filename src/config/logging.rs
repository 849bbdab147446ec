//! Tracing subscriber setup for the command-line front end.

use anyhow::Context as _;

use crate::foundation::error::FrameResult;

/// Logging section of the config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"info"` or `"photoframe=debug,warn"`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the config; `verbose`
/// forces `debug` when `RUST_LOG` is unset.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> FrameResult<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose { "debug" } else { config.level.as_str() };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    installed.context("install global tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/logging.rs"]
mod tests;
