//! `tracing` setup. Everything goes to stderr: stdout carries the MCP protocol.

use crate::error::{Result, ServerError};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install the global subscriber.
///
/// `level` is an `EnvFilter` directive (`info`, `evolution_mcp=debug,warn`, ...).
///
/// # Errors
///
/// Returns an error if the directive does not parse. A subscriber that is already installed
/// is left in place.
pub fn init(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| ServerError::Config(format!("invalid log level '{level}': {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_directive() {
        let err = init("evolution_mcp=notalevel", LogFormat::Text).unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn second_init_is_harmless() {
        assert!(init("warn", LogFormat::Json).is_ok());
        assert!(init("warn", LogFormat::Text).is_ok());
    }
}
