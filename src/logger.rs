//! # Logger
//!
//! Installs a `tracing` subscriber for applications embedding the object
//! model. The library itself only emits events; nothing is printed unless a
//! subscriber is installed, either here or by the host application.
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::{config, Error, Result};

const MODULE_WHITELIST: &[&str] = &["sbol"];

/// Log levels
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LogLevel {
    /// The "off" level.
    #[serde(rename = "off")]
    Off,
    /// The "trace" level.
    #[serde(rename = "trace")]
    Trace,
    /// The "debug" level.
    #[serde(rename = "debug")]
    Debug,
    /// The "info" level.
    #[serde(rename = "info")]
    #[default]
    Info,
    /// The "warn" level.
    #[serde(rename = "warn")]
    Warn,
    /// The "error" level.
    #[serde(rename = "error")]
    Error,
}

/// Log formats
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Format {
    #[serde(rename = "compact")]
    #[default]
    Compact,
    #[serde(rename = "pretty")]
    Pretty,
    #[serde(rename = "json")]
    Json,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence, then `override_filter`, then the configured
/// level applied to this crate's modules.
///
/// # Errors
///
/// Fails when the filter directives do not parse or a global subscriber is
/// already installed.
pub fn init(config: &config::Logger) -> Result<()> {
    if !config.enable {
        return Ok(());
    }

    let filter = init_env_filter(config.override_filter.as_deref(), config.level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        Format::Compact => builder.compact().try_init(),
        Format::Pretty => builder.pretty().try_init(),
        Format::Json => builder.json().try_init(),
    };
    installed.map_err(|err| Error::Message(format!("cannot install logger: {err}")))
}

fn init_env_filter(override_filter: Option<&str>, level: LogLevel) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = override_filter.map_or_else(
        || {
            MODULE_WHITELIST
                .iter()
                .map(|module| format!("{module}={level}"))
                .collect::<Vec<_>>()
                .join(",")
        },
        ToString::to_string,
    );
    EnvFilter::try_new(&directives)
        .map_err(|err| Error::Message(format!("invalid log filter `{directives}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logger_is_a_no_op() {
        let config = config::Logger::default();
        assert!(init(&config).is_ok());
    }

    #[test]
    fn level_renders_as_filter_directive() {
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn override_filter_must_parse() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(init_env_filter(Some("sbol=trace"), LogLevel::Info).is_ok());
        assert!(init_env_filter(Some("sbol=loud"), LogLevel::Info).is_err());
    }
}
