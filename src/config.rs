//! # Configuration
//!
//! URI-minting switches and ambient settings, passed explicitly to
//! [`crate::Document::new`] and to every constructor. Several documents with
//! different settings can coexist.
//!
//! ```yaml
//! homespace: http://sys-bio.org
//! sbol_compliant_uris: true
//! sbol_typed_uris: false
//! version: "1.0.0"
//! logger:
//!   enable: true
//!   level: debug
//!   format: compact
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{logger, model::value_objects::Iri, Error, Result};

/// Object-model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Base namespace new identities are minted under.
    #[serde(default = "default_homespace")]
    pub homespace: String,
    /// Derive identities from namespace, displayId and version. When off,
    /// constructors take fully qualified URIs.
    #[serde(default = "default_true")]
    pub sbol_compliant_uris: bool,
    /// Insert the class name as a path segment of top-level identities.
    #[serde(default)]
    pub sbol_typed_uris: bool,
    /// Version assigned to new objects. Empty disables versioned identities.
    #[serde(default = "default_version")]
    pub version: String,
    /// Run global validation before serialization.
    #[serde(default = "default_true")]
    pub validate: bool,
    #[serde(default)]
    pub logger: Logger,
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Logger {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub level: logger::LogLevel,
    #[serde(default)]
    pub format: logger::Format,
    /// Raw `EnvFilter` directives replacing the level-derived filter.
    #[serde(default)]
    pub override_filter: Option<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            enable: false,
            level: logger::LogLevel::default(),
            format: logger::Format::default(),
            override_filter: None,
        }
    }
}

fn default_homespace() -> String {
    "http://examples.com".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            homespace: default_homespace(),
            sbol_compliant_uris: true,
            sbol_typed_uris: false,
            version: default_version(),
            validate: true,
            logger: Logger::default(),
        }
    }
}

impl Config {
    /// Parses a YAML configuration and checks it.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or a homespace that is not an absolute IRI.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Reads and parses a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or [`Config::from_yaml`] rejects it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    #[must_use]
    pub fn with_homespace(mut self, homespace: impl Into<String>) -> Self {
        self.homespace = homespace.into();
        self
    }

    #[must_use]
    pub fn with_compliant_uris(mut self, enabled: bool) -> Self {
        self.sbol_compliant_uris = enabled;
        self
    }

    #[must_use]
    pub fn with_typed_uris(mut self, enabled: bool) -> Self {
        self.sbol_typed_uris = enabled;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Homespace without a trailing separator, ready for path joins.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.homespace.trim_end_matches(['/', '#'])
    }

    fn check(&self) -> Result<()> {
        Iri::new(self.homespace.as_str()).map_err(|err| {
            Error::InvalidArgument(format!("homespace is not an absolute IRI: {err}"))
        })?;
        if !self.version.is_empty() {
            crate::model::Version::parse(&self.version).map_err(|expected| {
                Error::invalid_format("version", self.version.clone(), expected)
            })?;
        }
        Ok(())
    }
}
