use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Uid;
use crate::scanner::Pairing;

/// Configuration for rendering variants.
///
/// Holds the defaults a caller would otherwise pass on every invocation. Any
/// value given explicitly at the call site takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The uid of the region to show.
    ///
    /// If unset, the uid must be supplied when rendering.
    pub uid: Option<Uid>,

    /// How close tags are paired with open tags.
    pub pairing: Pairing,
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Picks the uid to render, preferring `explicit` over the configured one.
    #[must_use]
    pub fn resolve_uid(&self, explicit: Option<Uid>) -> Option<Uid> {
        explicit.or(self.uid)
    }
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uid: Option<Uid>,

        #[serde(default)]
        pairing: Pairing,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { uid, pairing } => Self { uid, pairing },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            uid: config.uid,
            pairing: config.pairing,
        }
    }
}
