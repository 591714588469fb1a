// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Registry configuration and the process-wide default threshold.
//!
//! The process-wide default is only consulted when a registry is built: each
//! [`EventEmitter`](crate::event::EventEmitter) copies it into its own
//! threshold, so changing the default later never affects live registries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Threshold used when nothing else has been configured.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

static PROCESS_DEFAULT_MAX_LISTENERS: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_LISTENERS);

/// Returns the threshold that newly created registries start with.
pub fn default_max_listeners() -> usize {
    PROCESS_DEFAULT_MAX_LISTENERS.load(Ordering::Relaxed)
}

/// Sets the threshold that registries created from now on start with.
pub fn set_default_max_listeners(max: usize) {
    log::debug!("Process default max listeners set to {max}.");
    PROCESS_DEFAULT_MAX_LISTENERS.store(max, Ordering::Relaxed);
}

/// Configuration for an [`EventEmitter`](crate::event::EventEmitter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Number of entries a single event list may hold before additions
    /// report [`ListenerLimitExceeded`](crate::event::ListenerLimitExceeded).
    pub max_listeners: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: default_max_listeners(),
        }
    }
}

impl EmitterConfig {
    /// Parses a configuration from TOML. Missing keys take their defaults.
    ///
    /// ```rust
    /// use herald_core::config::EmitterConfig;
    ///
    /// let config = EmitterConfig::from_toml_str("max_listeners = 25").unwrap();
    /// assert_eq!(config.max_listeners, 25);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// ## Arguments
    /// * `path` - Location of the TOML file.
    ///
    /// ## Returns
    /// The parsed configuration, or a [`ConfigError`] if the file cannot be
    /// read or does not match the schema.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&source)
    }
}

/// An error raised while loading an [`EmitterConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for this schema.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read emitter config from '{path}': {source}")
            }
            ConfigError::Parse(details) => write!(f, "Invalid emitter config: {details}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_listeners() {
        let config = EmitterConfig::from_toml_str("max_listeners = 3").unwrap();
        assert_eq!(config.max_listeners, 3);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EmitterConfig::from_toml_str("").unwrap();
        assert_eq!(config, EmitterConfig::default());
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let err = EmitterConfig::from_toml_str("max_listeners = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = EmitterConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
