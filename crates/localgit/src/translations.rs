//! Overridable user-facing strings.
//!
//! Tool descriptions and titles are looked up by key. A value resolves from,
//! in order: the process cache, a `LOCALGIT_<KEY>` environment variable, the
//! `translations` table of the configuration, then the built-in default.
//! The first resolution of a key is cached for the lifetime of the
//! [`Translations`] value.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Prefix of environment variables that override a translation.
pub const ENV_PREFIX: &str = "LOCALGIT_";

/// Resolves translation keys to strings.
#[derive(Debug)]
pub struct Translations {
    overrides: BTreeMap<String, String>,
    env_prefix: String,
    cache: Mutex<HashMap<String, String>>,
}

impl Translations {
    /// Create a resolver with the given configured overrides.
    ///
    /// Override keys are matched case-insensitively.
    #[must_use]
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(key, value)| (key.to_uppercase(), value))
                .collect(),
            env_prefix: ENV_PREFIX.to_string(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Read environment overrides under a different prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Resolve `key`, falling back to `default`.
    pub fn lookup(&self, key: &str, default: &str) -> String {
        let key = key.to_uppercase();
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(value) = cache.get(&key) {
            return value.clone();
        }

        let value = if let Ok(value) = std::env::var(format!("{}{key}", self.env_prefix)) {
            debug!(key = %key, "Translation overridden by environment");
            value
        } else if let Some(value) = self.overrides.get(&key) {
            value.clone()
        } else {
            default.to_string()
        };

        cache.insert(key, value.clone());
        value
    }

    /// Every key resolved so far with its value.
    #[must_use]
    pub fn resolved(&self) -> BTreeMap<String, String> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Write the resolved keys to `path` as pretty-printed JSON.
    ///
    /// `filter_patterns` is included when non-empty so the file can be used
    /// as a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing the file fails.
    pub fn export_json(&self, path: &Path, filter_patterns: &[String]) -> Result<()> {
        let mut output: Map<String, Value> = self
            .resolved()
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        if !filter_patterns.is_empty() {
            output.insert(
                "filter_patterns".to_string(),
                Value::Array(filter_patterns.iter().cloned().map(Value::String).collect()),
            );
        }

        let json = serde_json::to_string_pretty(&Value::Object(output))?;
        fs::write(path, json).map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Exported translations");
        Ok(())
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}
