//! Configuration management for localgit.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML or JSON config files, environment variables, and defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::{BodyFilter, RejectedPattern};
use crate::git::GitCli;
use crate::repo::{Containment, PathValidator};
use crate::tools::DEFAULT_LOG_COUNT;
use crate::translations::Translations;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "localgit";

/// Prefix of environment variables read into the configuration.
const ENV_PREFIX: &str = "LOCALGIT_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LOCALGIT_`, nested keys split on `__`)
/// 2. Config file at `~/.config/localgit/config.toml` (JSON if the name ends in `.json`)
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Regex patterns removed from commit messages.
    /// Empty selects the built-in patterns.
    pub filter_patterns: Vec<String>,
    /// Repository access configuration.
    pub repositories: RepositoryConfig,
    /// Git invocation configuration.
    pub git: GitConfig,
    /// Overrides for tool descriptions and titles, keyed by translation key.
    pub translations: BTreeMap<String, String>,
}

/// Repository access configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Absolute directories under which repositories may be used.
    /// The first one is the default repository.
    pub allowed: Vec<PathBuf>,
    /// How paths are matched against the allowed roots.
    pub containment: Containment,
}

/// Git invocation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// The git executable.
    pub binary: PathBuf,
    /// Log entries shown when `git_log` is called without `max_count`.
    pub default_log_count: usize,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("git"),
            default_log_count: DEFAULT_LOG_COUNT,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and the environment apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Self::figment(&config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let is_json = config_file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let figment = if is_json {
            figment.merge(Json::file(config_file))
        } else {
            figment.merge(Toml::file(config_file))
        };

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// Invalid filter patterns are not an error here; see
    /// [`Config::rejected_filter_patterns`].
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = self
            .repositories
            .allowed
            .iter()
            .find(|root| !root.is_absolute())
        {
            return Err(Error::config_validation(format!(
                "allowed repository must be an absolute path: {}",
                root.display()
            )));
        }

        if self.git.default_log_count == 0 {
            return Err(Error::config_validation(
                "default_log_count must be greater than 0",
            ));
        }

        if self.git.binary.as_os_str().is_empty() {
            return Err(Error::config_validation("git binary must not be empty"));
        }

        Ok(())
    }

    /// Filter patterns that would be skipped because they don't compile.
    #[must_use]
    pub fn rejected_filter_patterns(&self) -> Vec<RejectedPattern> {
        BodyFilter::with_patterns(&self.filter_patterns).1
    }

    /// Add repository roots, e.g. from the command line.
    ///
    /// Relative paths are made absolute against the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory can't be determined.
    pub fn add_repositories<I>(&mut self, roots: I) -> Result<()>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for root in roots {
            let root = std::path::absolute(&root)?;
            if !self.repositories.allowed.contains(&root) {
                self.repositories.allowed.push(root);
            }
        }
        Ok(())
    }

    /// Build the path validator for the configured roots.
    #[must_use]
    pub fn path_validator(&self) -> PathValidator {
        PathValidator::new(self.repositories.allowed.clone())
            .with_containment(self.repositories.containment)
    }

    /// Build the body filter, returning the patterns that were skipped.
    #[must_use]
    pub fn body_filter(&self) -> (BodyFilter, Vec<RejectedPattern>) {
        BodyFilter::with_patterns(&self.filter_patterns)
    }

    /// Build the translation resolver.
    #[must_use]
    pub fn translations(&self) -> Translations {
        Translations::new(self.translations.clone())
    }

    /// Build the git runner.
    #[must_use]
    pub fn git_cli(&self) -> GitCli {
        GitCli::with_binary(&self.git.binary)
    }
}
