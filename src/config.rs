//! # Configuration Module
//!
//! This module provides configuration support for relprep, allowing the
//! built-in rewrite rules, release subtree allow-list, and canonical header
//! text to be overridden per release tree.
//!
//! Configuration can be specified in a `.relprep.toml` file or via the
//! `RELPREP_CONFIG` environment variable. Every key is optional; absent keys
//! fall back to the built-in defaults. Rule order in the file is the
//! application order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::header::CANONICAL_HEADER;
use crate::rewrite::TransformRule;
use crate::verbose_log;
use crate::walker::DEFAULT_SUBTREES;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".relprep.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "RELPREP_CONFIG";

/// Built-in ordered rewrite rules mapping internal paths to their public
/// equivalents. Longer, more specific search texts come first; a shorter rule
/// that is a substring of an earlier one would otherwise clobber it.
pub fn default_rules() -> Vec<TransformRule> {
  vec![
    TransformRule::new("location/nearby/cpp/", ""),
    TransformRule::new("location/nearby/proto/", "proto/"),
    TransformRule::new("location/nearby/", ""),
  ]
}

/// One rewrite rule as written in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
  /// The literal text to find.
  pub search: String,

  /// The literal replacement; defaults to deleting the match.
  #[serde(default)]
  pub replace: String,
}

/// Main configuration struct for relprep.
///
/// Loaded from a `.relprep.toml` file; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  /// Ordered rewrite rules, replacing the built-in list when present.
  #[serde(default)]
  pub rules: Option<Vec<RuleConfig>>,

  /// Root-level release subtrees, replacing the built-in allow-list.
  #[serde(default)]
  pub subtrees: Option<Vec<String>>,

  /// Canonical header text, replacing the built-in license header.
  #[serde(default)]
  pub header: Option<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A configured value is unusable.
  #[error("Invalid config value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not valid TOML, or
  /// contains an unusable value.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that no rule has an empty search text (it would match everywhere)
  /// and that an overridden header or subtree list is non-empty.
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref rules) = self.rules {
      for rule in rules {
        if rule.search.is_empty() {
          return Err(ConfigError::InvalidValue {
            key: "rules".to_string(),
            message: "search text cannot be empty".to_string(),
          });
        }
      }
    }

    if let Some(ref subtrees) = self.subtrees
      && subtrees.is_empty()
    {
      return Err(ConfigError::InvalidValue {
        key: "subtrees".to_string(),
        message: "allow-list cannot be empty".to_string(),
      });
    }

    if let Some(ref header) = self.header
      && header.trim().is_empty()
    {
      return Err(ConfigError::InvalidValue {
        key: "header".to_string(),
        message: "header text cannot be empty".to_string(),
      });
    }

    Ok(())
  }

  /// The effective ordered rewrite rules.
  pub fn rules_or_default(&self) -> Vec<TransformRule> {
    match &self.rules {
      Some(rules) => rules
        .iter()
        .map(|rule| TransformRule::new(&rule.search, &rule.replace))
        .collect(),
      None => default_rules(),
    }
  }

  /// The effective release subtree allow-list.
  pub fn subtrees_or_default(&self) -> Vec<String> {
    match &self.subtrees {
      Some(subtrees) => subtrees.clone(),
      None => DEFAULT_SUBTREES.iter().map(|s| (*s).to_string()).collect(),
    }
  }

  /// The effective canonical header text.
  pub fn header_or_default(&self) -> &str {
    self.header.as_deref().unwrap_or(CANONICAL_HEADER)
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `RELPREP_CONFIG` environment variable
/// 3. `.relprep.toml` in the destination root
pub fn discover_config_path(explicit_path: Option<&Path>, dest_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let dest_config = dest_root.join(DEFAULT_CONFIG_FILENAME);
  if dest_config.exists() {
    verbose_log!("Using destination config: {}", dest_config.display());
    return Some(dest_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or return `None` when no
/// config file is found or discovery is disabled.
pub fn load_config(explicit_path: Option<&Path>, dest_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, dest_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
