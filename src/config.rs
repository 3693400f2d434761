//! Rules configuration file.
//!
//! The file is a JSON object whose keys are the [`Rules`] fields. Missing
//! keys keep their defaults and unknown keys are rejected:
//!
//! ```json
//! { "acceleration": 8, "min_fall_interval_ms": 40 }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{Rules, RulesError};

/// Errors that can occur while loading rules
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid rules: {0}")]
    Invalid(#[from] RulesError),
}

/// Parse and validate rules from JSON text
pub fn rules_from_json_str(text: &str) -> Result<Rules, ConfigError> {
    let rules: Rules = serde_json::from_str(text)?;
    rules.validate()?;
    Ok(rules)
}

/// Load rules from `path`
pub fn load_rules(path: &Path) -> Result<Rules, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    rules_from_json_str(&text)
}

/// Rules from `path` when given, defaults otherwise
pub fn load_rules_or_default(path: Option<&Path>) -> Result<Rules, ConfigError> {
    match path {
        Some(path) => load_rules(path),
        None => Ok(Rules::default()),
    }
}
