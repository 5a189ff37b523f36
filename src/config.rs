//! Render configuration.
//!
//! Options can be set in code or loaded from a TOML file:
//!
//! ```toml
//! [render]
//! strict = true
//! require_filter = false
//! legacy_spacing = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SqlError, SqlResult};

/// How a query is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Fail on nodes and operators without an SQL rule.
    pub strict: bool,
    /// Refuse to render a statement without a WHERE clause.
    pub require_filter: bool,
    /// Join every fragment with a space, even empty ones.
    pub legacy_spacing: bool,
}

impl RenderOptions {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_require_filter(mut self, require_filter: bool) -> Self {
        self.require_filter = require_filter;
        self
    }

    pub fn with_legacy_spacing(mut self, legacy_spacing: bool) -> Self {
        self.legacy_spacing = legacy_spacing;
        self
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
}

impl Config {
    /// `<config dir>/lambda-sql/config.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lambda-sql").join("config.toml"))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> SqlResult<Self> {
        toml::from_str(text).map_err(|e| SqlError::Config(e.to_string()))
    }

    /// Load configuration from a file that must exist.
    pub fn load(path: &Path) -> SqlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given, else the default path if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> SqlResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let opts = RenderOptions::default();
        assert!(!opts.strict && !opts.require_filter && !opts.legacy_spacing);
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml("[render]\nstrict = true\n").unwrap();
        assert!(config.render.strict);
        assert!(!config.render.legacy_spacing);
    }

    #[test]
    fn test_empty_toml() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = Config::from_toml("[render]\nstrict = \"yes\"\n").unwrap_err();
        assert!(matches!(err, SqlError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = Config::discover(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, SqlError::Io(_)));
    }

    #[test]
    fn test_chained_setters() {
        let opts = RenderOptions::default()
            .with_strict(true)
            .with_legacy_spacing(true);
        assert!(opts.strict && opts.legacy_spacing && !opts.require_filter);
    }
}
