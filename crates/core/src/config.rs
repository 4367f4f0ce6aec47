//! Generation config.
//!
//! Loaded from YAML or JSON (YAML is a superset), with camelCase keys:
//!
//! ```yaml
//! useGroups: true
//! include: [pets, store]
//! renames:
//!   Pet: Animal
//! types:
//!   string:
//!     "null": MyString
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::types::TypeMap;

/// User configuration for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Group endpoints by their first tag.
    pub use_groups: bool,
    /// Only keep operations carrying at least one of these tags.
    pub include: Option<Vec<String>>,
    /// Resolved type expression → replacement.
    pub renames: IndexMap<String, String>,
    /// Type overrides consulted before the target's type table.
    pub types: TypeMap,
}

impl Config {
    /// Parse a config from YAML or JSON text. Empty text yields the default config.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| GenerateError::parse("config", e))
    }

    /// Read and parse a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| GenerateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Whether an operation with these tags passes the include-list.
    ///
    /// Without an include-list everything passes; with one, untagged
    /// operations never pass.
    pub fn includes(&self, tags: Option<&[String]>) -> bool {
        let Some(include) = &self.include else {
            return true;
        };
        tags.is_some_and(|tags| tags.iter().any(|tag| include.contains(tag)))
    }

    /// The configured rename for a resolved type expression.
    pub fn rename(&self, candidate: &str) -> Option<&str> {
        self.renames.get(candidate).map(String::as_str)
    }

    /// User override for `(ty, format)`.
    pub fn override_for(&self, ty: &str, format: &str) -> Option<&str> {
        self.types
            .get(ty)
            .and_then(|formats| formats.get(format))
            .map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_yaml_config() {
        let config = Config::from_yaml_str(
            r#"
useGroups: true
include: [pets]
renames:
  Pet: Animal
types:
  string:
    "null": MyString
    uuid: Uuid
"#,
        )
        .unwrap();

        assert!(config.use_groups);
        assert_eq!(config.include, Some(vec!["pets".to_string()]));
        assert_eq!(config.rename("Pet"), Some("Animal"));
        assert_eq!(config.rename("Owner"), None);
        assert_eq!(config.override_for("string", "null"), Some("MyString"));
        assert_eq!(config.override_for("string", "uuid"), Some("Uuid"));
        assert_eq!(config.override_for("integer", "null"), None);
    }

    #[test]
    fn test_parse_json_config() {
        let config =
            Config::from_yaml_str(r#"{ "useGroups": false, "renames": { "i64": "Long" } }"#)
                .unwrap();
        assert!(!config.use_groups);
        assert!(config.include.is_none());
        assert_eq!(config.rename("i64"), Some("Long"));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_yaml_str("useGroups: [1, 2]").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config"), "{err}");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "include: [admin]").unwrap();
        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.include, Some(vec!["admin".to_string()]));

        let missing = file.path().with_extension("missing");
        let err = Config::from_path(&missing).unwrap_err();
        assert!(matches!(err, GenerateError::Io { .. }));
    }

    #[test]
    fn test_includes() {
        let tags = vec!["user".to_string()];
        let everything = Config::default();
        assert!(everything.includes(None));
        assert!(everything.includes(Some(&tags)));

        let admin_only = Config {
            include: Some(vec!["admin".to_string()]),
            ..Config::default()
        };
        assert!(!admin_only.includes(Some(&tags)));
        assert!(!admin_only.includes(None));
        assert!(admin_only.includes(Some(&["user".to_string(), "admin".to_string()])));
    }
}
