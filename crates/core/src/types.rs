//! Per-target type tables.
//!
//! A type table maps `(primitive type, format)` to a type expression and holds
//! the composite templates for arrays (`{value}`) and maps (`{key}`,
//! `{value}`). Tables are YAML documents:
//!
//! ```yaml
//! "null": "()"
//! array: "Vec<{value}>"
//! map: "HashMap<{key}, {value}>"
//! string:
//!   "null": String
//!   date-time: "chrono::DateTime<chrono::Utc>"
//! ```
//!
//! The `null` format key is the entry used when a schema has no format. It must
//! be quoted, a bare `null` key is a YAML null rather than a string.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};

/// Format name used when a schema carries no format.
pub const NULL_FORMAT: &str = "null";

#[allow(clippy::literal_string_with_formatting_args)]
const KEY_PLACEHOLDER: &str = "{key}";
#[allow(clippy::literal_string_with_formatting_args)]
const VALUE_PLACEHOLDER: &str = "{value}";

/// Format → type expression for one primitive type.
pub type FormatMap = IndexMap<String, String>;

/// Type → formats, as used by both type tables and user overrides.
pub type TypeMap = IndexMap<String, FormatMap>;

/// One target's type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTable {
    /// The null/void type ("no content").
    pub null: String,
    /// Array template with a `{value}` placeholder.
    pub array: String,
    /// Map template with `{key}` and `{value}` placeholders.
    pub map: String,
    /// Primitive and well-known types.
    #[serde(flatten)]
    pub primitives: TypeMap,
}

impl TypeTable {
    /// Parse and validate a table for `target`.
    pub fn from_yaml_str(target: &str, yaml: &str) -> Result<Self> {
        let table: Self = serde_yaml::from_str(yaml).map_err(|e| GenerateError::InvalidTypeTable {
            target: target.to_string(),
            reason: e.to_string(),
        })?;
        table.validate(target)?;
        Ok(table)
    }

    fn validate(&self, target: &str) -> Result<()> {
        let invalid = |reason: String| GenerateError::InvalidTypeTable {
            target: target.to_string(),
            reason,
        };

        if !self.array.contains(VALUE_PLACEHOLDER) {
            return Err(invalid(format!(
                "array template '{}' has no {{value}} placeholder",
                self.array
            )));
        }
        if !self.map.contains(KEY_PLACEHOLDER) || !self.map.contains(VALUE_PLACEHOLDER) {
            return Err(invalid(format!(
                "map template '{}' needs {{key}} and {{value}} placeholders",
                self.map
            )));
        }
        if self.string_type().is_none() {
            return Err(invalid("no `string.null` entry for map keys".to_string()));
        }
        Ok(())
    }

    /// Format map for a primitive type.
    pub fn formats(&self, ty: &str) -> Option<&FormatMap> {
        self.primitives.get(ty)
    }

    /// The plain string type, used as the key type of every map.
    pub fn string_type(&self) -> Option<&str> {
        self.formats("string")
            .and_then(|f| f.get(NULL_FORMAT))
            .map(String::as_str)
    }

    /// Substitute `value` into the array template.
    pub fn array_of(&self, value: &str) -> String {
        self.array.replace(VALUE_PLACEHOLDER, value)
    }

    /// Substitute `key` and `value` into the map template.
    pub fn map_of(&self, key: &str, value: &str) -> String {
        self.map
            .replace(KEY_PLACEHOLDER, key)
            .replace(VALUE_PLACEHOLDER, value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
"null": "()"
array: "Vec<{value}>"
map: "HashMap<{key}, {value}>"
string:
  "null": String
  uuid: "uuid::Uuid"
integer:
  "null": i64
  int32: i32
"#;

    #[test]
    fn test_parse_table() {
        let table = TypeTable::from_yaml_str("rust", TABLE).unwrap();
        assert_eq!(table.null, "()");
        assert_eq!(table.string_type(), Some("String"));
        assert_eq!(table.formats("integer").unwrap()["int32"], "i32");
        assert_eq!(table.array_of("i64"), "Vec<i64>");
        assert_eq!(table.map_of("String", "bool"), "HashMap<String, bool>");
        assert!(table.formats("boolean").is_none());
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let yaml = TABLE.replace("Vec<{value}>", "Vec");
        let err = TypeTable::from_yaml_str("rust", &yaml).unwrap_err();
        assert!(err.to_string().contains("array template"), "{err}");
    }

    #[test]
    fn test_rejects_table_without_string() {
        let yaml = "\"null\": Unit\narray: \"List<{value}>\"\nmap: \"Map<{key}, {value}>\"\n";
        let err = TypeTable::from_yaml_str("kotlin", yaml).unwrap_err();
        assert!(err.to_string().contains("string.null"), "{err}");
    }
}
