//! Schema tree structs for serde deserialization.
//!
//! The tree is the already-parsed API description handed to the generator:
//! paths, operations and schema nodes. Upstream tooling annotates named models
//! with a `key` (and optionally a preferred `title`), so no `$ref` chasing is
//! needed beyond local component references. Every map preserves document
//! order because traversal order is observable in the output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GenerateError, Result};

/// Root of the schema tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiTree {
    /// Route path → path item. Absent means "no operations".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<IndexMap<String, PathItem>>,
}

/// All entries declared under one route path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Every key of the path object in document order (methods, `parameters`,
    /// `summary`, ...). Entries stay raw until traversal, which parses the
    /// allow-listed methods as operations.
    #[serde(flatten)]
    pub entries: IndexMap<String, Value>,
}

impl PathItem {
    /// Parse the entry under `method` as an operation. `None` when the key is
    /// absent; a value that is not a valid operation is an error.
    pub fn operation(&self, route: &str, method: &str) -> Option<Result<Operation>> {
        let entry = self.entries.get(method)?;
        Some(
            serde_json::from_value(entry.clone()).map_err(|e| GenerateError::InvalidOperation {
                route: route.to_string(),
                method: method.to_string(),
                operation: entry.to_string(),
                reason: e.to_string(),
            }),
        )
    }
}

/// An API operation (one HTTP method on one route).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Tags; the first one names the group when grouping is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Normative operation identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Fallback identity when `operationId` is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation-level parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Raw responses map. Kept untyped so that a malformed map surfaces as an
    /// "invalid response" error while the success response is located.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Value>,
    /// Everything else the document declares on the operation.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A parameter (path, query, header or cookie).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Name as written in the document.
    pub name: String,
    /// Location: `path`, `query`, `header` or `cookie`.
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}

/// A request body definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether the body must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Media type → payload description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// A response definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Media type → payload description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    /// Payload schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaNode>,
}

/// One node of the schema tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// The type of the schema (string, integer, object, array, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// Format hint (e.g., date-time, int64).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Stable model name assigned upstream to named models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Human title; names enums and, with `has_model_title`, models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Prefer `title` over `key` when naming the model.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_model_title: bool,

    /// Local reference to a component schema.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    /// Enum literal values, in order.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Union alternatives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaNode>>,

    /// Item schema for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    /// Object properties in document order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    /// Required property names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Open map value schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` opens the map with an unspecified value type; `false` closes it.
    Bool(bool),
    /// Value schema of the map.
    Schema(Box<SchemaNode>),
}

impl ApiTree {
    /// Parse a tree from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GenerateError::parse("schema tree", e))
    }

    /// Parse a tree from a YAML (or JSON) string.
    ///
    /// YAML allows non-string keys (`200:` for a status code), so the document
    /// goes through a YAML value first and is re-keyed as JSON.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| GenerateError::parse("schema tree", e))?;
        let json = serde_json::to_value(value).map_err(|e| GenerateError::parse("schema tree", e))?;
        serde_json::from_value(json).map_err(|e| GenerateError::parse("schema tree", e))
    }
}

impl Operation {
    /// The string the operation id is derived from: `operationId`, else `summary`.
    pub fn identity(&self) -> Option<&str> {
        self.operation_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.summary.as_deref().filter(|s| !s.is_empty()))
    }

    /// First media type of the request body that carries a schema.
    pub fn body_schema(&self) -> Option<(&str, &SchemaNode)> {
        self.request_body
            .as_ref()?
            .content
            .as_ref()?
            .iter()
            .find_map(|(media, m)| m.schema.as_ref().map(|s| (media.as_str(), s)))
    }

    /// Serialized form used in diagnostics.
    pub fn to_diagnostic(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

impl SchemaNode {
    /// The model key, from `key` or from a local `$ref`.
    pub fn model_key(&self) -> Option<&str> {
        self.key
            .as_deref()
            .or_else(|| self.ref_path.as_deref().map(ref_to_type_name))
    }

    /// Single-valued enums are constants.
    pub fn is_constant(&self) -> bool {
        self.enum_values.as_ref().is_some_and(|v| v.len() == 1)
    }

    /// Serialized form used in diagnostics.
    pub fn to_diagnostic(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Extract type name from $ref path
fn ref_to_type_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}
