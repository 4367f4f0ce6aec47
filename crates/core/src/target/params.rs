//! Parameter derivation shared by every target.
//!
//! Targets only differ in how they print a parameter; which parameters an
//! operation has, their types and their order are decided here.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::Target;
use crate::error::{GenerateError, Result};
use crate::resolve::resolve;
use crate::spec::{Operation, SchemaNode};

/// Where a parameter travels in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// URL path placeholder.
    Path,
    /// Request body.
    Body,
    /// Query string.
    Query,
    /// HTTP header.
    Header,
}

impl ParamLocation {
    fn parse(location: &str) -> Option<Self> {
        match location {
            "path" => Some(Self::Path),
            "header" => Some(Self::Header),
            // Cookies are not part of the generated signature
            "cookie" => None,
            // `query`, and anything unrecognized
            _ => Some(Self::Query),
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Path => 0,
            Self::Body => 1,
            Self::Query => 2,
            Self::Header => 3,
        }
    }
}

/// One resolved parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationParam {
    /// Name as written in the document (`body` for the request body).
    pub name: String,
    /// Target identifier.
    pub ident: String,
    /// Resolved type, already optional-wrapped when not required.
    pub ty: String,
    /// Where the parameter travels.
    pub location: ParamLocation,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Schema default, if any.
    pub default: Option<Value>,
    /// Media type, for the request body.
    pub content_type: Option<String>,
}

impl OperationParam {
    /// Render the schema default as a literal, or `null_literal` when there is
    /// no scalar default.
    pub fn default_literal(&self, null_literal: &str) -> String {
        match &self.default {
            Some(Value::String(s)) => {
                serde_json::to_string(s).unwrap_or_else(|_| null_literal.to_string())
            }
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => {
                null_literal.to_string()
            }
        }
    }
}

/// Collect, resolve and order the parameters of an operation.
///
/// Order: required before optional; within each, path, body, query, header;
/// document order otherwise.
pub fn collect_params(
    target: &dyn Target,
    operation: &Operation,
    body_name: &str,
) -> Result<Vec<OperationParam>> {
    check_duplicate_params(operation)?;

    let string_schema = SchemaNode {
        schema_type: Some("string".to_string()),
        ..SchemaNode::default()
    };

    let mut params = Vec::new();
    for param in &operation.parameters {
        let Some(location) = ParamLocation::parse(&param.location) else {
            continue;
        };
        let required = param.required || location == ParamLocation::Path;
        let schema = param.schema.as_ref().unwrap_or(&string_schema);
        let type_name = target.cls(&param.name);
        let ty = resolve(
            target,
            Some(schema),
            Some(&type_name),
            Some(schema),
            schema.is_constant(),
            !required,
        )?;

        params.push(OperationParam {
            name: param.name.clone(),
            ident: target.variable(&param.name),
            ty,
            location,
            required,
            default: schema.default.clone(),
            content_type: None,
        });
    }

    if let Some((media_type, schema)) = operation.body_schema() {
        let required = operation
            .request_body
            .as_ref()
            .is_some_and(|body| body.required);
        let ty = resolve(
            target,
            Some(schema),
            Some(body_name),
            Some(schema),
            false,
            !required,
        )?;

        params.push(OperationParam {
            name: "body".to_string(),
            ident: target.variable("body"),
            ty,
            location: ParamLocation::Body,
            required,
            default: None,
            content_type: Some(media_type.to_string()),
        });
    }

    // Stable: document order survives inside each bucket
    params.sort_by_key(|p| (!p.required, p.location.rank()));
    Ok(params)
}

/// Check for duplicate parameter names within one location
fn check_duplicate_params(operation: &Operation) -> Result<()> {
    let mut seen = HashSet::new();
    for param in &operation.parameters {
        if param.location == "cookie" {
            continue;
        }
        if !seen.insert((param.location.as_str(), param.name.as_str())) {
            return Err(GenerateError::DuplicateParameter {
                name: param.name.clone(),
                location: param.location.clone(),
                operation: operation.to_diagnostic(),
            });
        }
    }
    Ok(())
}
