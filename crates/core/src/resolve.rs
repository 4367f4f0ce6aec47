//! Type resolution: schema node → target type expression.
//!
//! Resolution happens in two steps. A node is first classified into exactly
//! one [`Shape`] by a fixed precedence, then the shape is turned into a
//! candidate expression. Renames and the optional wrapper are applied to the
//! candidate afterwards.
//!
//! Precedence (first match wins):
//! 1. map (`type: object` with `additionalProperties`)
//! 2. named model (`key`, `$ref`)
//! 3. enum
//! 4. union (`oneOf` with a name)
//! 5. array
//! 6. anonymous object (object without format, or no type, with a name)
//! 7. null (no type, no name)
//! 8. primitive (type table lookup)

use serde_json::Value;
use tracing::{trace, warn};

use crate::error::{GenerateError, Result};
use crate::spec::{AdditionalProperties, SchemaNode};
use crate::target::Target;
use crate::types::NULL_FORMAT;

/// Active shape of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape<'a> {
    /// Open map; `None` value schema for `additionalProperties: true`.
    Map(Option<&'a SchemaNode>),
    /// Named model.
    NamedModel(&'a str),
    /// Enum named by its title, else by the caller.
    Enum {
        title: Option<&'a str>,
        values: &'a [Value],
    },
    /// Named union.
    Union(&'a str),
    /// Array of items.
    Array(Option<&'a SchemaNode>),
    /// Inline object named by the caller.
    AnonymousObject(&'a str),
    /// No type at all.
    Null,
    /// Type table lookup.
    Primitive { ty: &'a str, format: &'a str },
}

fn classify<'a>(node: &'a SchemaNode, name: Option<&'a str>) -> Shape<'a> {
    let ty = node.schema_type.as_deref();

    if ty == Some("object") {
        match &node.additional_properties {
            Some(AdditionalProperties::Schema(value)) => {
                return Shape::Map(Some(value.as_ref()));
            }
            Some(AdditionalProperties::Bool(true)) => return Shape::Map(None),
            Some(AdditionalProperties::Bool(false)) | None => {}
        }
    }

    if let Some(key) = node.model_key() {
        let model = match node.title.as_deref() {
            Some(title) if node.has_model_title => title,
            _ => key,
        };
        return Shape::NamedModel(model);
    }

    if let Some(values) = &node.enum_values {
        return Shape::Enum {
            title: node.title.as_deref(),
            values,
        };
    }

    if node.one_of.is_some()
        && let Some(name) = name
    {
        return Shape::Union(name);
    }

    if ty == Some("array") {
        return Shape::Array(node.items.as_deref());
    }

    if let Some(name) = name
        && ((ty == Some("object") && node.format.is_none()) || ty.is_none())
    {
        return Shape::AnonymousObject(name);
    }

    match ty {
        None => Shape::Null,
        Some(ty) => Shape::Primitive {
            ty,
            format: node.format.as_deref().unwrap_or(NULL_FORMAT),
        },
    }
}

/// Resolve the type of a response (or any top-level) schema.
///
/// A missing schema means "no content" and resolves to the target's null type.
pub fn resolve_schema_type(
    target: &dyn Target,
    schema: Option<&SchemaNode>,
    name: &str,
) -> Result<String> {
    match schema {
        None => resolve(target, None, None, None, false, false),
        Some(schema) => resolve(target, Some(schema), Some(name), Some(schema), false, false),
    }
}

/// Resolve the type of property `name` of the object `schema`.
///
/// The property is optional unless `schema.required` names it, and constant
/// when it is a single-valued enum.
pub fn resolve_type(
    target: &dyn Target,
    schema: &SchemaNode,
    name: &str,
    prop: &SchemaNode,
) -> Result<String> {
    resolve(
        target,
        Some(schema),
        Some(name),
        Some(prop),
        prop.is_constant(),
        is_optional_property(schema, name),
    )
}

/// A property is optional unless the enclosing schema lists it as required.
/// Without a `required` list every property is optional.
pub fn is_optional_property(schema: &SchemaNode, name: &str) -> bool {
    schema
        .required
        .as_ref()
        .is_none_or(|required| !required.iter().any(|r| r == name))
}

/// Resolve `node` to a type expression.
///
/// `schema` is the enclosing schema (used for diagnostics), `name` the model
/// name to use for shapes that need one.
pub fn resolve(
    target: &dyn Target,
    schema: Option<&SchemaNode>,
    name: Option<&str>,
    node: Option<&SchemaNode>,
    is_constant: bool,
    is_optional: bool,
) -> Result<String> {
    let types = target.types();
    let Some(node) = node else {
        return Ok(types.null.clone());
    };

    let candidate = match classify(node, name) {
        Shape::Map(value) => {
            let value = resolve(target, schema, None, value, false, false)?;
            types
                .string_type()
                .map(|key| types.map_of(key, &value))
        }
        Shape::NamedModel(model) | Shape::AnonymousObject(model) => Some(target.cls(model)),
        Shape::Enum { title, values } => {
            check_enum_values(node, values);
            match title.or(name) {
                Some(enum_name) => Some(target.enum_name(enum_name)),
                None => {
                    return Err(GenerateError::UnnamedEnum {
                        schema: node.to_diagnostic(),
                    });
                }
            }
        }
        Shape::Union(union) => Some(target.interface(union).unwrap_or_else(|| target.cls(union))),
        Shape::Array(items) => {
            let value = resolve(target, schema, name, items, false, false)?;
            Some(types.array_of(&value))
        }
        Shape::Null => return Ok(types.null.clone()),
        Shape::Primitive { ty, format } => lookup_primitive(target, schema, node, ty, format)?,
    };

    let Some(mut candidate) = candidate else {
        return Err(GenerateError::NullCandidate {
            parent: schema
                .and_then(SchemaNode::model_key)
                .unwrap_or("null")
                .to_string(),
            prop: node.to_diagnostic(),
        });
    };

    if let Some(renamed) = target.config().rename(&candidate) {
        candidate = renamed.to_string();
    }

    if is_optional && let Some(wrapped) = target.optional(&candidate) {
        candidate = wrapped;
    }

    trace!(%candidate, is_constant, is_optional, "Resolved schema type.");
    Ok(candidate)
}

/// User overrides first, then the type table, then the type's `null` format.
fn lookup_primitive(
    target: &dyn Target,
    schema: Option<&SchemaNode>,
    node: &SchemaNode,
    ty: &str,
    format: &str,
) -> Result<Option<String>> {
    let config = target.config();
    let table_formats = target.types().formats(ty);

    if !config.types.contains_key(ty) && table_formats.is_none() {
        return Err(GenerateError::UnhandledType {
            ty: ty.to_string(),
            format: format.to_string(),
            prop: node.to_diagnostic(),
            schema: schema.map_or_else(|| "null".to_string(), SchemaNode::to_diagnostic),
        });
    }

    let from_table = |format: &str| {
        table_formats
            .and_then(|f| f.get(format))
            .map(String::as_str)
    };
    Ok(config
        .override_for(ty, format)
        .or_else(|| from_table(format))
        .or_else(|| from_table(NULL_FORMAT))
        .map(str::to_string))
}

/// Warn about enums the renderers will struggle with; naming is unaffected.
fn check_enum_values(node: &SchemaNode, values: &[Value]) {
    if values.is_empty() {
        warn!(schema = %node.to_diagnostic(), "Enum has no values.");
        return;
    }

    let kind = |v: &Value| match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) | Value::Object(_) => 4,
    };
    let first = kind(&values[0]);
    if values.iter().any(|v| kind(v) != first) {
        warn!(schema = %node.to_diagnostic(), "Enum mixes literal kinds.");
    }
}
