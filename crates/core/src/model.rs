//! Model field resolution for object schemas.

use serde::Serialize;

use crate::error::Result;
use crate::resolve::{is_optional_property, resolve};
use crate::spec::SchemaNode;
use crate::target::Target;

/// One resolved property of a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelField {
    /// Property name as written in the document.
    pub name: String,
    /// Target identifier for the field.
    pub ident: String,
    /// Resolved type, optional-wrapped when not required.
    #[serde(rename = "type")]
    pub ty: String,
    /// Absent from the schema's `required` list.
    pub optional: bool,
    /// Single-valued enum.
    pub constant: bool,
}

/// Resolve every property of `schema` in document order.
///
/// Inline nested shapes are named `<Parent><Property>` when the schema itself
/// is a named model, otherwise after the property alone.
pub fn model_fields(target: &dyn Target, schema: &SchemaNode) -> Result<Vec<ModelField>> {
    let parent = match schema.title.as_deref() {
        Some(title) if schema.has_model_title => Some(title),
        _ => schema.model_key(),
    }
    .map(|name| target.cls(name));

    let Some(properties) = &schema.properties else {
        return Ok(Vec::new());
    };

    properties
        .iter()
        .map(|(name, prop)| {
            let prop_class = target.cls(name);
            let type_name = match &parent {
                Some(parent) => format!("{parent}{prop_class}"),
                None => prop_class,
            };
            let optional = is_optional_property(schema, name);
            let constant = prop.is_constant();
            let ty = resolve(
                target,
                Some(schema),
                Some(&type_name),
                Some(prop),
                constant,
                optional,
            )?;

            Ok(ModelField {
                name: name.clone(),
                ident: target.variable(name),
                ty,
                optional,
                constant,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::target::{RustTarget, SwiftTarget};

    const PET: &str = r#"{
  "type": "object",
  "key": "Pet",
  "required": ["id", "name", "kind"],
  "properties": {
    "id": { "type": "integer", "format": "int64" },
    "name": { "type": "string" },
    "kind": { "type": "string", "enum": ["dog"] },
    "status": { "type": "string", "enum": ["available", "sold"] },
    "owner": { "type": "object", "properties": { "name": { "type": "string" } } },
    "tags": { "type": "array", "items": { "type": "string" } },
    "type": { "key": "PetType" }
  }
}"#;

    #[test]
    fn test_model_fields() {
        let target = RustTarget::new(Config::default()).unwrap();
        let schema: SchemaNode = serde_json::from_str(PET).unwrap();
        let fields = model_fields(&target, &schema).unwrap();

        let summary: Vec<_> = fields
            .iter()
            .map(|f| (f.ident.as_str(), f.ty.as_str(), f.optional, f.constant))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id", "i64", false, false),
                ("name", "String", false, false),
                ("kind", "PetKind", false, true),
                ("status", "Option<PetStatus>", true, false),
                ("owner", "Option<PetOwner>", true, false),
                ("tags", "Option<Vec<String>>", true, false),
                ("r#type", "Option<PetType>", true, false),
            ]
        );
    }

    #[test]
    fn test_unnamed_parent() {
        let target = SwiftTarget::new(Config::default()).unwrap();
        let schema: SchemaNode = serde_json::from_str(
            r#"{ "type": "object", "properties": { "sort_order": { "enum": ["asc", "desc"] } } }"#,
        )
        .unwrap();
        let fields = model_fields(&target, &schema).unwrap();
        assert_eq!(fields[0].ident, "sortOrder");
        assert_eq!(fields[0].ty, "SortOrder?");
    }

    #[test]
    fn test_schema_without_properties() {
        let target = RustTarget::new(Config::default()).unwrap();
        let schema: SchemaNode = serde_json::from_str(r#"{ "type": "string" }"#).unwrap();
        assert!(model_fields(&target, &schema).unwrap().is_empty());
    }
}
