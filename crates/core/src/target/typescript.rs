//! TypeScript (and plain ECMAScript) target.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::{OperationParam, Target};
use crate::config::Config;
use crate::error::Result;
use crate::types::TypeTable;
use crate::utils::{
    ensure_leading_alpha, escape_reserved, map_path_placeholders, to_camel_case, to_pascal_case,
};

const NAME: &str = "typescript";

static RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this",
        "throw", "true", "try", "typeof", "var", "void", "while", "with", "let", "static",
        "yield", "await", "implements", "interface", "package", "private", "protected",
        "public",
    ]
    .into_iter()
    .collect()
});

/// TypeScript client target.
#[derive(Debug, Clone)]
pub struct TypeScriptTarget {
    config: Config,
    types: TypeTable,
}

impl TypeScriptTarget {
    /// Build the target with its embedded type table.
    pub fn new(config: Config) -> Result<Self> {
        let types = TypeTable::from_yaml_str(NAME, include_str!("../../types/typescript.yaml"))?;
        Ok(Self { config, types })
    }
}

impl Target for TypeScriptTarget {
    fn name(&self) -> &'static str {
        NAME
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn types(&self) -> &TypeTable {
        &self.types
    }

    fn cls(&self, name: &str) -> String {
        ensure_leading_alpha(to_pascal_case(name))
    }

    fn enum_name(&self, name: &str) -> String {
        self.cls(name)
    }

    fn interface(&self, name: &str) -> Option<String> {
        Some(self.cls(name))
    }

    fn variable(&self, name: &str) -> String {
        escape_reserved(ensure_leading_alpha(to_camel_case(name)), &RESERVED, |s| {
            format!("_{s}")
        })
    }

    fn operation_id(&self, identity: &str) -> String {
        self.variable(identity)
    }

    fn optional(&self, ty: &str) -> Option<String> {
        Some(format!("{ty} | null"))
    }

    fn path_url(&self, route: &str) -> String {
        map_path_placeholders(route, |p| format!("${{{}}}", self.variable(p)))
    }

    fn return_type(&self, ty: &str) -> String {
        format!("Promise<{ty}>")
    }

    fn operation_params_defaults(&self, params: &[OperationParam]) -> Option<Vec<String>> {
        Some(
            params
                .iter()
                .map(|p| match &p.default {
                    Some(_) => format!("{}: {} = {}", p.ident, p.ty, p.default_literal("null")),
                    None if p.required => format!("{}: {}", p.ident, p.ty),
                    None => format!("{}?: {}", p.ident, p.ty),
                })
                .collect(),
        )
    }

    fn operation_kwargs(&self, params: &[OperationParam]) -> Vec<String> {
        self.operation_args(params)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::spec::Operation;
    use crate::target::collect_params;

    fn target() -> TypeScriptTarget {
        TypeScriptTarget::new(Config::default()).unwrap()
    }

    #[test]
    fn test_naming() {
        let t = target();
        assert_eq!(t.cls("pet-owner"), "PetOwner");
        assert_eq!(t.interface("shape").as_deref(), Some("Shape"));
        assert_eq!(t.variable("delete"), "_delete");
        assert_eq!(t.variable("Pet ID"), "petId");
        assert_eq!(t.operation_id("Find pets by status"), "findPetsByStatus");
    }

    #[test]
    fn test_extraction() {
        let t = target();
        assert_eq!(t.path_url("/pets/{pet_id}"), "/pets/${petId}");
        assert_eq!(t.return_type("Pet[]"), "Promise<Pet[]>");
        assert_eq!(t.optional("string").as_deref(), Some("string | null"));
        assert_eq!(t.http_method("patch"), "PATCH");
    }

    #[test]
    fn test_parameter_views() {
        let t = target();
        let op: Operation = serde_json::from_str(
            r#"{ "operationId": "search", "parameters": [
                { "name": "q", "in": "query", "required": true, "schema": { "type": "string" } },
                { "name": "page", "in": "query", "schema": { "type": "integer", "default": 1 } },
                { "name": "tags", "in": "query", "schema": { "type": "array", "items": { "type": "string" } } }
            ] }"#,
        )
        .unwrap();
        let params = collect_params(&t, &op, "SearchBody").unwrap();

        assert_eq!(
            t.operation_params_defaults(&params).unwrap(),
            vec!["q: string", "page: number | null = 1", "tags?: string[] | null"]
        );
        assert_eq!(t.operation_kwargs(&params), vec!["q", "page", "tags"]);
    }
}
