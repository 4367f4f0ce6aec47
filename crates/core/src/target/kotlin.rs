//! Kotlin target.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::{OperationParam, Target};
use crate::config::Config;
use crate::error::Result;
use crate::types::TypeTable;
use crate::utils::{ensure_leading_alpha, escape_reserved, to_camel_case, to_pascal_case};

const NAME: &str = "kotlin";

// Hard keywords only; soft and modifier keywords are valid identifiers
static RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
        "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
        "true", "try", "typealias", "typeof", "val", "var", "when", "while",
    ]
    .into_iter()
    .collect()
});

/// Kotlin client target.
#[derive(Debug, Clone)]
pub struct KotlinTarget {
    config: Config,
    types: TypeTable,
}

impl KotlinTarget {
    /// Build the target with its embedded type table.
    pub fn new(config: Config) -> Result<Self> {
        let types = TypeTable::from_yaml_str(NAME, include_str!("../../types/kotlin.yaml"))?;
        Ok(Self { config, types })
    }
}

impl Target for KotlinTarget {
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
            format!("`{s}`")
        })
    }

    fn operation_id(&self, identity: &str) -> String {
        self.variable(identity)
    }

    fn optional(&self, ty: &str) -> Option<String> {
        if ty.ends_with('?') {
            return Some(ty.to_string());
        }
        Some(format!("{ty}?"))
    }

    fn operation_params_defaults(&self, params: &[OperationParam]) -> Option<Vec<String>> {
        Some(
            params
                .iter()
                .map(|p| {
                    if p.required && p.default.is_none() {
                        format!("{}: {}", p.ident, p.ty)
                    } else {
                        format!("{}: {} = {}", p.ident, p.ty, p.default_literal("null"))
                    }
                })
                .collect(),
        )
    }

    fn operation_kwargs(&self, params: &[OperationParam]) -> Vec<String> {
        params
            .iter()
            .map(|p| format!("{0} = {0}", p.ident))
            .collect()
    }
}
