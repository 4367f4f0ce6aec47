//! Swift target.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::{OperationParam, Target};
use crate::config::Config;
use crate::error::Result;
use crate::types::TypeTable;
use crate::utils::{
    ensure_leading_alpha, escape_reserved, map_path_placeholders, to_camel_case, to_pascal_case,
};

const NAME: &str = "swift";

static RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func",
        "import", "init", "inout", "internal", "let", "open", "operator", "private", "protocol",
        "public", "rethrows", "static", "struct", "subscript", "typealias", "var", "break",
        "case", "continue", "default", "defer", "do", "else", "fallthrough", "for", "guard",
        "if", "in", "repeat", "return", "switch", "where", "while", "as", "Any", "catch",
        "false", "is", "nil", "super", "self", "Self", "throw", "throws", "true", "try",
    ]
    .into_iter()
    .collect()
});

/// Swift client target.
#[derive(Debug, Clone)]
pub struct SwiftTarget {
    config: Config,
    types: TypeTable,
}

impl SwiftTarget {
    /// Build the target with its embedded type table.
    pub fn new(config: Config) -> Result<Self> {
        let types = TypeTable::from_yaml_str(NAME, include_str!("../../types/swift.yaml"))?;
        Ok(Self { config, types })
    }
}

impl Target for SwiftTarget {
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

    fn path_url(&self, route: &str) -> String {
        // String interpolation, so no backtick escaping here
        map_path_placeholders(route, |p| {
            format!("\\({})", ensure_leading_alpha(to_camel_case(p)))
        })
    }

    fn operation_params_defaults(&self, params: &[OperationParam]) -> Option<Vec<String>> {
        Some(
            params
                .iter()
                .map(|p| {
                    if p.required && p.default.is_none() {
                        format!("{}: {}", p.ident, p.ty)
                    } else {
                        format!("{}: {} = {}", p.ident, p.ty, p.default_literal("nil"))
                    }
                })
                .collect(),
        )
    }

    fn operation_kwargs(&self, params: &[OperationParam]) -> Vec<String> {
        params
            .iter()
            .map(|p| format!("{0}: {0}", p.ident))
            .collect()
    }
}
