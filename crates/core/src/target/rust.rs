//! Rust target: snake_case identifiers, `Option<T>`, no default arguments.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::{OperationParam, Target};
use crate::config::Config;
use crate::error::Result;
use crate::types::TypeTable;
use crate::utils::{
    ensure_leading_alpha, escape_reserved, map_path_placeholders, to_pascal_case, to_snake_case,
};

const NAME: &str = "rust";

static RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
    ]
    .into_iter()
    .collect()
});

// `self`, `super` and `crate` cannot be raw identifiers
fn escape(ident: &str) -> String {
    match ident {
        "self" | "super" | "crate" => format!("{ident}_"),
        _ => format!("r#{ident}"),
    }
}

/// Rust client target.
#[derive(Debug, Clone)]
pub struct RustTarget {
    config: Config,
    types: TypeTable,
}

impl RustTarget {
    /// Build the target with its embedded type table.
    pub fn new(config: Config) -> Result<Self> {
        let types = TypeTable::from_yaml_str(NAME, include_str!("../../types/rust.yaml"))?;
        Ok(Self { config, types })
    }
}

impl Target for RustTarget {
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
        escape_reserved(ensure_leading_alpha(to_snake_case(name)), &RESERVED, escape)
    }

    fn operation_id(&self, identity: &str) -> String {
        self.variable(identity)
    }

    fn optional(&self, ty: &str) -> Option<String> {
        Some(format!("Option<{ty}>"))
    }

    fn path_url(&self, route: &str) -> String {
        map_path_placeholders(route, |p| {
            format!("{{{}}}", ensure_leading_alpha(to_snake_case(p)))
        })
    }

    fn operation_kwargs(&self, params: &[OperationParam]) -> Vec<String> {
        self.operation_args(params)
    }
}
