//! Output-language targets.
//!
//! A target is a capability bundle: naming functions, a type table, an
//! optional wrapper and the run's config. The resolver and the aggregator only
//! ever see `&dyn Target`; each language provides one implementation.

mod kotlin;
mod params;
mod rust;
mod swift;
mod typescript;

use serde::Serialize;

use crate::config::Config;
use crate::error::{GenerateError, Result};
use crate::types::TypeTable;

pub use kotlin::KotlinTarget;
pub use params::{OperationParam, ParamLocation, collect_params};
pub use rust::RustTarget;
pub use swift::SwiftTarget;
pub use typescript::TypeScriptTarget;

/// Canonical names of every built-in target.
pub const KNOWN_TARGETS: &[&str] = &["kotlin", "rust", "swift", "typescript"];

/// Raw request-parameter metadata handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    /// Path parameters.
    pub path: Vec<RequestParam>,
    /// Query parameters.
    pub query: Vec<RequestParam>,
    /// Header parameters.
    pub header: Vec<RequestParam>,
    /// Request body, if the operation has one.
    pub body: Option<RequestParam>,
}

/// One entry of [`RequestParams`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParam {
    /// Name as written in the document (`body` for the request body).
    pub name: String,
    /// Target identifier.
    pub ident: String,
    /// Resolved type expression.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the value must be supplied.
    pub required: bool,
    /// Media type, for the request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl RequestParams {
    /// Sort collected parameters into their locations.
    pub fn from_params(params: &[OperationParam]) -> Self {
        let mut request = Self::default();
        for param in params {
            let entry = RequestParam {
                name: param.name.clone(),
                ident: param.ident.clone(),
                ty: param.ty.clone(),
                required: param.required,
                content_type: param.content_type.clone(),
            };
            match param.location {
                ParamLocation::Path => request.path.push(entry),
                ParamLocation::Query => request.query.push(entry),
                ParamLocation::Header => request.header.push(entry),
                ParamLocation::Body => request.body = Some(entry),
            }
        }
        request
    }
}

/// The capability set every output language implements.
///
/// Parameter views render a list produced once per operation by
/// [`collect_params`].
pub trait Target {
    /// Canonical target name.
    fn name(&self) -> &'static str;

    /// The run's config.
    fn config(&self) -> &Config;

    /// The target's type table.
    fn types(&self) -> &TypeTable;

    /// Class (model) name.
    fn cls(&self, name: &str) -> String;

    /// Enum name.
    fn enum_name(&self, name: &str) -> String;

    /// Interface/union name; `None` when the language has no distinct
    /// interface concept and the class name should be used instead.
    fn interface(&self, _name: &str) -> Option<String> {
        None
    }

    /// Variable, parameter and field identifier.
    fn variable(&self, name: &str) -> String;

    /// Final operation id, derived from `operationId` or `summary`.
    fn operation_id(&self, identity: &str) -> String;

    /// Mark a type expression as optional; `None` when the language has no
    /// optional wrapper.
    fn optional(&self, _ty: &str) -> Option<String> {
        None
    }

    /// HTTP method as the renderer expects it.
    fn http_method(&self, method: &str) -> String {
        method.to_uppercase()
    }

    /// URL template as the renderer expects it.
    fn path_url(&self, route: &str) -> String {
        route.to_string()
    }

    /// Return type of the endpoint function.
    fn return_type(&self, ty: &str) -> String {
        ty.to_string()
    }

    /// Typed parameter list (`name: Type`).
    fn operation_params(&self, params: &[OperationParam]) -> Vec<String> {
        params
            .iter()
            .map(|p| format!("{}: {}", p.ident, p.ty))
            .collect()
    }

    /// Typed parameter list with default values; `None` when the language has
    /// no default arguments.
    fn operation_params_defaults(&self, _params: &[OperationParam]) -> Option<Vec<String>> {
        None
    }

    /// Positional call arguments.
    fn operation_args(&self, params: &[OperationParam]) -> Vec<String> {
        params.iter().map(|p| p.ident.clone()).collect()
    }

    /// Keyword call arguments.
    fn operation_kwargs(&self, params: &[OperationParam]) -> Vec<String>;

    /// Raw request-parameter metadata.
    fn request_params(&self, params: &[OperationParam]) -> RequestParams {
        RequestParams::from_params(params)
    }
}

/// Build a target by name (aliases accepted, case-insensitive).
pub fn resolve_target(name: &str, config: Config) -> Result<Box<dyn Target>> {
    let target: Box<dyn Target> = match name.to_lowercase().as_str() {
        "kotlin" | "kt" => Box::new(KotlinTarget::new(config)?),
        "swift" => Box::new(SwiftTarget::new(config)?),
        "rust" | "rs" => Box::new(RustTarget::new(config)?),
        "typescript" | "ts" | "ecmascript" | "javascript" | "js" | "es" => {
            Box::new(TypeScriptTarget::new(config)?)
        }
        _ => return Err(GenerateError::UnknownTarget(name.to_string())),
    };
    Ok(target)
}
