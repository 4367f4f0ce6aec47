//! Endpoint traversal and aggregation.
//!
//! [`endpoint_iter`] walks the tree lazily; [`generate_endpoints`] drives it,
//! resolves every operation through a [`Target`] and buckets the resulting
//! descriptors into named groups.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{GenerateError, Result};
use crate::resolve::resolve_schema_type;
use crate::spec::{ApiTree, Operation, PathItem, Response, SchemaNode};
use crate::target::{RequestParams, Target, collect_params};

/// Path item keys treated as operations.
pub const VALID_HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// One operation as produced by [`endpoint_iter`].
#[derive(Debug, Clone)]
pub struct EndpointIteration<'a> {
    /// Route template, e.g. `/pets/{petId}`.
    pub route_path: &'a str,
    /// The whole path item the operation was found in.
    pub path_item: &'a PathItem,
    /// Method key as written in the document.
    pub http_method: &'a str,
    /// The operation, parsed from the method entry.
    pub operation: Operation,
}

/// Walk every operation: paths in document order, then methods in document
/// order. Keys outside [`VALID_HTTP_METHODS`] are skipped. A method entry
/// that is not a valid operation yields an error.
pub fn endpoint_iter(tree: &ApiTree) -> impl Iterator<Item = Result<EndpointIteration<'_>>> {
    tree.paths
        .iter()
        .flatten()
        .flat_map(|(route_path, path_item)| {
            path_item.entries.keys().filter_map(move |http_method| {
                if !VALID_HTTP_METHODS.contains(&http_method.as_str()) {
                    if VALID_HTTP_METHODS.contains(&http_method.to_lowercase().as_str()) {
                        warn!(
                            route = %route_path,
                            method = %http_method,
                            "Skipping method key, methods are matched case-sensitively."
                        );
                    }
                    return None;
                }

                let operation = path_item.operation(route_path, http_method)?;
                Some(operation.map(|operation| EndpointIteration {
                    route_path,
                    path_item,
                    http_method,
                    operation,
                }))
            })
        })
}

/// Everything a renderer needs to emit one endpoint function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// Target-cased operation id.
    pub operation_id: String,
    /// Return type expression.
    pub return_type: String,
    /// HTTP method as the target spells it.
    pub http_method: String,
    /// URL template as the target spells it.
    pub url: String,
    /// Typed parameter list.
    pub operation_params: Vec<String>,
    /// Typed parameter list with defaults (the plain list for targets without
    /// default arguments).
    pub operation_params_defaults: Vec<String>,
    /// Positional call arguments.
    pub operation_args: Vec<String>,
    /// Keyword call arguments.
    pub operation_kwargs: Vec<String>,
    /// Raw parameter metadata.
    pub request_params: RequestParams,
}

/// A named bucket of endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Class-cased first tag, or `""` when grouping is off.
    pub name: String,
    /// Endpoints in traversal order.
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Resolve every operation of `tree` and bucket the results.
///
/// Groups appear in first-seen order. An absent `paths` map yields no groups.
pub fn generate_endpoints(
    tree: &ApiTree,
    target: &dyn Target,
    config: &Config,
) -> Result<Vec<Group>> {
    let mut groups: IndexMap<String, Group> = IndexMap::new();

    for iteration in endpoint_iter(tree) {
        let EndpointIteration {
            route_path,
            http_method,
            operation,
            ..
        } = iteration?;

        let tags = operation.tags.as_deref();
        if !config.includes(tags) {
            debug!(route = %route_path, method = %http_method, "Excluded by tag filter.");
            continue;
        }

        let group = match tags.and_then(<[String]>::first) {
            Some(tag) if config.use_groups => target.cls(tag),
            _ => String::new(),
        };

        let Some(responses) = &operation.responses else {
            return Err(GenerateError::MissingResponses {
                operation: operation.to_diagnostic(),
            });
        };
        let response_schema =
            find_response_schema(responses).map_err(|reason| GenerateError::InvalidResponse {
                operation: operation.to_diagnostic(),
                reason,
            })?;

        let Some(identity) = operation.identity() else {
            return Err(GenerateError::MissingIdentity {
                operation: operation.to_diagnostic(),
            });
        };
        let operation_id = target.operation_id(identity);
        // From the identity, so keyword escapes never leak into type names
        let class_name = target.cls(identity);
        let body_name = format!("{class_name}Body");
        let response_name = format!("{class_name}Response");

        let schema_type = resolve_schema_type(target, response_schema.as_ref(), &response_name)?;
        let return_type = target.return_type(&schema_type);

        let params = collect_params(target, &operation, &body_name)?;
        let operation_params = target.operation_params(&params);
        let operation_params_defaults = target
            .operation_params_defaults(&params)
            .unwrap_or_else(|| operation_params.clone());

        let descriptor = EndpointDescriptor {
            http_method: target.http_method(http_method),
            url: target.path_url(route_path),
            operation_args: target.operation_args(&params),
            operation_kwargs: target.operation_kwargs(&params),
            request_params: target.request_params(&params),
            operation_params,
            operation_params_defaults,
            operation_id,
            return_type,
        };

        debug!(
            group = %group,
            operation_id = %descriptor.operation_id,
            return_type = %descriptor.return_type,
            "Resolved endpoint."
        );

        groups
            .entry(group)
            .or_insert_with_key(|name| Group {
                name: name.clone(),
                endpoints: Vec::new(),
            })
            .endpoints
            .push(descriptor);
    }

    debug!(
        target_name = target.name(),
        groups = groups.len(),
        "Generated endpoints."
    );
    Ok(groups.into_values().collect())
}

/// Locate the success schema: the first 2xx response (map order) with a media
/// type that carries a schema. `Ok(None)` means "no content".
fn find_response_schema(responses: &Value) -> Result<Option<SchemaNode>, String> {
    let Value::Object(responses) = responses else {
        return Err("responses is not a map".to_string());
    };

    for (status, response) in responses {
        let Ok(code) = status.parse::<u16>() else {
            continue;
        };
        if !(200..=299).contains(&code) {
            continue;
        }

        let response: Response = serde_json::from_value(response.clone())
            .map_err(|e| format!("response {status}: {e}"))?;
        let schema = response
            .content
            .into_iter()
            .flat_map(IndexMap::into_values)
            .find_map(|media| media.schema);
        if schema.is_some() {
            return Ok(schema);
        }
    }

    Ok(None)
}
