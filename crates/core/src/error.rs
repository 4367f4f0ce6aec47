//! Errors raised while resolving types and aggregating endpoints.
//!
//! Every variant is fatal to the current generation pass. Messages embed the
//! serialized operation or schema that caused them.

use thiserror::Error;

/// Error type for the whole generation pass.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The operation declares no `responses` map.
    #[error("No responses field found for {operation}")]
    MissingResponses {
        /// Serialized operation.
        operation: String,
    },

    /// The `responses` map could not be searched for a success response.
    #[error("Invalid response found for {operation}: {reason}")]
    InvalidResponse {
        /// Serialized operation.
        operation: String,
        /// What was wrong with the map.
        reason: String,
    },

    /// An allow-listed method entry is not a valid operation object.
    #[error("Invalid operation {method} {route}: {reason} in {operation}")]
    InvalidOperation {
        /// Route path.
        route: String,
        /// Method key.
        method: String,
        /// Raw operation value.
        operation: String,
        /// Deserializer message.
        reason: String,
    },

    /// Neither `operationId` nor `summary` is present.
    #[error("No operationId or summary found for route: {operation}")]
    MissingIdentity {
        /// Serialized operation.
        operation: String,
    },

    /// An enum has neither a title nor a caller-supplied name.
    #[error("Unhandled enum naming for {schema}")]
    UnnamedEnum {
        /// Serialized enum node.
        schema: String,
    },

    /// A resolver rule produced no type expression.
    #[error("Got null for schema {parent} for prop {prop}")]
    NullCandidate {
        /// Key of the enclosing schema, if any.
        parent: String,
        /// Serialized node being resolved.
        prop: String,
    },

    /// The `(type, format)` pair is in neither the overrides nor the type table.
    #[error("Could not handle input: {ty} {format} for {prop}, {schema}")]
    UnhandledType {
        /// Schema type.
        ty: String,
        /// Schema format, or `null`.
        format: String,
        /// Serialized node being resolved.
        prop: String,
        /// Serialized enclosing schema.
        schema: String,
    },

    /// Two parameters share a name within one location.
    #[error("Duplicate parameter name '{name}' in {location} parameters of {operation}")]
    DuplicateParameter {
        /// Parameter name.
        name: String,
        /// Parameter location.
        location: String,
        /// Serialized operation.
        operation: String,
    },

    /// A target's embedded type table is unusable.
    #[error("Invalid type table for target {target}: {reason}")]
    InvalidTypeTable {
        /// Target name.
        target: String,
        /// Parse failure.
        reason: String,
    },

    /// No target is registered under this name.
    #[error("Unknown target '{0}'")]
    UnknownTarget(String),

    /// A tree or config document failed to parse.
    #[error("Failed to parse {what}: {reason}")]
    Parse {
        /// What was being parsed.
        what: String,
        /// Parser message.
        reason: String,
    },

    /// A tree or config file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn parse(what: &str, reason: impl ToString) -> Self {
        Self::Parse {
            what: what.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
