//! Endpoint and type resolution for API client generators.
//!
//! Takes an already-parsed API schema tree and, for a chosen output language
//! (a [`Target`]), produces:
//! - the type expression of every schema node ([`resolve`])
//! - one [`EndpointDescriptor`] per operation, bucketed into [`Group`]s
//!   ([`generate_endpoints`])
//! - resolved model fields for object schemas ([`model_fields`])
//!
//! Rendering the descriptors into source files is left to the caller.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod resolve;
pub mod spec;
pub mod target;
pub mod types;
mod utils;

pub use config::Config;
pub use endpoints::{EndpointDescriptor, EndpointIteration, Group, endpoint_iter, generate_endpoints};
pub use error::{GenerateError, Result};
pub use model::{ModelField, model_fields};
pub use resolve::{resolve, resolve_schema_type, resolve_type};
pub use spec::ApiTree;
pub use target::{KNOWN_TARGETS, Target, resolve_target};
