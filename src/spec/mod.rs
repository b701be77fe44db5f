//! # Spec Module
//!
//! Turns an OpenAPI 3 document into the normalized operation model consumed by
//! the [`generator`](crate::generator).
//!
//! ```text
//! openapi.yaml → load_spec → OpenApiV3Spec → extract_operations → Vec<OperationDefinition>
//! ```
//!
//! - [`load_spec`] reads YAML or JSON and deserializes it with `oas3`.
//! - [`SchemaRegistry::describe`] recursively converts raw schema nodes into
//!   [`Schema`] values, following `$ref`s into `components.schemas`.
//! - [`classify_parameters`] and [`describe_request_body`] split an operation's
//!   inputs into query parameters, path parameters and a body.
//! - [`extract_operations`] walks the path table in a stable order and yields
//!   one [`OperationDefinition`] per (path, method) pair.

mod build;
mod error;
mod load;
mod schema;
mod types;

pub use build::*;
pub use error::*;
pub use load::*;
pub use schema::*;
pub use types::*;
