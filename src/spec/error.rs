use super::schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the input document.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read OpenAPI document {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse OpenAPI document {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("missing operationId for path: {path}, method: {method}")]
    MissingOperationId { path: String, method: String },
    #[error("operation {operation_id} ({method} {path}) declares no tags")]
    MissingTag {
        path: String,
        method: String,
        operation_id: String,
    },
    #[error("parameter reference `{reference}` for {method} {path} does not resolve")]
    UnresolvedParameter {
        path: String,
        method: String,
        reference: String,
    },
    #[error("parameter `{name}` for {method} {path} declares no schema")]
    ParameterWithoutSchema {
        path: String,
        method: String,
        name: String,
    },
    #[error("request body reference `{reference}` for {method} {path} does not resolve")]
    UnresolvedRequestBody {
        path: String,
        method: String,
        reference: String,
    },
    #[error("cannot read component schemas")]
    Components(#[from] SchemaError),
    #[error("cannot describe {subject} schema for {method} {path}")]
    Schema {
        path: String,
        method: String,
        subject: String,
        #[source]
        source: SchemaError,
    },
}

/// Why an operation carries no request body.
///
/// Not a failure: callers decide whether a bodiless operation is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoBody {
    #[error("no request body declared")]
    Absent,
    #[error("no JSON or form-encoded request body (found: {})", .content_types.join(", "))]
    UnsupportedContent { content_types: Vec<String> },
    #[error("request body content `{content_type}` declares no schema")]
    Untyped { content_type: String },
}

/// Outcome of [`describe_request_body`](super::describe_request_body) when no
/// body definition is produced.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error(transparent)]
    NoBody(#[from] NoBody),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
