use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("unknown user template `{name}` (expected one of: controller, service, routes)")]
    UnknownTemplate { name: String },
    #[error("failed to read user template `{name}` from {path:?}")]
    ReadTemplate {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template `{name}` does not parse")]
    TemplateSyntax {
        name: String,
        #[source]
        source: minijinja::Error,
    },
    #[error("failed to render template `{name}`")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
    #[error("failed to render scaffold `{name}`")]
    Scaffold {
        name: String,
        #[source]
        source: askama::Error,
    },
    #[error("tags `{first}` and `{second}` both map to `{stem}`")]
    TagCollision {
        stem: String,
        first: String,
        second: String,
    },
    #[error("failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
