use super::error::GenerateError;
use super::project::write_artifact;
use crate::config::DEFAULT_CONFIG_FILE;
use askama::Template;
use std::path::{Path, PathBuf};

/// File name of the starter OpenAPI document written by `init`.
pub const OPENAPI_SCAFFOLD_FILE: &str = "openapi.yaml";

/// Default `.rog.yaml` written by `init`.
#[derive(Template)]
#[template(path = "rog.yaml.txt", escape = "none")]
pub struct ConfigYamlTemplate;

/// Starter OpenAPI document written by `init`.
#[derive(Template)]
#[template(path = "openapi.yaml.txt", escape = "none")]
pub struct OpenApiYamlTemplate;

fn render_scaffold(name: &str, template: &impl Template) -> Result<String, GenerateError> {
    template.render().map_err(|source| GenerateError::Scaffold {
        name: name.to_string(),
        source,
    })
}

/// Write the default configuration and a starter OpenAPI document into `dir`.
///
/// Existing files are overwritten. Returns the written paths.
pub fn initialize(dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let scaffolds = [
        (DEFAULT_CONFIG_FILE, render_scaffold(DEFAULT_CONFIG_FILE, &ConfigYamlTemplate)?),
        (OPENAPI_SCAFFOLD_FILE, render_scaffold(OPENAPI_SCAFFOLD_FILE, &OpenApiYamlTemplate)?),
    ];

    let mut written = Vec::with_capacity(scaffolds.len());
    for (name, contents) in scaffolds {
        let path = dir.join(name);
        write_artifact(&path, &contents)?;
        written.push(path);
    }
    Ok(written)
}
