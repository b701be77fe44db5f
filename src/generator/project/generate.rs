use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::write::write_artifact;
use crate::config::Configuration;
use crate::generator::definitions::{assemble_definitions, ControllerData, RouteEntry};
use crate::generator::error::GenerateError;
use crate::generator::naming::resolve_output_directories;
use crate::generator::templates::{TemplateKind, TemplateSet};
use crate::spec::OperationDefinition;

/// File name of the combined routes artifact inside the routes directory.
pub const ROUTES_FILE: &str = "api_routes.rb";

/// What a run did to the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Artifacts rendered and written, in write order.
    pub written: Vec<PathBuf>,
    /// Existing service files left untouched.
    pub skipped: Vec<PathBuf>,
}

#[derive(Serialize)]
struct ControllerContext<'a> {
    package_name: &'a str,
    controller: &'a ControllerData,
}

#[derive(Serialize)]
struct RoutesContext<'a> {
    package_name: &'a str,
    routes: &'a [RouteEntry],
}

/// Render and write every artifact for `operations`.
///
/// Per tag (in tag order) the controller is written, then the service; the
/// routes file comes last. The first failure aborts the run.
pub fn generate_project(
    operations: &[OperationDefinition],
    config: &Configuration,
    templates: &TemplateSet,
) -> Result<GenerationSummary, GenerateError> {
    let options = &config.output_options;
    let assembly = assemble_definitions(operations, options)?;
    let dirs = resolve_output_directories(config);
    debug!(package_dir = %dirs.package_dir.display(), "Resolved output directories");

    let mut summary = GenerationSummary::default();

    for controller in &assembly.controllers {
        let ctx = ControllerContext {
            package_name: &config.package_name,
            controller,
        };

        let controller_path = dirs
            .controller_dir
            .join(format!("{}_controller.rb", controller.file_stem));
        let rendered = templates.render(TemplateKind::Controller, &ctx)?;
        write_artifact(&controller_path, &rendered)?;
        debug!(tag = %controller.tag, file = %controller_path.display(), "Wrote controller");
        summary.written.push(controller_path);

        let service_path = dirs
            .service_dir
            .join(format!("{}_service.rb", controller.file_stem));
        if service_path.exists() && !options.regenerate_service {
            info!(file = %service_path.display(), "Service exists, skipping");
            summary.skipped.push(service_path);
            continue;
        }
        let rendered = templates.render(TemplateKind::Service, &ctx)?;
        write_artifact(&service_path, &rendered)?;
        debug!(tag = %controller.tag, file = %service_path.display(), "Wrote service");
        summary.written.push(service_path);
    }

    let routes_path = dirs.routes_dir.join(ROUTES_FILE);
    let rendered = templates.render(
        TemplateKind::Routes,
        RoutesContext {
            package_name: &config.package_name,
            routes: &assembly.routes,
        },
    )?;
    write_artifact(&routes_path, &rendered)?;
    debug!(routes = assembly.routes.len(), file = %routes_path.display(), "Wrote routes");
    summary.written.push(routes_path);

    info!(
        controllers = assembly.controllers.len(),
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        "Generation complete"
    );
    Ok(summary)
}

/// Load the configuration, templates and document from disk and generate.
///
/// Configuration is validated before the document is touched.
pub fn generate_from_files(
    spec_path: &Path,
    config_path: &Path,
) -> anyhow::Result<GenerationSummary> {
    use anyhow::Context;

    let config = Configuration::load(config_path)?;
    let templates = TemplateSet::load(&config.user_templates)
        .context("failed to load templates")?;
    let operations = crate::spec::load_operations(spec_path)?;
    generate_project(&operations, &config, &templates)
        .with_context(|| format!("failed to generate package `{}`", config.package_name))
}
