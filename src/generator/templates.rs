use super::error::GenerateError;
use super::naming::{pascal_case, ruby_argument, ruby_symbol, snake_case};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// The artifacts a run renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateKind {
    Controller,
    Service,
    Routes,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Controller,
        TemplateKind::Service,
        TemplateKind::Routes,
    ];

    /// Key used under `user-templates` in the configuration.
    pub fn logical_name(self) -> &'static str {
        match self {
            TemplateKind::Controller => "controller",
            TemplateKind::Service => "service",
            TemplateKind::Routes => "routes",
        }
    }

    /// Name the template is registered under in the environment.
    pub fn template_name(self) -> &'static str {
        match self {
            TemplateKind::Controller => "controller.rb",
            TemplateKind::Service => "service.rb",
            TemplateKind::Routes => "routes.rb",
        }
    }

    pub fn from_logical_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.logical_name() == name)
    }

    fn builtin_source(self) -> &'static str {
        match self {
            TemplateKind::Controller => include_str!("../../templates/controller.rb.jinja"),
            TemplateKind::Service => include_str!("../../templates/service.rb.jinja"),
            TemplateKind::Routes => include_str!("../../templates/routes.rb.jinja"),
        }
    }
}

/// YARD type for an OpenAPI type name.
fn ruby_type(kind: String) -> String {
    match kind.as_str() {
        "string" => "String",
        "integer" => "Integer",
        "number" => "Float",
        "boolean" => "Boolean",
        "array" => "Array",
        "object" => "Hash",
        _ => "Object",
    }
    .to_string()
}

/// The loaded template set for one run.
///
/// Built once before anything is rendered; a missing, unknown or unparsable
/// template fails the load so a run never starts with a partial set.
pub struct TemplateSet {
    env: Environment<'static>,
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet").finish_non_exhaustive()
    }
}

impl TemplateSet {
    /// Only the embedded templates.
    pub fn builtin() -> Result<Self, GenerateError> {
        Self::load(&BTreeMap::new())
    }

    /// Embedded templates, with any entry of `overrides` replacing the
    /// built-in of the same logical name.
    pub fn load(overrides: &BTreeMap<String, PathBuf>) -> Result<Self, GenerateError> {
        let mut sources: BTreeMap<TemplateKind, String> = BTreeMap::new();
        for (name, path) in overrides {
            let kind = TemplateKind::from_logical_name(name).ok_or_else(|| {
                GenerateError::UnknownTemplate { name: name.clone() }
            })?;
            let source =
                std::fs::read_to_string(path).map_err(|source| GenerateError::ReadTemplate {
                    name: name.clone(),
                    path: path.clone(),
                    source,
                })?;
            debug!(template = %name, path = %path.display(), "Using user template");
            sources.insert(kind, source);
        }

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("snake_case", |value: String| snake_case(&value));
        env.add_filter("pascal_case", |value: String| pascal_case(&value));
        env.add_filter("ruby_type", ruby_type);
        env.add_filter("ruby_argument", |value: String| ruby_argument(&value));
        env.add_filter("ruby_symbol", |value: String| ruby_symbol(&value));

        for kind in TemplateKind::ALL {
            let name = kind.template_name();
            let source = sources
                .remove(&kind)
                .unwrap_or_else(|| kind.builtin_source().to_string());
            env.add_template_owned(name, source)
                .map_err(|source| GenerateError::TemplateSyntax {
                    name: name.to_string(),
                    source,
                })?;
        }

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, kind: TemplateKind, ctx: S) -> Result<String, GenerateError> {
        let name = kind.template_name();
        let render_err = |source| GenerateError::Render {
            name: name.to_string(),
            source,
        };
        self.env
            .get_template(name)
            .map_err(render_err)?
            .render(ctx)
            .map_err(render_err)
    }
}
