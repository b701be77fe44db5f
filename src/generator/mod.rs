//! # Generator Module
//!
//! Turns extracted operations into Ruby on Rails boilerplate: one controller
//! and one service per tag, plus a combined routes file.
//!
//! ## Architecture
//!
//! ```text
//! Vec<OperationDefinition> → assemble_definitions → Assembly
//!                                                  ↓
//! Configuration → resolve_output_directories → TemplateSet::render → write_artifact
//! ```
//!
//! 1. **Assembly** ([`assemble_definitions`]) groups operations by tag, names
//!    classes and methods, and flattens the route list.
//! 2. **Layout** ([`resolve_output_directories`]) maps the configuration's
//!    directories and class prefixes onto filesystem paths.
//! 3. **Rendering** ([`TemplateSet`]) holds the minijinja environment, loaded
//!    once per run from the embedded templates and any `user-templates`.
//! 4. **Writing** ([`generate_project`]) renders each artifact and writes it
//!    atomically, stopping at the first failure.
//!
//! ## Generated Structure
//!
//! With the default output options:
//!
//! ```text
//! <directory>/<package>/
//! ├── controllers/api/
//! │   └── <tag>_controller.rb   # rewritten on every run
//! ├── services/
//! │   └── <tag>_service.rb      # written once unless regenerate-service is set
//! └── config/
//!     └── api_routes.rb         # rewritten on every run
//! ```
//!
//! ## Templates
//!
//! Built-in templates live in `templates/*.rb.jinja` and are compiled into the
//! binary. They see `package_name` plus either `controller` (a
//! [`ControllerData`]) or `routes` (a list of [`RouteEntry`]), and can use the
//! `snake_case`, `pascal_case` and `ruby_type` filters.
//!
//! The `init` scaffolds ([`initialize`]) are fixed and rendered with askama.

mod definitions;
mod error;
mod naming;
mod project;
mod scaffold;
mod templates;

pub use definitions::*;
pub use error::GenerateError;
pub use naming::*;
pub use project::*;
pub use scaffold::*;
pub use templates::{TemplateKind, TemplateSet};
