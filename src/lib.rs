//! # rog-codegen
//!
//! **rog-codegen** generates Ruby on Rails API boilerplate from an
//! [OpenAPI 3](https://spec.openapis.org/oas/v3.1.0) document: one controller
//! and one service class per tag, and a routes file wiring every operation to
//! its controller action.
//!
//! ## Architecture
//!
//! - **[`spec`]** - document loading, schema description, operation extraction
//! - **[`config`]** - the `.rog.yaml` configuration
//! - **[`generator`]** - grouping, naming, template rendering and file output
//! - **[`cli`]** - the `rog-codegen` command line
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(rog-codegen)
//!     participant Config as config::Configuration
//!     participant Spec as spec::load_operations
//!     participant Gen as generator::generate_project
//!     participant FS as File System
//!
//!     User->>CLI: rog-codegen generate -s openapi.yaml -c .rog.yaml
//!     CLI->>Config: Configuration::load(".rog.yaml")
//!     Config-->>CLI: defaulted, validated Configuration
//!     CLI->>CLI: TemplateSet::load(user_templates)
//!     CLI->>Spec: load_operations("openapi.yaml")
//!     Spec-->>CLI: Vec<OperationDefinition> (path, method order)
//!     CLI->>Gen: generate_project(&ops, &config, &templates)
//!     Gen->>Gen: assemble_definitions (group by tag)
//!     Gen->>Gen: resolve_output_directories
//!     Gen->>FS: <tag>_controller.rb, <tag>_service.rb
//!     Gen->>FS: api_routes.rb
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use rog_codegen::config::Configuration;
//! use rog_codegen::generator::{generate_project, TemplateSet};
//! use rog_codegen::spec::load_operations;
//! use std::path::Path;
//!
//! let config = Configuration::load(Path::new(".rog.yaml"))?;
//! let templates = TemplateSet::load(&config.user_templates)?;
//! let operations = load_operations(Path::new("openapi.yaml"))?;
//! generate_project(&operations, &config, &templates)?;
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod logging;
pub mod spec;

pub use config::Configuration;
pub use generator::{generate_project, TemplateSet};
pub use spec::{extract_operations, load_operations, load_spec, OperationDefinition};
