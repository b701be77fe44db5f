//! # Configuration Module
//!
//! Typed configuration for a generation run, loaded from a YAML file
//! (`.rog.yaml` by default, written by `rog-codegen init`).
//!
//! ## Example
//!
//! ```yaml
//! package: petstore
//! directory: ./
//! output-options:
//!   controller-prefix: API::V1
//!   controller-parent-class: ApplicationController
//!   service-prefix: Pets
//!   regenerate-service: false
//!   controller-directory: app/controllers
//!   service-directory: app/services
//!   routes-directory: config
//! user-templates:
//!   controller: templates/my_controller.rb.jinja
//! ```
//!
//! ## Defaults
//!
//! When `output-options` is missing (or present but empty) the whole block
//! falls back to [`OutputOptions::rails_defaults`]. Individual keys are never
//! defaulted on their own. `directory` defaults to the current directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name written by `init` and read by `generate` when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".rog.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("package name must be specified")]
    MissingPackageName,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Name of the generated package; its snake_case form is the package
    /// directory under `working_directory`.
    #[serde(rename = "package", default)]
    pub package_name: String,
    #[serde(rename = "directory", alias = "working-directory", default)]
    pub working_directory: PathBuf,
    #[serde(alias = "out-options", default)]
    pub output_options: OutputOptions,
    /// Logical template name (`controller`, `service`, `routes`) to a template file.
    #[serde(default)]
    pub user_templates: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputOptions {
    /// `::`-separated namespace for controller classes, e.g. `API::V1`.
    pub controller_prefix: String,
    pub service_prefix: String,
    pub controller_parent_class: String,
    pub service_parent_class: String,
    /// Overwrite existing service files. Services are user-owned otherwise.
    pub regenerate_service: bool,
    pub controller_directory: String,
    pub service_directory: String,
    pub routes_directory: String,
}

impl OutputOptions {
    pub fn rails_defaults() -> Self {
        Self {
            controller_prefix: "API".to_string(),
            service_prefix: String::new(),
            controller_parent_class: "ApplicationController".to_string(),
            service_parent_class: String::new(),
            regenerate_service: false,
            controller_directory: "controllers".to_string(),
            service_directory: "services".to_string(),
            routes_directory: "config".to_string(),
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

impl Configuration {
    /// Read, default and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let config = config.with_defaults();
        config.validate()?;
        debug!(package = %config.package_name, path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse without defaulting or validation.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn with_defaults(mut self) -> Self {
        if self.output_options.is_unset() {
            self.output_options = OutputOptions::rails_defaults();
        }
        if self.working_directory.as_os_str().is_empty() {
            self.working_directory = PathBuf::from(".");
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package_name.trim().is_empty() {
            return Err(ConfigError::MissingPackageName);
        }
        Ok(())
    }
}
