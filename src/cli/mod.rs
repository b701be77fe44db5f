//! # CLI Module
//!
//! Command-line surface of the `rog-codegen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! rog-codegen generate --spec openapi.yaml --config .rog.yaml
//! ```
//!
//! Options:
//! - `--spec/-s <FILE>` - OpenAPI document (default: `openapi.yaml`)
//! - `--config/-c <FILE>` - configuration file (default: `.rog.yaml`)
//!
//! Prints nothing on success. On failure the error chain goes to stderr and
//! the process exits with status 1.
//!
//! ### `init`
//!
//! ```bash
//! rog-codegen init
//! ```
//!
//! Writes `.rog.yaml` and `openapi.yaml` into the current directory.
//!
//! ## Global options
//!
//! - `--verbose/-v` - log at debug level (see [`crate::logging`])

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
