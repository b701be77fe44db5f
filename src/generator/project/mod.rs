mod generate;
mod write;

pub use generate::{generate_from_files, generate_project, GenerationSummary, ROUTES_FILE};
pub use write::write_artifact;
