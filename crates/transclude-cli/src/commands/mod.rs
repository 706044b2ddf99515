//! CLI command implementations.

mod filter;
mod input;
mod remove;
mod sections;
mod templates;

pub use remove::{RemoveArgs, run_remove};
pub use sections::{SectionsArgs, run_sections};
pub use templates::{TemplatesArgs, run_templates};
