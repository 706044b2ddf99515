//! Rendering of command results and errors.

mod diagnostic;
pub mod table;

pub use diagnostic::ConfigDiagnostic;
