//! CLI error type.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

use crate::output::ConfigDiagnostic;

/// Everything that can stop a command before it produces output.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("cannot read {path}")]
    #[diagnostic(code(transclude::read))]
    Read { path: String, source: io::Error },

    #[error("cannot write {path}")]
    #[diagnostic(code(transclude::write))]
    Write { path: String, source: io::Error },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] Box<ConfigDiagnostic>),

    #[error("invalid --matching pattern")]
    #[diagnostic(
        code(transclude::pattern),
        help("patterns use the syntax of the regex crate and match canonical names")
    )]
    Pattern(#[from] regex::Error),

    #[error("no section titled '{title}'")]
    #[diagnostic(code(transclude::section))]
    SectionNotFound {
        title: String,
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Read { .. } => exitcode::NOINPUT,
            CliError::Write { .. } => exitcode::CANTCREAT,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Pattern(_) => exitcode::USAGE,
            CliError::SectionNotFound { .. } => exitcode::DATAERR,
        }
    }
}
