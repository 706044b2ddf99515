//! Implementation of the `transclude remove` command.

use std::fs::write;
use std::io::{Write, stdout};
use std::path::PathBuf;

use clap::Args;
use log::info;
use transclude::replace_invocations;

use super::filter::FilterArgs;
use super::input::load_page;
use crate::error::CliError;

/// Arguments for the remove command.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Page to read, or `-` for standard input
    pub file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Write the page here instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run the remove command.
pub fn run_remove(args: RemoveArgs) -> Result<i32, CliError> {
    let text = load_page(&args.file, args.filter.section.as_deref())?;
    let parser = args.filter.parser()?;

    let mut removed = 0usize;
    let focus = replace_invocations(text.focus(), &parser, |_| {
        removed += 1;
        Some(String::new())
    });
    info!("removed {removed} invocations");

    let page = [&text.page[..text.start], focus.as_str(), &text.page[text.end..]].concat();

    let (path, result) = match &args.output {
        Some(path) => (path.display().to_string(), write(path, &page)),
        None => ("standard output".to_string(), stdout().write_all(page.as_bytes())),
    };
    result.map_err(|source| CliError::Write { path, source })?;

    Ok(exitcode::OK)
}
