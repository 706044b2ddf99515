//! Implementation of the `transclude sections` command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use transclude::{Section, parse_sections};

use super::input::read_page;
use crate::error::CliError;
use crate::output::table::format_sections_table;

/// Arguments for the sections command.
#[derive(Debug, Args)]
pub struct SectionsArgs {
    /// Page to read, or `-` for standard input
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one section.
#[derive(Debug, Serialize)]
struct SectionJson<'s> {
    index: usize,
    level: u8,
    title: Option<&'s str>,
    deepest: Option<bool>,
    offset: usize,
    length: usize,
}

impl<'s> From<&'s Section> for SectionJson<'s> {
    fn from(section: &'s Section) -> Self {
        SectionJson {
            index: section.index,
            level: section.level,
            title: section.title.as_deref(),
            deepest: section.deepest,
            offset: section.offset,
            length: section.content.len(),
        }
    }
}

/// Run the sections command.
pub fn run_sections(args: SectionsArgs) -> Result<i32, CliError> {
    let page = read_page(&args.file)?;
    let sections = parse_sections(&page);

    if args.json {
        let json_data: Vec<SectionJson<'_>> = sections.iter().map(SectionJson::from).collect();
        match serde_json::to_string_pretty(&json_data) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("cannot serialize sections: {e}");
                return Ok(exitcode::SOFTWARE);
            }
        }
    } else {
        println!("{}", format_sections_table(&sections));
    }

    Ok(exitcode::OK)
}
