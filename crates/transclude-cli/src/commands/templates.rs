//! Implementation of the `transclude templates` command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use owo_colors::{OwoColorize, Stream};
use transclude::{Invocation, TemplateParser, suggest_names};

use super::filter::FilterArgs;
use super::input::load_page;
use crate::error::CliError;
use crate::output::table::format_templates_table;

/// Arguments for the templates command.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Page to read, or `-` for standard input
    pub file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the templates command.
pub fn run_templates(args: TemplatesArgs) -> Result<i32, CliError> {
    let text = load_page(&args.file, args.filter.section.as_deref())?;
    let parser = args.filter.parser()?;

    let mut found = parser.parse(text.focus());
    for invocation in &mut found {
        invocation.offset += text.start;
    }

    if args.json {
        match serde_json::to_string_pretty(&found) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("cannot serialize invocations: {e}");
                return Ok(exitcode::SOFTWARE);
            }
        }
    } else if !found.is_empty() {
        println!("{}", format_templates_table(&found));
    }

    if found.is_empty() && !args.filter.names.is_empty() {
        let unfiltered = TemplateParser::new(args.filter.options()?).parse(text.focus());
        report_near_misses(&args.filter.canonical_names(), &unfiltered);
    }

    Ok(exitcode::OK)
}

/// Tell the user which present templates look like the ones they asked for.
fn report_near_misses(requested: &[String], present: &[Invocation]) {
    let available: BTreeSet<&str> = present.iter().map(|i| i.name.as_str()).collect();

    for name in requested {
        let suggestions = suggest_names(name, available.iter().copied());
        let message = format!("no invocation of '{name}'");
        eprint!(
            "{}",
            message.if_supports_color(Stream::Stderr, |text| text.yellow())
        );
        if suggestions.is_empty() {
            eprintln!();
        } else {
            eprintln!("; did you mean: {}?", suggestions.join(", "));
        }
    }
}
