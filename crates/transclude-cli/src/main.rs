//! transclude CLI entry point.
//!
//! Provides command-line tools for inspecting wikitext pages:
//! - `transclude templates` - List template invocations
//! - `transclude sections` - List header-delimited sections
//! - `transclude remove` - Strip matching invocations from a page

mod commands;
mod error;
mod output;

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{RemoveArgs, SectionsArgs, TemplatesArgs, run_remove, run_sections, run_templates};
use env_logger::Env;

/// Wikitext template and section tools.
#[derive(Debug, Parser)]
#[command(name = "transclude")]
#[command(about = "Wikitext template and section tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List template invocations in a page
    Templates(TemplatesArgs),
    /// List the sections of a page
    Sections(SectionsArgs),
    /// Remove matching template invocations from a page
    Remove(RemoveArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors checks TTY, NO_COLOR and FORCE_COLOR itself
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Install the logger. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Templates(args) => run_templates(args),
        Commands::Sections(args) => run_sections(args),
        Commands::Remove(args) => run_remove(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            let code = e.exit_code();
            eprintln!("{:?}", miette::Report::new(e));
            exit(code);
        }
    }
}
