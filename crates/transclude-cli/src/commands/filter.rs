//! Options and filters shared by commands that select invocations.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use regex::Regex;
use transclude::{ParseOptions, TemplateParser, canonical_name};

use crate::error::CliError;
use crate::output::ConfigDiagnostic;

/// Selection of invocations.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only invocations of this template (repeatable)
    #[arg(long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Only invocations whose canonical name matches this regex
    #[arg(long, value_name = "REGEX")]
    pub matching: Option<String>,

    /// Do not look for invocations nested inside other invocations
    #[arg(long)]
    pub no_recursive: bool,

    /// Also report invocations inside comments and verbatim tags
    #[arg(long)]
    pub include_verbatim: bool,

    /// Deepest nesting level to descend into
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Only look inside the section with this title
    #[arg(long, value_name = "TITLE")]
    pub section: Option<String>,

    /// JSON file with parse options; flags override its values
    #[arg(long, value_name = "FILE", env = "TRANSCLUDE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl FilterArgs {
    /// Requested names in canonical form.
    pub fn canonical_names(&self) -> Vec<String> {
        self.names.iter().map(|name| canonical_name(name)).collect()
    }

    /// Parse options from the config file, then the flags.
    pub fn options(&self) -> Result<ParseOptions, CliError> {
        let mut options = match &self.config {
            Some(path) => {
                let content = read_to_string(path).map_err(|source| CliError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                serde_json::from_str::<ParseOptions>(&content).map_err(|err| {
                    Box::new(ConfigDiagnostic::from_json_error(path, &content, &err))
                })?
            }
            None => ParseOptions::default(),
        };

        if self.no_recursive {
            options.recursive = false;
        }
        if self.include_verbatim {
            options.include_verbatim = true;
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        Ok(options)
    }

    /// A parser applying these options and name filters.
    ///
    /// Names are matched on the final result, so invocations nested inside
    /// non-matching ones are still found.
    pub fn parser(&self) -> Result<TemplateParser<'static>, CliError> {
        let parser = TemplateParser::new(self.options()?);
        let names = self.canonical_names();
        let pattern = self.matching.as_deref().map(Regex::new).transpose()?;
        if names.is_empty() && pattern.is_none() {
            return Ok(parser);
        }

        Ok(parser.with_filter(move |invocation| {
            let name = invocation.name.as_str();
            (names.is_empty() || names.iter().any(|n| n == name))
                && pattern.as_ref().is_none_or(|p| p.is_match(name))
        }))
    }
}
