//! Template invocation extraction.
//!
//! Composes the brace scanner, pipe escaping, and argument classification,
//! and optionally descends into each invocation's body to report nested
//! invocations.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use bon::Builder;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::arguments::parse_arguments;
use super::scanner::{RawSpan, Scanner};
use crate::types::Invocation;

/// Default limit on how deep extraction descends into nested invocations.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Namespace prefix meaning "this is a template", matched case-insensitively.
const TEMPLATE_NAMESPACE: &str = "template:";

/// Options controlling template extraction.
///
/// # Example
///
/// ```
/// use transclude::ParseOptions;
///
/// let options = ParseOptions::builder().recursive(false).build();
/// assert!(!options.recursive);
/// assert!(!options.include_verbatim);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Descend into invocation bodies to find nested invocations.
    #[builder(default = true)]
    pub recursive: bool,

    /// Report invocations inside comments and verbatim tags too.
    #[builder(default)]
    pub include_verbatim: bool,

    /// Deepest nesting level descended into. Invocations at this level are
    /// still reported, but their bodies are not scanned.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::builder().build()
    }
}

type NameFilter<'p> = Box<dyn Fn(&str) -> bool + Send + Sync + 'p>;
type InvocationFilter<'p> = Box<dyn Fn(&Invocation) -> bool + Send + Sync + 'p>;

/// A configured template extractor.
///
/// The parser keeps no state between calls, so one instance can serve any
/// number of pages, from any number of threads.
///
/// # Example
///
/// ```
/// use transclude::TemplateParser;
///
/// let parser = TemplateParser::default().with_name_filter(|name| name.starts_with("Pp"));
/// let found = parser.parse("{{Pp-vandalism}} {{Unrelated}}");
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "Pp-vandalism");
/// ```
#[derive(Default)]
pub struct TemplateParser<'p> {
    options: ParseOptions,
    name_filter: Option<NameFilter<'p>>,
    filter: Option<InvocationFilter<'p>>,
}

impl<'p> TemplateParser<'p> {
    /// Creates a parser with the given options and no filters.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            name_filter: None,
            filter: None,
        }
    }

    /// Keep only invocations whose canonical name satisfies `filter`.
    ///
    /// Rejected invocations are dropped as they are found, so their bodies
    /// are not searched for nested invocations.
    pub fn with_name_filter(mut self, filter: impl Fn(&str) -> bool + Send + Sync + 'p) -> Self {
        self.name_filter = Some(Box::new(filter));
        self
    }

    /// Keep only invocations satisfying `filter`, applied once to the
    /// complete result.
    pub fn with_filter(mut self, filter: impl Fn(&Invocation) -> bool + Send + Sync + 'p) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// The options this parser was built with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Extracts invocations from `text`.
    ///
    /// Invocations of one nesting level come first, in source order; then,
    /// for each of them in the same order, everything nested inside it.
    /// Malformed input never fails: unterminated constructs simply yield
    /// nothing.
    pub fn parse(&self, text: &str) -> Vec<Invocation> {
        let mut found = self.parse_level(text, 0, 0);
        if let Some(filter) = &self.filter {
            found.retain(|invocation| filter(invocation));
        }
        found
    }

    fn parse_level(&self, text: &str, base: usize, level: usize) -> Vec<Invocation> {
        let mut found: Vec<Invocation> = Scanner::new(text, self.options.include_verbatim)
            .filter_map(|span| self.build(span, base, level))
            .collect();

        if !self.options.recursive {
            return found;
        }
        if level >= self.options.max_depth {
            debug!("not descending below nesting level {level}");
            return found;
        }

        let mut nested = Vec::new();
        for invocation in &found {
            let body = invocation.body();
            if contains_invocation(body) {
                nested.extend(self.parse_level(body, invocation.offset + 2, level + 1));
            }
        }
        found.extend(nested);
        found
    }

    fn build(&self, span: RawSpan<'_>, base: usize, level: usize) -> Option<Invocation> {
        let RawSpan {
            offset,
            text,
            mut escapes,
        } = span;
        let body = 2..text.len() - 2;
        escapes.mask_links(text, body.clone());
        let segments = escapes.split(text, body);
        let (head, arguments) = segments.split_first()?;

        let name = canonical_name(head);
        if let Some(filter) = &self.name_filter {
            if !filter(&name) {
                trace!("skipping '{name}' rejected by name filter");
                return None;
            }
        }

        Some(Invocation {
            text: text.to_string(),
            name,
            arguments: parse_arguments(arguments.iter().copied()),
            nestlevel: level,
            offset: base + offset,
        })
    }
}

impl Debug for TemplateParser<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TemplateParser")
            .field("options", &self.options)
            .field("name_filter", &self.name_filter.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// Extracts invocations from `text` with default options.
pub fn parse_templates(text: &str) -> Vec<Invocation> {
    TemplateParser::default().parse(text)
}

/// Canonicalizes a template name.
///
/// Trims surrounding whitespace, strips a `Template:` prefix in any case,
/// upper-cases the first character, and replaces spaces with underscores.
///
/// ```
/// use transclude::canonical_name;
///
/// assert_eq!(canonical_name(" template:pp move "), "Pp_move");
/// assert_eq!(canonical_name("TEMPLATE: citation needed"), "Citation_needed");
/// ```
pub fn canonical_name(raw: &str) -> String {
    let name = raw.trim();
    let name = match name.get(..TEMPLATE_NAMESPACE.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(TEMPLATE_NAMESPACE) => {
            name[TEMPLATE_NAMESPACE.len()..].trim_start()
        }
        _ => name,
    };

    let mut chars = name.chars();
    let mut canonical = String::with_capacity(name.len());
    if let Some(first) = chars.next() {
        canonical.extend(first.to_uppercase());
    }
    canonical.extend(chars.map(|c| if c == ' ' { '_' } else { c }));
    canonical
}

/// Whether `body` still holds a `{{...}}` span worth a nested pass.
fn contains_invocation(body: &str) -> bool {
    body.find("{{")
        .is_some_and(|open| body[open + 2..].contains("}}"))
}
