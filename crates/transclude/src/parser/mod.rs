//! Wikitext template and section parsing.
//!
//! This module locates template invocations (`{{name|arg|key=value}}`),
//! including invocations nested in other invocations, while ignoring
//! `{{{parameters}}}` and anything inside comments or verbatim tags. It also
//! splits pages into header-delimited sections.
//!
//! Neither operation can fail. Malformed markup degrades to fewer results.

mod arguments;
mod escape;
pub mod markup;
pub mod mask;
mod scanner;
mod sections;
mod templates;

pub use markup::{Region, VERBATIM_TAGS};
pub use mask::{MaskedRegion, MaskedText};
pub use sections::{find_section, parse_sections};
pub use templates::{
    DEFAULT_MAX_DEPTH, ParseOptions, TemplateParser, canonical_name, parse_templates,
};
