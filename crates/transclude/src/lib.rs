//! Template invocation and section parsing for wikitext pages.
//!
//! The entry points are [`parse_templates`] and [`parse_sections`]. A caller
//! usually narrows a page to one section first, then extracts the
//! invocations from that section's content:
//!
//! ```
//! use transclude::{TemplateParser, find_section, parse_sections};
//!
//! let page = "Intro {{Pp}}\n== Talk ==\n{{Tl|a|b}}\n";
//! let sections = parse_sections(page);
//! let talk = find_section(&sections, "Talk").unwrap();
//!
//! let parser = TemplateParser::default().with_name_filter(|name| name == "Tl");
//! let found = parser.parse(&talk.content);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].positional(2), Some("b"));
//! ```

pub mod parser;
pub mod rewrite;
pub mod suggest;
pub mod types;

pub use parser::{
    DEFAULT_MAX_DEPTH, MaskedText, ParseOptions, Region, TemplateParser, VERBATIM_TAGS,
    canonical_name, find_section, parse_sections, parse_templates,
};
pub use rewrite::{remove_invocations, replace_invocations};
pub use suggest::suggest_names;
pub use types::{Argument, Invocation, Section};
