//! Rewriting invocations in page text.
//!
//! Used to update or strip notices (protection templates and the like)
//! before a page is saved back.

use log::debug;

use crate::parser::TemplateParser;
use crate::types::Invocation;

/// Replaces invocations found by `parser` in `text`.
///
/// `replace` is called for each invocation in source order; returning
/// `Some(new)` splices `new` in place of the invocation's span, `None` keeps
/// it. Invocations nested inside one that was already replaced are skipped.
/// Text outside replaced spans is left byte for byte.
///
/// # Example
///
/// ```
/// use transclude::{TemplateParser, replace_invocations};
///
/// let parser = TemplateParser::default().with_name_filter(|name| name == "Pp");
/// let page = "{{Pp|small=yes}}Text";
/// let updated = replace_invocations(page, &parser, |_| Some("{{Pp}}".to_string()));
/// assert_eq!(updated, "{{Pp}}Text");
/// ```
pub fn replace_invocations<F>(text: &str, parser: &TemplateParser<'_>, mut replace: F) -> String
where
    F: FnMut(&Invocation) -> Option<String>,
{
    let mut found = parser.parse(text);
    found.sort_by_key(|invocation| invocation.offset);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut replaced = 0;
    for invocation in &found {
        if invocation.offset < cursor {
            continue;
        }
        if let Some(replacement) = replace(invocation) {
            out.push_str(&text[cursor..invocation.offset]);
            out.push_str(&replacement);
            cursor = invocation.span().end;
            replaced += 1;
        }
    }
    out.push_str(&text[cursor..]);

    debug!("replaced {replaced} of {} invocations", found.len());
    out
}

/// Removes every invocation found by `parser` from `text`.
pub fn remove_invocations(text: &str, parser: &TemplateParser<'_>) -> String {
    replace_invocations(text, parser, |_| Some(String::new()))
}
