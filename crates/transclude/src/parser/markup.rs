//! Recognizers for the markup that suspends template scanning.
//!
//! Two kinds of region hide template syntax: HTML comments (`<!-- ... -->`)
//! and a fixed set of verbatim tags such as `<nowiki>` and `<pre>`. Tag names
//! are matched lower-case only, so `<NOWIKI>` is ordinary text.

use winnow::ascii::multispace0;
use winnow::combinator::{preceded, terminated};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Tags whose content is not expanded.
pub const VERBATIM_TAGS: &[&str] = &[
    "nowiki",
    "pre",
    "math",
    "syntaxhighlight",
    "source",
    "templatedata",
    "timeline",
];

/// A region of text in which template syntax is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// `<!-- ... -->`
    Comment,
    /// `<tag> ... </tag>` for one of [`VERBATIM_TAGS`].
    Verbatim(&'static str),
}

impl Region {
    /// Recognizes a region opener at the start of `rest`.
    ///
    /// Returns the region kind and the byte length of the opener. A
    /// self-closing tag such as `<nowiki/>` opens nothing.
    pub(crate) fn open_at(rest: &str) -> Option<(Self, usize)> {
        if rest.starts_with("<!--") {
            return Some((Self::Comment, 4));
        }
        if !rest.starts_with('<') {
            return None;
        }
        let mut input = rest;
        let tag = verbatim_open(&mut input).ok()?;
        Some((Self::Verbatim(tag), rest.len() - input.len()))
    }

    /// Recognizes this region's terminator at the start of `rest`, returning
    /// its byte length.
    pub(crate) fn close_at(self, rest: &str) -> Option<usize> {
        match self {
            Self::Comment => rest.starts_with("-->").then_some(3),
            Self::Verbatim(tag) => {
                if !rest.starts_with("</") {
                    return None;
                }
                let mut input = rest;
                let closed: ModalResult<()> = ("</", tag, multispace0, '>')
                    .void()
                    .parse_next(&mut input);
                closed.ok().map(|()| rest.len() - input.len())
            }
        }
    }

    /// Finds the end of a region whose opener ends at `from`.
    ///
    /// Returns the offset just past the terminator, or the end of `text` when
    /// the region is never closed.
    pub(crate) fn end_from(self, text: &str, from: usize) -> usize {
        let bytes = text.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            if matches!(bytes[i], b'-' | b'<') {
                if let Some(len) = self.close_at(&text[i..]) {
                    return i + len;
                }
            }
            i += 1;
        }
        text.len()
    }
}

/// Parse `<tag>` or `<tag attrs>` for a verbatim tag name.
fn verbatim_open(input: &mut &str) -> ModalResult<&'static str> {
    let tag = preceded('<', take_while(1.., |c: char| c.is_ascii_alphanumeric()))
        .verify_map(verbatim_tag)
        .parse_next(input)?;
    terminated(take_till(0.., ['<', '>']), '>')
        .verify(|attributes: &str| {
            (attributes.is_empty() || attributes.starts_with(char::is_whitespace))
                && !attributes.trim_end().ends_with('/')
        })
        .parse_next(input)?;
    Ok(tag)
}

fn verbatim_tag(name: &str) -> Option<&'static str> {
    VERBATIM_TAGS.iter().copied().find(|tag| *tag == name)
}
