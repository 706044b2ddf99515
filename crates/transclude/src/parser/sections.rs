//! Splitting page text into header-delimited sections.

use log::debug;
use winnow::prelude::*;
use winnow::token::take_while;

use super::markup::Region;
use super::mask::{MaskedText, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
use crate::types::Section;

/// Deepest header level recognized.
const MAX_LEVEL: usize = 5;

/// A header line located in the source text.
struct Header {
    start: usize,
    end: usize,
    level: u8,
    title: String,
}

/// Split `text` into a flat list of sections.
///
/// Headers are lines of the form `== Title ==` with two to five markers on
/// each side. Header-like lines inside comments or verbatim regions are
/// ignored. The result always starts with the implicit top section, which
/// covers the text before the first header (or the whole text).
///
/// # Example
///
/// ```
/// use transclude::parse_sections;
///
/// let sections = parse_sections("lead\n== A ==\nx\n=== B ===\ny\n");
/// assert_eq!(sections.len(), 3);
/// assert_eq!(sections[1].title.as_deref(), Some("A"));
/// assert_eq!(sections[1].content, "== A ==\nx\n=== B ===\ny\n");
/// assert_eq!(sections[1].deepest, Some(false));
/// assert_eq!(sections[2].deepest, Some(true));
/// ```
pub fn parse_sections(text: &str) -> Vec<Section> {
    let headers = find_headers(text);
    debug!("found {} section headers", headers.len());

    let mut sections = Vec::with_capacity(headers.len() + 1);
    let top_end = headers.first().map_or(text.len(), |h| h.start);
    sections.push(Section {
        header: None,
        title: None,
        level: 1,
        index: 0,
        content: text[..top_end].to_string(),
        offset: 0,
        deepest: None,
    });

    for (i, header) in headers.iter().enumerate() {
        let following = &headers[i + 1..];
        let end = following
            .iter()
            .find(|next| next.level <= header.level)
            .map_or(text.len(), |next| next.start);
        let deepest = following
            .first()
            .is_none_or(|next| next.level <= header.level);

        sections.push(Section {
            header: Some(text[header.start..header.end].to_string()),
            title: Some(header.title.clone()),
            level: header.level,
            index: i + 1,
            content: text[header.start..end].to_string(),
            offset: header.start,
            deepest: Some(deepest),
        });
    }

    sections
}

/// Find the first section whose title equals `title`.
pub fn find_section<'s>(sections: &'s [Section], title: &str) -> Option<&'s Section> {
    sections
        .iter()
        .find(|section| section.title.as_deref() == Some(title))
}

fn find_headers(text: &str) -> Vec<Header> {
    let masked = MaskedText::new(text);
    let mut headers = Vec::new();
    let mut pos = 0;

    for line in masked.as_str().split_inclusive('\n') {
        let start = pos;
        pos += line.len();

        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let Some((level, content)) = header_level(strip_trailing_comments(&masked, line)) else {
            continue;
        };

        let title = masked.unmask_with(content, |kind| kind != Region::Comment);
        headers.push(Header {
            start: masked.source_offset(start),
            end: masked.source_offset(start + line.len()),
            level,
            title: title.trim().to_string(),
        });
    }

    headers
}

/// `line` without the comment placeholders and whitespace at its end, so a
/// comment after the closing markers does not hide the header.
fn strip_trailing_comments<'l>(masked: &MaskedText<'_>, line: &'l str) -> &'l str {
    let mut line = line.trim_end();
    while let Some(rest) = line.strip_suffix(PLACEHOLDER_CLOSE) {
        let Some(open) = rest.rfind(PLACEHOLDER_OPEN) else {
            break;
        };
        let is_comment = rest[open + PLACEHOLDER_OPEN.len()..]
            .parse::<usize>()
            .ok()
            .and_then(|index| masked.regions().get(index))
            .is_some_and(|region| region.kind == Region::Comment);
        if !is_comment {
            break;
        }
        line = rest[..open].trim_end();
    }
    line
}

/// Recognize a header line, returning its level and the text between the
/// marker runs.
///
/// The level is the longest marker run (up to five) that appears on both
/// sides with at least one character between them. Unbalanced runs are
/// folded into the content, so `===A==` is a level 2 header titled `=A`.
fn header_level(line: &str) -> Option<(u8, &str)> {
    let mut input = line;
    let leading: ModalResult<&str> = take_while(2.., '=').parse_next(&mut input);
    let leading = leading.ok()?.len();

    let trimmed = line.trim_end();
    let trailing = trimmed.len() - trimmed.trim_end_matches('=').len();

    (2..=leading.min(MAX_LEVEL))
        .rev()
        .find(|&level| trailing >= level && trimmed.len() > 2 * level)
        .and_then(|level| {
            let content = &trimmed[level..trimmed.len() - level];
            Some((u8::try_from(level).ok()?, content))
        })
}
