//! Reading pages and narrowing them to one section.

use std::fs::read_to_string;
use std::io::{read_to_string as read_stream, stdin};
use std::path::Path;

use log::debug;
use transclude::{find_section, parse_sections, suggest_names};

use crate::error::CliError;

/// A page, or the part of it a command operates on.
pub struct PageText {
    /// The complete page as read.
    pub page: String,
    /// Byte range of the part being worked on.
    pub start: usize,
    pub end: usize,
}

impl PageText {
    /// The part being worked on.
    pub fn focus(&self) -> &str {
        &self.page[self.start..self.end]
    }
}

/// Reads a page from `path`, or from standard input when `path` is `-`.
pub fn read_page(path: &Path) -> Result<String, CliError> {
    let result = if path == Path::new("-") {
        read_stream(stdin())
    } else {
        read_to_string(path)
    };
    result.map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Reads a page and, when `section` is given, narrows it to the section with
/// that title.
pub fn load_page(path: &Path, section: Option<&str>) -> Result<PageText, CliError> {
    let page = read_page(path)?;
    let Some(title) = section else {
        let end = page.len();
        return Ok(PageText {
            page,
            start: 0,
            end,
        });
    };

    let sections = parse_sections(&page);
    let Some(found) = find_section(&sections, title) else {
        let titles = sections.iter().filter_map(|s| s.title.as_deref());
        let suggestions = suggest_names(title, titles);
        return Err(CliError::SectionNotFound {
            title: title.to_string(),
            help: (!suggestions.is_empty())
                .then(|| format!("did you mean: {}?", suggestions.join(", "))),
        });
    };

    debug!("narrowed to section {} at byte {}", found.index, found.offset);
    let (start, end) = (found.offset, found.offset + found.content.len());
    Ok(PageText { page, start, end })
}
