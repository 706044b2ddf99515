use serde::{Deserialize, Serialize};

/// A header-delimited slice of page text.
///
/// The first section of every page is the implicit top section: it has no
/// header, level 1, and covers everything before the first header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The header line as written, e.g. `"== History =="`. `None` for the
    /// top section.
    pub header: Option<String>,

    /// The header text without markers, trimmed. `None` for the top section.
    pub title: Option<String>,

    /// Header level (2-5), or 1 for the top section.
    pub level: u8,

    /// Position in document order; the top section is 0.
    pub index: usize,

    /// The section text, starting at its header and running up to the next
    /// header of the same or a shallower level.
    pub content: String,

    /// Byte offset of `content` in the page.
    pub offset: usize,

    /// `true` when no subsection nests directly inside this section. `None`
    /// for the top section.
    pub deepest: Option<bool>,
}

impl Section {
    /// Whether this is the implicit top section.
    pub fn is_top(&self) -> bool {
        self.header.is_none()
    }
}
