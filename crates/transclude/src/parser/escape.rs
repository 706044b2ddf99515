//! Tracking of pipes that are not argument separators.
//!
//! The scanner never rewrites text. Instead it records the byte offsets of
//! pipes that belong to something other than the invocation being delimited:
//! a nested invocation, a parameter placeholder, or a comment or verbatim
//! region. Link captions add their pipes here before the body is split.

use std::ops::Range;

/// Sorted set of byte offsets of escaped pipes, relative to one invocation's
/// text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PipeEscapes(Vec<usize>);

impl PipeEscapes {
    /// Builds the set from offsets recorded in ascending order.
    pub(crate) fn from_sorted(offsets: Vec<usize>) -> Self {
        debug_assert!(offsets.is_sorted());
        Self(offsets)
    }

    pub(crate) fn contains(&self, offset: usize) -> bool {
        self.0.binary_search(&offset).is_ok()
    }

    pub(crate) fn insert(&mut self, offset: usize) {
        if let Err(at) = self.0.binary_search(&offset) {
            self.0.insert(at, offset);
        }
    }

    /// Escapes every pipe inside a `[[...]]` link within `range` of `text`.
    ///
    /// A link runs from `[[` to its matching `]]`, so the pipes of a caption
    /// that itself contains links are all covered, before and after the inner
    /// links. An unclosed `[[` escapes nothing, though links inside it still
    /// do.
    pub(crate) fn mask_links(&mut self, text: &str, range: Range<usize>) {
        let mut from = range.start;
        while let Some(open) = find_in(text, "[[", from..range.end) {
            let Some(close) = link_end(text.as_bytes(), open, range.end) else {
                from = open + 2;
                continue;
            };
            for (i, _) in text[open + 2..close].match_indices('|') {
                self.insert(open + 2 + i);
            }
            from = close + 2;
        }
    }

    /// Splits `range` of `text` on every pipe not in the set.
    pub(crate) fn split<'t>(&self, text: &'t str, range: Range<usize>) -> Vec<&'t str> {
        let mut segments = Vec::new();
        let mut start = range.start;
        for (i, _) in text[range.clone()].match_indices('|') {
            let at = range.start + i;
            if !self.contains(at) {
                segments.push(&text[start..at]);
                start = at + 1;
            }
        }
        segments.push(&text[start..range.end]);
        segments
    }
}

/// Offset of the `]]` matching the `[[` at `open`, searching before `end`.
fn link_end(bytes: &[u8], open: usize, end: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i + 2 <= end {
        match &bytes[i..i + 2] {
            b"[[" => {
                depth += 1;
                i += 2;
            }
            b"]]" => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    None
}

fn find_in(text: &str, needle: &str, range: Range<usize>) -> Option<usize> {
    text.get(range.clone())?
        .find(needle)
        .map(|i| range.start + i)
}
