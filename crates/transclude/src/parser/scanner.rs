//! Single-pass brace scanner.
//!
//! Walks the text once, tracking how many `{{` are open, whether a
//! `{{{parameter}}}` or an inert region is being skipped, and which pipes do
//! not belong to the outermost invocation. Every outermost `{{...}}` span is
//! yielded as soon as its closing pair is seen.

use log::trace;

use super::escape::PipeEscapes;
use super::markup::Region;

/// An outermost invocation span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSpan<'t> {
    /// Byte offset of the span in the scanned text.
    pub offset: usize,
    /// The span, both brace pairs included.
    pub text: &'t str,
    /// Non-separator pipes, relative to `text`.
    pub escapes: PipeEscapes,
}

/// Scanner state for one pass over one piece of text.
///
/// Each recursive pass creates its own scanner; no state is shared between
/// passes.
#[derive(Debug)]
pub(crate) struct Scanner<'t> {
    text: &'t str,
    include_verbatim: bool,
    pos: usize,
    /// Two per unmatched `{{`.
    depth: usize,
    in_parameter: bool,
    region: Option<Region>,
    start: usize,
    escaped: Vec<usize>,
}

impl<'t> Scanner<'t> {
    /// Creates a scanner over `text`.
    ///
    /// With `include_verbatim`, comments and verbatim tags are not
    /// recognized and invocations inside them are reported like any other.
    pub(crate) fn new(text: &'t str, include_verbatim: bool) -> Self {
        Self {
            text,
            include_verbatim,
            pos: 0,
            depth: 0,
            in_parameter: false,
            region: None,
            start: 0,
            escaped: Vec::new(),
        }
    }

    /// Pipes seen while nested, inside a parameter, or inside a region do
    /// not separate the outermost invocation's arguments.
    fn escape(&mut self, at: usize) {
        self.escaped.push(at);
    }

    fn emit(&mut self, end: usize) -> RawSpan<'t> {
        let text = self.text;
        let start = self.start;
        let escapes =
            PipeEscapes::from_sorted(self.escaped.drain(..).map(|at| at - start).collect());
        trace!("invocation span {start}..{end}");
        RawSpan {
            offset: start,
            text: &text[start..end],
            escapes,
        }
    }

    /// Advances inside a comment or verbatim region.
    fn step_region(&mut self, region: Region) {
        let i = self.pos;
        let byte = self.text.as_bytes()[i];
        if matches!(byte, b'-' | b'<') {
            if let Some(len) = region.close_at(&self.text[i..]) {
                self.region = None;
                self.pos += len;
                return;
            }
        }
        if byte == b'|' && self.depth > 0 {
            self.escape(i);
        }
        self.pos += 1;
    }

    /// Advances inside a `{{{parameter}}}`.
    fn step_parameter(&mut self) {
        let text = self.text;
        let i = self.pos;
        let rest = &text.as_bytes()[i..];
        if rest.starts_with(b"}}}") {
            self.in_parameter = false;
            self.pos += 3;
            return;
        }
        if rest[0] == b'|' && self.depth > 0 {
            self.escape(i);
        }
        self.pos += 1;
    }
}

impl<'t> Iterator for Scanner<'t> {
    type Item = RawSpan<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let bytes = text.as_bytes();

        while self.pos < bytes.len() {
            if let Some(region) = self.region {
                self.step_region(region);
                continue;
            }
            if self.in_parameter {
                self.step_parameter();
                continue;
            }

            let i = self.pos;
            let rest = &bytes[i..];

            if rest[0] == b'<' && !self.include_verbatim {
                if let Some((region, len)) = Region::open_at(&text[i..]) {
                    self.region = Some(region);
                    self.pos += len;
                    continue;
                }
            }

            if rest.starts_with(b"{{{") && !rest.starts_with(b"{{{{") {
                self.in_parameter = true;
                self.pos += 3;
            } else if rest.starts_with(b"{{") {
                if self.depth == 0 {
                    self.start = i;
                }
                self.depth += 2;
                self.pos += 2;
            } else if rest.starts_with(b"}}") {
                self.pos += 2;
                match self.depth {
                    0 => {}
                    2 => {
                        self.depth = 0;
                        return Some(self.emit(i + 2));
                    }
                    _ => self.depth -= 2,
                }
            } else {
                if rest[0] == b'|' && self.depth > 2 {
                    self.escape(i);
                }
                self.pos += 1;
            }
        }

        None
    }
}
