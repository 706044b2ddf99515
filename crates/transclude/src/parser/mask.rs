//! Reversible masking of comments and verbatim regions.

use std::ops::Range;

use super::markup::Region;

/// Start of a placeholder; followed by the decimal region index.
pub const PLACEHOLDER_OPEN: &str = "\u{7f}MASK-";
/// End of a placeholder.
pub const PLACEHOLDER_CLOSE: &str = "-\u{7f}";

/// One masked region, recorded in the order it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedRegion {
    /// What kind of region this is.
    pub kind: Region,
    /// Byte range of the region in the source text.
    pub source: Range<usize>,
    /// Byte range of the placeholder in the masked text.
    pub masked: Range<usize>,
}

/// Page text with every comment and verbatim region replaced by a short
/// placeholder.
///
/// The displaced text is kept in an arena indexed by the number embedded in
/// each placeholder, so it can be put back once header- or brace-sensitive
/// work on the masked text is done. Masking does not recurse: a comment inside
/// `<nowiki>` is part of the `<nowiki>` region.
///
/// # Example
///
/// ```
/// use transclude::MaskedText;
///
/// let masked = MaskedText::new("a <!-- {{x}} --> b");
/// assert!(!masked.as_str().contains("{{x}}"));
/// assert_eq!(masked.unmask(masked.as_str()), "a <!-- {{x}} --> b");
/// ```
#[derive(Debug, Clone)]
pub struct MaskedText<'t> {
    source: &'t str,
    masked: String,
    regions: Vec<MaskedRegion>,
}

impl<'t> MaskedText<'t> {
    /// Masks `source` in one left-to-right scan.
    ///
    /// A region that is never closed extends to the end of the text.
    pub fn new(source: &'t str) -> Self {
        let bytes = source.as_bytes();
        let mut masked = String::with_capacity(source.len());
        let mut regions = Vec::new();
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'<' {
                i += 1;
                continue;
            }
            let Some((kind, open_len)) = Region::open_at(&source[i..]) else {
                i += 1;
                continue;
            };
            let end = kind.end_from(source, i + open_len);

            masked.push_str(&source[copied..i]);
            let start = masked.len();
            masked.push_str(PLACEHOLDER_OPEN);
            masked.push_str(&regions.len().to_string());
            masked.push_str(PLACEHOLDER_CLOSE);
            regions.push(MaskedRegion {
                kind,
                source: i..end,
                masked: start..masked.len(),
            });

            copied = end;
            i = end;
        }
        masked.push_str(&source[copied..]);

        Self {
            source,
            masked,
            regions,
        }
    }

    /// The masked text.
    pub fn as_str(&self) -> &str {
        &self.masked
    }

    /// The original text.
    pub fn source(&self) -> &'t str {
        self.source
    }

    /// The masked regions in source order.
    pub fn regions(&self) -> &[MaskedRegion] {
        &self.regions
    }

    /// The displaced source text of region `index`.
    pub fn region_text(&self, index: usize) -> Option<&'t str> {
        self.regions
            .get(index)
            .map(|region| &self.source[region.source.clone()])
    }

    /// Maps a byte offset in the masked text back to the source text.
    ///
    /// `pos` must not fall strictly inside a placeholder.
    pub fn source_offset(&self, pos: usize) -> usize {
        let (source_len, masked_len) = self
            .regions
            .iter()
            .take_while(|region| region.masked.end <= pos)
            .fold((0, 0), |(s, m), region| {
                (s + region.source.len(), m + region.masked.len())
            });
        pos + source_len - masked_len
    }

    /// Restores every placeholder in `masked`, which may be any text derived
    /// from [`MaskedText::as_str`].
    pub fn unmask(&self, masked: &str) -> String {
        self.unmask_with(masked, |_| true)
    }

    /// Restores placeholders whose region satisfies `keep` and drops the rest.
    pub fn unmask_with(&self, masked: &str, keep: impl Fn(Region) -> bool) -> String {
        let mut out = String::with_capacity(masked.len());
        let mut rest = masked;

        while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
            out.push_str(&rest[..open]);
            let after = &rest[open + PLACEHOLDER_OPEN.len()..];
            let placeholder = after.find(PLACEHOLDER_CLOSE).and_then(|close| {
                let index = after[..close].parse::<usize>().ok()?;
                let region = self.regions.get(index)?;
                Some((region, close + PLACEHOLDER_CLOSE.len()))
            });
            match placeholder {
                Some((region, len)) => {
                    if keep(region.kind) {
                        out.push_str(&self.source[region.source.clone()]);
                    }
                    rest = &after[len..];
                }
                None => {
                    out.push_str(PLACEHOLDER_OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_records_regions_in_order() {
        let text = "x<!--a-->y<nowiki>{{b}}</nowiki>z";
        let masked = MaskedText::new(text);
        assert_eq!(masked.regions().len(), 2);
        assert_eq!(masked.region_text(0), Some("<!--a-->"));
        assert_eq!(masked.region_text(1), Some("<nowiki>{{b}}</nowiki>"));
        assert_eq!(masked.regions()[1].kind, Region::Verbatim("nowiki"));
        assert_eq!(
            masked.as_str(),
            format!("x{PLACEHOLDER_OPEN}0{PLACEHOLDER_CLOSE}y{PLACEHOLDER_OPEN}1{PLACEHOLDER_CLOSE}z")
        );
    }

    #[test]
    fn offsets_map_back_to_source() {
        let text = "ab<!-- long comment -->cd";
        let masked = MaskedText::new(text);
        let c = masked.as_str().find('c').unwrap();
        assert_eq!(masked.source_offset(c), text.find('c').unwrap());
        assert_eq!(masked.source_offset(1), 1);
    }

    #[test]
    fn unmask_with_drops_rejected_regions() {
        let masked = MaskedText::new("A <!--c--> <nowiki>n</nowiki>");
        let restored = masked.unmask_with(masked.as_str(), |kind| kind != Region::Comment);
        assert_eq!(restored, "A  <nowiki>n</nowiki>");
    }

    #[test]
    fn unterminated_comment_masks_to_end() {
        let masked = MaskedText::new("a <!-- b\n== c ==");
        assert_eq!(masked.regions()[0].source, 2..16);
        assert!(!masked.as_str().contains("=="));
    }
}
