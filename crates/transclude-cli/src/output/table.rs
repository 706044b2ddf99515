//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use transclude::{Invocation, Section};
use unicode_segmentation::UnicodeSegmentation;

/// Widest cell rendered before truncation, in graphemes.
const MAX_CELL: usize = 48;

/// Format invocations as a table, one row per invocation.
pub fn format_templates_table(invocations: &[Invocation]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Offset", "Level", "Name", "Arguments"]);

    for invocation in invocations {
        let arguments = invocation
            .arguments
            .iter()
            .map(|arg| format!("{}={}", arg.name, arg.value))
            .collect::<Vec<_>>()
            .join(" | ");
        table.add_row(vec![
            invocation.offset.to_string(),
            invocation.nestlevel.to_string(),
            truncate(&invocation.name),
            truncate(&arguments),
        ]);
    }

    table
}

/// Format sections as a table, one row per section.
pub fn format_sections_table(sections: &[Section]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Index", "Level", "Title", "Deepest", "Bytes"]);

    for section in sections {
        let deepest = match section.deepest {
            Some(true) => "yes",
            Some(false) => "no",
            None => "",
        };
        table.add_row(vec![
            section.index.to_string(),
            section.level.to_string(),
            truncate(section.title.as_deref().unwrap_or("(top)")),
            deepest.to_string(),
            section.content.len().to_string(),
        ]);
    }

    table
}

/// Shorten `text` to [`MAX_CELL`] graphemes, marking the cut with an
/// ellipsis. Newlines are shown as `⏎` so one invocation stays on one row.
fn truncate(text: &str) -> String {
    let flat = text.replace('\n', "⏎");
    let graphemes: Vec<&str> = flat.graphemes(true).collect();
    if graphemes.len() <= MAX_CELL {
        return flat;
    }
    let mut short = graphemes[..MAX_CELL - 1].concat();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept() {
        assert_eq!(truncate("Pp-move"), "Pp-move");
        assert_eq!(truncate("a\nb"), "a⏎b");
    }

    #[test]
    fn long_text_is_cut_on_grapheme_boundaries() {
        let text = "e\u{301}".repeat(60);
        let short = truncate(&text);
        assert_eq!(short.graphemes(true).count(), MAX_CELL);
        assert!(short.ends_with("e\u{301}…"));
    }
}
