//! Classification of argument segments.

use crate::types::Argument;

/// The `{{=}}` magic word, which renders a literal `=` and must not be taken
/// for the key/value separator.
pub(crate) const EQUALS_MACRO: &str = "{{=}}";

/// Turns the argument segments of one invocation (the name segment already
/// removed) into arguments.
///
/// A segment with an `=` is named; one without is positional and takes the
/// next implicit index, starting at 1. An explicit key only advances the
/// implicit counter when it equals the counter's current value, so
/// `{{x|1=a|b}}` yields two arguments named `"1"`.
pub(crate) fn parse_arguments<'t>(segments: impl IntoIterator<Item = &'t str>) -> Vec<Argument> {
    let mut positional = 0usize;
    let mut arguments = Vec::new();

    for segment in segments {
        let trimmed = segment.trim();
        let (name, value) = match separator(trimmed) {
            Some(eq) => {
                let name = trimmed[..eq].trim();
                if name == positional.to_string() {
                    positional += 1;
                }
                (name.to_string(), trimmed[eq + 1..].trim())
            }
            None => {
                positional += 1;
                (positional.to_string(), trimmed)
            }
        };
        arguments.push(Argument {
            text: segment.to_string(),
            name,
            value: value.to_string(),
        });
    }

    arguments
}

/// Offset of the first `=` that is not part of an `{{=}}` token.
fn separator(segment: &str) -> Option<usize> {
    segment
        .match_indices('=')
        .map(|(i, _)| i)
        .find(|&i| !is_equals_macro(segment, i))
}

fn is_equals_macro(segment: &str, eq: usize) -> bool {
    let start = eq.saturating_sub(2);
    segment
        .get(start..eq + 3)
        .is_some_and(|token| token == EQUALS_MACRO)
}
