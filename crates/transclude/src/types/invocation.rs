use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::parser::canonical_name;

/// A template invocation found in page text.
///
/// Invocations are plain computed values: every field is owned, and nothing
/// refers back to the parser that produced them.
///
/// # Example
///
/// ```
/// use transclude::parse_templates;
///
/// let found = parse_templates("{{Pp|small=yes}}");
/// assert_eq!(found[0].name, "Pp");
/// assert_eq!(found[0].value("small"), Some("yes"));
/// assert_eq!(found[0].nestlevel, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// The exact source span, both brace pairs included.
    pub text: String,

    /// Canonical name: namespace prefix stripped, first letter upper-cased,
    /// spaces replaced by underscores.
    pub name: String,

    /// Arguments in source order.
    pub arguments: Vec<Argument>,

    /// Zero for an invocation not enclosed by another, otherwise one more
    /// than the enclosing invocation.
    pub nestlevel: usize,

    /// Byte offset of `text` in the string given to the top-level parse.
    pub offset: usize,
}

impl Invocation {
    /// Byte range of this invocation in the parsed string.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// The text between the outer brace pairs.
    pub fn body(&self) -> &str {
        self.text
            .strip_prefix("{{")
            .and_then(|t| t.strip_suffix("}}"))
            .unwrap_or(&self.text)
    }

    /// Returns the argument with the given name.
    ///
    /// When a name is repeated the last occurrence wins, matching how the
    /// wiki resolves duplicate arguments.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().rev().find(|a| a.name == name)
    }

    /// Returns the value of the argument with the given name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.argument(name).map(|a| a.value.as_str())
    }

    /// Returns the value of the `index`th positional argument (1-based).
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.value(&index.to_string())
    }

    /// Checks whether this invocation calls `name`, comparing canonical forms.
    pub fn is_named(&self, name: &str) -> bool {
        self.name == canonical_name(name)
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}

/// A single argument of an [`Invocation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// The raw segment between separators, untrimmed.
    pub text: String,

    /// The explicit key, or the implicit 1-based position for positional
    /// arguments.
    pub name: String,

    /// The text after `=` for named arguments, otherwise the whole trimmed
    /// segment.
    pub value: String,
}
