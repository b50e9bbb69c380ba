use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SyntaxError;

/// An open/close delimiter pair, `{{` and `}}` unless changed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    pub fn new(open: &str, close: &str) -> Self {
        Delimiters {
            open: open.to_owned(),
            close: close.to_owned(),
        }
    }

    /// Parse the body of a `{{=<open> <close>=}}` tag.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let words = text.split_whitespace().collect::<Vec<_>>();
        match words.as_slice() {
            [open, close] => Some(Delimiters::new(open, close)),
            _ => None,
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters::new("{{", "}}")
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.open, self.close)
    }
}

impl From<(String, String)> for Delimiters {
    fn from((open, close): (String, String)) -> Self {
        Delimiters { open, close }
    }
}

impl From<(&str, &str)> for Delimiters {
    fn from((open, close): (&str, &str)) -> Self {
        Delimiters::new(open, close)
    }
}

impl From<Delimiters> for (String, String) {
    fn from(delimiters: Delimiters) -> Self {
        (delimiters.open, delimiters.close)
    }
}


/// Tag patterns already built, keyed by delimiter pair.
static PATTERNS: LazyLock<RwLock<HashMap<Delimiters, Regex>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Return the pattern matching any tag under `delimiters`.
///
/// Captures are the prefix sigil, the trimmed expression and the suffix
/// sigil, each possibly empty.
pub(crate) fn tag_pattern(delimiters: &Delimiters) -> Result<Regex, SyntaxError> {
    if delimiters.open.is_empty() || delimiters.close.is_empty() {
        return Err(SyntaxError::EmptyDelimiter {
            open: delimiters.open.clone(),
            close: delimiters.close.clone(),
        });
    }

    {
        let patterns = PATTERNS.read();
        if let Some(pattern) = patterns.get(delimiters) {
            return Ok(pattern.clone());
        }
    }

    let source = format!(
        r"(?s){}([#^>&{{/!=]?)\s*(.*?)\s*([}}=]?){}",
        regex::escape(&delimiters.open),
        regex::escape(&delimiters.close)
    );
    let pattern = Regex::new(&source).map_err(|err| SyntaxError::Pattern(err.to_string()))?;

    PATTERNS
        .write()
        .entry(delimiters.clone())
        .or_insert(pattern.clone());
    Ok(pattern)
}
