use serde::{Deserialize, Serialize};

use crate::Delimiters;


/// Nesting of partials and lambda expansions allowed by default.
pub const DEFAULT_RECURSION_LIMIT: usize = 64;

/// What to do when a template includes a partial the store does not have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPartial {
    /// Render the partial as an empty string.
    #[default]
    Empty,
    /// Fail with [`Error::MissingPartial`](crate::Error::MissingPartial).
    Error,
}

/// Render settings.
///
/// Every field has a default, so a configuration file only names what it
/// changes:
///
/// ```
/// use mustachio::{Delimiters, MissingPartial, RenderOptions};
///
/// let options: RenderOptions = serde_yaml::from_str(r#"
///   delimiters: ["<%", "%>"]
///   missing_partial: error
/// "#).unwrap();
///
/// assert_eq!(options.delimiters, Delimiters::new("<%", "%>"));
/// assert_eq!(options.missing_partial, MissingPartial::Error);
/// assert_eq!(options.recursion_limit, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Delimiters a template starts with.
    pub delimiters: Delimiters,
    pub recursion_limit: usize,
    pub missing_partial: MissingPartial,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            delimiters: Delimiters::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            missing_partial: MissingPartial::default(),
        }
    }
}

impl RenderOptions {
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_missing_partial(mut self, policy: MissingPartial) -> Self {
        self.missing_partial = policy;
        self
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.delimiters, Delimiters::default());
        assert_eq!(options.recursion_limit, DEFAULT_RECURSION_LIMIT);
        assert_eq!(options.missing_partial, MissingPartial::Empty);
    }

    #[test]
    fn from_json() {
        let options: RenderOptions = serde_json::from_str(r#"{"recursion_limit": 3}"#).unwrap();
        assert_eq!(options, RenderOptions::default().with_recursion_limit(3));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(serde_json::from_str::<RenderOptions>(r#"{"limit": 3}"#).is_err());
    }

    #[test]
    fn builder() {
        let options = RenderOptions::default()
            .with_delimiters(Delimiters::new("[[", "]]"))
            .with_missing_partial(MissingPartial::Error);
        assert_eq!(options.delimiters.open, "[[");
        assert_eq!(options.missing_partial, MissingPartial::Error);
    }
}
