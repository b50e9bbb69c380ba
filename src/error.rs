use thiserror::Error;

/// Errors raised while compiling template source into a node tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("empty delimiter in pair ({open:?}, {close:?})")]
    EmptyDelimiter { open: String, close: String },

    #[error("invalid delimiter definition: {tag}")]
    InvalidDelimiters { tag: String },

    #[error("malformed tag: {tag}")]
    MalformedTag { tag: String },

    #[error("unknown tag: {tag}")]
    UnknownTag { tag: String },

    #[error("section `{expected}` closed by {tag}")]
    MismatchedSection { expected: String, tag: String },

    #[error("closing tag {tag} has no open section")]
    UnopenedSection { tag: String },

    #[error("unclosed section `{name}`")]
    UnclosedSection { name: String },

    #[error("invalid tag pattern: {0}")]
    Pattern(String),
}

/// Errors raised while rendering.
///
/// Rendering re-enters the compiler for partials and lambda output, so
/// a [`SyntaxError`] may surface here too.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("partial `{name}` not found")]
    MissingPartial { name: String },

    #[error("recursion limit of {limit} exceeded")]
    RecursionLimit { limit: usize },
}
