//! Error taxonomy.
//!
//! Only two kinds of failure ever reach a caller: a malformed input (tree or
//! entity) and a configuration mistake (unknown strategy or rule). A rule that
//! finds nothing to add is ordinary control flow inside the engine and is
//! represented by [`crate::engine::Outcome::NoMatch`], never by an error.

use std::fmt;

use thiserror::Error;

/// Identifier of the sentence a tree was built from, used in diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SentenceId(pub Option<String>);

impl SentenceId {
    pub fn new(id: impl Into<String>) -> Self {
        SentenceId(Some(id.into()))
    }

    pub fn anonymous() -> Self {
        SentenceId(None)
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(id) => f.write_str(id),
            None => f.write_str("<anonymous>"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("sentence {sentence}: tree has no root")]
    NoRoot { sentence: SentenceId },

    #[error("sentence {sentence}: tree has {} roots ({roots:?}), expected one", .roots.len())]
    MultipleRoots { sentence: SentenceId, roots: Vec<usize> },

    #[error("sentence {sentence}: token {index} lies on a cycle")]
    Cycle { sentence: SentenceId, index: usize },

    #[error("sentence {sentence}: token {index} has more than one head")]
    MultipleHeads { sentence: SentenceId, index: usize },

    #[error("sentence {sentence}: token {index} is attached to itself")]
    SelfLoop { sentence: SentenceId, index: usize },

    #[error("sentence {sentence}: index {index} is out of range for {len} tokens")]
    IndexOutOfRange { sentence: SentenceId, index: usize, len: usize },

    #[error("sentence {sentence}: entity {start}..{end} is out of range for {len} tokens")]
    EntityOutOfRange { sentence: SentenceId, start: usize, end: usize, len: usize },

    #[error("sentence {sentence}: entity starting at {start} is empty")]
    EmptyEntity { sentence: SentenceId, start: usize },

    #[error("unknown expansion strategy '{key}'")]
    UnknownStrategy { key: String },

    #[error("unknown expansion rule '{name}'")]
    UnknownRule { name: String },

    #[error("expansion strategy '{key}' is already registered")]
    DuplicateStrategy { key: String },

    #[error("conll line {line}: {message}")]
    Conll { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, ExpansionError>;
