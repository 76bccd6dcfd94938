//! Declarative span expansion over dependency parse trees.
//!
//! Given a parsed sentence and a set of seed entity mentions, the engine grows
//! each mention into a larger, linguistically coherent token span by applying
//! composable structural/lexical rules until a fixpoint is reached.
//!
//! ```
//! use depspan::{Entity, Options, conll, expand_with};
//!
//! let (tree, _) = conll::parse_sentence(
//!     "1\tthe\tthe\tDT\t2\tdet\n\
//!      2\tcat\tcat\tNN\t0\troot",
//! )
//! .unwrap();
//! let span = expand_with(&tree, &Entity::new(1, 2, "ANIMAL"), &Options::strategy("U")).unwrap();
//! assert_eq!(span.text(&tree), "the cat");
//! ```

use std::collections::BTreeSet;

#[macro_use]
mod macros;
mod api;
pub mod conll;
pub mod engine;
mod error;
pub mod rules;
pub mod strategy;
mod tree;

pub use api::{
    ExpandedSpan, ExpansionDetails, ExpansionResultVerbose, Options, PassSummary, expand, expand_all, expand_in,
    expand_verbose_with, expand_with,
};
pub use engine::{ExpansionRule, Expander, Outcome, Position, Predicate, Selector, TextPredicate};
pub use error::{ExpansionError, Result, SentenceId};
pub use strategy::{RuleGroups, Strategy, StrategyRegistry};
pub use tree::{DependencyTree, TreeBuilder};

// --- Tokens and edges --------------------------------------------------------

/// A labeled dependency edge. On an outgoing edge `target` is the child, on an
/// incoming edge it is the parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub label: String,
    pub target: usize,
}

/// One token of a parsed sentence. Tokens are owned by a [`DependencyTree`]
/// and never change once the tree is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Zero-based position in the sentence (surface order).
    pub index: usize,
    pub text: String,
    pub lemma: String,
    /// Part-of-speech tag (e.g. `NN`, `VBD`, `TO`).
    pub tag: String,
    pub entity_type: Option<String>,
    /// Outgoing edges, in surface order of the child.
    pub children: Vec<Edge>,
    /// Incoming edge; `None` only for the root.
    pub parent: Option<Edge>,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// --- Entities and ranges -----------------------------------------------------

/// Half-open token range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start token index (inclusive).
    pub start: usize,
    /// End token index (exclusive).
    pub end: usize,
}

impl Range {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// A labeled seed mention, produced by an external recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    pub range: Range,
    pub label: String,
}

impl Entity {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Entity { range: Range { start, end }, label: label.into() }
    }
}

// --- ExpansionSpan: the monotone set threaded through one run ---------------

/// The growing set of token indices for one entity during one strategy run.
///
/// The set only ever grows: there is no removal API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSpan {
    members: BTreeSet<usize>,
}

impl ExpansionSpan {
    pub fn empty() -> Self {
        ExpansionSpan { members: BTreeSet::new() }
    }

    /// Span holding exactly the entity's own tokens.
    pub fn from_entity(entity: &Entity) -> Self {
        ExpansionSpan { members: entity.range.indices().collect() }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending (surface) order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.members.insert(index)
    }

    /// Merge a batch of additions; returns how many were new.
    pub fn merge(&mut self, additions: impl IntoIterator<Item = usize>) -> usize {
        let before = self.members.len();
        self.members.extend(additions);
        self.members.len() - before
    }

    pub fn is_superset(&self, other: &ExpansionSpan) -> bool {
        self.members.is_superset(&other.members)
    }

    /// `(min_index, max_index)`, both inclusive.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        Some((*self.members.first()?, *self.members.last()?))
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl FromIterator<usize> for ExpansionSpan {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        ExpansionSpan { members: iter.into_iter().collect() }
    }
}
