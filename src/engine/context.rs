//! Evaluation context and the per-pass span view.
//!
//! A committed pass never mutates the [`ExpansionSpan`] it started from.
//! Instead, additions accumulate in a [`Pass`] and are merged when the pass
//! ends (snapshot-and-diff). Predicates see membership through a
//! [`SpanView`], which is the committed snapshot plus whatever the current
//! pass has already added, so growth is visible to later anchors of the same
//! pass.
//!
//! ```text
//! committed span (immutable)  ──┐
//!                               ├─ SpanView ──▶ predicates / selectors
//! pass.pending (grows)        ──┘
//!                                     │
//!                pass end: span.merge(pending)
//! ```

use std::collections::BTreeSet;

use crate::{DependencyTree, ExpansionSpan};

/// Read-only membership view: committed snapshot ∪ pending additions.
#[derive(Debug, Clone, Copy)]
pub struct SpanView<'a> {
    committed: &'a ExpansionSpan,
    pending: &'a BTreeSet<usize>,
}

impl<'a> SpanView<'a> {
    pub fn new(committed: &'a ExpansionSpan, pending: &'a BTreeSet<usize>) -> Self {
        SpanView { committed, pending }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.committed.contains(index) || self.pending.contains(&index)
    }

    /// All members in ascending order.
    pub fn members(&self) -> Vec<usize> {
        let mut all: Vec<usize> = self.committed.iter().chain(self.pending.iter().copied()).collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}

/// Transient state for one predicate or selector evaluation.
///
/// `here` is the token being tested. `previous` is the token the last selector
/// hop came from, if the evaluation happens inside a selector.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub tree: &'a DependencyTree,
    pub span: SpanView<'a>,
    pub here: usize,
    pub previous: Option<usize>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(tree: &'a DependencyTree, span: SpanView<'a>, here: usize) -> Self {
        EvaluationContext { tree, span, here, previous: None }
    }

    /// Same tree and span, focused on `here`, reached from `previous`.
    pub fn hop(&self, here: usize, previous: usize) -> Self {
        EvaluationContext { tree: self.tree, span: self.span, here, previous: Some(previous) }
    }

    /// Same tree and span, focused on `here` with no hop origin.
    pub fn at(&self, here: usize) -> Self {
        EvaluationContext { tree: self.tree, span: self.span, here, previous: None }
    }
}

/// Mutable state of one committed pass.
#[derive(Debug)]
pub(crate) struct Pass<'a> {
    pub(crate) tree: &'a DependencyTree,
    committed: &'a ExpansionSpan,
    pending: BTreeSet<usize>,
}

impl<'a> Pass<'a> {
    pub(crate) fn new(tree: &'a DependencyTree, committed: &'a ExpansionSpan) -> Self {
        Pass { tree, committed, pending: BTreeSet::new() }
    }

    pub(crate) fn view(&self) -> SpanView<'_> {
        SpanView::new(self.committed, &self.pending)
    }

    pub(crate) fn context(&self, here: usize) -> EvaluationContext<'_> {
        EvaluationContext::new(self.tree, self.view(), here)
    }

    /// Number of indices added so far in this pass.
    pub(crate) fn added(&self) -> usize {
        self.pending.len()
    }

    /// Add candidates that are not yet members; returns the new ones.
    pub(crate) fn extend(&mut self, candidates: &[usize]) -> Vec<usize> {
        let mut fresh = Vec::new();
        for &index in candidates {
            if !self.committed.contains(index) && self.pending.insert(index) {
                fresh.push(index);
            }
        }
        fresh
    }

    pub(crate) fn into_additions(self) -> BTreeSet<usize> {
        self.pending
    }
}
