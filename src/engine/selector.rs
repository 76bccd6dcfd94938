//! Selector language: navigate one or two labeled edges from a token.
//!
//! A selector is a deterministic function of the tree, the span view and an
//! origin token. Results follow the tree's stored edge order and contain no
//! duplicates.

use super::context::EvaluationContext;
use super::predicate::{Predicate, TextPredicate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Child { edge: TextPredicate, node: Option<Predicate> },
    Parent { edge: TextPredicate, node: Option<Predicate> },
    GrandChild { first: TextPredicate, second: TextPredicate, node: Option<Predicate> },
}

impl Selector {
    /// Restrict the final token of this selector with `pred`. The predicate
    /// sees the token the last hop came from as `previous`. Calling it twice
    /// conjoins both filters.
    pub fn filter(self, pred: Predicate) -> Self {
        let merge = |existing: Option<Predicate>| Some(existing.map_or(pred.clone(), |e| e.and(pred.clone())));
        match self {
            Selector::Child { edge, node } => Selector::Child { edge, node: merge(node) },
            Selector::Parent { edge, node } => Selector::Parent { edge, node: merge(node) },
            Selector::GrandChild { first, second, node } => Selector::GrandChild { first, second, node: merge(node) },
        }
    }

    /// Candidates reachable from `ctx.here`.
    pub fn select(&self, ctx: &EvaluationContext<'_>) -> Vec<usize> {
        let origin = ctx.here;
        let mut found = Vec::new();
        match self {
            Selector::Child { edge, node } => {
                for e in ctx.tree.children(origin) {
                    if edge.matches(&e.label) && accepts(node, ctx, e.target, origin) {
                        push_unique(&mut found, e.target);
                    }
                }
            }
            Selector::Parent { edge, node } => {
                if let Some(e) = ctx.tree.parent(origin) {
                    if edge.matches(&e.label) && accepts(node, ctx, e.target, origin) {
                        found.push(e.target);
                    }
                }
            }
            Selector::GrandChild { first, second, node } => {
                for mid in ctx.tree.children(origin).iter().filter(|e| first.matches(&e.label)) {
                    for e in ctx.tree.children(mid.target) {
                        if second.matches(&e.label) && accepts(node, ctx, e.target, mid.target) {
                            push_unique(&mut found, e.target);
                        }
                    }
                }
            }
        }
        found
    }
}

fn accepts(node: &Option<Predicate>, ctx: &EvaluationContext<'_>, candidate: usize, from: usize) -> bool {
    node.as_ref().is_none_or(|p| p.eval(&ctx.hop(candidate, from)))
}

fn push_unique(found: &mut Vec<usize>, index: usize) {
    if !found.contains(&index) {
        found.push(index);
    }
}
