//! Strategy executor.
//!
//! [`Expander`] runs one strategy's composite rule for one seed and returns
//! the stabilized span. It is the operational core of the crate:
//!
//! ```text
//! seed span ──▶ pass 1 ──▶ merge ──▶ pass 2 ──▶ merge ──▶ ... ──▶ pass n (adds nothing)
//!                 │                    │
//!                 └─ rule reads snapshot + pass-local additions
//! ```
//!
//! A strategy of the shape `repeat_until_expansion_is_stable(body)` is run
//! as a sequence of committed passes of `body`; anything else is a single
//! pass. Each pass adds at least one index or ends the run, and a span can
//! never exceed the sentence length, so a run commits at most `len + 1`
//! passes.

use std::time::Instant;

use super::context::Pass;
use super::metrics::{PassMetrics, RunMetrics, RunResult};
use super::rule::ExpansionRule;
use crate::error::{ExpansionError, Result};
use crate::strategy::Strategy;
use crate::{DependencyTree, Entity, ExpansionSpan};

#[derive(Debug, Clone, Copy)]
pub struct Expander<'a> {
    tree: &'a DependencyTree,
    strategy: &'a Strategy,
}

impl<'a> Expander<'a> {
    pub fn new(tree: &'a DependencyTree, strategy: &'a Strategy) -> Self {
        Expander { tree, strategy }
    }

    /// Expand `entity` to its stable span.
    pub fn run(&self, entity: &Entity) -> Result<ExpansionSpan> {
        Ok(self.run_with_metrics(entity)?.span)
    }

    pub fn run_with_metrics(&self, entity: &Entity) -> Result<RunResult> {
        self.tree.check_entity(entity)?;
        Ok(self.saturate(ExpansionSpan::from_entity(entity)))
    }

    /// Expand from an arbitrary seed set, e.g. a previous run's output.
    pub fn run_from(&self, seed: ExpansionSpan) -> Result<ExpansionSpan> {
        Ok(self.run_from_with_metrics(seed)?.span)
    }

    pub fn run_from_with_metrics(&self, seed: ExpansionSpan) -> Result<RunResult> {
        let len = self.tree.len();
        if let Some(index) = seed.iter().find(|&i| i >= len) {
            return Err(ExpansionError::IndexOutOfRange { sentence: self.tree.id().clone(), index, len });
        }
        if seed.is_empty() {
            return Err(ExpansionError::EmptyEntity { sentence: self.tree.id().clone(), start: 0 });
        }
        Ok(self.saturate(seed))
    }

    fn saturate(&self, mut span: ExpansionSpan) -> RunResult {
        let start = Instant::now();
        let (body, repeat) = fixpoint_body(self.strategy.rule());
        let mut metrics = RunMetrics::default();

        loop {
            let pass_start = Instant::now();
            let additions = {
                let mut pass = Pass::new(self.tree, &span);
                self.apply_root(body, &mut pass);
                pass.into_additions()
            };
            let added: Vec<usize> = additions.into_iter().collect();
            span.merge(added.iter().copied());

            let number = metrics.passes.len() + 1;
            tracing::debug!(pass = number, produced = added.len(), "expansion pass committed");
            let stable = added.is_empty();
            metrics.passes.push(PassMetrics { pass: number, duration: pass_start.elapsed(), added });

            if stable || !repeat {
                break;
            }
        }

        debug_assert!(metrics.passes.len() <= self.tree.len() + 1);
        metrics.total = start.elapsed();
        tracing::debug!(
            strategy = self.strategy.key(),
            sentence = %self.tree.id(),
            passes = metrics.passes.len(),
            size = span.len(),
            "expansion stable"
        );
        RunResult { span, metrics }
    }

    /// Apply `rule` for one pass: span-scoped rules pick their own anchors,
    /// anchored rules run once per member.
    fn apply_root(&self, rule: &ExpansionRule, pass: &mut Pass<'_>) {
        if rule.is_span_scoped() {
            rule.apply(pass, self.tree.root());
            return;
        }
        let anchors = pass.view().members();
        for anchor in anchors {
            rule.apply(pass, anchor);
        }
    }
}

/// Split `repeat_until_expansion_is_stable(body)` into `(body, true)`.
fn fixpoint_body(rule: &ExpansionRule) -> (&ExpansionRule, bool) {
    match rule {
        ExpansionRule::RepeatUntilStable(body) => (body.as_ref(), true),
        ExpansionRule::Named { rule, .. } => fixpoint_body(rule),
        other => (other, false),
    }
}
