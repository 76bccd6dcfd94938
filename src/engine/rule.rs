//! Rule combinators.
//!
//! An [`ExpansionRule`] is a closed expression tree interpreted against a
//! [`Pass`]. Every application either matches (and may add indices) or
//! reports [`Outcome::NoMatch`]. A no-match is control flow for `Try`,
//! `Sequence` and `TryAll`, never an error.
//!
//! Each application also reports a focus: the tokens it landed on. In
//! `a >> b`, `b` runs from every token of `a`'s focus, which is how
//! `first >> try(second) >> try(third)` walks one tree level per step.
//!
//! Anchored rules (`ExpandTo`, `OnlyWhen`, ...) act on one anchor token.
//! Span-scoped rules (`ForEachSpanLocation`, `RepeatUntilStable`) ignore the
//! anchor they are given and derive anchors from the span itself.

use super::context::Pass;
use super::predicate::Predicate;
use super::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NoMatch,
}

impl Outcome {
    pub fn is_match(self) -> bool {
        self == Outcome::Matched
    }

    fn either(a: Outcome, b: Outcome) -> Outcome {
        if a.is_match() || b.is_match() { Outcome::Matched } else { Outcome::NoMatch }
    }
}

/// Result of one rule application: the outcome plus its focus, the tokens
/// the rule landed on. A sequence continues from the focus of its first step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) outcome: Outcome,
    pub(crate) focus: Vec<usize>,
}

impl Step {
    fn no_match() -> Self {
        Step { outcome: Outcome::NoMatch, focus: Vec::new() }
    }

    fn matched(focus: Vec<usize>) -> Self {
        Step { outcome: Outcome::Matched, focus }
    }

    /// Fold `other` into `self`: outcomes combine with `either`, foci of
    /// matching steps are unioned in order.
    fn absorb(&mut self, other: Step) {
        if other.outcome.is_match() {
            for index in other.focus {
                if !self.focus.contains(&index) {
                    self.focus.push(index);
                }
            }
        }
        self.outcome = Outcome::either(self.outcome, other.outcome);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionRule {
    /// The span stays as it is.
    Identity,
    /// Add every candidate of the selector; no-match when it finds none.
    ExpandTo(Selector),
    /// Re-run the selector from the same anchor until nothing new is added.
    ExpandToRecursively(Selector),
    /// Evaluate `rule` only when `guard` holds at the anchor.
    OnlyWhen { guard: Predicate, rule: Box<ExpansionRule> },
    /// Always matches; keeps whatever the inner rule added.
    Try(Box<ExpansionRule>),
    /// The second rule runs from the first rule's focus (or the anchor when
    /// the first selected nothing); matches when either did.
    Sequence(Box<ExpansionRule>, Box<ExpansionRule>),
    /// Each rule runs in order regardless of the others.
    TryAll(Vec<ExpansionRule>),
    /// Apply the rule once per span member captured at entry.
    ForEachSpanLocation(Box<ExpansionRule>),
    /// Repeat the rule until an iteration adds nothing.
    RepeatUntilStable(Box<ExpansionRule>),
    /// Transparent label used in traces.
    Named { name: &'static str, rule: Box<ExpansionRule> },
}

impl ExpansionRule {
    /// `self >> next`.
    pub fn and_then(self, next: ExpansionRule) -> ExpansionRule {
        ExpansionRule::Sequence(Box::new(self), Box::new(next))
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            ExpansionRule::Named { name, .. } => Some(*name),
            _ => None,
        }
    }

    /// True when the rule derives its own anchors from the span.
    pub fn is_span_scoped(&self) -> bool {
        match self {
            ExpansionRule::ForEachSpanLocation(_) | ExpansionRule::RepeatUntilStable(_) => true,
            ExpansionRule::Named { rule, .. } => rule.is_span_scoped(),
            _ => false,
        }
    }

    pub(crate) fn apply(&self, pass: &mut Pass<'_>, anchor: usize) -> Step {
        match self {
            ExpansionRule::Identity => Step::matched(vec![anchor]),
            ExpansionRule::ExpandTo(selector) => expand_once(selector, pass, anchor).0,
            ExpansionRule::ExpandToRecursively(selector) => {
                let (mut step, mut fresh) = expand_once(selector, pass, anchor);
                while fresh > 0 {
                    let (next, added) = expand_once(selector, pass, anchor);
                    step.absorb(next);
                    fresh = added;
                }
                step
            }
            ExpansionRule::OnlyWhen { guard, rule } => {
                if guard.eval(&pass.context(anchor)) {
                    rule.apply(pass, anchor)
                } else {
                    Step::no_match()
                }
            }
            ExpansionRule::Try(rule) => {
                let step = rule.apply(pass, anchor);
                if step.outcome.is_match() { step } else { Step::matched(vec![anchor]) }
            }
            ExpansionRule::Sequence(first, second) => {
                let head = first.apply(pass, anchor);
                let targets = if head.focus.is_empty() { vec![anchor] } else { head.focus.clone() };
                let mut tail = Step::no_match();
                for target in targets {
                    tail.absorb(second.apply(pass, target));
                }
                if tail.outcome.is_match() {
                    tail
                } else {
                    head
                }
            }
            ExpansionRule::TryAll(rules) => {
                let mut step = Step::no_match();
                for rule in rules {
                    step.absorb(rule.apply(pass, anchor));
                }
                step
            }
            ExpansionRule::ForEachSpanLocation(rule) => {
                let anchors = pass.view().members();
                let mut step = Step::no_match();
                for a in anchors {
                    step.absorb(rule.apply(pass, a));
                }
                step
            }
            ExpansionRule::RepeatUntilStable(rule) => {
                let mut step = Step::no_match();
                loop {
                    let before = pass.added();
                    if rule.is_span_scoped() {
                        step.absorb(rule.apply(pass, anchor));
                    } else {
                        // An anchored body runs at every current member, every iteration.
                        let anchors = pass.view().members();
                        for a in anchors {
                            step.absorb(rule.apply(pass, a));
                        }
                    }
                    if pass.added() == before {
                        return step;
                    }
                }
            }
            ExpansionRule::Named { name, rule } => {
                let before = pass.added();
                let step = rule.apply(pass, anchor);
                if pass.added() > before {
                    tracing::trace!(rule = *name, anchor, added = pass.added() - before, "rule expanded span");
                }
                step
            }
        }
    }
}

/// One `expand_to` step, plus the number of indices it newly added.
fn expand_once(selector: &Selector, pass: &mut Pass<'_>, anchor: usize) -> (Step, usize) {
    let candidates = selector.select(&pass.context(anchor));
    if candidates.is_empty() {
        return (Step::no_match(), 0);
    }
    let fresh = pass.extend(&candidates);
    (Step::matched(candidates), fresh.len())
}
