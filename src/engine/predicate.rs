//! Predicate language.
//!
//! Two closed expression types:
//!
//! - [`TextPredicate`] tests a single string: an edge label, a tag, a lemma,
//!   a surface word or an entity type.
//! - [`Predicate`] tests a token in its tree context. Its leaves route a
//!   `TextPredicate` to one of the token's fields, inspect its edges, run a
//!   nested [`Selector`], check span membership or compare tree positions.
//!
//! Both compose under `and`/`or`/negation and evaluate left to right with
//! short-circuiting. Evaluation is a pure function of the tree, the span
//! membership at evaluation time and the tokens involved.

use super::context::EvaluationContext;
use super::selector::Selector;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPredicate {
    Any,
    Equals(String),
    OneOf(Vec<String>),
    StartsWith(String),
    EndsWith(String),
    Not(Box<TextPredicate>),
    And(Box<TextPredicate>, Box<TextPredicate>),
    Or(Box<TextPredicate>, Box<TextPredicate>),
}

impl TextPredicate {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            TextPredicate::Any => true,
            TextPredicate::Equals(expected) => value == expected,
            TextPredicate::OneOf(options) => options.iter().any(|o| o == value),
            TextPredicate::StartsWith(prefix) => value.starts_with(prefix.as_str()),
            TextPredicate::EndsWith(suffix) => value.ends_with(suffix.as_str()),
            TextPredicate::Not(inner) => !inner.matches(value),
            TextPredicate::And(a, b) => a.matches(value) && b.matches(value),
            TextPredicate::Or(a, b) => a.matches(value) || b.matches(value),
        }
    }

    pub fn negated(self) -> Self {
        TextPredicate::Not(Box::new(self))
    }

    pub fn and(self, other: TextPredicate) -> Self {
        TextPredicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: TextPredicate) -> Self {
        TextPredicate::Or(Box::new(self), Box::new(other))
    }
}

/// Which direction an ordinal comparison runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    LesserThan,
    GreaterThan,
}

/// A tree position referenced by an ordinal predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// The token being tested.
    Here,
    /// The token the current selector hop came from.
    Previous,
    /// Every token the selector finds from the token being tested.
    Of(Box<Selector>),
}

impl Position {
    fn resolve(&self, ctx: &EvaluationContext<'_>) -> Vec<usize> {
        match self {
            Position::Here => vec![ctx.here],
            Position::Previous => ctx.previous.into_iter().collect(),
            Position::Of(selector) => selector.select(&ctx.at(ctx.here)),
        }
    }

    pub fn lesser_than(self, other: Position) -> Predicate {
        Predicate::Compare { left: self, order: Order::LesserThan, right: other }
    }

    pub fn greater_than(self, other: Position) -> Predicate {
        Predicate::Compare { left: self, order: Order::GreaterThan, right: other }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Always,
    Tag(TextPredicate),
    Lemma(TextPredicate),
    Word(TextPredicate),
    EntityExists,
    EntityType(TextPredicate),
    /// Some outgoing edge label matches.
    HasOutgoingEdge(TextPredicate),
    /// The incoming edge label matches (false for the root).
    HasIncomingEdge(TextPredicate),
    /// The selector finds at least one token from here.
    Has(Box<Selector>),
    InExpansionSpan,
    /// Holds when some resolved pair of positions satisfies the order.
    Compare { left: Position, order: Order, right: Position },
    Not(Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn eval(&self, ctx: &EvaluationContext<'_>) -> bool {
        let Some(token) = ctx.tree.token(ctx.here) else {
            return false;
        };
        match self {
            Predicate::Always => true,
            Predicate::Tag(p) => p.matches(&token.tag),
            Predicate::Lemma(p) => p.matches(&token.lemma),
            Predicate::Word(p) => p.matches(&token.text),
            Predicate::EntityExists => token.entity_type.is_some(),
            Predicate::EntityType(p) => token.entity_type.as_deref().is_some_and(|t| p.matches(t)),
            Predicate::HasOutgoingEdge(p) => token.children.iter().any(|e| p.matches(&e.label)),
            Predicate::HasIncomingEdge(p) => token.parent.as_ref().is_some_and(|e| p.matches(&e.label)),
            Predicate::Has(selector) => !selector.select(&ctx.at(ctx.here)).is_empty(),
            Predicate::InExpansionSpan => ctx.span.contains(ctx.here),
            Predicate::Compare { left, order, right } => {
                let lhs = left.resolve(ctx);
                if lhs.is_empty() {
                    return false;
                }
                let rhs = right.resolve(ctx);
                lhs.iter().any(|l| {
                    rhs.iter().any(|r| match order {
                        Order::LesserThan => l < r,
                        Order::GreaterThan => l > r,
                    })
                })
            }
            Predicate::Not(inner) => !inner.eval(ctx),
            Predicate::And(a, b) => a.eval(ctx) && b.eval(ctx),
            Predicate::Or(a, b) => a.eval(ctx) || b.eval(ctx),
        }
    }

    pub fn negated(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }
}
