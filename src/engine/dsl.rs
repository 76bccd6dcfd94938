//! Constructor functions for the expression language.
//!
//! Rules in `crate::rules` are written with these, e.g.
//!
//! ```
//! use depspan::engine::dsl::*;
//!
//! // Capture an infinitival "to" attached to the anchor.
//! let mark = expand_to(child(edge::eq("mark")).filter(tag::one_of(["TO", "PART"])));
//!
//! // Capture left-side adverbial modifiers of non-nominal anchors.
//! let advmod = only_when(
//!     tag::one_of(["NN", "NNS", "IN"]).negated(),
//!     expand_to(child(edge::eq("advmod")).filter(index::here().lesser_than(index::previous()))),
//! );
//! # let _ = (mark, advmod);
//! ```

pub use super::predicate::{Position, Predicate, TextPredicate};
pub use super::rule::ExpansionRule;
pub use super::selector::Selector;

/// Edge-label predicates.
pub mod edge {
    use super::TextPredicate;

    pub fn any() -> TextPredicate {
        TextPredicate::Any
    }

    pub fn eq(label: &str) -> TextPredicate {
        TextPredicate::Equals(label.to_string())
    }

    pub fn one_of<'a>(labels: impl IntoIterator<Item = &'a str>) -> TextPredicate {
        TextPredicate::OneOf(labels.into_iter().map(str::to_string).collect())
    }

    pub fn starts_with(prefix: &str) -> TextPredicate {
        TextPredicate::StartsWith(prefix.to_string())
    }

    pub fn ends_with(suffix: &str) -> TextPredicate {
        TextPredicate::EndsWith(suffix.to_string())
    }
}

macro_rules! text_field {
    ($(#[$doc:meta])* $module:ident => $variant:ident) => {
        $(#[$doc])*
        pub mod $module {
            use super::{Predicate, TextPredicate, edge};

            pub fn matching(pred: TextPredicate) -> Predicate {
                Predicate::$variant(pred)
            }

            pub fn eq(value: &str) -> Predicate {
                matching(edge::eq(value))
            }

            pub fn one_of<'a>(values: impl IntoIterator<Item = &'a str>) -> Predicate {
                matching(edge::one_of(values))
            }

            pub fn starts_with(prefix: &str) -> Predicate {
                matching(edge::starts_with(prefix))
            }

            pub fn ends_with(suffix: &str) -> Predicate {
                matching(edge::ends_with(suffix))
            }
        }
    };
}

text_field!(
    /// Part-of-speech tag predicates.
    tag => Tag
);
text_field!(
    /// Lemma predicates.
    lemma => Lemma
);
text_field!(
    /// Surface-form predicates.
    word => Word
);
text_field!(
    /// True when some outgoing edge label matches.
    has_outgoing_edge => HasOutgoingEdge
);
text_field!(
    /// True when the incoming edge label matches.
    has_incoming_edge => HasIncomingEdge
);

/// Entity-type predicates.
pub mod entity {
    use super::{Predicate, edge};

    pub fn exists() -> Predicate {
        Predicate::EntityExists
    }

    pub fn one_of<'a>(types: impl IntoIterator<Item = &'a str>) -> Predicate {
        Predicate::EntityType(edge::one_of(types))
    }
}

/// Subgraph predicates.
pub mod node {
    use super::{Predicate, Selector};

    pub fn always() -> Predicate {
        Predicate::Always
    }

    pub fn has(selector: Selector) -> Predicate {
        Predicate::Has(Box::new(selector))
    }

    pub fn in_expansion_span() -> Predicate {
        Predicate::InExpansionSpan
    }
}

/// Tree positions for ordinal predicates.
pub mod index {
    use super::{Position, Selector};

    pub fn of(selector: Selector) -> Position {
        Position::Of(Box::new(selector))
    }

    pub fn here() -> Position {
        Position::Here
    }

    pub fn previous() -> Position {
        Position::Previous
    }
}

// --- Selectors ---------------------------------------------------------------

pub fn child(edge: TextPredicate) -> Selector {
    Selector::Child { edge, node: None }
}

pub fn parent(edge: TextPredicate) -> Selector {
    Selector::Parent { edge, node: None }
}

pub fn grand_child(first: TextPredicate, second: TextPredicate) -> Selector {
    Selector::GrandChild { first, second, node: None }
}

// --- Rules -------------------------------------------------------------------

/// Leaves the span untouched and always succeeds.
pub fn identity() -> ExpansionRule {
    ExpansionRule::Identity
}

pub fn expand_to(selector: Selector) -> ExpansionRule {
    ExpansionRule::ExpandTo(selector)
}

pub fn expand_to_recursively(selector: Selector) -> ExpansionRule {
    ExpansionRule::ExpandToRecursively(selector)
}

pub fn only_when(guard: Predicate, rule: ExpansionRule) -> ExpansionRule {
    ExpansionRule::OnlyWhen { guard, rule: Box::new(rule) }
}

/// `try` in rule notation: apply `rule` and succeed regardless.
pub fn attempt(rule: ExpansionRule) -> ExpansionRule {
    ExpansionRule::Try(Box::new(rule))
}

pub fn try_all(rules: Vec<ExpansionRule>) -> ExpansionRule {
    ExpansionRule::TryAll(rules)
}

pub fn for_each_span_location(rule: ExpansionRule) -> ExpansionRule {
    ExpansionRule::ForEachSpanLocation(Box::new(rule))
}

pub fn repeat_until_expansion_is_stable(rule: ExpansionRule) -> ExpansionRule {
    ExpansionRule::RepeatUntilStable(Box::new(rule))
}

/// The standard strategy shape: all `rules` at every span location, to a fixpoint.
pub fn recursive_expand(rules: Vec<ExpansionRule>) -> ExpansionRule {
    repeat_until_expansion_is_stable(for_each_span_location(try_all(rules)))
}

pub fn named(name: &'static str, rule: ExpansionRule) -> ExpansionRule {
    ExpansionRule::Named { name, rule: Box::new(rule) }
}
