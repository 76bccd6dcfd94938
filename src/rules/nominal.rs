use crate::engine::dsl::*;
use crate::engine::{ExpansionRule, Predicate, Selector};

/// `to` complements ("response to", "due to").
///
/// The guard reads "not CD or not VB*", which no tag fails, so every anchor
/// qualifies, verbs included ("went [to school]").
/// [`nmod_to_of_nominals`] is the variant that actually excludes them.
pub fn nmod_medium_priority() -> ExpansionRule {
    named(
        "nmod_medium_priority",
        only_when(
            tag::eq("CD").negated().or(tag::starts_with("VB").negated()),
            expand_to(child(edge::eq("nmod_to"))),
        ),
    )
}

/// `to` complements of anything but numbers and verbs.
pub fn nmod_to_of_nominals() -> ExpansionRule {
    named(
        "nmod_to_of_nominals",
        only_when(
            tag::eq("CD").or(tag::starts_with("VB")).negated(),
            expand_to(child(edge::eq("nmod_to"))),
        ),
    )
}

/// Lower-precision prepositional complements of non-verbs. Dates are left
/// out, they are rarely part of the phrase.
pub fn nmod_low_priority() -> ExpansionRule {
    named(
        "nmod_low_priority",
        only_when(
            tag::starts_with("VB").negated(),
            expand_to(
                child(edge::one_of(["nmod_at", "nmod_on", "nmod_about", "nmod_from", "nmod_by"]))
                    .filter(entity::one_of(["DATE"]).negated()),
            ),
        ),
    )
}

/// True when the token heads no clausal complement or relative clause.
pub(super) fn no_nested_clause() -> Predicate {
    node::has(child(edge::one_of(["ccomp", "acl:relcl"]))).negated()
}

/// Relative clause of a non-possessed noun, expanded one level at a time:
/// the clause head, its children, then their children.
///
/// The whole chain only runs when the first level has something to select.
pub(super) fn relative_clause(first: Selector, second: Selector, third: Selector) -> ExpansionRule {
    only_when(
        has_outgoing_edge::eq("nmod:poss").negated().and(node::has(first.clone())),
        expand_to(first).and_then(attempt(expand_to(second))).and_then(attempt(expand_to(third))),
    )
}

/// Relative clauses with no nested clausal complement anywhere in the
/// captured levels.
pub fn relcl_intolerant_to_ccomp() -> ExpansionRule {
    named(
        "relcl_intolerant_to_ccomp",
        relative_clause(
            child(edge::eq("acl:relcl")).filter(no_nested_clause()),
            child(edge::any()).filter(no_nested_clause().and(node::in_expansion_span().negated())),
            child(edge::any()).filter(no_nested_clause()),
        ),
    )
}

/// From a "whatever"-style pronoun to the head that follows it.
pub fn sub_wdt() -> ExpansionRule {
    named(
        "sub_wdt",
        only_when(
            lemma::starts_with("w").and(lemma::ends_with("ever")),
            expand_to(parent(edge::any()).filter(index::here().greater_than(index::previous()))),
        ),
    )
}

pub fn acl_shallow() -> ExpansionRule {
    named("acl_shallow", expand_to(child(edge::one_of(["acl_of", "acl_to"]))))
}

/// The object of an `of` preposition hanging off the anchor.
///
/// Written literally, the filter asks for lemma `of` on the `pobj` token
/// itself, which never matches. Here the lemma is checked on the
/// preposition the `pobj` hangs from.
pub fn scispacy_nmod_of() -> ExpansionRule {
    named(
        "scispacy_nmod_of",
        expand_to(
            grand_child(edge::eq("prep"), edge::eq("pobj"))
                .filter(node::has(parent(edge::eq("pobj")).filter(lemma::eq("of")))),
        ),
    )
}
