use crate::engine::ExpansionRule;
use crate::engine::dsl::*;

/// Determiners, compounds, numeric modifiers, auxiliaries, possessives,
/// particles and negation attached to the anchor.
pub fn general() -> ExpansionRule {
    named(
        "general",
        expand_to(child(edge::one_of([
            "compound",
            "mwe",
            "det",
            "nummod",
            "aux",
            "auxpass",
            "poss",
            "compound:prt",
            "prt",
            "neg",
        ]))),
    )
}

/// Possessive and `of`/`per` nominal modifiers of non-verbs.
pub fn nmod_high_priority() -> ExpansionRule {
    named(
        "nmod_high_priority",
        only_when(
            tag::starts_with("VB").negated(),
            expand_to(child(edge::one_of(["nmod:poss", "poss", "nmod_of", "nmod:of", "nmod_per", "nmod:per"]))),
        ),
    )
}

/// Adjectival and noun-phrase adverbial modifiers, left of the anchor only.
pub fn general_left_edge() -> ExpansionRule {
    named(
        "general_left_edge",
        expand_to(
            child(edge::one_of(["amod", "nmod:npmod", "npadvmod"]))
                .filter(index::here().lesser_than(index::previous())),
        ),
    )
}

/// The head of a multi-word expression the anchor belongs to.
pub fn parent_mwe() -> ExpansionRule {
    named("parent_mwe", expand_to(parent(edge::one_of(["compound", "mwe", "flat", "fixed"]))))
}

/// "going to" / "used to" heads governing the anchor as an open complement.
pub fn tense() -> ExpansionRule {
    named(
        "tense",
        expand_to(
            parent(edge::eq("xcomp")).filter(
                word::one_of(["going", "gon", "used"]).and(has_outgoing_edge::one_of(["dobj", "auxpass"]).negated()),
            ),
        ),
    )
}
