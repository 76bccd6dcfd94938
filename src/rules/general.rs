use crate::engine::ExpansionRule;
use crate::engine::dsl::*;

/// Infinitival "to" markers; complementizers such as "that" stay out.
pub fn mark() -> ExpansionRule {
    named("mark", expand_to(child(edge::eq("mark")).filter(tag::one_of(["TO", "PART"]))))
}

/// Adverbial modifiers to the left of a non-nominal anchor, unless the
/// anchor's subject comes after its adverbial modifier.
pub fn advmod() -> ExpansionRule {
    let subject_after_advmod =
        index::of(child(edge::starts_with("nsubj"))).greater_than(index::of(child(edge::eq("advmod"))));
    named(
        "advmod",
        only_when(
            tag::one_of(["NN", "NNS", "IN"]).negated().and(subject_after_advmod.negated()),
            expand_to(child(edge::eq("advmod")).filter(index::here().lesser_than(index::previous()))),
        ),
    )
}

pub fn entity_appos() -> ExpansionRule {
    named("entity_appos", expand_to(child(edge::eq("appos")).filter(entity::exists())))
}

/// Adjectival or nominal open complements.
pub fn xcomp_general() -> ExpansionRule {
    named(
        "xcomp_general",
        expand_to(child(edge::eq("xcomp")).filter(tag::starts_with("JJ").or(tag::starts_with("NN")))),
    )
}

/// From an open complement up to an adjectival governor.
pub fn xcomp_jj() -> ExpansionRule {
    named(
        "xcomp_jj",
        only_when(
            has_incoming_edge::eq("xcomp"),
            expand_to(parent(edge::eq("xcomp")).filter(tag::starts_with("JJ"))),
        ),
    )
}

pub fn general_tbd() -> ExpansionRule {
    named("general_tbd", expand_to(child(edge::one_of(["neg", "acl:to", "acl_to", "xcomp", "cop"]))))
}

pub fn xpos_permissive() -> ExpansionRule {
    named("xpos_permissive", expand_to(child(edge::eq("xpos"))))
}
