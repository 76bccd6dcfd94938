use super::nominal::{no_nested_clause, relative_clause};
use crate::engine::ExpansionRule;
use crate::engine::dsl::*;

/// Children of the anchor, minus function words and clauses that belong to a
/// governing phrase.
pub fn selective_subgraph() -> ExpansionRule {
    named(
        "selective_subgraph",
        expand_to_recursively(
            child(edge::one_of(["dep", "acl:relcl", "nsubj", "case", "mark", "cop", "advmod", "ref"]).negated())
                .filter(tag::eq("WRB").negated()),
        ),
    )
}

/// Like `relcl_intolerant_to_ccomp`, but the clause head itself may carry a
/// clausal complement.
pub fn relcl_tolerant_to_one_ccomp() -> ExpansionRule {
    named(
        "relcl_tolerant_to_one_ccomp",
        relative_clause(
            child(edge::eq("acl:relcl")),
            child(edge::any()).filter(no_nested_clause().and(node::in_expansion_span().negated())),
            child(edge::any()).filter(no_nested_clause()),
        ),
    )
}

/// The clause head, all its children and their children.
pub fn relcl_permissive() -> ExpansionRule {
    named(
        "relcl_permissive",
        relative_clause(
            child(edge::eq("acl:relcl")),
            child(edge::any()).filter(node::in_expansion_span().negated()),
            child(edge::any()),
        ),
    )
}

pub fn relcl_with_obligatory_args() -> ExpansionRule {
    let args = || child(edge::one_of(["nsubj", "dobj"]));
    named("relcl_with_obligatory_args", relative_clause(child(edge::eq("acl:relcl")), args(), args()))
}

/// Two levels below the clause head, skipping clausal and adverbial-clause
/// complements.
pub fn relcl_without_long_complements() -> ExpansionRule {
    let short = || child(edge::one_of(["ccomp", "xcomp", "acl:relcl"]).or(edge::starts_with("advcl")).negated());
    named("relcl_without_long_complements", relative_clause(child(edge::eq("acl:relcl")), short(), short()))
}

/// `of`/`to` clausal modifiers, then two levels of whatever hangs below them.
pub fn acl_deep() -> ExpansionRule {
    let acl = child(edge::one_of(["acl_of", "acl_to"]));
    named(
        "acl_deep",
        only_when(
            node::has(acl.clone()),
            expand_to(acl)
                .and_then(attempt(expand_to(child(edge::any()).filter(node::in_expansion_span().negated()))))
                .and_then(attempt(expand_to(child(edge::any())))),
        ),
    )
}
