use crate::engine::ExpansionRule;
use crate::engine::dsl::*;

/// Every child of every member, to the fixpoint: the whole subtree below
/// the mention.
pub fn entire_subgraph() -> ExpansionRule {
    named("entire_subgraph", expand_to_recursively(child(edge::any())))
}

/// Coordinated conjuncts (`conj`, `conj_and`, `conj:or`, ...).
pub fn conjuncts() -> ExpansionRule {
    named("conjuncts", expand_to(child(edge::starts_with("conj"))))
}
