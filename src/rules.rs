//! Built-in expansion rules.
//!
//! Rules are grouped by how much precision they trade for recall:
//!
//! - `obligatory.rs`: attachments that are almost always part of the phrase.
//! - `general.rs`: general-purpose optional attachments.
//! - `nominal.rs`: prepositional and relative-clause complements of nouns.
//! - `permissive.rs`: aggressive, recall-oriented rules.
//! - `structural.rs`: the entire-subgraph and conjunct rules.
//!
//! Every rule is a `named(..)` expression so traces report which rule grew a
//! span. [`catalog`] lists them all, including a few that no built-in strategy
//! uses but that custom strategies can pick by name.

use once_cell::sync::Lazy;

use crate::engine::ExpansionRule;
use crate::strategy::RuleGroups;

#[path = "rules/general.rs"]
mod general;
#[path = "rules/nominal.rs"]
mod nominal;
#[path = "rules/obligatory.rs"]
mod obligatory;
#[path = "rules/permissive.rs"]
mod permissive;
#[path = "rules/structural.rs"]
mod structural;

#[cfg(test)]
#[path = "rules/tests.rs"]
mod tests;

pub use structural::{conjuncts, entire_subgraph};

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    /// Group the rule belongs to; empty when no built-in strategy uses it.
    pub group: RuleGroups,
    /// A phrase the rule is meant for; the bracketed part is what it adds.
    pub example: &'static str,
    build: fn() -> ExpansionRule,
}

impl CatalogEntry {
    pub fn rule(&self) -> ExpansionRule {
        (self.build)()
    }
}

macro_rules! entry {
    ($name:literal, $group:expr, $example:literal, $build:path) => {
        CatalogEntry { name: $name, group: $group, example: $example, build: $build }
    };
}

static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    use crate::strategy::RuleGroups as G;
    vec![
        entry!("general", G::OBLIGATORY, "[the] man", obligatory::general),
        entry!("nmod_high_priority", G::OBLIGATORY, "levels [of magnesium]", obligatory::nmod_high_priority),
        entry!("general_left_edge", G::OBLIGATORY, "[low] levels", obligatory::general_left_edge),
        entry!("parent_mwe", G::OBLIGATORY, "[blood] pressure", obligatory::parent_mwe),
        entry!("tense", G::OBLIGATORY, "[going] to rain", obligatory::tense),
        entry!("mark", G::GENERAL_PURPOSE, "able [to] capture", general::mark),
        entry!("advmod", G::GENERAL_PURPOSE, "[very] big", general::advmod),
        entry!("entity_appos", G::GENERAL_PURPOSE, "the drug, [aspirin]", general::entity_appos),
        entry!("xcomp_general", G::GENERAL_PURPOSE, "found it [useful]", general::xcomp_general),
        entry!("xcomp_jj", G::GENERAL_PURPOSE, "[able] to capture", general::xcomp_jj),
        entry!("nmod_medium_priority", G::NOMINAL_COMPLEMENTS, "response [to treatment]", nominal::nmod_medium_priority),
        entry!("nmod_low_priority", G::NOMINAL_COMPLEMENTS, "effect [on growth]", nominal::nmod_low_priority),
        entry!(
            "relcl_intolerant_to_ccomp",
            G::NOMINAL_COMPLEMENTS,
            "the cells [that express it]",
            nominal::relcl_intolerant_to_ccomp
        ),
        entry!("sub_wdt", G::NOMINAL_COMPLEMENTS, "[take] whatever", nominal::sub_wdt),
        entry!("acl_shallow", G::NOMINAL_COMPLEMENTS, "ability [to bind]", nominal::acl_shallow),
        entry!(
            "selective_subgraph",
            G::PERMISSIVE,
            "the gene [and its product]",
            permissive::selective_subgraph
        ),
        entry!(
            "relcl_tolerant_to_one_ccomp",
            G::PERMISSIVE,
            "patients [who said they improved]",
            permissive::relcl_tolerant_to_one_ccomp
        ),
        entry!(
            "relcl_permissive",
            G::PERMISSIVE,
            "the protein [which binds the receptor]",
            permissive::relcl_permissive
        ),
        entry!(
            "relcl_with_obligatory_args",
            G::PERMISSIVE,
            "the man [who sold the world]",
            permissive::relcl_with_obligatory_args
        ),
        entry!("acl_deep", G::PERMISSIVE, "ability [to bind the receptor]", permissive::acl_deep),
        entry!("entire_subgraph", G::SUBGRAPH, "[everything below the mention]", structural::entire_subgraph),
        entry!("conjuncts", G::CONJUNCTS, "aspirin [and ibuprofen]", structural::conjuncts),
        entry!("general_tbd", G::empty(), "[not] toxic", general::general_tbd),
        entry!("scispacy_nmod_of", G::empty(), "levels of [magnesium]", nominal::scispacy_nmod_of),
        entry!("xpos_permissive", G::empty(), "[xpos-attached tokens]", general::xpos_permissive),
        entry!("nmod_to_of_nominals", G::empty(), "response [to treatment]", nominal::nmod_to_of_nominals),
        entry!(
            "relcl_without_long_complements",
            G::empty(),
            "the man [who sold the world]",
            permissive::relcl_without_long_complements
        ),
    ]
});

/// Every named rule, grouped rules first in strategy order.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn by_name(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.name == name)
}

fn group(group: RuleGroups) -> Vec<ExpansionRule> {
    CATALOG.iter().filter(|entry| entry.group == group).map(CatalogEntry::rule).collect()
}

pub fn obligatory() -> Vec<ExpansionRule> {
    group(RuleGroups::OBLIGATORY)
}

pub fn general_purpose() -> Vec<ExpansionRule> {
    group(RuleGroups::GENERAL_PURPOSE)
}

pub fn nominal_complements() -> Vec<ExpansionRule> {
    group(RuleGroups::NOMINAL_COMPLEMENTS)
}

pub fn permissive() -> Vec<ExpansionRule> {
    group(RuleGroups::PERMISSIVE)
}
