//! Strategy registry.
//!
//! A [`Strategy`] is a key plus one composite rule. Built-in strategies are
//! assembled from the rule groups in [`crate::rules`]:
//!
//! | key    | groups                                              |
//! |--------|-----------------------------------------------------|
//! | `E`    | identity (also `default`, `__default__`)            |
//! | `U`    | obligatory                                          |
//! | `UA`   | obligatory, general purpose                         |
//! | `UB`   | obligatory, nominal complements                     |
//! | `ALL`  | obligatory, general purpose, nominal complements    |
//! | `RSUBG`| permissive first, then everything `ALL` has         |
//! | `SUBG` | entire subgraph                                     |
//!
//! `U`, `UA`, `UB`, `ALL` and `SUBG` also exist with a `+C` suffix that adds
//! the conjunct rule. Each non-identity strategy is
//! `recursive_expand(rules)`, i.e. all rules at every span location until a
//! pass adds nothing.

use std::collections::BTreeMap;

use bitflags::bitflags;
use once_cell::sync::Lazy;

use crate::engine::ExpansionRule;
use crate::engine::dsl::{identity, recursive_expand};
use crate::error::{ExpansionError, Result};
use crate::rules;

bitflags! {
    /// Rule groups a built-in strategy is assembled from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleGroups: u8 {
        const OBLIGATORY          = 1 << 0;
        const GENERAL_PURPOSE     = 1 << 1;
        const NOMINAL_COMPLEMENTS = 1 << 2;
        const PERMISSIVE          = 1 << 3;
        const CONJUNCTS           = 1 << 4;
        const SUBGRAPH            = 1 << 5;
    }
}

/// Keys that resolve to the identity strategy.
pub const IDENTITY_KEYS: [&str; 3] = ["default", "__default__", "E"];

const BUILTIN_GROUPS: [(&str, RuleGroups); 6] = [
    ("U", RuleGroups::OBLIGATORY),
    ("UA", RuleGroups::OBLIGATORY.union(RuleGroups::GENERAL_PURPOSE)),
    ("UB", RuleGroups::OBLIGATORY.union(RuleGroups::NOMINAL_COMPLEMENTS)),
    (
        "ALL",
        RuleGroups::OBLIGATORY.union(RuleGroups::GENERAL_PURPOSE).union(RuleGroups::NOMINAL_COMPLEMENTS),
    ),
    (
        "RSUBG",
        RuleGroups::PERMISSIVE
            .union(RuleGroups::OBLIGATORY)
            .union(RuleGroups::GENERAL_PURPOSE)
            .union(RuleGroups::NOMINAL_COMPLEMENTS),
    ),
    ("SUBG", RuleGroups::SUBGRAPH),
];

/// Keys that also get a `+C` variant.
const CONJUNCT_KEYS: [&str; 5] = ["U", "UA", "UB", "ALL", "SUBG"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    key: String,
    groups: RuleGroups,
    rule: ExpansionRule,
}

impl Strategy {
    /// A strategy around an arbitrary rule.
    pub fn custom(key: impl Into<String>, rule: ExpansionRule) -> Self {
        Strategy { key: key.into(), groups: RuleGroups::empty(), rule }
    }

    /// Assemble a strategy from rule groups. No groups means identity.
    ///
    /// Groups are emitted in a fixed order: permissive, obligatory, general
    /// purpose, nominal complements, subgraph, conjuncts.
    pub fn from_groups(key: impl Into<String>, groups: RuleGroups) -> Self {
        let key = key.into();
        let rule = if groups.is_empty() {
            identity()
        } else {
            let mut members = Vec::new();
            if groups.contains(RuleGroups::PERMISSIVE) {
                members.extend(rules::permissive());
            }
            if groups.contains(RuleGroups::OBLIGATORY) {
                members.extend(rules::obligatory());
            }
            if groups.contains(RuleGroups::GENERAL_PURPOSE) {
                members.extend(rules::general_purpose());
            }
            if groups.contains(RuleGroups::NOMINAL_COMPLEMENTS) {
                members.extend(rules::nominal_complements());
            }
            if groups.contains(RuleGroups::SUBGRAPH) {
                members.push(rules::entire_subgraph());
            }
            if groups.contains(RuleGroups::CONJUNCTS) {
                members.push(rules::conjuncts());
            }
            recursive_expand(members)
        };
        Strategy { key, groups, rule }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Groups the strategy was built from; empty for identity and custom strategies.
    pub fn groups(&self) -> RuleGroups {
        self.groups
    }

    pub fn rule(&self) -> &ExpansionRule {
        &self.rule
    }

    pub fn is_identity(&self) -> bool {
        self.rule == ExpansionRule::Identity
    }
}

/// Key → strategy map. Built once; read-only afterwards, so it can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Strategy>,
}

static BUILTIN: Lazy<StrategyRegistry> = Lazy::new(StrategyRegistry::builtin);

/// The process-wide built-in registry.
pub fn builtin() -> &'static StrategyRegistry {
    &*BUILTIN
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        StrategyRegistry::default()
    }

    /// A fresh registry holding every built-in key.
    pub fn builtin() -> Self {
        let mut strategies = BTreeMap::new();
        for key in IDENTITY_KEYS {
            strategies.insert(key.to_string(), Strategy::from_groups(key, RuleGroups::empty()));
        }
        for (key, groups) in BUILTIN_GROUPS {
            strategies.insert(key.to_string(), Strategy::from_groups(key, groups));
            if CONJUNCT_KEYS.contains(&key) {
                let conj = format!("{key}+C");
                strategies.insert(conj.clone(), Strategy::from_groups(conj, groups | RuleGroups::CONJUNCTS));
            }
        }
        tracing::debug!(strategies = strategies.len(), "built-in strategy registry built");
        StrategyRegistry { strategies }
    }

    pub fn get(&self, key: &str) -> Result<&Strategy> {
        self.strategies.get(key).ok_or_else(|| ExpansionError::UnknownStrategy { key: key.to_string() })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.strategies.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Register `rule` under `key` as-is. The caller decides whether it runs
    /// to a fixpoint (wrap it in `recursive_expand` for that).
    pub fn register(&mut self, key: &str, rule: ExpansionRule) -> Result<&Strategy> {
        if self.strategies.contains_key(key) {
            return Err(ExpansionError::DuplicateStrategy { key: key.to_string() });
        }
        tracing::debug!(strategy = key, "custom strategy registered");
        Ok(&*self.strategies.entry(key.to_string()).or_insert(Strategy::custom(key, rule)))
    }

    /// Register a fixpoint strategy over catalog rules, in the given order.
    pub fn register_rules(&mut self, key: &str, names: &[&str]) -> Result<&Strategy> {
        let members = names
            .iter()
            .map(|name| {
                rules::by_name(name)
                    .map(|entry| entry.rule())
                    .ok_or_else(|| ExpansionError::UnknownRule { name: name.to_string() })
            })
            .collect::<Result<Vec<_>>>()?;
        self.register(key, recursive_expand(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keys() {
        let registry = builtin();
        let keys: Vec<&str> = registry.keys().collect();
        for key in [
            "default", "__default__", "E", "U", "UA", "UB", "ALL", "RSUBG", "SUBG", "U+C", "UA+C", "UB+C", "ALL+C",
            "SUBG+C",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(registry.len(), 14);

        for key in ["RSUBG+C", "E+C", "default+C"] {
            assert_eq!(registry.get(key).unwrap_err(), ExpansionError::UnknownStrategy { key: key.into() });
        }
    }

    #[test]
    fn identity_keys_bypass_the_engine() {
        for key in IDENTITY_KEYS {
            assert!(builtin().get(key).unwrap().is_identity(), "{key}");
        }
        assert!(!builtin().get("U").unwrap().is_identity());
    }

    #[test]
    fn groups_per_key() {
        let cases = [
            ("U", RuleGroups::OBLIGATORY),
            ("UA+C", RuleGroups::OBLIGATORY | RuleGroups::GENERAL_PURPOSE | RuleGroups::CONJUNCTS),
            ("SUBG+C", RuleGroups::SUBGRAPH | RuleGroups::CONJUNCTS),
            ("RSUBG", RuleGroups::all() - RuleGroups::CONJUNCTS - RuleGroups::SUBGRAPH),
        ];
        for (key, groups) in cases {
            assert_eq!(builtin().get(key).unwrap().groups(), groups, "{key}");
        }
    }

    #[test]
    fn strategies_are_fixpoints_over_try_all() {
        let strategy = builtin().get("UA").unwrap();
        let ExpansionRule::RepeatUntilStable(body) = strategy.rule() else {
            panic!("expected a fixpoint strategy, got {:?}", strategy.rule());
        };
        let ExpansionRule::ForEachSpanLocation(inner) = body.as_ref() else { panic!("expected for_each") };
        let ExpansionRule::TryAll(members) = inner.as_ref() else { panic!("expected try_all") };
        assert_eq!(members.len(), rules::obligatory().len() + rules::general_purpose().len());
        assert_eq!(members[0].name(), Some("general"));
    }

    #[test]
    fn unknown_and_duplicate_keys() {
        let mut registry = StrategyRegistry::builtin();
        assert_eq!(registry.get("XYZ").unwrap_err(), ExpansionError::UnknownStrategy { key: "XYZ".into() });
        assert_eq!(
            registry.register("U", identity()).unwrap_err(),
            ExpansionError::DuplicateStrategy { key: "U".into() }
        );
        assert_eq!(
            registry.register_rules("mine", &["mark", "no_such_rule"]).unwrap_err(),
            ExpansionError::UnknownRule { name: "no_such_rule".into() }
        );
        assert!(!registry.contains("mine"));
    }

    #[test]
    fn register_custom_strategies() {
        let mut registry = StrategyRegistry::empty();
        assert!(registry.is_empty());
        registry.register_rules("marks", &["mark", "general"]).unwrap();
        registry.register("same", identity()).unwrap();
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["marks", "same"]);
        assert!(registry.get("same").unwrap().is_identity());
        assert!(registry.get("marks").unwrap().rule().is_span_scoped());
    }
}
