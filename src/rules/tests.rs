use crate::rules::{self, by_name, catalog};
use crate::strategy::{RuleGroups, StrategyRegistry};
use crate::{DependencyTree, Entity, Options, conll, expand_in, expand_with};

/// Build a tree from compact rows written with spaces: `ID FORM LEMMA TAG HEAD DEPREL [ENTITY]`.
fn sentence(rows: &[&str]) -> DependencyTree {
    let input: Vec<String> = rows.iter().map(|r| r.split_whitespace().collect::<Vec<_>>().join("\t")).collect();
    let (tree, _) = conll::parse_sentence(&input.join("\n")).unwrap();
    tree
}

fn expand_key(tree: &DependencyTree, seed: (usize, usize), key: &str) -> Vec<usize> {
    expand_with(tree, &Entity::new(seed.0, seed.1, "X"), &Options::strategy(key)).unwrap().indices
}

fn expand_rules(tree: &DependencyTree, seed: (usize, usize), names: &[&str]) -> Vec<usize> {
    let mut registry = StrategyRegistry::empty();
    registry.register_rules("custom", names).unwrap();
    expand_in(&registry, tree, &Entity::new(seed.0, seed.1, "X"), &Options::strategy("custom")).unwrap().indices
}

// --- Fixtures ---------------------------------------------------------------

fn able_to_capture() -> DependencyTree {
    sentence(&[
        "1 I I PRP 3 nsubj",
        "2 am be VBP 3 cop",
        "3 glad glad JJ 0 root",
        "4 we we PRP 6 nsubj",
        "5 were be VBD 6 cop",
        "6 able able JJ 3 ccomp",
        "7 to to TO 8 mark",
        "8 capture capture VB 6 xcomp",
        "9 this this DT 8 dobj",
        "10 without without IN 11 mark",
        "11 getting get VBG 8 advcl",
        "12 snotty snotty JJ 11 xcomp",
        "13 . . . 3 punct",
    ])
}

fn should_be_credited() -> DependencyTree {
    sentence(&[
        "1 you you PRP 2 nsubj",
        "2 agree agree VBP 0 root",
        "3 that that IN 8 mark",
        "4 the the DT 5 det",
        "5 site site NN 8 nsubjpass",
        "6 should should MD 8 aux",
        "7 be be VB 8 auxpass",
        "8 credited credit VBN 2 ccomp",
    ])
}

fn magnesium() -> DependencyTree {
    sentence(&[
        "1 Low low JJ 2 amod",
        "2 levels level NNS 6 nsubjpass",
        "3 of of IN 4 case",
        "4 magnesium magnesium NN 2 nmod:of CHEMICAL",
        "5 were be VBD 6 auxpass",
        "6 found find VBN 0 root",
    ])
}

fn old_man() -> DependencyTree {
    sentence(&[
        "1 the the DT 3 det",
        "2 old old JJ 3 amod",
        "3 man man NN 0 root",
        "4 who who WP 5 nsubj",
        "5 sold sell VBD 3 acl:relcl",
        "6 the the DT 7 det",
        "7 world world NN 5 dobj",
    ])
}

fn man_who_said() -> DependencyTree {
    sentence(&[
        "1 the the DT 2 det",
        "2 man man NN 0 root",
        "3 who who WP 4 nsubj",
        "4 said say VBD 2 acl:relcl",
        "5 it it PRP 6 nsubj",
        "6 rained rain VBD 4 ccomp",
    ])
}

fn ability_to_bind() -> DependencyTree {
    sentence(&[
        "1 the the DT 2 det",
        "2 ability ability NN 0 root",
        "3 to to TO 4 mark",
        "4 bind bind VB 2 acl_to",
        "5 the the DT 6 det",
        "6 receptor receptor NN 4 dobj",
    ])
}

fn drug(appos_entity: &str) -> DependencyTree {
    let appos = format!("3 aspirin aspirin NN 2 appos {appos_entity}");
    sentence(&["1 the the DT 2 det", "2 drug drug NN 4 nsubj", &appos, "4 helps help VBZ 0 root"])
}

// --- Built-in strategies on worked examples ---------------------------------

#[test]
fn strategy_examples() {
    // (description, tree, seed, strategy, expected members)
    let cases: Vec<(&str, DependencyTree, (usize, usize), &str, Vec<usize>)> = vec![
        ("infinitival to and adjectival governor", able_to_capture(), (7, 8), "UA", vec![5, 6, 7]),
        ("to-marker is optional", able_to_capture(), (7, 8), "U", vec![7]),
        ("auxiliaries but not a complementizer", should_be_credited(), (7, 8), "UA", vec![5, 6, 7]),
        ("auxiliaries are obligatory", should_be_credited(), (7, 8), "U", vec![5, 6, 7]),
        ("identity", should_be_credited(), (7, 8), "E", vec![7]),
        ("identity by default key", should_be_credited(), (4, 5), "default", vec![4]),
        ("of-modifier and left adjective", magnesium(), (1, 2), "U", vec![0, 1, 3]),
        ("entire subgraph", magnesium(), (1, 2), "SUBG", vec![0, 1, 2, 3]),
        ("entire subgraph from the root", magnesium(), (5, 6), "SUBG", vec![0, 1, 2, 3, 4, 5]),
        ("relative clause, three levels", old_man(), (2, 3), "UB", vec![0, 1, 2, 3, 4, 5, 6]),
        ("relative clause is not obligatory", old_man(), (2, 3), "U", vec![0, 1, 2]),
        ("nested clausal complement blocks the clause", man_who_said(), (1, 2), "UB", vec![0, 1]),
        ("permissive rules tolerate it", man_who_said(), (1, 2), "RSUBG", vec![0, 1, 2, 3, 4, 5]),
        ("appositive entity", drug("DRUG"), (1, 2), "UA", vec![0, 1, 2]),
        ("appositive without entity", drug("_"), (1, 2), "UA", vec![0, 1]),
    ];

    for (description, tree, seed, key, expected) in cases {
        assert_eq!(expand_key(&tree, seed, key), expected, "{description} ({key})");
    }
}

#[test]
fn bounding_range_and_text() {
    let tree = magnesium();
    let span = expand_with(&tree, &Entity::new(1, 2, "MEASURE"), &Options::strategy("U")).unwrap();
    assert_eq!(span.bounds(), (0, 3));
    assert_eq!(span.text(&tree), "Low levels of magnesium");

    let tree = able_to_capture();
    let span = expand_with(&tree, &Entity::new(7, 8, "ACTION"), &Options::strategy("UA")).unwrap();
    assert_eq!(span.text(&tree), "able to capture");

    let tree = should_be_credited();
    let span = expand_with(&tree, &Entity::new(7, 8, "ACTION"), &Options::strategy("ALL")).unwrap();
    assert_eq!(span.text(&tree), "should be credited");
}

#[test]
fn nominal_modifiers_are_skipped_for_verbs() {
    let tree = sentence(&["1 thought think VBD 0 root", "2 of of IN 3 case", "3 you you PRP 1 nmod:of"]);
    assert_eq!(expand_key(&tree, (0, 1), "U"), vec![0]);
    assert_eq!(expand_key(&tree, (0, 1), "ALL"), vec![0]);
}

#[test]
fn parent_of_compound() {
    let tree = sentence(&["1 blood blood NN 2 compound", "2 pressure pressure NN 3 nsubj", "3 rose rise VBD 0 root"]);
    assert_eq!(expand_key(&tree, (0, 1), "U"), vec![0, 1]);
    assert_eq!(expand_key(&tree, (1, 2), "U"), vec![0, 1]);
    assert_eq!(expand_key(&tree, (0, 1), "E"), vec![0]);
}

#[test]
fn adverbial_modifiers() {
    let tree = sentence(&[
        "1 she she PRP 3 nsubj",
        "2 quietly quietly RB 3 advmod",
        "3 left leave VBD 0 root",
        "4 early early RB 3 advmod",
    ]);
    // Only the modifier left of the anchor.
    assert_eq!(expand_key(&tree, (2, 3), "UA"), vec![1, 2]);
    assert_eq!(expand_key(&tree, (2, 3), "U"), vec![2]);

    // A subject following the modifier blocks the rule.
    let inverted = sentence(&[
        "1 quietly quietly RB 2 advmod",
        "2 said say VBD 0 root",
        "3 the the DT 4 det",
        "4 man man NN 2 nsubj",
    ]);
    assert_eq!(expand_key(&inverted, (1, 2), "UA"), vec![1]);
}

#[test]
fn dates_are_not_prepositional_complements() {
    let tree = sentence(&[
        "1 the the DT 2 det",
        "2 meeting meeting NN 0 root",
        "3 on on IN 4 case",
        "4 Monday Monday NNP 2 nmod_on DATE",
        "5 at at IN 6 case",
        "6 noon noon NN 2 nmod_at TIME",
    ]);
    assert_eq!(expand_key(&tree, (1, 2), "UB"), vec![0, 1, 5]);
    assert_eq!(expand_key(&tree, (1, 2), "U"), vec![0, 1]);
}

#[test]
fn to_complements_of_any_head() {
    let noun = sentence(&["1 response response NN 0 root", "2 to to TO 3 case", "3 treatment treatment NN 1 nmod_to"]);
    assert_eq!(expand_key(&noun, (0, 1), "UB"), vec![0, 2]);

    let verb = sentence(&["1 went go VBD 0 root", "2 to to TO 3 case", "3 school school NN 1 nmod_to"]);
    assert_eq!(expand_key(&verb, (0, 1), "UB"), vec![0, 2]);
    assert_eq!(expand_key(&verb, (0, 1), "ALL"), vec![0, 2]);
    assert_eq!(expand_rules(&verb, (0, 1), &["nmod_medium_priority"]), vec![0, 2]);

    // The opt-in variant keeps verbs and numbers out.
    assert_eq!(expand_rules(&noun, (0, 1), &["nmod_to_of_nominals"]), vec![0, 2]);
    assert_eq!(expand_rules(&verb, (0, 1), &["nmod_to_of_nominals"]), vec![0]);
}

#[test]
fn conjuncts_only_with_the_conjunct_variant() {
    let tree = sentence(&[
        "1 aspirin aspirin NN 4 nsubj",
        "2 and and CC 1 cc",
        "3 ibuprofen ibuprofen NN 1 conj",
        "4 reduce reduce VBP 0 root",
        "5 pain pain NN 4 dobj",
    ]);
    assert_eq!(expand_key(&tree, (0, 1), "U"), vec![0]);
    assert_eq!(expand_key(&tree, (0, 1), "U+C"), vec![0, 2]);
    assert_eq!(expand_key(&tree, (0, 1), "SUBG+C"), vec![0, 1, 2]);

    let span = expand_with(&tree, &Entity::new(0, 1, "DRUG"), &Options::strategy("ALL+C")).unwrap();
    assert_eq!(span.text(&tree), "aspirin and ibuprofen");
}

#[test]
fn going_to_future() {
    let tree = sentence(&[
        "1 it it PRP 3 nsubj",
        "2 is be VBZ 3 aux",
        "3 going go VBG 0 root",
        "4 to to TO 5 mark",
        "5 rain rain VB 3 xcomp",
    ]);
    assert_eq!(expand_key(&tree, (4, 5), "U"), vec![1, 2, 4]);
    assert_eq!(expand_key(&tree, (4, 5), "UA"), vec![1, 2, 3, 4]);
}

#[test]
fn whatever_reaches_its_following_head() {
    let tree = sentence(&[
        "1 whatever whatever WDT 3 dobj",
        "2 you you PRP 3 nsubj",
        "3 want want VBP 5 csubj",
        "4 is be VBZ 5 cop",
        "5 fine fine JJ 0 root",
    ]);
    assert_eq!(expand_key(&tree, (0, 1), "UB"), vec![0, 2]);
    assert_eq!(expand_key(&tree, (0, 1), "U"), vec![0]);
}

// --- Individual rules -------------------------------------------------------

#[test]
fn relative_clause_variants() {
    let tree = old_man();
    let seed = (2, 3);
    assert_eq!(expand_rules(&tree, seed, &["relcl_with_obligatory_args"]), vec![2, 3, 4, 6]);
    assert_eq!(expand_rules(&tree, seed, &["relcl_permissive"]), vec![2, 3, 4, 5, 6]);
    assert_eq!(expand_rules(&tree, seed, &["relcl_intolerant_to_ccomp"]), vec![2, 3, 4, 5, 6]);

    let nested = man_who_said();
    let seed = (1, 2);
    assert_eq!(expand_rules(&nested, seed, &["relcl_intolerant_to_ccomp"]), vec![1]);
    assert_eq!(expand_rules(&nested, seed, &["relcl_tolerant_to_one_ccomp"]), vec![1, 2, 3, 4, 5]);
    assert_eq!(expand_rules(&nested, seed, &["relcl_without_long_complements"]), vec![1, 2, 3]);
}

#[test]
fn possessed_nouns_keep_their_relative_clause_out() {
    let tree = sentence(&[
        "1 his he PRP$ 2 nmod:poss",
        "2 friend friend NN 0 root",
        "3 who who WP 4 nsubj",
        "4 left leave VBD 2 acl:relcl",
    ]);
    assert_eq!(expand_rules(&tree, (1, 2), &["relcl_permissive"]), vec![1]);
    assert_eq!(expand_key(&tree, (1, 2), "UB"), vec![0, 1]);
}

#[test]
fn clausal_modifiers() {
    let tree = ability_to_bind();
    let seed = (1, 2);
    assert_eq!(expand_rules(&tree, seed, &["acl_shallow"]), vec![1, 3]);
    assert_eq!(expand_rules(&tree, seed, &["acl_deep"]), vec![1, 2, 3, 4, 5]);
    // Function words such as the infinitival marker stay out.
    assert_eq!(expand_rules(&tree, seed, &["selective_subgraph"]), vec![0, 1, 3, 4, 5]);
}

#[test]
fn unassigned_rules() {
    let of = sentence(&["1 levels level NNS 0 root", "2 of of IN 1 prep", "3 magnesium magnesium NN 2 pobj"]);
    assert_eq!(expand_rules(&of, (0, 1), &["scispacy_nmod_of"]), vec![0, 2]);

    let in_water = sentence(&["1 levels level NNS 0 root", "2 in in IN 1 prep", "3 water water NN 2 pobj"]);
    assert_eq!(expand_rules(&in_water, (0, 1), &["scispacy_nmod_of"]), vec![0]);

    let negated = sentence(&["1 not not RB 2 neg", "2 toxic toxic JJ 0 root"]);
    assert_eq!(expand_rules(&negated, (1, 2), &["general_tbd"]), vec![0, 1]);

    let xpos = sentence(&["1 seeking seek VBG 0 root", "2 fill fill VB 1 xpos"]);
    assert_eq!(expand_rules(&xpos, (0, 1), &["xpos_permissive"]), vec![0, 1]);
}

#[test]
fn custom_strategies_follow_the_given_rules_only() {
    let tree = able_to_capture();
    assert_eq!(expand_rules(&tree, (7, 8), &["mark"]), vec![6, 7]);
    assert_eq!(expand_rules(&tree, (7, 8), &["xcomp_jj"]), vec![5, 7]);
}

// --- Catalog ----------------------------------------------------------------

#[test]
fn catalog_is_consistent() {
    let entries = catalog();
    let mut names: Vec<&str> = entries.iter().map(|e| e.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), entries.len(), "duplicate rule names");

    for entry in entries {
        assert_eq!(entry.rule().name(), Some(entry.name), "{} is not named after itself", entry.name);
        assert!(!entry.example.is_empty());
        assert_eq!(by_name(entry.name).map(|e| e.name), Some(entry.name));
    }
    assert!(by_name("nope").is_none());

    assert_eq!(rules::obligatory().len(), 5);
    assert_eq!(rules::general_purpose().len(), 5);
    assert_eq!(rules::nominal_complements().len(), 5);
    assert_eq!(rules::permissive().len(), 5);
    let unassigned: Vec<&str> = entries.iter().filter(|e| e.group.is_empty()).map(|e| e.name).collect();
    assert_eq!(
        unassigned,
        vec![
            "general_tbd",
            "scispacy_nmod_of",
            "xpos_permissive",
            "nmod_to_of_nominals",
            "relcl_without_long_complements"
        ]
    );
    assert_eq!(by_name("conjuncts").map(|e| e.group), Some(RuleGroups::CONJUNCTS));
}
