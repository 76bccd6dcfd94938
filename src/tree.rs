//! Per-sentence dependency tree.
//!
//! A [`DependencyTree`] can only be obtained through [`TreeBuilder::build`],
//! which checks the structural invariants the engine relies on:
//!
//! - exactly one token without a head (the root);
//! - every other token has exactly one head;
//! - following heads from any token reaches the root (no cycles).
//!
//! Once built, the tree is immutable and can be shared freely across threads.

use crate::error::{ExpansionError, Result, SentenceId};
use crate::{Edge, Entity, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    id: SentenceId,
    tokens: Vec<Token>,
    root: usize,
}

impl DependencyTree {
    pub fn id(&self) -> &SentenceId {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Outgoing edges of `index`, empty for an unknown index.
    pub fn children(&self, index: usize) -> &[Edge] {
        self.tokens.get(index).map(|t| t.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, index: usize) -> Option<&Edge> {
        self.tokens.get(index)?.parent.as_ref()
    }

    /// Every index reachable from `index` through outgoing edges, `index`
    /// included, in ascending order.
    pub fn descendants(&self, index: usize) -> Vec<usize> {
        let mut seen = vec![false; self.tokens.len()];
        let mut stack = vec![index];
        while let Some(i) = stack.pop() {
            if i >= seen.len() || seen[i] {
                continue;
            }
            seen[i] = true;
            stack.extend(self.children(i).iter().map(|e| e.target));
        }
        seen.iter().enumerate().filter(|(_, s)| **s).map(|(i, _)| i).collect()
    }

    /// Surface text of `[start, end)`, tokens joined by single spaces.
    pub fn text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.tokens.len());
        let start = start.min(end);
        self.tokens[start..end].iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
    }

    /// Reject entities that do not fit this tree.
    pub fn check_entity(&self, entity: &Entity) -> Result<()> {
        let range = entity.range;
        if range.end > self.tokens.len() || range.start > range.end {
            return Err(ExpansionError::EntityOutOfRange {
                sentence: self.id.clone(),
                start: range.start,
                end: range.end,
                len: self.tokens.len(),
            });
        }
        if range.is_empty() {
            return Err(ExpansionError::EmptyEntity { sentence: self.id.clone(), start: range.start });
        }
        Ok(())
    }
}

/// Incremental constructor for a [`DependencyTree`].
///
/// ```
/// use depspan::TreeBuilder;
///
/// let mut b = TreeBuilder::new();
/// let the = b.token("the", "the", "DT");
/// let cat = b.token("cat", "cat", "NN");
/// b.attach(the, cat, "det");
/// let tree = b.build().unwrap();
/// assert_eq!(tree.root(), cat);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    id: SentenceId,
    tokens: Vec<Token>,
    /// `(child, parent, label)` in attachment order.
    edges: Vec<(usize, usize, String)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        TreeBuilder { id: SentenceId::new(id), ..Self::default() }
    }

    pub fn set_id(&mut self, id: SentenceId) -> &mut Self {
        self.id = id;
        self
    }

    /// Append a token and return its index.
    pub fn token(&mut self, text: &str, lemma: &str, tag: &str) -> usize {
        let index = self.tokens.len();
        self.tokens.push(Token {
            index,
            text: text.to_string(),
            lemma: lemma.to_string(),
            tag: tag.to_string(),
            entity_type: None,
            children: Vec::new(),
            parent: None,
        });
        index
    }

    pub fn entity_type(&mut self, index: usize, entity_type: &str) -> &mut Self {
        if let Some(token) = self.tokens.get_mut(index) {
            token.entity_type = Some(entity_type.to_string());
        }
        self
    }

    /// Record `child <-label- parent`. Indices are checked in [`build`](Self::build),
    /// so tokens and edges may be added in any order.
    pub fn attach(&mut self, child: usize, parent: usize, label: &str) -> &mut Self {
        self.edges.push((child, parent, label.to_string()));
        self
    }

    pub fn build(self) -> Result<DependencyTree> {
        let TreeBuilder { id, mut tokens, edges } = self;
        let len = tokens.len();

        let mut heads: Vec<Vec<(usize, String)>> = vec![Vec::new(); len];
        for (child, parent, label) in edges {
            match heads.get_mut(child) {
                Some(incoming) => incoming.push((parent, label)),
                None => return Err(ExpansionError::IndexOutOfRange { sentence: id, index: child, len }),
            }
        }

        for (child, incoming) in heads.iter().enumerate() {
            match incoming.as_slice() {
                [] => {}
                [(parent, label)] => {
                    if *parent >= len {
                        return Err(ExpansionError::IndexOutOfRange { sentence: id, index: *parent, len });
                    }
                    if *parent == child {
                        return Err(ExpansionError::SelfLoop { sentence: id, index: child });
                    }
                    tokens[child].parent = Some(Edge { label: label.clone(), target: *parent });
                    tokens[*parent].children.push(Edge { label: label.clone(), target: child });
                }
                _ => return Err(ExpansionError::MultipleHeads { sentence: id, index: child }),
            }
        }

        let roots: Vec<usize> = tokens.iter().filter(|t| t.is_root()).map(|t| t.index).collect();
        let root = match roots.as_slice() {
            [] => return Err(ExpansionError::NoRoot { sentence: id }),
            [root] => *root,
            _ => return Err(ExpansionError::MultipleRoots { sentence: id, roots }),
        };

        // With a single root, a token that cannot reach it within `len` steps is on a cycle.
        for start in 0..len {
            let mut current = start;
            let mut steps = 0;
            while let Some(edge) = &tokens[current].parent {
                current = edge.target;
                steps += 1;
                if steps > len {
                    return Err(ExpansionError::Cycle { sentence: id, index: start });
                }
            }
        }

        for token in &mut tokens {
            token.children.sort_by_key(|e| e.target);
        }

        Ok(DependencyTree { id, tokens, root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> TreeBuilder {
        let mut b = TreeBuilder::with_id("t");
        for i in 0..n {
            b.token(&format!("w{i}"), &format!("w{i}"), "NN");
        }
        b
    }

    #[test]
    fn children_are_kept_in_surface_order() {
        let mut b = chain(4);
        b.attach(3, 1, "amod").attach(0, 1, "det").attach(2, 1, "compound");
        let tree = b.build().unwrap();
        let targets: Vec<usize> = tree.children(1).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![0, 2, 3]);
        assert_eq!(tree.parent(3).map(|e| e.label.as_str()), Some("amod"));
    }

    #[test]
    fn rejects_malformed_trees() {
        let mut two_roots = chain(3);
        two_roots.attach(0, 1, "det");
        assert!(matches!(two_roots.build(), Err(ExpansionError::MultipleRoots { roots, .. }) if roots == vec![1, 2]));

        let mut cycle = chain(3);
        cycle.attach(0, 1, "dep").attach(1, 0, "dep");
        assert!(matches!(cycle.build(), Err(ExpansionError::Cycle { .. })));

        let mut two_heads = chain(3);
        two_heads.attach(0, 1, "det").attach(0, 2, "det").attach(1, 2, "dep");
        assert!(matches!(two_heads.build(), Err(ExpansionError::MultipleHeads { index: 0, .. })));

        let mut dangling = chain(2);
        dangling.attach(0, 5, "dep");
        assert!(matches!(dangling.build(), Err(ExpansionError::IndexOutOfRange { index: 5, len: 2, .. })));

        let mut self_loop = chain(2);
        self_loop.attach(0, 0, "dep");
        assert!(matches!(self_loop.build(), Err(ExpansionError::SelfLoop { index: 0, .. })));

        assert!(matches!(chain(0).build(), Err(ExpansionError::NoRoot { .. })));
    }

    #[test]
    fn edges_may_precede_their_tokens() {
        let mut b = TreeBuilder::with_id("early");
        b.attach(0, 1, "det");
        let the = b.token("the", "the", "DT");
        let cat = b.token("cat", "cat", "NN");
        let tree = b.build().unwrap();
        assert_eq!(tree.root(), cat);
        assert_eq!(tree.parent(the).map(|e| (e.target, e.label.as_str())), Some((cat, "det")));

        let mut missing = chain(2);
        missing.attach(3, 1, "amod");
        assert!(matches!(missing.build(), Err(ExpansionError::IndexOutOfRange { index: 3, len: 2, .. })));
    }

    #[test]
    fn cycle_detached_from_root_is_rejected() {
        // 0 is the root; 1 and 2 point at each other.
        let mut b = chain(3);
        b.attach(1, 2, "dep").attach(2, 1, "dep");
        assert!(matches!(b.build(), Err(ExpansionError::Cycle { .. })));
    }

    #[test]
    fn descendants_cover_the_subtree() {
        let mut b = chain(5);
        b.attach(0, 1, "det").attach(1, 2, "nsubj").attach(3, 2, "dobj").attach(4, 3, "amod");
        let tree = b.build().unwrap();
        assert_eq!(tree.descendants(1), vec![0, 1]);
        assert_eq!(tree.descendants(3), vec![3, 4]);
        assert_eq!(tree.descendants(2), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn entity_bounds_are_checked() {
        let mut b = chain(3);
        b.attach(0, 1, "det").attach(2, 1, "amod");
        let tree = b.build().unwrap();
        assert!(tree.check_entity(&Entity::new(0, 3, "X")).is_ok());
        assert!(matches!(tree.check_entity(&Entity::new(2, 4, "X")), Err(ExpansionError::EntityOutOfRange { .. })));
        assert!(matches!(tree.check_entity(&Entity::new(1, 1, "X")), Err(ExpansionError::EmptyEntity { .. })));
    }
}
