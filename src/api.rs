use std::time::{Duration, Instant};

use crate::engine::{Expander, PassMetrics};
use crate::error::Result;
use crate::strategy::{self, StrategyRegistry};
use crate::{DependencyTree, Entity, ExpansionSpan, Range};

/// Options that affect expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Strategy key, e.g. `"U"`, `"ALL+C"` or `"SUBG"`.
    pub strategy: String,
}

impl Default for Options {
    fn default() -> Self {
        Options { strategy: "default".to_string() }
    }
}

impl Options {
    pub fn strategy(key: impl Into<String>) -> Self {
        Options { strategy: key.into() }
    }
}

/// The stabilized span of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedSpan {
    /// The seed the span grew from.
    pub entity: Entity,
    /// Member indices, ascending.
    pub indices: Vec<usize>,
    /// Bounding range of the members, `[min, max + 1)`.
    pub range: Range,
}

impl ExpandedSpan {
    fn new(entity: &Entity, span: &ExpansionSpan) -> Self {
        let indices = span.to_vec();
        // Runs always start from a non-empty seed, so the fallback is never hit.
        let (min, max) = span.bounds().unwrap_or((entity.range.start, entity.range.end.saturating_sub(1)));
        ExpandedSpan { entity: entity.clone(), indices, range: Range { start: min, end: max + 1 } }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// `(min_index, max_index)`, both inclusive.
    pub fn bounds(&self) -> (usize, usize) {
        (self.range.start, self.range.end - 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// True when the members leave no gap inside the bounding range.
    pub fn is_contiguous(&self) -> bool {
        self.indices.len() == self.range.len()
    }

    /// Surface text of the bounding range.
    pub fn text(&self, tree: &DependencyTree) -> String {
        tree.text(self.range.start, self.range.end)
    }
}

/// A compact per-pass trace.
#[derive(Debug, Clone)]
pub struct PassSummary {
    pub pass: usize,
    pub duration: Duration,
    pub produced: usize,
    pub added: Vec<usize>,
    /// Surface forms of the added tokens.
    pub preview: String,
}

/// Additional details returned by [`expand_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExpansionDetails {
    pub strategy: String,
    /// Total elapsed time, including strategy lookup.
    pub total: Duration,
    pub passes: Vec<PassSummary>,
}

#[derive(Debug, Clone)]
pub struct ExpansionResultVerbose {
    pub span: ExpandedSpan,
    pub details: ExpansionDetails,
}

/// Expand `entity` with the default (identity) strategy.
pub fn expand(tree: &DependencyTree, entity: &Entity) -> Result<ExpandedSpan> {
    expand_with(tree, entity, &Options::default())
}

/// Expand `entity` with a built-in strategy.
///
/// # Example
/// ```
/// use depspan::{Entity, Options, TreeBuilder, expand_with};
///
/// let mut b = TreeBuilder::new();
/// let low = b.token("Low", "low", "JJ");
/// let levels = b.token("levels", "level", "NNS");
/// b.attach(low, levels, "amod");
/// let tree = b.build().unwrap();
///
/// let span = expand_with(&tree, &Entity::new(1, 2, "X"), &Options::strategy("U")).unwrap();
/// assert_eq!(span.bounds(), (0, 1));
/// ```
pub fn expand_with(tree: &DependencyTree, entity: &Entity, options: &Options) -> Result<ExpandedSpan> {
    expand_in(strategy::builtin(), tree, entity, options)
}

/// Expand `entity` with a strategy from a caller-built registry.
pub fn expand_in(
    registry: &StrategyRegistry,
    tree: &DependencyTree,
    entity: &Entity,
    options: &Options,
) -> Result<ExpandedSpan> {
    let strategy = registry.get(&options.strategy)?;
    let span = Expander::new(tree, strategy).run(entity)?;
    Ok(ExpandedSpan::new(entity, &span))
}

/// Expand every entity of one sentence independently; results follow
/// `entities` order. Fails on the first invalid entity.
pub fn expand_all(tree: &DependencyTree, entities: &[Entity], options: &Options) -> Result<Vec<ExpandedSpan>> {
    let strategy = strategy::builtin().get(&options.strategy)?;
    let expander = Expander::new(tree, strategy);
    entities.iter().map(|entity| Ok(ExpandedSpan::new(entity, &expander.run(entity)?))).collect()
}

/// Expand `entity` and return the per-pass trace as well.
///
/// The default [`expand_with`] path does not allocate these traces.
pub fn expand_verbose_with(
    tree: &DependencyTree,
    entity: &Entity,
    options: &Options,
) -> Result<ExpansionResultVerbose> {
    let start = Instant::now();
    let strategy = strategy::builtin().get(&options.strategy)?;
    let run = Expander::new(tree, strategy).run_with_metrics(entity)?;

    let passes = run.metrics.passes.iter().map(|pass| pass_summary(tree, pass)).collect();
    let details = ExpansionDetails { strategy: strategy.key().to_string(), total: start.elapsed(), passes };
    Ok(ExpansionResultVerbose { span: ExpandedSpan::new(entity, &run.span), details })
}

fn pass_summary(tree: &DependencyTree, pass: &PassMetrics) -> PassSummary {
    let preview: String = pass
        .added
        .iter()
        .filter_map(|&i| tree.token(i).map(|t| t.text.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(80)
        .collect();
    PassSummary { pass: pass.pass, duration: pass.duration, produced: pass.produced(), added: pass.added.clone(), preview }
}
