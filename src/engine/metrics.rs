//! Expansion run metrics.
//!
//! `Expander::run` discards these; `Expander::run_with_metrics` returns them
//! so callers can inspect what each committed pass added and how long it
//! took. The pass list doubles as a monotonicity trace: the span after pass
//! `n` is the seed plus the `added` sets of passes `1..=n`.

use std::time::Duration;

use crate::ExpansionSpan;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// One entry per committed pass, the last one being the pass that added
    /// nothing (unless the strategy is single-pass).
    pub passes: Vec<PassMetrics>,
}

/// Timing and growth for one committed pass.
#[derive(Debug, Default, Clone)]
pub struct PassMetrics {
    /// 1-based pass number.
    pub pass: usize,
    pub duration: Duration,
    /// Indices merged into the span at the end of this pass, ascending.
    pub added: Vec<usize>,
}

impl PassMetrics {
    pub fn produced(&self) -> usize {
        self.added.len()
    }
}

/// Final span bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub span: ExpansionSpan,
    pub metrics: RunMetrics,
}
