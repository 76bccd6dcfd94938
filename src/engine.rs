//! Expansion engine.
//!
//! The engine is a small interpreter over three closed expression types:
//!
//! ```text
//! TextPredicate ──┐
//!                 ├─ Predicate ──┐
//! Position ───────┘              ├─ Selector ──┐
//!                                │             ├─ ExpansionRule ──▶ Expander
//!                                └─────────────┘
//! ```
//!
//! - `predicate.rs`: boolean tests over a token and its tree context.
//! - `selector.rs`: one- and two-hop navigation along labeled edges.
//! - `rule.rs`: combinators (`expand_to`, `only_when`, `try`, sequencing,
//!   `try_all`, and the two fixpoint forms) and their interpreter.
//! - `context.rs`: the evaluation context and the snapshot-and-diff pass state.
//! - `expander.rs`: runs a strategy's rule to a fixpoint for one seed.
//! - `metrics.rs`: per-pass trace of a run.
//! - `dsl.rs`: constructor functions used to write rules.
//!
//! ## Invariants
//!
//! - Expansion is monotone: indices are only ever added to a span.
//! - Within a pass, additions are visible to later anchors and later steps
//!   of a sequence, but are merged into the committed span only when the
//!   pass ends.
//! - A no-match is control flow, never an error.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events: `debug` per committed pass and per
//! finished run, `trace` whenever a named rule adds indices.

#[path = "engine/context.rs"]
mod context;
#[path = "engine/dsl.rs"]
pub mod dsl;
#[path = "engine/expander.rs"]
mod expander;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/predicate.rs"]
mod predicate;
#[path = "engine/rule.rs"]
mod rule;
#[path = "engine/selector.rs"]
mod selector;

pub use context::{EvaluationContext, SpanView};
pub use expander::Expander;
pub use metrics::{PassMetrics, RunMetrics, RunResult};
pub use predicate::{Order, Position, Predicate, TextPredicate};
pub use rule::{ExpansionRule, Outcome};
pub use selector::Selector;
