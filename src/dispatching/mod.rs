//! Selection rules for single-CPU dispatching.
//!
//! Every policy except Round Robin is "pick the best ready process by
//! some score". The score is a [`SelectionRule`]; the [`RuleEngine`]
//! applies it to the ready set with a stable tie-break.
//!
//! # Usage
//!
//! ```
//! use cpu_sched::dispatching::{rules, Candidate, RuleEngine, SelectionContext};
//! use cpu_sched::models::Process;
//!
//! let a = Process::new("A", 0, 5);
//! let b = Process::new("B", 0, 2);
//! let ready = vec![Candidate::new(0, &a, 0), Candidate::new(1, &b, 0)];
//!
//! let engine = RuleEngine::new(rules::Sjf);
//! let best = engine.select_best(&ready, &SelectionContext::at_time(0));
//! assert_eq!(best, Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems" (HRRN)

mod context;
mod engine;
pub mod rules;

pub use context::{Candidate, SelectionContext};
pub use engine::RuleEngine;

use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = selected first.
pub type RuleScore = f64;

/// A rule that scores a ready process at a decision instant.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that maximize a quantity
/// (e.g. response ratio) return its negation.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Scores a candidate at the context's decision instant.
    fn evaluate(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> RuleScore;

    /// The quantity the rule ranks by, in its natural sign.
    ///
    /// Equal to the score unless the rule negates to maximize.
    fn metric(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> f64 {
        self.evaluate(candidate, context)
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
