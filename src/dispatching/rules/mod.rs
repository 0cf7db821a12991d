//! Built-in selection rules.
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | FCFS | arrival | FCFS |
//! | SJF | burst | SJF |
//! | SRTF | remaining | SRTF |
//! | PRIORITY | priority | Priority |
//! | HRRN | -response ratio | HRRN |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{Candidate, RuleScore, SelectionContext, SelectionRule};

/// First-Come First-Served.
///
/// Earliest arrival runs first.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SelectionRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.process.arrival as f64
    }

    fn description(&self) -> &'static str {
        "First-Come First-Served"
    }
}

/// Shortest Job First.
///
/// Smallest total burst runs first. Optimal for mean waiting time among
/// non-preemptive policies when all jobs are ready together.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SelectionRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.process.burst as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest Remaining Time First.
#[derive(Debug, Clone, Copy)]
pub struct Srtf;

impl SelectionRule for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.remaining() as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Static priority. Smaller number = more important.
#[derive(Debug, Clone, Copy)]
pub struct PriorityRule;

impl SelectionRule for PriorityRule {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.process.priority as f64
    }

    fn description(&self) -> &'static str {
        "Static Priority"
    }
}

/// Highest Response Ratio Next.
///
/// `ratio = (waiting + burst) / burst`, with waiting measured at the
/// decision instant. Ratios grow while a process waits, so long jobs
/// cannot starve.
#[derive(Debug, Clone, Copy)]
pub struct Hrrn;

impl Hrrn {
    /// Response ratio of `candidate` at `t`.
    pub fn response_ratio(candidate: &Candidate<'_>, t: i64) -> f64 {
        let burst = candidate.process.burst as f64;
        (candidate.waiting_at(t) as f64 + burst) / burst
    }
}

impl SelectionRule for Hrrn {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> RuleScore {
        -Self::response_ratio(candidate, context.current_time)
    }

    fn metric(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> f64 {
        Self::response_ratio(candidate, context.current_time)
    }

    fn description(&self) -> &'static str {
        "Highest Response Ratio Next"
    }
}
