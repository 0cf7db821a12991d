//! Process model.
//!
//! A process is a unit of CPU work with an arrival time, a total burst
//! and a static priority. The derived fields (`start`, `finish`) are
//! filled in by a scheduling run on the run's private copy; the caller's
//! records are never touched.
//!
//! # Time Representation
//! All times are integer ticks relative to t=0.

use serde::{Deserialize, Serialize};

/// A process to be scheduled on a single CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process name within a run.
    pub name: String,
    /// Arrival time (ticks, >= 0).
    pub arrival: i64,
    /// Total CPU time required (ticks, >= 1).
    pub burst: i64,
    /// Static priority (smaller = more important).
    #[serde(default)]
    pub priority: i32,
    /// First dispatch time. Set by a scheduling run.
    #[serde(default)]
    pub start: Option<i64>,
    /// Completion time. Set by a scheduling run.
    #[serde(default)]
    pub finish: Option<i64>,
}

impl Process {
    /// Creates a new process with priority 0.
    pub fn new(name: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority: 0,
            start: None,
            finish: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Returns a copy with the derived fields cleared.
    ///
    /// Every run starts from such a copy, so results of an earlier run
    /// can never leak into a later one.
    pub fn fresh(&self) -> Self {
        Self {
            start: None,
            finish: None,
            ..self.clone()
        }
    }

    /// Whether the process has arrived by time `t`.
    #[inline]
    pub fn has_arrived(&self, t: i64) -> bool {
        self.arrival <= t
    }

    /// Whether a run has completed this process.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finish.is_some()
    }

    /// Records a dispatch at `t`. Only the first dispatch sets `start`.
    pub(crate) fn mark_dispatched(&mut self, t: i64) {
        if self.start.is_none() {
            self.start = Some(t);
        }
    }

    /// Records completion at `t`.
    pub(crate) fn mark_finished(&mut self, t: i64) {
        self.finish = Some(t);
    }
}
