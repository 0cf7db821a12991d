//! Decision-instant state passed to selection rules.

use crate::models::Process;

/// The instant at which a dispatch decision is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionContext {
    /// Decision time (ticks).
    pub current_time: i64,
}

impl SelectionContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self { current_time }
    }
}

/// A ready process as seen by a selection rule.
///
/// `index` is the process's position in the run's input order and is
/// what ties are broken on.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position in input order.
    pub index: usize,
    /// The process record.
    pub process: &'a Process,
    /// CPU time received so far.
    pub executed: i64,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    pub fn new(index: usize, process: &'a Process, executed: i64) -> Self {
        Self {
            index,
            process,
            executed,
        }
    }

    /// Work left.
    #[inline]
    pub fn remaining(&self) -> i64 {
        self.process.burst - self.executed
    }

    /// Time spent ready but not running, as of `t`.
    #[inline]
    pub fn waiting_at(&self, t: i64) -> i64 {
        t - self.process.arrival - self.executed
    }
}
