//! Gantt timeline model.
//!
//! A timeline is an ordered, gap-free sequence of slots. Every instant
//! between t=0 and the final finish is covered by exactly one slot;
//! periods with nothing to run are explicit `Idle` slots.

use serde::{Deserialize, Serialize};

/// Who holds the CPU during a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    /// Nothing runnable.
    Idle,
    /// The named process.
    Process(String),
}

impl Occupant {
    /// Process name, or `None` for idle.
    pub fn name(&self) -> Option<&str> {
        match self {
            Occupant::Idle => None,
            Occupant::Process(name) => Some(name),
        }
    }

    /// Whether this is the idle marker.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Occupant::Idle)
    }
}

/// One contiguous Gantt entry, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot holder.
    pub occupant: Occupant,
    /// Start time (inclusive).
    pub start: i64,
    /// End time (exclusive). Always greater than `start`.
    pub end: i64,
}

impl Slot {
    /// Slot length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// An ordered sequence of non-overlapping slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    slots: Vec<Slot>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `[start, end)` for `occupant`.
    ///
    /// Zero-length spans are ignored. A span that continues the previous
    /// slot's occupant without a gap extends that slot instead of opening
    /// a new one. Any gap since the last slot is filled with idle time.
    pub fn push(&mut self, occupant: Occupant, start: i64, end: i64) {
        if end <= start {
            return;
        }
        let last_end = self.end_time();
        if start > last_end {
            self.push(Occupant::Idle, last_end, start);
        }
        if let Some(last) = self.slots.last_mut() {
            if last.occupant == occupant && last.end == start {
                last.end = end;
                return;
            }
        }
        self.slots.push(Slot {
            occupant,
            start,
            end,
        });
    }

    /// Appends a busy span for `name`.
    pub fn push_process(&mut self, name: &str, start: i64, end: i64) {
        self.push(Occupant::Process(name.to_string()), start, end);
    }

    /// Appends an idle span.
    pub fn push_idle(&mut self, start: i64, end: i64) {
        self.push(Occupant::Idle, start, end);
    }

    /// All slots in time order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Iterates slots in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the timeline has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// End of the last slot (0 when empty).
    pub fn end_time(&self) -> i64 {
        self.slots.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total time the CPU is running a process.
    pub fn busy_time(&self) -> i64 {
        self.slots
            .iter()
            .filter(|s| !s.occupant.is_idle())
            .map(Slot::duration)
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> i64 {
        self.slots
            .iter()
            .filter(|s| s.occupant.is_idle())
            .map(Slot::duration)
            .sum()
    }

    /// Total CPU time given to `name`.
    pub fn executed_by(&self, name: &str) -> i64 {
        self.slots
            .iter()
            .filter(|s| s.occupant.name() == Some(name))
            .map(Slot::duration)
            .sum()
    }

    /// Slots held by `name`.
    pub fn slots_for(&self, name: &str) -> Vec<&Slot> {
        self.slots
            .iter()
            .filter(|s| s.occupant.name() == Some(name))
            .collect()
    }

    /// Whether the slots cover `[0, end_time)` with no gap or overlap.
    pub fn is_contiguous(&self) -> bool {
        let mut t = 0;
        for slot in &self.slots {
            if slot.start != t || slot.end <= slot.start {
                return false;
            }
            t = slot.end;
        }
        true
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
