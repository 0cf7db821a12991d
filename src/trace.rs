//! CPU step trace builder.
//!
//! Turns a finished timeline into one [`CpuStep`] per slot. Each step
//! records, as of the slot's start, which processes were ready (with
//! their remaining work and accrued waiting) and which had completed.
//!
//! The builder makes no scheduling decisions of its own: given the same
//! timeline and process records it always yields the same steps.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Process, Timeline};
use crate::scheduler::CpuSchedule;

/// One explainable step of a CPU schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuStep {
    /// Position in the trace.
    pub index: usize,
    /// Slot start.
    pub start: i64,
    /// Slot end.
    pub end: i64,
    /// Process holding the CPU, `None` when idle.
    pub running: Option<String>,
    /// Processes eligible at `start`, in input order.
    pub ready: Vec<ReadyEntry>,
    /// Processes finished by `start`, in input order.
    pub completed: Vec<String>,
}

/// A ready process as of a step's start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyEntry {
    /// Process name.
    pub name: String,
    /// Work left.
    pub remaining: i64,
    /// Time spent waiting so far.
    pub waiting: i64,
}

impl CpuStep {
    /// Whether the CPU is idle during this step.
    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    /// Step length.
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Builds the step trace for a timeline.
///
/// # Errors
/// `Invariant` if a process has no finish time, or if the timeline
/// names a process that is not in `processes`.
pub fn build_cpu_steps(timeline: &Timeline, processes: &[Process]) -> Result<Vec<CpuStep>> {
    let finishes = processes
        .iter()
        .map(|p| {
            p.finish
                .ok_or_else(|| Error::invariant(format!("process '{}' has no finish time", p.name)))
        })
        .collect::<Result<Vec<i64>>>()?;

    let mut executed = vec![0i64; processes.len()];
    let mut steps = Vec::with_capacity(timeline.len());

    for (index, slot) in timeline.iter().enumerate() {
        let t = slot.start;

        let ready = processes
            .iter()
            .enumerate()
            .filter(|(i, p)| p.arrival <= t && executed[*i] < p.burst)
            .map(|(i, p)| ReadyEntry {
                name: p.name.clone(),
                remaining: p.burst - executed[i],
                waiting: t - p.arrival - executed[i],
            })
            .collect();

        let completed = processes
            .iter()
            .zip(&finishes)
            .filter(|(_, f)| **f <= t)
            .map(|(p, _)| p.name.clone())
            .collect();

        let running = slot.occupant.name().map(str::to_string);
        if let Some(name) = &running {
            let i = processes
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| Error::invariant(format!("timeline names unknown process '{name}'")))?;
            executed[i] += slot.duration();
        }

        steps.push(CpuStep {
            index,
            start: slot.start,
            end: slot.end,
            running,
            ready,
            completed,
        });
    }

    Ok(steps)
}

/// Builds the step trace for a finished schedule.
pub fn steps_for(schedule: &CpuSchedule) -> Result<Vec<CpuStep>> {
    build_cpu_steps(&schedule.timeline, &schedule.processes)
}
