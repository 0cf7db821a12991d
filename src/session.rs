//! Caller-owned simulation session.
//!
//! The scheduling functions are pure. A [`Session`] is where a front end
//! keeps everything that outlives one call: the current process list,
//! the run settings, the last results and a step cursor over each trace.
//! Each session is independent; nothing is shared between sessions.
//!
//! ```
//! use cpu_sched::models::Process;
//! use cpu_sched::session::Session;
//!
//! let mut session = Session::new();
//! session.set_processes(vec![Process::new("P1", 0, 3), Process::new("P2", 1, 2)]);
//! session.run_cpu().unwrap();
//!
//! assert_eq!(session.next_step().unwrap().running.as_deref(), Some("P1"));
//! assert_eq!(session.next_step().unwrap().running.as_deref(), Some("P2"));
//! assert!(session.next_step().is_none());
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{CpuRequest, HeftRequest, SimulationConfig};
use crate::error::Result;
use crate::heft::{self, build_heft_steps, HeftSchedule, HeftStep};
use crate::models::Process;
use crate::scheduler::{self, ComparisonRow, CpuSchedule};
use crate::trace::{steps_for, CpuStep};

/// A list of steps with a position.
///
/// The cursor starts before the first step; `next` moves onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCursor<T> {
    steps: Vec<T>,
    position: Option<usize>,
}

impl<T> Default for StepCursor<T> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            position: None,
        }
    }
}

impl<T> StepCursor<T> {
    /// Wraps `steps` with the cursor before the first one.
    pub fn new(steps: Vec<T>) -> Self {
        Self {
            steps,
            position: None,
        }
    }

    /// All steps.
    pub fn steps(&self) -> &[T] {
        &self.steps
    }

    /// Current index, `None` before the first step.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Step under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.position.and_then(|i| self.steps.get(i))
    }

    /// Advances and returns the new step. Stays put at the end.
    pub fn next(&mut self) -> Option<&T> {
        let next = self.position.map_or(0, |i| i + 1);
        if next >= self.steps.len() {
            return None;
        }
        self.position = Some(next);
        self.steps.get(next)
    }

    /// Steps back and returns the new step. Stays put at the first step.
    pub fn prev(&mut self) -> Option<&T> {
        match self.position {
            Some(i) if i > 0 => {
                self.position = Some(i - 1);
                self.steps.get(i - 1)
            }
            _ => None,
        }
    }

    /// Moves the cursor back before the first step.
    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Whether the last step has been reached.
    pub fn is_done(&self) -> bool {
        match self.position {
            Some(i) => i + 1 >= self.steps.len(),
            None => self.steps.is_empty(),
        }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// State a front end keeps between calls.
///
/// A failed run leaves the previous results in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    processes: Vec<Process>,
    config: SimulationConfig,
    cpu: Option<CpuSchedule>,
    cpu_steps: StepCursor<CpuStep>,
    heft: Option<HeftSchedule>,
    heft_steps: StepCursor<HeftStep>,
}

impl Session {
    /// Creates an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run settings.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the process list.
    pub fn with_processes(mut self, processes: Vec<Process>) -> Self {
        self.set_processes(processes);
        self
    }

    // ======================== Inputs ========================

    /// Current process list.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Replaces the process list and drops the CPU results built from
    /// the old one.
    pub fn set_processes(&mut self, processes: Vec<Process>) {
        self.processes = processes;
        self.clear_cpu();
    }

    /// Appends a process. The CPU results are dropped.
    pub fn add_process(&mut self, process: Process) {
        self.processes.push(process);
        self.clear_cpu();
    }

    /// Removes a process by name. The CPU results are dropped if it existed.
    pub fn remove_process(&mut self, name: &str) -> Option<Process> {
        let idx = self.processes.iter().position(|p| p.name == name)?;
        self.clear_cpu();
        Some(self.processes.remove(idx))
    }

    /// Current run settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the run settings. Stored results are kept until the next run.
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    // ======================== CPU ========================

    /// Runs the configured algorithm over the current processes and
    /// resets the step cursor.
    pub fn run_cpu(&mut self) -> Result<&CpuSchedule> {
        let result = scheduler::schedule(&self.processes, &self.config)?;
        self.store_cpu(result)
    }

    /// Normalizes a raw request, adopts its processes and settings, and
    /// runs it.
    ///
    /// Nothing is adopted unless the whole request is valid.
    pub fn run_request(&mut self, request: &CpuRequest) -> Result<&CpuSchedule> {
        let processes = scheduler::normalize_request(request)?;
        let result = scheduler::schedule(&processes, &request.config)?;
        self.processes = processes;
        self.config = request.config.clone();
        self.store_cpu(result)
    }

    /// Runs every algorithm over the current processes.
    pub fn compare(&self, quantum: i64) -> Result<Vec<ComparisonRow>> {
        scheduler::compare(&self.processes, quantum)
    }

    fn store_cpu(&mut self, result: CpuSchedule) -> Result<&CpuSchedule> {
        let steps = steps_for(&result)?;
        debug!(
            "session: stored {} run with {} steps",
            result.algorithm,
            steps.len()
        );
        self.cpu_steps = StepCursor::new(steps);
        Ok(&*self.cpu.insert(result))
    }

    fn clear_cpu(&mut self) {
        self.cpu = None;
        self.cpu_steps = StepCursor::default();
    }

    /// Last CPU result.
    pub fn cpu_result(&self) -> Option<&CpuSchedule> {
        self.cpu.as_ref()
    }

    /// Step cursor over the last CPU result.
    pub fn cpu_steps(&self) -> &StepCursor<CpuStep> {
        &self.cpu_steps
    }

    /// Advances the CPU cursor.
    pub fn next_step(&mut self) -> Option<&CpuStep> {
        self.cpu_steps.next()
    }

    /// Moves the CPU cursor back.
    pub fn prev_step(&mut self) -> Option<&CpuStep> {
        self.cpu_steps.prev()
    }

    /// CPU step under the cursor.
    pub fn current_step(&self) -> Option<&CpuStep> {
        self.cpu_steps.current()
    }

    /// Moves the CPU cursor before the first step.
    pub fn reset_cursor(&mut self) {
        self.cpu_steps.reset();
    }

    // ======================== HEFT ========================

    /// Runs HEFT and resets the HEFT step cursor.
    pub fn run_heft(&mut self, request: &HeftRequest) -> Result<&HeftSchedule> {
        let result = heft::schedule(request)?;
        let steps = build_heft_steps(&result);
        debug!("session: stored heft run with {} steps", steps.len());
        self.heft_steps = StepCursor::new(steps);
        Ok(&*self.heft.insert(result))
    }

    /// Last HEFT result.
    pub fn heft_result(&self) -> Option<&HeftSchedule> {
        self.heft.as_ref()
    }

    /// Step cursor over the last HEFT result.
    pub fn heft_steps(&self) -> &StepCursor<HeftStep> {
        &self.heft_steps
    }

    /// Advances the HEFT cursor.
    pub fn next_heft_step(&mut self) -> Option<&HeftStep> {
        self.heft_steps.next()
    }

    /// Moves the HEFT cursor back.
    pub fn prev_heft_step(&mut self) -> Option<&HeftStep> {
        self.heft_steps.prev()
    }

    /// HEFT step under the cursor.
    pub fn current_heft_step(&self) -> Option<&HeftStep> {
        self.heft_steps.current()
    }

    /// Moves the HEFT cursor before the first step.
    pub fn reset_heft_cursor(&mut self) {
        self.heft_steps.reset();
    }
}
