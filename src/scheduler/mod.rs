//! Single-CPU scheduling algorithms and their metrics.
//!
//! Six policies share one contract: a list of processes (plus a quantum
//! for Round Robin) goes in, a [`CpuSchedule`] comes out. Every entry
//! point copies its input first, so caller records are never mutated
//! and no run can observe another run's state.
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | no | earliest arrival |
//! | SJF | no | smallest burst |
//! | SRTF | yes | smallest remaining |
//! | Priority | yes | smallest priority number |
//! | HRRN | no | largest response ratio |
//! | RR | yes (quantum) | FIFO queue |
//!
//! All ties are broken by input order.
//!
//! # Example
//!
//! ```
//! use cpu_sched::models::Process;
//! use cpu_sched::scheduler;
//!
//! let procs = vec![Process::new("P1", 0, 3), Process::new("P2", 1, 2)];
//! let result = scheduler::fcfs(&procs).unwrap();
//! assert_eq!(result.timeline.end_time(), 5);
//! assert!(procs[0].finish.is_none()); // input untouched
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod compare;
mod metrics;
mod non_preemptive;
mod preemptive;
mod round_robin;

pub use compare::{best_by, compare, ComparisonRow, Metric};
pub use metrics::{MetricsSummary, MetricsTable, ProcessMetrics};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{Algorithm, CpuRequest, SimulationConfig};
use crate::dispatching::{rules, RuleEngine};
use crate::error::{Error, Result};
use crate::models::{Process, Timeline};
use crate::validation::{normalize_processes, validate_processes};

/// Result of one CPU scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSchedule {
    /// Policy that produced this schedule.
    pub algorithm: Algorithm,
    /// Quantum used (Round Robin only).
    pub quantum: Option<i64>,
    /// Private copies of the input, with `start`/`finish` filled in.
    pub processes: Vec<Process>,
    /// Gantt timeline covering `[0, makespan)`.
    pub timeline: Timeline,
    /// Per-process metrics and averages.
    pub metrics: MetricsTable,
    /// Every dispatch decision, in time order.
    pub decisions: Vec<DispatchDecision>,
}

/// One dispatch decision: who was eligible and who got the CPU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchDecision {
    /// Decision instant.
    pub time: i64,
    /// Eligible processes in tie-break order, each with the value the
    /// policy ranked it by (remaining, priority, response ratio, ...).
    pub candidates: Vec<CandidateMetric>,
    /// The process dispatched.
    pub chosen: String,
}

/// A candidate and the value its policy ranked it by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetric {
    /// Process name.
    pub name: String,
    /// Ranking value.
    pub value: f64,
}

impl CpuSchedule {
    /// Completion time of the last process.
    pub fn makespan(&self) -> i64 {
        self.timeline.end_time()
    }

    /// Finds a process by name.
    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    /// Finds a process's metrics by name.
    pub fn metrics_for(&self, name: &str) -> Option<&ProcessMetrics> {
        self.metrics.row(name)
    }
}

/// Working state produced by an algorithm driver.
#[derive(Debug, Default)]
struct Run {
    processes: Vec<Process>,
    timeline: Timeline,
    decisions: Vec<DispatchDecision>,
}

impl Run {
    fn finish(self, algorithm: Algorithm, quantum: Option<i64>) -> Result<CpuSchedule> {
        let metrics = MetricsTable::calculate(&self.processes, &self.timeline)?;
        debug!(
            "{}: scheduled {} processes, makespan {}, avg waiting {:.2}",
            algorithm,
            self.processes.len(),
            self.timeline.end_time(),
            metrics.summary.avg_waiting
        );
        Ok(CpuSchedule {
            algorithm,
            quantum,
            processes: self.processes,
            timeline: self.timeline,
            metrics,
            decisions: self.decisions,
        })
    }
}

/// Copies and checks the input of a run.
fn prepare(processes: &[Process]) -> Result<Vec<Process>> {
    if processes.is_empty() {
        return Err(Error::config("process list is empty"));
    }
    validate_processes(processes)?;
    check_horizon(processes)?;
    Ok(processes.iter().map(Process::fresh).collect())
}

/// Rejects inputs whose latest possible finish, the latest arrival plus
/// every burst, does not fit in `i64`. Every instant a driver reaches is
/// bounded by it.
fn check_horizon(processes: &[Process]) -> Result<()> {
    let latest_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst))
        .map(|_| ())
        .ok_or_else(|| Error::config("arrival and burst times overflow the time range"))
}

/// First-Come First-Served.
pub fn fcfs(processes: &[Process]) -> Result<CpuSchedule> {
    let procs = prepare(processes)?;
    non_preemptive::run(procs, &RuleEngine::new(rules::Fcfs)).finish(Algorithm::Fcfs, None)
}

/// Shortest Job First (non-preemptive).
pub fn sjf(processes: &[Process]) -> Result<CpuSchedule> {
    let procs = prepare(processes)?;
    non_preemptive::run(procs, &RuleEngine::new(rules::Sjf)).finish(Algorithm::Sjf, None)
}

/// Shortest Remaining Time First (preemptive).
pub fn srtf(processes: &[Process]) -> Result<CpuSchedule> {
    let procs = prepare(processes)?;
    preemptive::run(procs, &RuleEngine::new(rules::Srtf)).finish(Algorithm::Srtf, None)
}

/// Preemptive static priority.
pub fn priority(processes: &[Process]) -> Result<CpuSchedule> {
    let procs = prepare(processes)?;
    preemptive::run(procs, &RuleEngine::new(rules::PriorityRule))
        .finish(Algorithm::Priority, None)
}

/// Highest Response Ratio Next.
pub fn hrrn(processes: &[Process]) -> Result<CpuSchedule> {
    let procs = prepare(processes)?;
    non_preemptive::run(procs, &RuleEngine::new(rules::Hrrn)).finish(Algorithm::Hrrn, None)
}

/// Round Robin with the given quantum.
///
/// # Errors
/// `Config` if the list is empty or `quantum <= 0`.
pub fn round_robin(processes: &[Process], quantum: i64) -> Result<CpuSchedule> {
    if quantum <= 0 {
        return Err(Error::config(format!(
            "quantum must be positive, got {quantum}"
        )));
    }
    let procs = prepare(processes)?;
    round_robin::run(procs, quantum).finish(Algorithm::RoundRobin, Some(quantum))
}

/// Runs the algorithm selected by `config`.
pub fn schedule(processes: &[Process], config: &SimulationConfig) -> Result<CpuSchedule> {
    match config.algorithm {
        Algorithm::Fcfs => fcfs(processes),
        Algorithm::Sjf => sjf(processes),
        Algorithm::Srtf => srtf(processes),
        Algorithm::Priority => priority(processes),
        Algorithm::Hrrn => hrrn(processes),
        Algorithm::RoundRobin => {
            let quantum = config
                .resolved_quantum()?
                .ok_or_else(|| Error::config("round robin requires a quantum"))?;
            round_robin(processes, quantum)
        }
    }
}

/// Checks a raw request and normalizes its records.
///
/// Configuration is checked before the records, and both before any
/// scheduling work.
pub fn normalize_request(request: &CpuRequest) -> Result<Vec<Process>> {
    if request.processes.is_empty() {
        return Err(Error::config("process list is empty"));
    }
    request.config.resolved_quantum()?;
    Ok(normalize_processes(&request.processes, request.config.policy)?)
}

/// Normalizes a raw request and runs it.
pub fn run_request(request: &CpuRequest) -> Result<CpuSchedule> {
    let processes = normalize_request(request)?;
    schedule(&processes, &request.config)
}
