//! Per-process timing metrics and their averages.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish − arrival |
//! | Waiting | turnaround − burst |
//! | Response | first dispatch − arrival |
//! | CPU utilization | busy time / makespan |
//! | Throughput | processes / makespan |
//!
//! Averages are unweighted arithmetic means over all processes.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Process, Timeline};

/// Timing metrics of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process name.
    pub name: String,
    /// Arrival time.
    pub arrival: i64,
    /// Burst time.
    pub burst: i64,
    /// First dispatch time.
    pub start: i64,
    /// Completion time.
    pub finish: i64,
    /// Time spent ready but not running.
    pub waiting: i64,
    /// Time from arrival to completion.
    pub turnaround: i64,
    /// Time from arrival to first dispatch.
    pub response: i64,
}

/// Averages and CPU-level figures over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Completion time of the last process.
    pub makespan: i64,
    /// Time the CPU ran a process.
    pub busy_time: i64,
    /// Time the CPU sat idle.
    pub idle_time: i64,
    /// busy_time / makespan (0.0 when makespan is 0).
    pub cpu_utilization: f64,
    /// Processes completed per time unit.
    pub throughput: f64,
}

/// Metrics table: one row per process, in input order, plus a summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsTable {
    /// Per-process rows.
    pub rows: Vec<ProcessMetrics>,
    /// Averages.
    pub summary: MetricsSummary,
}

impl ProcessMetrics {
    /// Derives metrics for a scheduled process.
    ///
    /// # Errors
    /// `Invariant` if the process was never dispatched or never finished.
    pub fn from_process(p: &Process) -> Result<Self> {
        let finish = p
            .finish
            .ok_or_else(|| Error::invariant(format!("process '{}' has no finish time", p.name)))?;
        let start = p
            .start
            .ok_or_else(|| Error::invariant(format!("process '{}' has no start time", p.name)))?;
        let turnaround = finish - p.arrival;
        Ok(Self {
            name: p.name.clone(),
            arrival: p.arrival,
            burst: p.burst,
            start,
            finish,
            waiting: turnaround - p.burst,
            turnaround,
            response: start - p.arrival,
        })
    }
}

impl MetricsTable {
    /// Computes the table for scheduled processes and their timeline.
    pub fn calculate(processes: &[Process], timeline: &Timeline) -> Result<Self> {
        let rows = processes
            .iter()
            .map(ProcessMetrics::from_process)
            .collect::<Result<Vec<_>>>()?;

        let n = rows.len();
        let mean = |f: fn(&ProcessMetrics) -> i64| -> f64 {
            if n == 0 {
                0.0
            } else {
                rows.iter().map(f).sum::<i64>() as f64 / n as f64
            }
        };

        let makespan = timeline.end_time();
        let busy_time = timeline.busy_time();
        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                busy_time as f64 / makespan as f64,
                n as f64 / makespan as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let summary = MetricsSummary {
            avg_waiting: mean(|m| m.waiting),
            avg_turnaround: mean(|m| m.turnaround),
            avg_response: mean(|m| m.response),
            makespan,
            busy_time,
            idle_time: timeline.idle_time(),
            cpu_utilization,
            throughput,
        };

        Ok(Self { rows, summary })
    }

    /// Finds a row by process name.
    pub fn row(&self, name: &str) -> Option<&ProcessMetrics> {
        self.rows.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(name: &str, arrival: i64, burst: i64, start: i64, finish: i64) -> Process {
        let mut p = Process::new(name, arrival, burst);
        p.start = Some(start);
        p.finish = Some(finish);
        p
    }

    #[test]
    fn test_metrics_basic() {
        let procs = vec![finished("A", 0, 3, 0, 3), finished("B", 1, 2, 3, 5)];
        let mut tl = Timeline::new();
        tl.push_process("A", 0, 3);
        tl.push_process("B", 3, 5);

        let table = MetricsTable::calculate(&procs, &tl).unwrap();
        let b = table.row("B").unwrap();
        assert_eq!(b.turnaround, 4);
        assert_eq!(b.waiting, 2);
        assert_eq!(b.response, 2);
        assert!((table.summary.avg_waiting - 1.0).abs() < 1e-9);
        assert!((table.summary.avg_turnaround - 3.5).abs() < 1e-9);
        assert!((table.summary.avg_response - 1.0).abs() < 1e-9);
        assert!((table.summary.cpu_utilization - 1.0).abs() < 1e-9);
        assert!((table.summary.throughput - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_utilization_with_idle() {
        let procs = vec![finished("A", 2, 2, 2, 4)];
        let mut tl = Timeline::new();
        tl.push_process("A", 2, 4);
        let table = MetricsTable::calculate(&procs, &tl).unwrap();
        assert_eq!(table.summary.idle_time, 2);
        assert!((table.summary.cpu_utilization - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_finish_is_invariant_error() {
        let procs = vec![Process::new("A", 0, 1)];
        let err = MetricsTable::calculate(&procs, &Timeline::new()).unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn test_empty_table() {
        let table = MetricsTable::calculate(&[], &Timeline::new()).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.summary.avg_waiting, 0.0);
        assert_eq!(table.summary.cpu_utilization, 0.0);
    }
}
