//! Side-by-side comparison of all CPU policies on one process set.

use serde::{Deserialize, Serialize};

use super::{schedule, MetricsSummary};
use crate::config::{Algorithm, SimulationConfig};
use crate::error::Result;
use crate::models::Process;

/// One policy's summary in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Policy.
    pub algorithm: Algorithm,
    /// Its averages and CPU figures.
    pub summary: MetricsSummary,
}

/// Average metric to rank comparison rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Mean waiting time.
    Waiting,
    /// Mean turnaround time.
    Turnaround,
    /// Mean response time.
    Response,
}

impl Metric {
    fn of(&self, summary: &MetricsSummary) -> f64 {
        match self {
            Metric::Waiting => summary.avg_waiting,
            Metric::Turnaround => summary.avg_turnaround,
            Metric::Response => summary.avg_response,
        }
    }
}

/// Runs every policy over fresh copies of `processes`.
///
/// Rows follow [`Algorithm::ALL`]. `quantum` is used by Round Robin.
pub fn compare(processes: &[Process], quantum: i64) -> Result<Vec<ComparisonRow>> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let config = SimulationConfig::new(algorithm).with_quantum(quantum);
            schedule(processes, &config).map(|result| ComparisonRow {
                algorithm,
                summary: result.metrics.summary,
            })
        })
        .collect()
}

/// The row with the lowest `metric`; ties go to the earlier row.
pub fn best_by(rows: &[ComparisonRow], metric: Metric) -> Option<&ComparisonRow> {
    let mut best: Option<&ComparisonRow> = None;
    for row in rows {
        match best {
            Some(b) if metric.of(&row.summary) >= metric.of(&b.summary) - 1e-9 => {}
            _ => best = Some(row),
        }
    }
    best
}
