//! Random workload generation.
//!
//! Produces valid process sets and acyclic task graphs for demos and
//! tests. Pass a seeded RNG for reproducible output.
//!
//! ```
//! use cpu_sched::workload::{random_processes, WorkloadSpec};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let procs = random_processes(5, &WorkloadSpec::default(), &mut rng);
//! assert_eq!(procs.len(), 5);
//! assert_eq!(procs[0].name, "P1");
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Process, Task};

/// Inclusive ranges for random processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSpec {
    /// Latest arrival time.
    pub max_arrival: i64,
    /// Smallest burst (clamped to at least 1).
    pub min_burst: i64,
    /// Largest burst.
    pub max_burst: i64,
    /// Smallest priority number.
    pub min_priority: i32,
    /// Largest priority number.
    pub max_priority: i32,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            min_priority: 0,
            max_priority: 5,
        }
    }
}

/// Shape of a random DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DagSpec {
    /// Smallest task weight.
    pub min_weight: f64,
    /// Largest task weight.
    pub max_weight: f64,
    /// Probability that an earlier task becomes a parent.
    pub edge_probability: f64,
}

impl Default for DagSpec {
    fn default() -> Self {
        Self {
            min_weight: 1.0,
            max_weight: 20.0,
            edge_probability: 0.3,
        }
    }
}

/// Generates `count` processes named `P1..Pn`.
///
/// Inverted ranges collapse to their lower bound.
pub fn random_processes<R: Rng>(count: usize, spec: &WorkloadSpec, rng: &mut R) -> Vec<Process> {
    let max_arrival = spec.max_arrival.max(0);
    let min_burst = spec.min_burst.max(1);
    let max_burst = spec.max_burst.max(min_burst);
    let max_priority = spec.max_priority.max(spec.min_priority);

    (0..count)
        .map(|i| {
            Process::new(
                format!("P{}", i + 1),
                rng.random_range(0..=max_arrival),
                rng.random_range(min_burst..=max_burst),
            )
            .with_priority(rng.random_range(spec.min_priority..=max_priority))
        })
        .collect()
}

/// Generates a DAG of `count` tasks named `T1..Tn`.
///
/// Parents are drawn only from earlier tasks, so the graph is acyclic.
pub fn random_dag<R: Rng>(count: usize, spec: &DagSpec, rng: &mut R) -> Vec<Task> {
    let min_weight = if spec.min_weight > 0.0 { spec.min_weight } else { 1.0 };
    let max_weight = spec.max_weight.max(min_weight);
    let p = if spec.edge_probability.is_nan() {
        0.0
    } else {
        spec.edge_probability.clamp(0.0, 1.0)
    };

    let mut tasks: Vec<Task> = Vec::with_capacity(count);
    for i in 0..count {
        let weight = if max_weight > min_weight {
            rng.random_range(min_weight..=max_weight)
        } else {
            min_weight
        };
        let parents: Vec<String> = tasks
            .iter()
            .filter(|_| rng.random_bool(p))
            .map(|t| t.id.clone())
            .collect();
        tasks.push(Task::new(format!("T{}", i + 1), weight).with_parents(parents));
    }
    tasks
}
