//! Run configuration and request records.
//!
//! The engine never reads configuration from disk. Callers build these
//! records directly or deserialize them from whatever store they own.
//!
//! ```
//! use cpu_sched::config::{Algorithm, SimulationConfig};
//!
//! let config = SimulationConfig::new(Algorithm::RoundRobin).with_quantum(2);
//! assert_eq!(config.algorithm.key(), "rr");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{Process, Processor, Task};
use crate::validation::{RawProcess, ValidationPolicy};

/// CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First-Come First-Served (non-preemptive).
    #[default]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Remaining Time First (preemptive).
    Srtf,
    /// Static priority (preemptive).
    Priority,
    /// Highest Response Ratio Next (non-preemptive).
    Hrrn,
    /// Round Robin (quantum-sliced).
    #[serde(rename = "rr")]
    RoundRobin,
}

impl Algorithm {
    /// All algorithms in comparison order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Priority,
        Algorithm::Hrrn,
        Algorithm::RoundRobin,
    ];

    /// Stable request key.
    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Srtf => "srtf",
            Algorithm::Priority => "priority",
            Algorithm::Hrrn => "hrrn",
            Algorithm::RoundRobin => "rr",
        }
    }

    /// Whether the policy can take the CPU away from a running process.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Algorithm::Srtf | Algorithm::Priority | Algorithm::RoundRobin
        )
    }

    /// Whether the policy needs a quantum.
    pub fn needs_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "srtf" => Ok(Algorithm::Srtf),
            "priority" => Ok(Algorithm::Priority),
            "hrrn" => Ok(Algorithm::Hrrn),
            "rr" => Ok(Algorithm::RoundRobin),
            other => Err(Error::config(format!("unknown algorithm key '{other}'"))),
        }
    }
}

/// Settings for one CPU simulation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Selected policy.
    pub algorithm: Algorithm,
    /// Round Robin quantum. Ignored by the other policies.
    pub quantum: Option<i64>,
    /// How malformed process records are treated.
    pub policy: ValidationPolicy,
}

impl SimulationConfig {
    /// Creates a config for `algorithm` with lenient validation.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the validation policy.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the quantum to use, or a config error when the selected
    /// policy needs one and it is missing or not positive.
    pub fn resolved_quantum(&self) -> Result<Option<i64>> {
        if !self.algorithm.needs_quantum() {
            return Ok(None);
        }
        match self.quantum {
            Some(q) if q > 0 => Ok(Some(q)),
            Some(q) => Err(Error::config(format!("quantum must be positive, got {q}"))),
            None => Err(Error::config("round robin requires a quantum")),
        }
    }
}

/// A CPU scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuRequest {
    /// Unvalidated process records.
    pub processes: Vec<RawProcess>,
    /// Run settings.
    #[serde(default)]
    pub config: SimulationConfig,
}

impl CpuRequest {
    /// Creates a request.
    pub fn new(processes: Vec<RawProcess>, config: SimulationConfig) -> Self {
        Self { processes, config }
    }

    /// Builds a request from already-valid processes.
    pub fn from_processes(processes: &[Process], config: SimulationConfig) -> Self {
        Self {
            processes: processes.iter().map(RawProcess::from).collect(),
            config,
        }
    }
}

/// A HEFT scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeftRequest {
    /// DAG tasks.
    pub tasks: Vec<Task>,
    /// Heterogeneous processors.
    pub processors: Vec<Processor>,
    /// Uniform communication cost on cross-processor edges (>= 0).
    #[serde(default)]
    pub comm: f64,
}

impl HeftRequest {
    /// Creates a request with zero communication cost.
    pub fn new(tasks: Vec<Task>, processors: Vec<Processor>) -> Self {
        Self {
            tasks,
            processors,
            comm: 0.0,
        }
    }

    /// Sets the communication cost.
    pub fn with_comm(mut self, comm: f64) -> Self {
        self.comm = comm;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_keys_round_trip() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.key().parse::<Algorithm>().unwrap(), alg);
        }
        assert_eq!(" RR ".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = "lottery".parse::<Algorithm>().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_algorithm_serde_keys() {
        let json = serde_json::to_string(&Algorithm::RoundRobin).unwrap();
        assert_eq!(json, "\"rr\"");
        let alg: Algorithm = serde_json::from_str("\"hrrn\"").unwrap();
        assert_eq!(alg, Algorithm::Hrrn);
    }

    #[test]
    fn test_resolved_quantum() {
        let rr = SimulationConfig::new(Algorithm::RoundRobin);
        assert!(rr.resolved_quantum().unwrap_err().is_config());
        assert!(rr.clone().with_quantum(0).resolved_quantum().is_err());
        assert_eq!(rr.with_quantum(3).resolved_quantum().unwrap(), Some(3));

        let fcfs = SimulationConfig::new(Algorithm::Fcfs).with_quantum(-1);
        assert_eq!(fcfs.resolved_quantum().unwrap(), None);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: SimulationConfig = serde_json::from_str(r#"{"algorithm":"rr","quantum":4}"#).unwrap();
        assert_eq!(config.algorithm, Algorithm::RoundRobin);
        assert_eq!(config.quantum, Some(4));
        assert_eq!(config.policy, ValidationPolicy::Lenient);

        let empty: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.algorithm, Algorithm::Fcfs);
    }

    #[test]
    fn test_preemptive_flags() {
        assert!(!Algorithm::Fcfs.is_preemptive());
        assert!(Algorithm::Srtf.is_preemptive());
        assert!(Algorithm::RoundRobin.needs_quantum());
        assert!(!Algorithm::Priority.needs_quantum());
    }
}
