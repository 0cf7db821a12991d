//! Input validation and normalization.
//!
//! Turns raw, caller-supplied records into well-formed [`Process`]
//! records and checks DAG inputs before HEFT runs. Detects:
//! - Duplicate IDs
//! - Empty process names
//! - Negative arrivals and non-positive bursts
//! - Non-positive or non-finite task weights and processor speeds
//!
//! Under [`ValidationPolicy::Lenient`] the per-record problems are
//! coerced (arrival → 0, burst → 1, empty name → `P{n}`) and logged.
//! Under [`ValidationPolicy::Strict`] they are reported as errors.
//! Duplicate IDs are rejected under both policies.
//!
//! Graph shape (cycles, unknown parents) is not checked here; the HEFT
//! scheduler detects it during rank computation.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::{Process, Processor, Task};

/// Validation result.
pub type ValidationResult<T = ()> = Result<T, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A process has an empty name.
    EmptyName,
    /// A process arrives before t=0.
    InvalidArrival,
    /// A process burst is below 1.
    InvalidBurst,
    /// A task weight is not a positive finite number.
    InvalidWeight,
    /// A processor speed is not a positive finite number.
    InvalidSpeed,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// How malformed per-record values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Coerce bad values and log a warning.
    #[default]
    Lenient,
    /// Reject bad values.
    Strict,
}

/// An unvalidated process record as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProcess {
    /// Process name.
    #[serde(default)]
    pub name: String,
    /// Arrival time.
    #[serde(default)]
    pub arrival: i64,
    /// Burst time.
    pub burst: i64,
    /// Priority (smaller = more important).
    #[serde(default)]
    pub priority: i32,
}

impl RawProcess {
    /// Creates a raw record with priority 0.
    pub fn new(name: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority: 0,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl From<&Process> for RawProcess {
    fn from(p: &Process) -> Self {
        Self {
            name: p.name.clone(),
            arrival: p.arrival,
            burst: p.burst,
            priority: p.priority,
        }
    }
}

/// Normalizes raw records into processes.
///
/// Reports every problem found, not just the first.
pub fn normalize_processes(
    raw: &[RawProcess],
    policy: ValidationPolicy,
) -> ValidationResult<Vec<Process>> {
    let mut errors = Vec::new();
    let mut processes = Vec::with_capacity(raw.len());

    for (i, r) in raw.iter().enumerate() {
        let mut name = r.name.trim().to_string();
        if name.is_empty() {
            match policy {
                ValidationPolicy::Lenient => {
                    name = format!("P{}", i + 1);
                    warn!("process #{} has no name, using '{}'", i + 1, name);
                }
                ValidationPolicy::Strict => errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyName,
                    format!("Process #{} has an empty name", i + 1),
                )),
            }
        }

        let mut arrival = r.arrival;
        if arrival < 0 {
            match policy {
                ValidationPolicy::Lenient => {
                    warn!("process '{}' arrival {} coerced to 0", name, arrival);
                    arrival = 0;
                }
                ValidationPolicy::Strict => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidArrival,
                    format!("Process '{}' has negative arrival {}", name, arrival),
                )),
            }
        }

        let mut burst = r.burst;
        if burst < 1 {
            match policy {
                ValidationPolicy::Lenient => {
                    warn!("process '{}' burst {} coerced to 1", name, burst);
                    burst = 1;
                }
                ValidationPolicy::Strict => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidBurst,
                    format!("Process '{}' has non-positive burst {}", name, burst),
                )),
            }
        }

        processes.push(Process::new(name, arrival, burst).with_priority(r.priority));
    }

    let mut seen = HashSet::new();
    for p in &processes {
        if !seen.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process name: {}", p.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(processes)
    } else {
        Err(errors)
    }
}

/// Checks processes that bypassed [`normalize_processes`].
///
/// Used at the algorithm entry points so hand-built records obey the
/// same rules as normalized ones.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for p in processes {
        if !seen.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process name: {}", p.name),
            ));
        }
        if p.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Process has an empty name",
            ));
        }
        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArrival,
                format!("Process '{}' has negative arrival {}", p.name, p.arrival),
            ));
        }
        if p.burst < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidBurst,
                format!("Process '{}' has non-positive burst {}", p.name, p.burst),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates HEFT tasks and processors.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. No duplicate processor IDs
/// 3. Every task weight is positive and finite
/// 4. Every processor speed is positive and finite
pub fn validate_dag(tasks: &[Task], processors: &[Processor]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for t in tasks {
        if !task_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", t.id),
            ));
        }
        if !(t.weight.is_finite() && t.weight > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("Task '{}' has invalid weight {}", t.id, t.weight),
            ));
        }
    }

    let mut processor_ids = HashSet::new();
    for p in processors {
        if !processor_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate processor ID: {}", p.id),
            ));
        }
        if !(p.speed.is_finite() && p.speed > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSpeed,
                format!("Processor '{}' has invalid speed {}", p.id, p.speed),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
