//! CPU scheduling simulator and HEFT list scheduler.
//!
//! Simulates classic single-CPU scheduling policies over a set of
//! processes and schedules task DAGs on heterogeneous processors with
//! HEFT. Every run is a pure function of its input: records are copied
//! on entry and results are fresh values, so runs can execute side by
//! side without locking.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Timeline`, `Task`, `Processor`,
//!   `Schedule`, `Assignment`
//! - **`validation`**: Input integrity checks and lenient normalization
//! - **`config`**: Algorithm selection, run settings, request records
//! - **`dispatching`**: Selection rules (FCFS, SJF, SRTF, Priority, HRRN)
//!   and the rule engine
//! - **`scheduler`**: The six CPU algorithms, metrics and the comparator
//! - **`trace`**: Step-by-step explanation of a CPU schedule
//! - **`heft`**: Upward ranks, EFT placement, DAG text parsing, HEFT steps
//! - **`workload`**: Random process sets and DAGs
//! - **`session`**: Caller-owned state with step cursors
//! - **`error`**: Crate error type
//!
//! # Example
//!
//! ```
//! use cpu_sched::config::{Algorithm, SimulationConfig};
//! use cpu_sched::models::Process;
//! use cpu_sched::scheduler;
//!
//! let procs = vec![
//!     Process::new("P1", 0, 5),
//!     Process::new("P2", 1, 3),
//! ];
//! let config = SimulationConfig::new(Algorithm::RoundRobin).with_quantum(2);
//! let result = scheduler::schedule(&procs, &config).unwrap();
//! assert_eq!(result.makespan(), 8);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts"
//! - Topcuoglu, Hariri & Wu (2002), "Performance-Effective and
//!   Low-Complexity Task Scheduling for Heterogeneous Computing"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod heft;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod trace;
pub mod validation;
pub mod workload;

pub use error::{Error, Result};
