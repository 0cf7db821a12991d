//! Schedule (solution) model for DAG scheduling.
//!
//! A schedule is a complete assignment of tasks to processors and time
//! intervals.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete task → processor × time schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Assignments in commit order.
    pub assignments: Vec<Assignment>,
}

/// A task-processor-time assignment.
///
/// Records that a task runs on a processor during `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned task ID.
    pub task_id: String,
    /// Assigned processor ID.
    pub processor_id: String,
    /// Start time.
    pub start: f64,
    /// End time.
    pub end: f64,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        task_id: impl Into<String>,
        processor_id: impl Into<String>,
        start: f64,
        end: f64,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            processor_id: processor_id.into(),
            start,
            end,
        }
    }

    /// Duration (end - start).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Makespan: latest end time across all assignments.
    pub fn makespan(&self) -> f64 {
        self.assignments
            .iter()
            .map(|a| a.end)
            .fold(0.0, f64::max)
    }

    /// Finds the assignment for a given task.
    pub fn assignment_for_task(&self, task_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    /// Returns all assignments on a processor, ordered by start time.
    pub fn assignments_for_processor(&self, processor_id: &str) -> Vec<&Assignment> {
        let mut list: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.processor_id == processor_id)
            .collect();
        list.sort_by(|a, b| a.start.total_cmp(&b.start));
        list
    }

    /// Busy fraction of a processor over the makespan.
    ///
    /// Returns `None` if the makespan is zero.
    pub fn processor_utilization(&self, processor_id: &str) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0.0 {
            return None;
        }
        let busy: f64 = self
            .assignments_for_processor(processor_id)
            .iter()
            .map(|a| a.duration())
            .sum();
        Some(busy / horizon)
    }

    /// Utilization for every processor that has assignments.
    pub fn all_utilizations(&self) -> HashMap<String, f64> {
        let horizon = self.makespan();
        if horizon <= 0.0 {
            return HashMap::new();
        }

        let mut busy: HashMap<String, f64> = HashMap::new();
        for a in &self.assignments {
            *busy.entry(a.processor_id.clone()).or_insert(0.0) += a.duration();
        }

        busy.into_iter()
            .map(|(id, b)| (id, b / horizon))
            .collect()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
