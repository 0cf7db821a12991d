//! DAG task model for heterogeneous scheduling.
//!
//! A task is a node of a directed acyclic graph. Its `parents` must all
//! finish (and have their output transferred) before it can start.
//!
//! # Reference
//! Topcuoglu, Hariri & Wu (2002), "Performance-Effective and
//! Low-Complexity Task Scheduling for Heterogeneous Computing"

use serde::{Deserialize, Serialize};

/// A task (DAG node) to be placed on a processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Abstract work units (> 0).
    pub weight: f64,
    /// Ids of tasks that must finish first.
    #[serde(default)]
    pub parents: Vec<String>,
}

impl Task {
    /// Creates a task with no parents.
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
            parents: Vec::new(),
        }
    }

    /// Adds a parent dependency.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Replaces the parent list.
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the task has no parents.
    pub fn is_entry(&self) -> bool {
        self.parents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let t = Task::new("T3", 12.0).with_parent("T1").with_parent("T2");
        assert_eq!(t.id, "T3");
        assert_eq!(t.parents, vec!["T1".to_string(), "T2".to_string()]);
        assert!(!t.is_entry());
    }

    #[test]
    fn test_with_parents_replaces() {
        let t = Task::new("T3", 1.0)
            .with_parent("X")
            .with_parents(["T1", "T2"]);
        assert_eq!(t.parents.len(), 2);
        assert!(Task::new("T1", 1.0).is_entry());
    }
}
