//! Text format for custom DAGs.
//!
//! One task per line:
//!
//! ```text
//! # id  weight  parents
//! T1    10
//! T2    8      T1
//! T3    12     T1,T2
//! ```
//!
//! Parsing is lenient. Lines whose weight is not a positive number are
//! dropped, as are repeated ids (first wins) and parent ids that name no
//! declared task. Blank lines and `#` comments are skipped.

use log::{debug, warn};
use std::collections::HashSet;

use crate::models::Task;

/// Parses the DAG text format into tasks, in line order.
pub fn parse_dag(text: &str) -> Vec<Task> {
    let mut tasks: Vec<Task> = Vec::new();
    let mut ids: HashSet<String> = HashSet::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(id) = fields.next() else {
            continue;
        };
        let weight = match fields.next().map(str::parse::<f64>) {
            Some(Ok(w)) if w.is_finite() && w > 0.0 => w,
            _ => {
                warn!("line {}: task '{}' has no valid weight, dropped", lineno + 1, id);
                continue;
            }
        };
        if !ids.insert(id.to_string()) {
            warn!("line {}: duplicate task '{}', dropped", lineno + 1, id);
            continue;
        }

        let parents: Vec<String> = fields
            .flat_map(|f| f.split(','))
            .map(|p| p.trim_matches(&['[', ']'][..]).trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        tasks.push(Task::new(id, weight).with_parents(parents));
    }

    for task in &mut tasks {
        let before = task.parents.len();
        task.parents.retain(|p| ids.contains(p));
        if task.parents.len() != before {
            debug!(
                "task '{}': dropped {} unknown parent(s)",
                task.id,
                before - task.parents.len()
            );
        }
    }

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let tasks = parse_dag("T1 10\nT2 8 T1\nT3 12 T1,T2\n");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].weight, 10.0);
        assert!(tasks[0].parents.is_empty());
        assert_eq!(tasks[2].parents, vec!["T1".to_string(), "T2".to_string()]);
    }

    #[test]
    fn test_bad_weight_dropped() {
        let tasks = parse_dag("A 0\nB -3\nC abc\nD\nE 2.5");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "E");
        assert!((tasks[0].weight - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_parents_dropped() {
        let tasks = parse_dag("A 1\nB 1 A,ghost");
        assert_eq!(tasks[1].parents, vec!["A".to_string()]);
    }

    #[test]
    fn test_parents_of_dropped_line_are_unknown() {
        let tasks = parse_dag("A nope\nB 1 A");
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].parents.is_empty());
    }

    #[test]
    fn test_comments_brackets_and_spacing() {
        let text = "# header\n\n  A 1  \nB 2 [A]\nC 3 [A, B]\n";
        let tasks = parse_dag(text);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].parents, vec!["A".to_string()]);
        assert_eq!(tasks[2].parents, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let tasks = parse_dag("A 1\nA 5");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].weight, 1.0);
    }

    #[test]
    fn test_forward_parent_reference_kept() {
        // Parents may be declared on later lines.
        let tasks = parse_dag("B 1 A\nA 1");
        assert_eq!(tasks[0].parents, vec!["A".to_string()]);
    }
}
