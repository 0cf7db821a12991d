//! Upward rank computation.
//!
//! `rank(t) = avg_comp(t) + max over successors s of (comm + rank(s))`,
//! or just `avg_comp(t)` for exit tasks.
//!
//! Ranks are memoized in a table and computed by an explicit-stack
//! post-order walk, so deep graphs cannot overflow the call stack. A
//! task met again while still on the stack closes a cycle and fails the
//! run with a graph error.
//!
//! In floating point a parent's rank can equal its child's (a small
//! `avg_comp` absorbed into a large successor rank), so the scheduling
//! order is a topological order that prefers higher ranks rather than a
//! plain sort.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{Error, Result};
use crate::models::{Processor, Task};

/// Dependency structure of a task list, by input index.
#[derive(Debug, Clone)]
pub(crate) struct TaskGraph {
    /// Parent indices per task, deduplicated, in declaration order.
    pub parents: Vec<Vec<usize>>,
    /// Successor indices per task, in input order.
    pub successors: Vec<Vec<usize>>,
}

impl TaskGraph {
    /// Builds the graph by inverting `parents`.
    ///
    /// # Errors
    /// `Graph` if a parent id names no task.
    pub fn build(tasks: &[Task]) -> Result<Self> {
        let index: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        let mut parents = vec![Vec::new(); tasks.len()];
        let mut successors = vec![Vec::new(); tasks.len()];

        for (child, task) in tasks.iter().enumerate() {
            for parent_id in &task.parents {
                let parent = *index.get(parent_id.as_str()).ok_or_else(|| {
                    Error::graph(format!(
                        "task '{}' references unknown parent '{}'",
                        task.id, parent_id
                    ))
                })?;
                if parents[child].contains(&parent) {
                    continue;
                }
                parents[child].push(parent);
                successors[parent].push(child);
            }
        }

        Ok(Self {
            parents,
            successors,
        })
    }
}

/// Mean computation time of `weight` across all processors.
pub(crate) fn avg_comp(weight: f64, processors: &[Processor]) -> f64 {
    if processors.is_empty() {
        return 0.0;
    }
    processors.iter().map(|p| p.comp_time(weight)).sum::<f64>() / processors.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Computes the upward rank of every task.
///
/// # Errors
/// `Graph` if the successor graph contains a cycle.
pub(crate) fn upward_ranks(
    tasks: &[Task],
    graph: &TaskGraph,
    avg: &[f64],
    comm: f64,
) -> Result<Vec<f64>> {
    let n = tasks.len();
    let mut rank = vec![0.0; n];
    let mut mark = vec![Mark::Unvisited; n];

    for root in 0..n {
        if mark[root] != Mark::Unvisited {
            continue;
        }
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        mark[root] = Mark::OnStack;

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if let Some(&child) = graph.successors[node].get(next) {
                top.1 += 1;
                match mark[child] {
                    Mark::Done => {}
                    Mark::OnStack => {
                        return Err(Error::graph(format!(
                            "cycle detected involving task '{}'",
                            tasks[child].id
                        )));
                    }
                    Mark::Unvisited => {
                        mark[child] = Mark::OnStack;
                        stack.push((child, 0));
                    }
                }
            } else {
                let best = graph.successors[node]
                    .iter()
                    .map(|&s| comm + rank[s])
                    .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
                rank[node] = avg[node] + best.unwrap_or(0.0);
                mark[node] = Mark::Done;
                stack.pop();
            }
        }
    }

    Ok(rank)
}

/// A task whose parents are all ordered. Max-heap order: higher rank
/// first, then lower input index.
#[derive(Debug, Clone, Copy)]
struct Ready {
    rank: f64,
    index: usize,
}

impl Ord for Ready {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Ready {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ready {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ready {}

/// Scheduling order by task index.
///
/// Repeatedly takes the highest-rank task whose parents are all
/// ordered, earlier input first on equal ranks. When every parent
/// strictly outranks its children this is the stable rank-descending
/// sort; on equal ranks parents still come first.
///
/// # Errors
/// `Graph` if some tasks can never become ready (a cycle).
pub(crate) fn schedule_order(graph: &TaskGraph, ranks: &[f64]) -> Result<Vec<usize>> {
    let n = ranks.len();
    let mut pending: Vec<usize> = graph.parents.iter().map(Vec::len).collect();
    let mut heap: BinaryHeap<Ready> = (0..n)
        .filter(|&i| pending[i] == 0)
        .map(|i| Ready {
            rank: ranks[i],
            index: i,
        })
        .collect();

    let mut order = Vec::with_capacity(n);
    while let Some(Ready { index, .. }) = heap.pop() {
        order.push(index);
        for &s in &graph.successors[index] {
            pending[s] -= 1;
            if pending[s] == 0 {
                heap.push(Ready {
                    rank: ranks[s],
                    index: s,
                });
            }
        }
    }

    if order.len() != n {
        return Err(Error::graph(format!(
            "{} task(s) lie on a cycle and cannot be ordered",
            n - order.len()
        )));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn procs() -> Vec<Processor> {
        vec![Processor::new("P1", 1.0), Processor::new("P2", 2.0)]
    }

    #[test]
    fn test_avg_comp() {
        // 12/1 and 12/2 → mean 9.
        assert!((avg_comp(12.0, &procs()) - 9.0).abs() < 1e-9);
        assert_eq!(avg_comp(5.0, &[]), 0.0);
    }

    #[test]
    fn test_chain_ranks() {
        let tasks = vec![
            Task::new("A", 4.0),
            Task::new("B", 4.0).with_parent("A"),
            Task::new("C", 4.0).with_parent("B"),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let avg: Vec<f64> = tasks.iter().map(|t| avg_comp(t.weight, &procs())).collect();
        let ranks = upward_ranks(&tasks, &graph, &avg, 1.0).unwrap();
        // avg = 3 each; C = 3, B = 3 + 1 + 3 = 7, A = 3 + 1 + 7 = 11.
        assert!((ranks[2] - 3.0).abs() < 1e-9);
        assert!((ranks[1] - 7.0).abs() < 1e-9);
        assert!((ranks[0] - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_diamond_takes_max_branch() {
        let tasks = vec![
            Task::new("A", 2.0),
            Task::new("B", 2.0).with_parent("A"),
            Task::new("C", 8.0).with_parent("A"),
            Task::new("D", 2.0).with_parents(["B", "C"]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        assert_eq!(graph.successors[0], vec![1, 2]);
        let avg = vec![2.0, 2.0, 8.0, 2.0];
        let ranks = upward_ranks(&tasks, &graph, &avg, 0.0).unwrap();
        assert!((ranks[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_detected() {
        let tasks = vec![
            Task::new("A", 1.0).with_parent("C"),
            Task::new("B", 1.0).with_parent("A"),
            Task::new("C", 1.0).with_parent("B"),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let err = upward_ranks(&tasks, &graph, &[1.0; 3], 0.0).unwrap_err();
        assert!(err.is_graph());
    }

    #[test]
    fn test_self_loop_detected() {
        let tasks = vec![Task::new("A", 1.0).with_parent("A")];
        let graph = TaskGraph::build(&tasks).unwrap();
        assert!(upward_ranks(&tasks, &graph, &[1.0], 0.0).unwrap_err().is_graph());
    }

    #[test]
    fn test_unknown_parent() {
        let tasks = vec![Task::new("A", 1.0).with_parent("ghost")];
        assert!(TaskGraph::build(&tasks).unwrap_err().is_graph());
    }

    #[test]
    fn test_duplicate_parent_edges_collapsed() {
        let tasks = vec![
            Task::new("A", 1.0),
            Task::new("B", 1.0).with_parents(["A", "A"]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        assert_eq!(graph.successors[0], vec![1]);
        assert_eq!(graph.parents[1], vec![0]);
    }

    #[test]
    fn test_order_is_rank_descending_when_strict() {
        let tasks = vec![
            Task::new("A", 2.0),
            Task::new("B", 2.0).with_parent("A"),
            Task::new("C", 8.0).with_parent("A"),
            Task::new("D", 2.0).with_parents(["B", "C"]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let ranks = upward_ranks(&tasks, &graph, &[2.0, 2.0, 8.0, 2.0], 0.0).unwrap();
        assert_eq!(schedule_order(&graph, &ranks).unwrap(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_order_keeps_parent_first_on_absorbed_rank() {
        // 1.0 + 1e17 == 1e17, so the parent ties with the child listed before it.
        let tasks = vec![Task::new("C", 1e17).with_parent("P"), Task::new("P", 1.0)];
        let graph = TaskGraph::build(&tasks).unwrap();
        let ranks = upward_ranks(&tasks, &graph, &[1e17, 1.0], 0.0).unwrap();
        assert_eq!(ranks[0], ranks[1]);
        assert_eq!(schedule_order(&graph, &ranks).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_order_equal_ranks_keep_input_order() {
        let tasks = vec![Task::new("X", 1.0), Task::new("Y", 1.0), Task::new("Z", 1.0)];
        let graph = TaskGraph::build(&tasks).unwrap();
        assert_eq!(
            schedule_order(&graph, &[1.0, 1.0, 1.0]).unwrap(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_order_rejects_cycle() {
        let tasks = vec![
            Task::new("A", 1.0).with_parent("B"),
            Task::new("B", 1.0).with_parent("A"),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        assert!(schedule_order(&graph, &[1.0, 1.0]).unwrap_err().is_graph());
    }

    #[test]
    fn test_deep_chain_no_overflow() {
        let n = 50_000;
        let tasks: Vec<Task> = (0..n)
            .map(|i| {
                let t = Task::new(format!("T{i}"), 1.0);
                if i == 0 {
                    t
                } else {
                    t.with_parent(format!("T{}", i - 1))
                }
            })
            .collect();
        let graph = TaskGraph::build(&tasks).unwrap();
        let avg = vec![1.0; n];
        let ranks = upward_ranks(&tasks, &graph, &avg, 0.0).unwrap();
        assert!((ranks[0] - n as f64).abs() < 1e-6);
    }
}
