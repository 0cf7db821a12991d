//! HEFT: Heterogeneous Earliest Finish Time scheduling.
//!
//! Places the tasks of a DAG on processors of different speeds.
//!
//! # Algorithm
//! 1. `avg_comp(t)` = mean of `weight / speed` over all processors.
//! 2. Upward rank: `rank(t) = avg_comp(t) + max_s (comm + rank(s))`.
//! 3. Order tasks by descending rank, taking at each step only tasks
//!    whose parents are already ordered (input order on equal ranks).
//! 4. For each task, on every processor compute
//!    `start = max(available(p), max_parent (finish + comm if on another processor))`
//!    and `finish = start + weight / speed`; keep the processor with the
//!    earliest finish (first in list on ties).
//!
//! A parent's rank is never below its children's. It can be equal when
//! a small `avg_comp` is absorbed by a large successor rank, which is why
//! step 3 is a topological order rather than a plain sort.
//!
//! # Complexity
//! O(e + n log n + n · p · d) for n tasks, e edges, p processors and
//! maximum in-degree d.
//!
//! # Reference
//! Topcuoglu, Hariri & Wu (2002), "Performance-Effective and
//! Low-Complexity Task Scheduling for Heterogeneous Computing",
//! IEEE TPDS 13(3)

mod parse;
mod rank;
mod trace;

pub use parse::parse_dag;
pub use trace::{build_heft_steps, HeftStep, RankStep, ScheduleStep};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::HeftRequest;
use crate::error::{Error, Result};
use crate::models::{Assignment, Processor, Schedule, Task};
use crate::validation::validate_dag;
use rank::{avg_comp, schedule_order, upward_ranks, TaskGraph};

/// Result of a HEFT run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeftSchedule {
    /// Assignments in scheduling order.
    pub schedule: Schedule,
    /// Upward rank per task id.
    pub ranks: BTreeMap<String, f64>,
    /// Rank derivation per task, in scheduling order.
    pub rank_details: Vec<RankDetail>,
    /// Task ids in scheduling (rank-descending) order.
    pub order: Vec<String>,
    /// Placement decision per task, in scheduling order.
    pub decisions: Vec<Decision>,
    /// Latest finish across all assignments.
    pub makespan: f64,
    /// Communication cost used.
    pub comm: f64,
}

/// How a task's upward rank was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankDetail {
    /// Task id.
    pub task_id: String,
    /// Mean computation time over processors.
    pub avg_comp: f64,
    /// Upward rank.
    pub rank: f64,
    /// `comm + rank(s)` for every successor `s`, in input order.
    pub successor_contributions: Vec<SuccessorContribution>,
}

/// One successor's term in a rank's max.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessorContribution {
    /// Successor task id.
    pub task_id: String,
    /// `comm + rank(successor)`.
    pub value: f64,
}

/// Every processor considered for a task, and the winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Task id.
    pub task_id: String,
    /// One entry per processor, in processor list order.
    pub candidates: Vec<ProcessorCandidate>,
    /// Selected processor id.
    pub chosen: String,
}

/// Earliest start/finish of a task on one processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorCandidate {
    /// Processor id.
    pub processor_id: String,
    /// Earliest start.
    pub start: f64,
    /// Earliest finish.
    pub finish: f64,
    /// `weight / speed`.
    pub comp_time: f64,
}

impl Decision {
    /// The winning candidate.
    pub fn chosen_candidate(&self) -> Option<&ProcessorCandidate> {
        self.candidates
            .iter()
            .find(|c| c.processor_id == self.chosen)
    }
}

impl HeftSchedule {
    /// Assignment of a task.
    pub fn assignment_for(&self, task_id: &str) -> Option<&Assignment> {
        self.schedule.assignment_for_task(task_id)
    }

    /// Assignments on a processor, by start time.
    pub fn processor_timeline(&self, processor_id: &str) -> Vec<&Assignment> {
        self.schedule.assignments_for_processor(processor_id)
    }

    /// Upward rank of a task.
    pub fn rank_of(&self, task_id: &str) -> Option<f64> {
        self.ranks.get(task_id).copied()
    }

    /// Placement decision of a task.
    pub fn decision_for(&self, task_id: &str) -> Option<&Decision> {
        self.decisions.iter().find(|d| d.task_id == task_id)
    }
}

/// Runs HEFT over a request.
pub fn schedule(request: &HeftRequest) -> Result<HeftSchedule> {
    heft(&request.tasks, &request.processors, request.comm)
}

/// Runs HEFT.
///
/// # Errors
/// - `Config` if there are no tasks or processors, or `comm` is negative
///   or not finite.
/// - `Validation` for duplicate ids, bad weights or bad speeds.
/// - `Graph` for unknown parent ids or cycles.
pub fn heft(tasks: &[Task], processors: &[Processor], comm: f64) -> Result<HeftSchedule> {
    if tasks.is_empty() {
        return Err(Error::config("task list is empty"));
    }
    if processors.is_empty() {
        return Err(Error::config("processor list is empty"));
    }
    if !(comm.is_finite() && comm >= 0.0) {
        return Err(Error::config(format!(
            "communication cost must be a non-negative number, got {comm}"
        )));
    }
    validate_dag(tasks, processors)?;

    let graph = TaskGraph::build(tasks)?;
    let avg: Vec<f64> = tasks.iter().map(|t| avg_comp(t.weight, processors)).collect();
    let ranks = upward_ranks(tasks, &graph, &avg, comm)?;

    let order = schedule_order(&graph, &ranks)?;

    let mut available = vec![0.0f64; processors.len()];
    let mut placed: Vec<Option<(usize, f64)>> = vec![None; tasks.len()];
    let mut schedule = Schedule::new();
    let mut decisions = Vec::with_capacity(tasks.len());

    for &ti in &order {
        let task = &tasks[ti];
        let mut candidates = Vec::with_capacity(processors.len());
        let mut best: Option<(usize, f64)> = None;

        for (pi, proc) in processors.iter().enumerate() {
            let mut ready = 0.0f64;
            for &parent in &graph.parents[ti] {
                let (parent_proc, parent_finish) = placed[parent].ok_or_else(|| {
                    Error::invariant(format!(
                        "task '{}' scheduled before its parent '{}'",
                        task.id, tasks[parent].id
                    ))
                })?;
                let transfer = if parent_proc == pi { 0.0 } else { comm };
                ready = ready.max(parent_finish + transfer);
            }

            let start = available[pi].max(ready);
            let comp_time = proc.comp_time(task.weight);
            let finish = start + comp_time;
            candidates.push(ProcessorCandidate {
                processor_id: proc.id.clone(),
                start,
                finish,
                comp_time,
            });

            match best {
                Some((_, best_finish)) if finish >= best_finish - 1e-9 => {}
                _ => best = Some((pi, finish)),
            }
        }

        let (chosen, finish) =
            best.ok_or_else(|| Error::invariant("no processor candidates"))?;
        let start = candidates[chosen].start;
        trace!(
            "task {} → {} [{:.3}, {:.3})",
            task.id,
            processors[chosen].id,
            start,
            finish
        );

        available[chosen] = finish;
        placed[ti] = Some((chosen, finish));
        schedule.add_assignment(Assignment::new(&task.id, &processors[chosen].id, start, finish));
        decisions.push(Decision {
            task_id: task.id.clone(),
            candidates,
            chosen: processors[chosen].id.clone(),
        });
    }

    let rank_details = order
        .iter()
        .map(|&i| RankDetail {
            task_id: tasks[i].id.clone(),
            avg_comp: avg[i],
            rank: ranks[i],
            successor_contributions: graph.successors[i]
                .iter()
                .map(|&s| SuccessorContribution {
                    task_id: tasks[s].id.clone(),
                    value: comm + ranks[s],
                })
                .collect(),
        })
        .collect();

    let makespan = schedule.makespan();
    debug!(
        "heft: {} tasks on {} processors, makespan {:.3}",
        tasks.len(),
        processors.len(),
        makespan
    );

    Ok(HeftSchedule {
        schedule,
        ranks: tasks
            .iter()
            .zip(&ranks)
            .map(|(t, &r)| (t.id.clone(), r))
            .collect(),
        rank_details,
        order: order.iter().map(|&i| tasks[i].id.clone()).collect(),
        decisions,
        makespan,
        comm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processors() -> Vec<Processor> {
        vec![Processor::new("P1", 1.0), Processor::new("P2", 2.0)]
    }

    fn diamond() -> Vec<Task> {
        vec![
            Task::new("A", 4.0),
            Task::new("B", 6.0).with_parent("A"),
            Task::new("C", 2.0).with_parent("A"),
            Task::new("D", 4.0).with_parents(["B", "C"]),
        ]
    }

    #[test]
    fn test_single_task_goes_to_fastest() {
        let result = heft(&[Task::new("A", 4.0)], &processors(), 0.0).unwrap();
        let a = result.assignment_for("A").unwrap();
        assert_eq!(a.processor_id, "P2");
        assert!((a.end - 2.0).abs() < 1e-9);
        assert!((result.makespan - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_diamond_schedule() {
        let result = heft(&diamond(), &processors(), 1.0).unwrap();
        // avg: A 3, B 4.5, C 1.5, D 3.
        // rank: D 3, B 4.5+1+3 = 8.5, C 1.5+1+3 = 5.5, A 3+1+8.5 = 12.5.
        assert!((result.rank_of("A").unwrap() - 12.5).abs() < 1e-9);
        assert!((result.rank_of("B").unwrap() - 8.5).abs() < 1e-9);
        assert_eq!(result.order, vec!["A", "B", "C", "D"]);

        // A on P2 [0,2). B on P2 [2,5). C: P1 starts 3 (comm) ends 5,
        // P2 starts 5 ends 6 → P1. D: P1 ready max(5+1, 5) = 6 → 10,
        // P2 ready max(5, 5+1) = 6 → 8 → P2.
        let c = result.assignment_for("C").unwrap();
        assert_eq!(c.processor_id, "P1");
        assert!((c.start - 3.0).abs() < 1e-9);
        let d = result.assignment_for("D").unwrap();
        assert_eq!(d.processor_id, "P2");
        assert!((d.start - 6.0).abs() < 1e-9);
        assert!((result.makespan - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_decisions_cover_every_processor() {
        let result = heft(&diamond(), &processors(), 1.0).unwrap();
        assert_eq!(result.decisions.len(), 4);
        for d in &result.decisions {
            assert_eq!(d.candidates.len(), 2);
            let chosen = d.chosen_candidate().unwrap();
            assert!(d.candidates.iter().all(|c| chosen.finish <= c.finish + 1e-9));
        }
    }

    #[test]
    fn test_rank_and_precedence_invariants() {
        let tasks = diamond();
        let comm = 2.5;
        let result = heft(&tasks, &processors(), comm).unwrap();

        for detail in &result.rank_details {
            assert!(detail.rank >= detail.avg_comp - 1e-9);
        }
        for task in &tasks {
            let a = result.assignment_for(&task.id).unwrap();
            for parent in &task.parents {
                let pa = result.assignment_for(parent).unwrap();
                let cost = if pa.processor_id == a.processor_id { 0.0 } else { comm };
                assert!(a.start + 1e-9 >= pa.end + cost, "{} before {}", task.id, parent);
            }
        }
        let max_end = result
            .schedule
            .assignments
            .iter()
            .map(|a| a.end)
            .fold(0.0, f64::max);
        assert!((result.makespan - max_end).abs() < 1e-9);
    }

    #[test]
    fn test_equal_finish_prefers_first_processor() {
        let procs = vec![Processor::new("X", 1.0), Processor::new("Y", 1.0)];
        let result = heft(&[Task::new("A", 3.0)], &procs, 0.0).unwrap();
        assert_eq!(result.decisions[0].chosen, "X");
    }

    #[test]
    fn test_equal_rank_keeps_input_order() {
        let procs = vec![Processor::new("X", 1.0)];
        let tasks = vec![Task::new("B", 2.0), Task::new("A", 2.0)];
        let result = heft(&tasks, &procs, 0.0).unwrap();
        assert_eq!(result.order, vec!["B", "A"]);
        assert!((result.assignment_for("A").unwrap().start - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_absorbed_rank_keeps_parent_first() {
        // rank(P) = 1 + 1e17 rounds to rank(C); C is listed first.
        let tasks = vec![Task::new("C", 1e17).with_parent("P"), Task::new("P", 1.0)];
        let procs = vec![Processor::new("X", 1.0)];
        let result = heft(&tasks, &procs, 0.0).unwrap();
        assert_eq!(result.order, vec!["P", "C"]);
        let c = result.assignment_for("C").unwrap();
        assert!((c.start - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_successor_contributions() {
        let result = heft(&diamond(), &processors(), 1.0).unwrap();
        let a = &result.rank_details[0];
        assert_eq!(a.task_id, "A");
        let values: Vec<_> = a
            .successor_contributions
            .iter()
            .map(|c| (c.task_id.as_str(), c.value))
            .collect();
        assert_eq!(values, vec![("B", 9.5), ("C", 6.5)]);
    }

    #[test]
    fn test_config_errors() {
        assert!(heft(&[], &processors(), 0.0).unwrap_err().is_config());
        assert!(heft(&diamond(), &[], 0.0).unwrap_err().is_config());
        assert!(heft(&diamond(), &processors(), -1.0).unwrap_err().is_config());
        assert!(heft(&diamond(), &processors(), f64::NAN).unwrap_err().is_config());
    }

    #[test]
    fn test_graph_errors() {
        let cyclic = vec![
            Task::new("A", 1.0).with_parent("B"),
            Task::new("B", 1.0).with_parent("A"),
        ];
        assert!(heft(&cyclic, &processors(), 0.0).unwrap_err().is_graph());

        let dangling = vec![Task::new("A", 1.0).with_parent("nope")];
        assert!(heft(&dangling, &processors(), 0.0).unwrap_err().is_graph());
    }

    #[test]
    fn test_validation_errors() {
        let tasks = vec![Task::new("A", 0.0)];
        assert!(heft(&tasks, &processors(), 0.0).unwrap_err().is_validation());
        let procs = vec![Processor::new("P", 0.0)];
        assert!(heft(&diamond(), &procs, 0.0).unwrap_err().is_validation());
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "tasks": [
                {"id": "A", "weight": 4},
                {"id": "B", "weight": 2, "parents": ["A"]}
            ],
            "processors": [{"id": "P1", "speed": 1}, {"id": "P2", "speed": 2}],
            "comm": 1
        }"#;
        let request: HeftRequest = serde_json::from_str(json).unwrap();
        let result = schedule(&request).unwrap();
        // A on P2 [0,2); B on P2 [2,3).
        assert!((result.makespan - 3.0).abs() < 1e-9);
        assert_eq!(result.processor_timeline("P2").len(), 2);
    }

    #[test]
    fn test_deterministic() {
        let a = heft(&diamond(), &processors(), 1.0).unwrap();
        let b = heft(&diamond(), &processors(), 1.0).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
