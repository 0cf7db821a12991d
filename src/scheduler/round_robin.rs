//! Round Robin driver.
//!
//! # Algorithm
//! At every decision instant `t`:
//! 1. Enqueue processes that arrived by `t` (arrival order, then input order).
//! 2. Then re-enqueue the process whose slice just ended, if unfinished.
//! 3. Dequeue the head and run it for `min(quantum, remaining)`.
//!
//! Step 1 before step 2 means a newcomer arriving exactly when a slice
//! ends is served before the preempted process.

use log::trace;
use std::collections::VecDeque;

use super::{CandidateMetric, DispatchDecision, Run};
use crate::models::Process;

pub(super) fn run(mut procs: Vec<Process>, quantum: i64) -> Run {
    let mut run = Run::default();
    let mut remaining: Vec<i64> = procs.iter().map(|p| p.burst).collect();

    let mut arrival_order: Vec<usize> = (0..procs.len()).collect();
    arrival_order.sort_by_key(|&i| procs[i].arrival);

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut next_admit = 0;
    let mut preempted: Option<usize> = None;
    let mut t = 0;

    loop {
        while next_admit < arrival_order.len() && procs[arrival_order[next_admit]].has_arrived(t) {
            queue.push_back(arrival_order[next_admit]);
            next_admit += 1;
        }
        if let Some(idx) = preempted.take() {
            queue.push_back(idx);
        }

        let Some(idx) = queue.pop_front() else {
            match arrival_order.get(next_admit) {
                Some(&next) => {
                    let a = procs[next].arrival;
                    run.timeline.push_idle(t, a);
                    t = a;
                    continue;
                }
                None => break,
            }
        };

        let candidates = std::iter::once(idx)
            .chain(queue.iter().copied())
            .map(|i| CandidateMetric {
                name: procs[i].name.clone(),
                value: remaining[i] as f64,
            })
            .collect();
        trace!("t={} RR dispatches {} (queue {})", t, procs[idx].name, queue.len());
        run.decisions.push(DispatchDecision {
            time: t,
            candidates,
            chosen: procs[idx].name.clone(),
        });

        let p = &mut procs[idx];
        let slice = quantum.min(remaining[idx]);
        p.mark_dispatched(t);
        run.timeline.push_process(&p.name, t, t + slice);
        t += slice;
        remaining[idx] -= slice;

        if remaining[idx] == 0 {
            p.mark_finished(t);
        } else {
            preempted = Some(idx);
        }
    }

    run.processes = procs;
    run
}
