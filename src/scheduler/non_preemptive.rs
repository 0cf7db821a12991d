//! Non-preemptive driver (FCFS, SJF, HRRN).
//!
//! # Algorithm
//! 1. Collect processes that have arrived and not finished.
//! 2. If none, idle until the next arrival.
//! 3. Otherwise let the rule pick one and run it to completion.
//!
//! Rules are re-evaluated at every decision, so time-dependent scores
//! (HRRN response ratios) are always fresh.
//!
//! # Complexity
//! O(n²) rule evaluations for n processes.

use log::trace;

use super::{CandidateMetric, DispatchDecision, Run};
use crate::dispatching::{Candidate, RuleEngine, SelectionContext};
use crate::models::Process;

pub(super) fn run(mut procs: Vec<Process>, engine: &RuleEngine) -> Run {
    let mut run = Run::default();
    let mut t = 0;

    for _ in 0..procs.len() {
        let next_arrival = procs
            .iter()
            .filter(|p| !p.is_finished())
            .map(|p| p.arrival)
            .min();
        match next_arrival {
            Some(a) if a > t => {
                run.timeline.push_idle(t, a);
                t = a;
            }
            Some(_) => {}
            None => break,
        }

        let ctx = SelectionContext::at_time(t);
        let ready: Vec<Candidate<'_>> = procs
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_finished() && p.has_arrived(t))
            .map(|(i, p)| Candidate::new(i, p, 0))
            .collect();
        let Some(pos) = engine.select_best(&ready, &ctx) else {
            break;
        };
        let chosen = ready[pos].index;
        let candidates = ready
            .iter()
            .zip(engine.metrics(&ready, &ctx))
            .map(|(c, value)| CandidateMetric {
                name: c.process.name.clone(),
                value,
            })
            .collect();

        let p = &mut procs[chosen];
        trace!("t={} {} dispatches {}", t, engine.rule_name(), p.name);
        run.decisions.push(DispatchDecision {
            time: t,
            candidates,
            chosen: p.name.clone(),
        });
        p.mark_dispatched(t);
        run.timeline.push_process(&p.name, t, t + p.burst);
        t += p.burst;
        p.mark_finished(t);
    }

    run.processes = procs;
    run
}
