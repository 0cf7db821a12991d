//! Event-driven preemptive driver (SRTF, Priority).
//!
//! # Algorithm
//! Time advances only to the next event: an arrival or the completion
//! of the running process. At each event the rule re-selects among the
//! ready processes.
//!
//! This yields the same schedule as re-selecting at every unit tick.
//! Between events no process arrives, so the ready set is fixed, and the
//! selected process's score can only improve (remaining shrinks) or stay
//! put (static priority). The tie-break is stable input order in both
//! formulations.
//!
//! # Complexity
//! O((n + a) · n) where a is the number of arrival events.

use log::trace;

use super::{CandidateMetric, DispatchDecision, Run};
use crate::dispatching::{Candidate, RuleEngine, SelectionContext};
use crate::models::Process;

pub(super) fn run(mut procs: Vec<Process>, engine: &RuleEngine) -> Run {
    let mut run = Run::default();
    let mut executed = vec![0i64; procs.len()];
    let mut remaining_count = procs.len();
    let mut t = 0;
    let mut last_chosen: Option<usize> = None;

    while remaining_count > 0 {
        let ctx = SelectionContext::at_time(t);
        let ready: Vec<Candidate<'_>> = procs
            .iter()
            .enumerate()
            .filter(|(i, p)| !p.is_finished() && p.has_arrived(t) && executed[*i] < p.burst)
            .map(|(i, p)| Candidate::new(i, p, executed[i]))
            .collect();

        let next_arrival = procs
            .iter()
            .filter(|p| !p.is_finished() && p.arrival > t)
            .map(|p| p.arrival)
            .min();

        let Some(pos) = engine.select_best(&ready, &ctx) else {
            // Nothing ready: wait for the next arrival.
            match next_arrival {
                Some(a) => {
                    run.timeline.push_idle(t, a);
                    t = a;
                    continue;
                }
                None => break,
            }
        };
        let chosen = ready[pos].index;

        if last_chosen != Some(chosen) {
            let candidates = ready
                .iter()
                .zip(engine.metrics(&ready, &ctx))
                .map(|(c, value)| CandidateMetric {
                    name: c.process.name.clone(),
                    value,
                })
                .collect();
            trace!("t={} {} dispatches {}", t, engine.rule_name(), procs[chosen].name);
            run.decisions.push(DispatchDecision {
                time: t,
                candidates,
                chosen: procs[chosen].name.clone(),
            });
        }
        last_chosen = Some(chosen);

        let p = &mut procs[chosen];
        let left = p.burst - executed[chosen];
        let until = match next_arrival {
            Some(a) => (t + left).min(a),
            None => t + left,
        };

        p.mark_dispatched(t);
        run.timeline.push_process(&p.name, t, until);
        executed[chosen] += until - t;
        t = until;

        if executed[chosen] == p.burst {
            p.mark_finished(t);
            remaining_count -= 1;
            last_chosen = None;
        }
    }

    run.processes = procs;
    run
}
