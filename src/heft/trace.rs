//! HEFT step trace builder.
//!
//! Emits one `Rank` step per task in rank-descending order, then one
//! `Schedule` step per task in scheduling order. Steps carry data only.

use serde::{Deserialize, Serialize};

use super::{HeftSchedule, ProcessorCandidate, SuccessorContribution};

/// One step of a HEFT explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeftStep {
    /// How a task's upward rank was computed.
    Rank(RankStep),
    /// Where a task was placed and what the alternatives were.
    Schedule(ScheduleStep),
}

/// Rank computation of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankStep {
    /// Task id.
    pub task_id: String,
    /// Mean computation time.
    pub avg_comp: f64,
    /// Upward rank.
    pub rank: f64,
    /// `comm + rank(s)` per successor.
    pub successor_contributions: Vec<SuccessorContribution>,
}

/// Placement of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStep {
    /// Task id.
    pub task_id: String,
    /// Start/finish/computation time on every processor.
    pub candidates: Vec<ProcessorCandidate>,
    /// Selected processor id.
    pub chosen_processor: String,
}

impl HeftStep {
    /// Task the step is about.
    pub fn task_id(&self) -> &str {
        match self {
            HeftStep::Rank(s) => &s.task_id,
            HeftStep::Schedule(s) => &s.task_id,
        }
    }

    /// Whether this is a rank step.
    pub fn is_rank(&self) -> bool {
        matches!(self, HeftStep::Rank(_))
    }
}

/// Builds the step trace for a HEFT result.
pub fn build_heft_steps(result: &HeftSchedule) -> Vec<HeftStep> {
    let ranks = result.rank_details.iter().map(|d| {
        HeftStep::Rank(RankStep {
            task_id: d.task_id.clone(),
            avg_comp: d.avg_comp,
            rank: d.rank,
            successor_contributions: d.successor_contributions.clone(),
        })
    });
    let placements = result.decisions.iter().map(|d| {
        HeftStep::Schedule(ScheduleStep {
            task_id: d.task_id.clone(),
            candidates: d.candidates.clone(),
            chosen_processor: d.chosen.clone(),
        })
    });
    ranks.chain(placements).collect()
}
