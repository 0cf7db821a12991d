//! Rule engine: applies one selection rule to a ready set.
//!
//! Ties are never broken by score alone. Two candidates whose scores
//! differ by at most `epsilon` are equal, and the one earlier in the
//! candidate list wins. Callers build the list in input order, which
//! gives the stable input-order tie-break every policy relies on.

use std::sync::Arc;

use super::{Candidate, RuleScore, SelectionContext, SelectionRule};

/// Applies a [`SelectionRule`] to candidate lists.
#[derive(Clone)]
pub struct RuleEngine {
    rule: Arc<dyn SelectionRule>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an engine for `rule`.
    pub fn new<R: SelectionRule + 'static>(rule: R) -> Self {
        Self {
            rule: Arc::new(rule),
            epsilon: 1e-9,
        }
    }

    /// Sets the score tolerance under which candidates tie.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Name of the wrapped rule.
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Position (in `candidates`) of the best candidate.
    ///
    /// Only a strictly better score displaces the current best, so the
    /// earliest of tied candidates is returned.
    pub fn select_best(
        &self,
        candidates: &[Candidate<'_>],
        context: &SelectionContext,
    ) -> Option<usize> {
        let mut best: Option<(usize, RuleScore)> = None;
        for (pos, cand) in candidates.iter().enumerate() {
            let score = self.rule.evaluate(cand, context);
            match best {
                Some((_, best_score)) if score >= best_score - self.epsilon => {}
                _ => best = Some((pos, score)),
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Scores every candidate, in list order.
    pub fn scores(&self, candidates: &[Candidate<'_>], context: &SelectionContext) -> Vec<RuleScore> {
        candidates
            .iter()
            .map(|c| self.rule.evaluate(c, context))
            .collect()
    }

    /// Natural-sign metric of every candidate (e.g. HRRN ratios), in list order.
    pub fn metrics(&self, candidates: &[Candidate<'_>], context: &SelectionContext) -> Vec<f64> {
        candidates
            .iter()
            .map(|c| self.rule.metric(c, context))
            .collect()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rule", &self.rule.name())
            .field("epsilon", &self.epsilon)
            .finish()
    }
}
