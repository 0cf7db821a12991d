//! Processor (resource) model.
//!
//! Processors are heterogeneous: each has a `speed` multiplier, so the
//! same task takes `weight / speed` time units on it.

use serde::{Deserialize, Serialize};

/// A processor that executes DAG tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    /// Unique processor identifier.
    pub id: String,
    /// Work units processed per time unit (> 0).
    pub speed: f64,
}

impl Processor {
    /// Creates a processor.
    pub fn new(id: impl Into<String>, speed: f64) -> Self {
        Self {
            id: id.into(),
            speed,
        }
    }

    /// Computation time of `weight` work units on this processor.
    #[inline]
    pub fn comp_time(&self, weight: f64) -> f64 {
        weight / self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comp_time() {
        let fast = Processor::new("P1", 2.0);
        let slow = Processor::new("P2", 0.5);
        assert!((fast.comp_time(10.0) - 5.0).abs() < 1e-9);
        assert!((slow.comp_time(10.0) - 20.0).abs() < 1e-9);
    }
}
