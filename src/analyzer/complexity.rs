//! Weighted complexity estimate.
//!
//! Score = `2×JOIN + 1.5×"(" + 3×UNION + 1×aggregate + 4×window`, counted as
//! substrings of the uppercased text. `≤ 3` is LOW, `≤ 8` is MEDIUM,
//! anything above is HIGH.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::Complexity;

static AGGREGATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"COUNT|SUM|AVG|MIN|MAX|GROUP BY").expect("valid regex"));

static WINDOW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"OVER\s*\(").expect("valid regex"));

const JOIN_WEIGHT: f64 = 2.0;
const PAREN_WEIGHT: f64 = 1.5;
const UNION_WEIGHT: f64 = 3.0;
const AGGREGATE_WEIGHT: f64 = 1.0;
const WINDOW_WEIGHT: f64 = 4.0;

const LOW_MAX: f64 = 3.0;
const MEDIUM_MAX: f64 = 8.0;

/// Raw counts behind the complexity score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComplexityScore {
    pub join_count:      usize,
    pub paren_count:     usize,
    pub union_count:     usize,
    pub aggregate_count: usize,
    pub window_count:    usize
}

impl ComplexityScore {
    /// Count complexity markers in `sql`
    pub fn measure(sql: &str) -> Self {
        let upper = sql.to_uppercase();
        Self {
            join_count:      upper.matches("JOIN").count(),
            paren_count:     upper.matches('(').count(),
            union_count:     upper.matches("UNION").count(),
            aggregate_count: AGGREGATE_REGEX.find_iter(&upper).count(),
            window_count:    WINDOW_REGEX.find_iter(&upper).count()
        }
    }

    pub fn score(&self) -> f64 {
        self.join_count as f64 * JOIN_WEIGHT
            + self.paren_count as f64 * PAREN_WEIGHT
            + self.union_count as f64 * UNION_WEIGHT
            + self.aggregate_count as f64 * AGGREGATE_WEIGHT
            + self.window_count as f64 * WINDOW_WEIGHT
    }

    pub fn level(&self) -> Complexity {
        let score = self.score();
        if score <= LOW_MAX {
            Complexity::Low
        } else if score <= MEDIUM_MAX {
            Complexity::Medium
        } else {
            Complexity::High
        }
    }
}

/// Estimate complexity of a SQL snippet
pub fn estimate_complexity(sql: &str) -> Complexity {
    ComplexityScore::measure(sql).level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_function_weight() {
        let score = ComplexityScore::measure("SELECT ROW_NUMBER() OVER (PARTITION BY a) FROM t");
        assert_eq!(score.window_count, 1);
        assert_eq!(score.paren_count, 2);
        assert_eq!(score.score(), 7.0);
        assert_eq!(score.level(), Complexity::Medium);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let two_parens = ComplexityScore {
            paren_count: 2,
            ..Default::default()
        };
        assert_eq!(two_parens.score(), 3.0);
        assert_eq!(two_parens.level(), Complexity::Low);
    }
}
