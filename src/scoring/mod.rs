//! Heuristic quality score
//!
//! Reduces four structural counts to one score in `[0, 100]`.
//!
//! # Scoring Formula
//!
//! ```text
//! complexity_score = max(0, 100 - complexity × 2)
//! line_score       = max(0, 100 - lines × 0.2)
//! function_score   = min(100, functions × 10)     (0 when no functions)
//! class_score      = min(100, classes × 20)       (0 when no classes)
//!
//! Overall = round(complexity × 0.30 + lines × 0.20 + functions × 0.25 + classes × 0.25)
//! ```
//!
//! Each sub-score is monotonic on its own: more complexity or more lines
//! lowers the score, more functions or classes raises it until saturation
//! (10 functions, 5 classes). Smaller, more modular code scores higher.
//!
//! This is a placeholder heuristic. Values reported by the model replace it
//! whenever they are present.
//!
//! Rounding uses [`f64::round`] (half away from zero). All terms are
//! non-negative, so this is the same as rounding half up.

use serde::Serialize;

/// Weights of the four sub-scores. Must sum to 1.0 or the score is no
/// longer bounded by 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub complexity: f64,
    pub lines: f64,
    pub functions: f64,
    pub classes: f64,
}

impl ScoreWeights {
    pub const DEFAULT: ScoreWeights = ScoreWeights {
        complexity: 0.30,
        lines: 0.20,
        functions: 0.25,
        classes: 0.25,
    };

    pub fn total(&self) -> f64 {
        self.complexity + self.lines + self.functions + self.classes
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sub-scores behind an overall score (for `metrics --explain`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub complexity_score: f64,
    pub line_score: f64,
    pub function_score: f64,
    pub class_score: f64,
    pub overall: u32,
}

impl ScoreBreakdown {
    pub fn compute(
        complexity: usize,
        lines_of_code: usize,
        function_count: usize,
        class_count: usize,
    ) -> Self {
        let weights = ScoreWeights::DEFAULT;

        // f64 throughout so huge counts floor at 0 instead of overflowing
        let complexity_score = (100.0 - complexity as f64 * 2.0).max(0.0);
        let line_score = (100.0 - lines_of_code as f64 * 0.2).max(0.0);
        let function_score = if function_count > 0 {
            (function_count as f64 * 10.0).min(100.0)
        } else {
            0.0
        };
        let class_score = if class_count > 0 {
            (class_count as f64 * 20.0).min(100.0)
        } else {
            0.0
        };

        let weighted = complexity_score * weights.complexity
            + line_score * weights.lines
            + function_score * weights.functions
            + class_score * weights.classes;

        Self {
            complexity_score,
            line_score,
            function_score,
            class_score,
            overall: weighted.round().clamp(0.0, 100.0) as u32,
        }
    }
}

/// Weighted 0-100 score for the given counts
pub fn score(
    complexity: usize,
    lines_of_code: usize,
    function_count: usize,
    class_count: usize,
) -> u32 {
    ScoreBreakdown::compute(complexity, lines_of_code, function_count, class_count).overall
}

/// Rating label for a complexity value (lower is better)
pub fn complexity_rating(complexity: usize) -> Rating {
    if complexity < 10 {
        Rating::Good
    } else if complexity < 20 {
        Rating::Medium
    } else {
        Rating::High
    }
}

/// Rating label for an overall score (higher is better)
pub fn score_rating(score: u32) -> Rating {
    if score > 80 {
        Rating::Good
    } else if score > 60 {
        Rating::Medium
    } else {
        Rating::Poor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Good,
    Medium,
    High,
    Poor,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Good => write!(f, "Good"),
            Rating::Medium => write!(f, "Medium"),
            Rating::High => write!(f, "High"),
            Rating::Poor => write!(f, "Poor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((ScoreWeights::DEFAULT.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_values() {
        // 94*0.3 + 99.8*0.2 + 10*0.25 = 50.66
        assert_eq!(score(3, 1, 1, 0), 51);
        // Empty input: 30 + 19.96 = 49.96
        assert_eq!(score(0, 1, 0, 0), 50);
        // Saturated everything
        assert_eq!(score(0, 0, 10, 5), 100);
    }

    #[test]
    fn test_rounds_half_up() {
        // 100*0.3 + 0*0.2 + 10*0.25 + 0 = 32.5
        assert_eq!(score(0, 500, 1, 0), 33);
    }

    #[test]
    fn test_huge_inputs_floor_at_zero() {
        assert_eq!(score(usize::MAX, usize::MAX, 0, 0), 0);
        assert_eq!(score(usize::MAX, usize::MAX, usize::MAX, usize::MAX), 50);
    }

    #[test]
    fn test_breakdown_subscores() {
        let b = ScoreBreakdown::compute(10, 100, 3, 1);
        assert_eq!(b.complexity_score, 80.0);
        assert_eq!(b.line_score, 80.0);
        assert_eq!(b.function_score, 30.0);
        assert_eq!(b.class_score, 20.0);
        // 24 + 16 + 7.5 + 5
        assert_eq!(b.overall, 53);
    }

    #[test]
    fn test_ratings() {
        assert_eq!(complexity_rating(9), Rating::Good);
        assert_eq!(complexity_rating(10), Rating::Medium);
        assert_eq!(complexity_rating(20), Rating::High);
        assert_eq!(score_rating(81), Rating::Good);
        assert_eq!(score_rating(80), Rating::Medium);
        assert_eq!(score_rating(60), Rating::Poor);
    }

    proptest! {
        #[test]
        fn prop_bounded(c in any::<usize>(), l in any::<usize>(), f in any::<usize>(), k in any::<usize>()) {
            prop_assert!(score(c, l, f, k) <= 100);
        }

        #[test]
        fn prop_non_increasing_in_complexity(c in 0usize..200, l in 0usize..1000, f in 0usize..20, k in 0usize..10) {
            prop_assert!(score(c + 1, l, f, k) <= score(c, l, f, k));
        }

        #[test]
        fn prop_non_increasing_in_lines(c in 0usize..200, l in 0usize..1000, f in 0usize..20, k in 0usize..10) {
            prop_assert!(score(c, l + 1, f, k) <= score(c, l, f, k));
        }

        #[test]
        fn prop_non_decreasing_in_functions(c in 0usize..200, l in 0usize..1000, f in 0usize..20, k in 0usize..10) {
            prop_assert!(score(c, l, f + 1, k) >= score(c, l, f, k));
        }

        #[test]
        fn prop_non_decreasing_in_classes(c in 0usize..200, l in 0usize..1000, f in 0usize..20, k in 0usize..10) {
            prop_assert!(score(c, l, f, k + 1) >= score(c, l, f, k));
        }

        #[test]
        fn prop_saturates(c in 0usize..200, l in 0usize..1000, f in 10usize..1000, k in 5usize..1000) {
            prop_assert_eq!(score(c, l, f, k), score(c, l, 10, 5));
        }
    }
}
