use super::types::Outcome;

/// Expected score for a competitor against an opponent, in [0, 1].
/// 0.5 for equal ratings; a 200-point edge is worth roughly 0.76.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / 400.0))
}

/// Both sides' ratings after applying one game result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EloExchange {
    pub first_new: i32,
    pub second_new: i32,
    /// Points moved between the sides, always non-negative.
    pub change: i32,
}

/// Applies the ELO update rule to a pair of ratings.
///
/// A single rounded delta is added to the first rating and subtracted from
/// the second, so the winner's gain and the loser's loss are equal in
/// magnitude even after rounding.
pub fn rate_pair(first: i32, second: i32, outcome: Outcome, k: f64) -> EloExchange {
    let (first_score, _) = outcome.scores();
    let delta = (k * (first_score - expected_score(first, second))).round() as i32;

    EloExchange {
        first_new: first + delta,
        second_new: second - delta,
        change: delta.abs(),
    }
}
