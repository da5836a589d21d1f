use serde::{Deserialize, Serialize};

pub type CompetitorId = String;

/// Result of a finished game, seen from the first competitor's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl Outcome {
    /// Actual scores for (first, second): 1/0 for a decisive game,
    /// 0.5 each for a draw.
    pub fn scores(&self) -> (f64, f64) {
        match self {
            Outcome::FirstWins => (1.0, 0.0),
            Outcome::SecondWins => (0.0, 1.0),
            Outcome::Draw => (0.5, 0.5),
        }
    }

    pub fn first_result(&self) -> SideResult {
        match self {
            Outcome::FirstWins => SideResult::Win,
            Outcome::SecondWins => SideResult::Loss,
            Outcome::Draw => SideResult::Draw,
        }
    }

    pub fn second_result(&self) -> SideResult {
        match self {
            Outcome::FirstWins => SideResult::Loss,
            Outcome::SecondWins => SideResult::Win,
            Outcome::Draw => SideResult::Draw,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Outcome::FirstWins => "first-wins",
            Outcome::SecondWins => "second-wins",
            Outcome::Draw => "draw",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first-wins" => Some(Outcome::FirstWins),
            "second-wins" => Some(Outcome::SecondWins),
            "draw" => Some(Outcome::Draw),
            _ => None,
        }
    }
}

/// What an outcome means for one of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideResult {
    Win,
    Loss,
    Draw,
}
