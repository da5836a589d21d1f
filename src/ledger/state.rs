use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::rating::{CompetitorId, Outcome};

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorRecord {
    pub id: CompetitorId,
    pub rating: i32,
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
}

impl CompetitorRecord {
    pub fn new(id: impl Into<CompetitorId>, initial_rating: i32) -> Self {
        Self {
            id: id.into(),
            rating: initial_rating,
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Win percentage over games played, 0 for a competitor with no games.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games_played as f64 * 100.0
    }

    /// Back to the default rating with zeroed counters, keeping the identifier.
    pub fn reset(&mut self, initial_rating: i32) {
        self.rating = initial_rating;
        self.games_played = 0;
        self.wins = 0;
        self.losses = 0;
        self.draws = 0;
    }
}

/// One recorded game. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: String,
    pub first_id: CompetitorId,
    pub second_id: CompetitorId,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
    pub first_rating_before: i32,
    pub first_rating_after: i32,
    pub second_rating_before: i32,
    pub second_rating_after: i32,
    pub rating_change: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingHistoryEntry {
    pub competitor_id: CompetitorId,
    pub opponent_id: CompetitorId,
    pub rating_before: i32,
    pub rating: i32,
    pub timestamp: DateTime<Utc>,
    pub game_id: String,
}

/// Full persisted state of the ledger: the rating table plus both bounded
/// audit collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub competitors: HashMap<CompetitorId, CompetitorRecord>,
    /// Newest first.
    pub games: VecDeque<GameRecord>,
    /// Chronological, oldest first.
    pub history: VecDeque<RatingHistoryEntry>,
}

impl LedgerState {
    /// Prepends a game record, evicting the oldest beyond `cap`.
    pub fn push_game(&mut self, game: GameRecord, cap: usize) {
        self.games.push_front(game);
        self.games.truncate(cap);
    }

    /// Appends a history entry, evicting the oldest beyond `cap`.
    pub fn push_history(&mut self, entry: RatingHistoryEntry, cap: usize) {
        self.history.push_back(entry);
        while self.history.len() > cap {
            self.history.pop_front();
        }
    }
}
