pub mod state;

pub use state::{CompetitorRecord, GameRecord, LedgerState, RatingHistoryEntry};

use chrono::Utc;
use log::warn;
use uuid::Uuid;

use crate::config::settings::RatingSettings;
use crate::errors::LedgerError;
use crate::rating::{self, CompetitorId, Outcome, SideResult};
use crate::storage::LedgerStore;

/// ELO bookkeeping over an injected storage backend.
///
/// Every mutation is applied to a candidate copy of the state, persisted,
/// and only then committed in memory, so a failed save changes nothing.
pub struct RatingLedger {
    store: Box<dyn LedgerStore>,
    state: LedgerState,
    settings: RatingSettings,
}

impl RatingLedger {
    /// Opens a ledger over `store`. Starts from empty defaults when nothing
    /// is persisted or the persisted state cannot be read.
    pub fn open(store: Box<dyn LedgerStore>, settings: RatingSettings) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => LedgerState::default(),
            Err(e) => {
                warn!("Failed to load ledger state, starting from defaults: {e:?}");
                LedgerState::default()
            }
        };

        Self {
            store,
            state,
            settings,
        }
    }

    /// All rating records, highest rating first. Ties order by identifier
    /// so repeated reads return identical results.
    pub fn ratings(&self) -> Vec<CompetitorRecord> {
        let mut records: Vec<CompetitorRecord> =
            self.state.competitors.values().cloned().collect();
        records.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id)));
        records
    }

    pub fn rating(&self, id: &str) -> Option<&CompetitorRecord> {
        self.state.competitors.get(id.trim())
    }

    /// Records a finished game and applies the ELO update to both sides.
    ///
    /// Unknown competitors are initialized at the default rating before the
    /// update. Returns the new game record with both pre- and post-update
    /// ratings and the points exchanged.
    pub fn record_outcome(
        &mut self,
        first_id: &str,
        second_id: &str,
        outcome: Outcome,
    ) -> Result<GameRecord, LedgerError> {
        let first_id = normalize_id(first_id)?;
        let second_id = normalize_id(second_id)?;
        if first_id == second_id {
            return Err(LedgerError::SelfPlay(first_id));
        }

        let mut next = self.state.clone();
        let first_before = rating_of(&next, &first_id, self.settings.initial_rating);
        let second_before = rating_of(&next, &second_id, self.settings.initial_rating);
        let exchange =
            rating::rate_pair(first_before, second_before, outcome, self.settings.k_factor);

        let game = GameRecord {
            id: Uuid::new_v4().to_string(),
            first_id: first_id.clone(),
            second_id: second_id.clone(),
            outcome,
            timestamp: Utc::now(),
            first_rating_before: first_before,
            first_rating_after: exchange.first_new,
            second_rating_before: second_before,
            second_rating_after: exchange.second_new,
            rating_change: exchange.change,
        };

        credit(
            &mut next,
            &first_id,
            self.settings.initial_rating,
            exchange.first_new,
            outcome.first_result(),
        );
        credit(
            &mut next,
            &second_id,
            self.settings.initial_rating,
            exchange.second_new,
            outcome.second_result(),
        );

        next.push_game(game.clone(), self.settings.game_log_cap);
        for entry in history_pair(&game) {
            next.push_history(entry, self.settings.history_cap);
        }

        self.store.save(&next).map_err(LedgerError::Storage)?;
        self.state = next;
        Ok(game)
    }

    /// Up to `limit` most recent games, newest first.
    pub fn recent_games(&self, limit: usize) -> Vec<GameRecord> {
        self.state.games.iter().take(limit).cloned().collect()
    }

    /// Retained games involving both given competitors, newest first.
    pub fn games_between(&self, first_id: &str, second_id: &str) -> Vec<GameRecord> {
        self.state
            .games
            .iter()
            .filter(|g| {
                (g.first_id == first_id && g.second_id == second_id)
                    || (g.first_id == second_id && g.second_id == first_id)
            })
            .cloned()
            .collect()
    }

    /// Up to `limit` most recent history entries, in chronological order.
    /// Truncation drops the oldest entries, not the newest.
    pub fn rating_history(&self, limit: usize) -> Vec<RatingHistoryEntry> {
        let skip = self.state.history.len().saturating_sub(limit);
        self.state.history.iter().skip(skip).cloned().collect()
    }

    /// Resets every known competitor to the default rating and clears the
    /// game log and rating history.
    pub fn reset_all(&mut self) -> Result<(), LedgerError> {
        let mut next = self.state.clone();
        for record in next.competitors.values_mut() {
            record.reset(self.settings.initial_rating);
        }
        next.games.clear();
        next.history.clear();

        self.store.save(&next).map_err(LedgerError::Storage)?;
        self.state = next;
        Ok(())
    }
}

fn normalize_id(id: &str) -> Result<CompetitorId, LedgerError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyCompetitorId);
    }
    Ok(trimmed.to_string())
}

fn rating_of(state: &LedgerState, id: &str, initial_rating: i32) -> i32 {
    state
        .competitors
        .get(id)
        .map(|c| c.rating)
        .unwrap_or(initial_rating)
}

fn credit(
    state: &mut LedgerState,
    id: &CompetitorId,
    initial_rating: i32,
    new_rating: i32,
    result: SideResult,
) {
    let record = state
        .competitors
        .entry(id.clone())
        .or_insert_with(|| CompetitorRecord::new(id.clone(), initial_rating));

    record.rating = new_rating;
    record.games_played += 1;
    match result {
        SideResult::Win => record.wins += 1,
        SideResult::Loss => record.losses += 1,
        SideResult::Draw => record.draws += 1,
    }
}

fn history_pair(game: &GameRecord) -> [RatingHistoryEntry; 2] {
    [
        RatingHistoryEntry {
            competitor_id: game.first_id.clone(),
            opponent_id: game.second_id.clone(),
            rating_before: game.first_rating_before,
            rating: game.first_rating_after,
            timestamp: game.timestamp,
            game_id: game.id.clone(),
        },
        RatingHistoryEntry {
            competitor_id: game.second_id.clone(),
            opponent_id: game.first_id.clone(),
            rating_before: game.second_rating_before,
            rating: game.second_rating_after,
            timestamp: game.timestamp,
            game_id: game.id.clone(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use anyhow::anyhow;

    fn test_ledger() -> RatingLedger {
        RatingLedger::open(Box::new(MemoryStore::new()), RatingSettings::default())
    }

    fn small_caps() -> RatingSettings {
        RatingSettings {
            game_log_cap: 3,
            history_cap: 4,
            ..RatingSettings::default()
        }
    }

    /// Store whose saves always fail, for the atomicity contract.
    struct BrokenStore;

    impl LedgerStore for BrokenStore {
        fn load(&self) -> anyhow::Result<Option<LedgerState>> {
            Ok(None)
        }

        fn save(&self, _state: &LedgerState) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    #[test]
    fn first_game_between_new_competitors() {
        let mut ledger = test_ledger();
        let game = ledger
            .record_outcome("A", "B", Outcome::FirstWins)
            .unwrap();

        assert_eq!(game.first_rating_before, 1000);
        assert_eq!(game.second_rating_before, 1000);
        assert_eq!(game.first_rating_after, 1016);
        assert_eq!(game.second_rating_after, 984);
        assert_eq!(game.rating_change, 16);

        let a = ledger.rating("A").unwrap();
        assert_eq!((a.rating, a.games_played, a.wins, a.losses), (1016, 1, 1, 0));
        let b = ledger.rating("B").unwrap();
        assert_eq!((b.rating, b.games_played, b.wins, b.losses), (984, 1, 0, 1));
    }

    #[test]
    fn draw_counts_for_both_sides() {
        let mut ledger = test_ledger();
        ledger.record_outcome("A", "B", Outcome::Draw).unwrap();

        for id in ["A", "B"] {
            let record = ledger.rating(id).unwrap();
            assert_eq!(record.rating, 1000);
            assert_eq!(record.draws, 1);
            assert_eq!(record.games_played, 1);
        }
    }

    #[test]
    fn upset_transfers_more_points() {
        let mut ledger = test_ledger();
        // Build up A's rating against a sacrificial opponent.
        for _ in 0..13 {
            ledger.record_outcome("A", "punchbag", Outcome::FirstWins).unwrap();
        }
        assert!(ledger.rating("A").unwrap().rating > 1000);

        let game = ledger.record_outcome("A", "B", Outcome::SecondWins).unwrap();
        assert_eq!(game.second_rating_before, 1000);
        assert!(game.rating_change > 16);
        assert_eq!(
            game.first_rating_after,
            game.first_rating_before - game.rating_change
        );
        assert_eq!(
            game.second_rating_after,
            game.second_rating_before + game.rating_change
        );
    }

    #[test]
    fn ratings_sorted_descending_with_stable_ties() {
        let mut ledger = test_ledger();
        ledger.record_outcome("A", "B", Outcome::FirstWins).unwrap();
        ledger.record_outcome("C", "D", Outcome::FirstWins).unwrap();

        let ratings = ledger.ratings();
        let ids: Vec<&str> = ratings.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["A", "C", "B", "D"]);
        assert_eq!(ledger.ratings(), ratings);
    }

    #[test]
    fn unknown_competitor_is_none() {
        let ledger = test_ledger();
        assert!(ledger.rating("nobody").is_none());
    }

    #[test]
    fn empty_identifier_rejected_before_mutation() {
        let mut ledger = test_ledger();
        let err = ledger.record_outcome("  ", "B", Outcome::Draw).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyCompetitorId));
        assert!(ledger.rating("B").is_none());
        assert!(ledger.recent_games(10).is_empty());
    }

    #[test]
    fn self_play_rejected_even_with_padding() {
        let mut ledger = test_ledger();
        let err = ledger.record_outcome("A", " A ", Outcome::Draw).unwrap_err();
        assert!(matches!(err, LedgerError::SelfPlay(_)));
        assert!(ledger.rating("A").is_none());
    }

    #[test]
    fn game_log_cap_enforced() {
        let mut ledger = RatingLedger::open(Box::new(MemoryStore::new()), small_caps());
        let mut first_game_id = None;
        for i in 0..4 {
            let game = ledger.record_outcome("A", "B", Outcome::Draw).unwrap();
            if i == 0 {
                first_game_id = Some(game.id);
            }
        }

        let games = ledger.recent_games(100);
        assert_eq!(games.len(), 3);
        let first_game_id = first_game_id.unwrap();
        assert!(games.iter().all(|g| g.id != first_game_id));
    }

    #[test]
    fn history_cap_drops_oldest() {
        let mut ledger = RatingLedger::open(Box::new(MemoryStore::new()), small_caps());
        // 3 games append 6 entries against a cap of 4.
        let mut game_ids = Vec::new();
        for _ in 0..3 {
            game_ids.push(ledger.record_outcome("A", "B", Outcome::Draw).unwrap().id);
        }

        let history = ledger.rating_history(100);
        assert_eq!(history.len(), 4);
        assert!(history.iter().all(|e| e.game_id != game_ids[0]));
        // Chronological: the oldest retained pair first.
        assert_eq!(history[0].game_id, game_ids[1]);
        assert_eq!(history[3].game_id, game_ids[2]);
    }

    #[test]
    fn default_caps_hold_after_many_games() {
        let mut ledger = test_ledger();
        let first_game_id = ledger
            .record_outcome("A", "B", Outcome::Draw)
            .unwrap()
            .id;
        for _ in 0..260 {
            ledger.record_outcome("A", "B", Outcome::Draw).unwrap();
        }

        let games = ledger.recent_games(1000);
        assert_eq!(games.len(), 100);
        assert!(games.iter().all(|g| g.id != first_game_id));
        assert_eq!(ledger.rating_history(1000).len(), 500);
    }

    #[test]
    fn rating_history_limit_keeps_newest_in_order() {
        let mut ledger = test_ledger();
        let g1 = ledger.record_outcome("A", "B", Outcome::FirstWins).unwrap();
        let g2 = ledger.record_outcome("A", "B", Outcome::FirstWins).unwrap();

        let tail = ledger.rating_history(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].game_id, g1.id);
        assert_eq!(tail[1].game_id, g2.id);
        assert_eq!(tail[2].game_id, g2.id);
    }

    #[test]
    fn recent_games_newest_first() {
        let mut ledger = test_ledger();
        let g1 = ledger.record_outcome("A", "B", Outcome::FirstWins).unwrap();
        let g2 = ledger.record_outcome("A", "B", Outcome::SecondWins).unwrap();

        let games = ledger.recent_games(1);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, g2.id);

        let games = ledger.recent_games(10);
        assert_eq!(games.last().unwrap().id, g1.id);
    }

    #[test]
    fn games_between_matches_either_orientation() {
        let mut ledger = test_ledger();
        ledger.record_outcome("A", "B", Outcome::FirstWins).unwrap();
        ledger.record_outcome("B", "A", Outcome::Draw).unwrap();
        ledger.record_outcome("A", "C", Outcome::FirstWins).unwrap();

        assert_eq!(ledger.games_between("A", "B").len(), 2);
        assert_eq!(ledger.games_between("B", "C").len(), 0);
    }

    #[test]
    fn reset_restores_defaults_and_clears_collections() {
        let mut ledger = test_ledger();
        ledger.record_outcome("A", "B", Outcome::FirstWins).unwrap();
        ledger.record_outcome("A", "C", Outcome::FirstWins).unwrap();

        ledger.reset_all().unwrap();

        let ratings = ledger.ratings();
        assert_eq!(ratings.len(), 3);
        for record in &ratings {
            assert_eq!(record.rating, 1000);
            assert_eq!(record.games_played, 0);
        }
        assert!(ledger.recent_games(100).is_empty());
        assert!(ledger.rating_history(1000).is_empty());
    }

    #[test]
    fn state_survives_reopening_over_the_same_store() {
        let store = MemoryStore::new();
        let mut ledger =
            RatingLedger::open(Box::new(store.clone()), RatingSettings::default());
        ledger.record_outcome("A", "B", Outcome::FirstWins).unwrap();

        let reopened = RatingLedger::open(Box::new(store), RatingSettings::default());
        assert_eq!(reopened.rating("A").unwrap().rating, 1016);
        assert_eq!(reopened.recent_games(10).len(), 1);
        assert_eq!(reopened.rating_history(10).len(), 2);
    }

    #[test]
    fn failed_save_leaves_state_untouched() {
        let mut ledger =
            RatingLedger::open(Box::new(BrokenStore), RatingSettings::default());
        let err = ledger
            .record_outcome("A", "B", Outcome::FirstWins)
            .unwrap_err();

        assert!(matches!(err, LedgerError::Storage(_)));
        assert!(ledger.rating("A").is_none());
        assert!(ledger.recent_games(10).is_empty());
        assert!(ledger.rating_history(10).is_empty());
    }
}
