use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::{CompetitorRecord, GameRecord, RatingHistoryEntry};
use crate::rating::Outcome;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorDto {
    pub id: String,
    pub rating: i32,
    pub games_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub win_rate: f64,
}

impl From<&CompetitorRecord> for CompetitorDto {
    fn from(record: &CompetitorRecord) -> Self {
        Self {
            id: record.id.clone(),
            rating: record.rating,
            games_played: record.games_played,
            wins: record.wins,
            losses: record.losses,
            draws: record.draws,
            win_rate: record.win_rate(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: String,
    pub first_id: String,
    pub second_id: String,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
    pub first_rating_before: i32,
    pub first_rating_after: i32,
    pub second_rating_before: i32,
    pub second_rating_after: i32,
    pub rating_change: i32,
}

impl From<&GameRecord> for GameDto {
    fn from(game: &GameRecord) -> Self {
        Self {
            id: game.id.clone(),
            first_id: game.first_id.clone(),
            second_id: game.second_id.clone(),
            outcome: game.outcome,
            timestamp: game.timestamp,
            first_rating_before: game.first_rating_before,
            first_rating_after: game.first_rating_after,
            second_rating_before: game.second_rating_before,
            second_rating_after: game.second_rating_after,
            rating_change: game.rating_change,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDto {
    pub competitor_id: String,
    pub opponent_id: String,
    pub rating_before: i32,
    pub rating: i32,
    pub timestamp: DateTime<Utc>,
    pub game_id: String,
}

impl From<&RatingHistoryEntry> for HistoryEntryDto {
    fn from(entry: &RatingHistoryEntry) -> Self {
        Self {
            competitor_id: entry.competitor_id.clone(),
            opponent_id: entry.opponent_id.clone(),
            rating_before: entry.rating_before,
            rating: entry.rating,
            timestamp: entry.timestamp,
            game_id: entry.game_id.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGamePayload {
    pub first_id: String,
    pub second_id: String,
    pub outcome: Outcome,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadStats {
    pub total_games: i32,
    pub first_wins: i32,
    pub second_wins: i32,
    pub draws: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadResponse {
    pub first: CompetitorDto,
    pub second: CompetitorDto,
    /// ELO expected score of the first competitor against the second.
    pub expected_first_score: f64,
    pub stats: HeadToHeadStats,
    pub games: Vec<GameDto>,
}
