use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{CompetitorDto, GameDto, HeadToHeadResponse, HeadToHeadStats};
use crate::rating::{self, Outcome};

pub async fn get_ratings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Ledger lock poisoned").into_response(),
    };

    let records: Vec<CompetitorDto> = ledger.ratings().iter().map(CompetitorDto::from).collect();
    Json(records).into_response()
}

pub async fn get_rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Ledger lock poisoned").into_response(),
    };

    match ledger.rating(&id) {
        Some(record) => Json(CompetitorDto::from(record)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn get_head_to_head(
    State(state): State<Arc<AppState>>,
    Path((first_id, second_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Ledger lock poisoned").into_response(),
    };

    let first = match ledger.rating(&first_id) {
        Some(record) => record.clone(),
        None => {
            return (StatusCode::NOT_FOUND, format!("Competitor {first_id} not found"))
                .into_response();
        }
    };
    let second = match ledger.rating(&second_id) {
        Some(record) => record.clone(),
        None => {
            return (StatusCode::NOT_FOUND, format!("Competitor {second_id} not found"))
                .into_response();
        }
    };

    let expected_first_score = rating::expected_score(first.rating, second.rating);

    let pair_games = ledger.games_between(&first.id, &second.id);
    let mut stats = HeadToHeadStats {
        total_games: pair_games.len() as i32,
        first_wins: 0,
        second_wins: 0,
        draws: 0,
    };

    for game in &pair_games {
        match winner_of(game) {
            Some(winner) if winner == first.id => stats.first_wins += 1,
            Some(_) => stats.second_wins += 1,
            None => stats.draws += 1,
        }
    }

    Json(HeadToHeadResponse {
        first: CompetitorDto::from(&first),
        second: CompetitorDto::from(&second),
        expected_first_score,
        stats,
        games: pair_games.iter().map(GameDto::from).collect(),
    })
    .into_response()
}

fn winner_of(game: &crate::ledger::GameRecord) -> Option<&str> {
    match game.outcome {
        Outcome::FirstWins => Some(&game.first_id),
        Outcome::SecondWins => Some(&game.second_id),
        Outcome::Draw => None,
    }
}
