use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::error;
use std::sync::Arc;

use super::{AppState, LimitParams};
use crate::api::models::{GameDto, HistoryEntryDto, RecordGamePayload};

pub async fn record_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecordGamePayload>,
) -> impl IntoResponse {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Ledger lock poisoned").into_response(),
    };

    match ledger.record_outcome(&payload.first_id, &payload.second_id, payload.outcome) {
        Ok(game) => (StatusCode::CREATED, Json(GameDto::from(&game))).into_response(),
        Err(e) if e.is_invalid_input() => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => {
            error!("Failed to record game: {e:?}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to persist game").into_response()
        }
    }
}

pub async fn get_recent_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(10).clamp(1, 1000);

    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Ledger lock poisoned").into_response(),
    };

    let games: Vec<GameDto> = ledger.recent_games(limit).iter().map(GameDto::from).collect();
    Json(games).into_response()
}

pub async fn get_rating_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(500).clamp(1, 1000);

    let ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Ledger lock poisoned").into_response(),
    };

    let history: Vec<HistoryEntryDto> = ledger
        .rating_history(limit)
        .iter()
        .map(HistoryEntryDto::from)
        .collect();
    Json(history).into_response()
}

pub async fn reset_ledger(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Ledger lock poisoned").into_response(),
    };

    match ledger.reset_all() {
        Ok(()) => (StatusCode::OK, "Ledger reset").into_response(),
        Err(e) => {
            error!("Failed to reset ledger: {e:?}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to reset ledger").into_response()
        }
    }
}
