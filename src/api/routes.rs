use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    games::{get_rating_history, get_recent_games, record_game, reset_ledger},
    health,
    ratings::{get_head_to_head, get_rating, get_ratings},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ratings", get(get_ratings))
        .route("/api/ratings/:id", get(get_rating))
        .route("/api/games", get(get_recent_games).post(record_game))
        .route("/api/history", get(get_rating_history))
        .route("/api/compare/:first_id/:second_id", get(get_head_to_head))
        .route("/api/reset", post(reset_ledger))
        .route("/health", get(health))
        .with_state(state)
}
