use std::sync::Mutex;

use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use crate::ledger::RatingLedger;

pub mod games;
pub mod ratings;

pub struct AppState {
    pub ledger: Mutex<RatingLedger>,
}

#[derive(Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}
