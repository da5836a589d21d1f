pub mod seeding;
pub mod server;

use anyhow::Result;

use crate::config::settings::AppConfig;
use crate::ledger::RatingLedger;
use crate::storage::SqliteStore;

/// Opens the ledger over the SQLite store at `DATABASE_PATH`.
pub fn open_ledger(config: &AppConfig) -> Result<RatingLedger> {
    let db_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "ai_arena_ratings.db".to_string());

    let store = SqliteStore::open(&db_path)?;
    Ok(RatingLedger::open(Box::new(store), config.rating.clone()))
}
