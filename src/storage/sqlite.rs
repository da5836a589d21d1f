use std::collections::HashMap;

use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, params};

use super::LedgerStore;
use crate::ledger::{CompetitorRecord, GameRecord, LedgerState, RatingHistoryEntry};
use crate::rating::{CompetitorId, Outcome};

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// Durable ledger store backed by SQLite. Snapshots are written inside a
/// single transaction, so a reader never observes a half-applied update.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open(path: &str) -> Result<Self> {
        Self::from_manager(SqliteConnectionManager::file(path))
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_manager(SqliteConnectionManager::memory())
    }

    fn from_manager(manager: SqliteConnectionManager) -> Result<Self> {
        // An in-memory database lives exactly as long as its connection.
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(manager)
            .context("Failed to create database connection pool")?;

        let store = Self { pool };
        store.init_schema()?;
        Ok(store)
    }

    fn connection(&self) -> Result<DbConn> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.connection()?;
        let schema_sql = include_str!("schema.sql");

        for (idx, statement) in split_sql_statements(schema_sql).iter().enumerate() {
            conn.execute(statement, [])
                .with_context(|| format!("Failed to execute schema statement {}", idx + 1))?;
        }
        Ok(())
    }
}

impl LedgerStore for SqliteStore {
    fn load(&self) -> Result<Option<LedgerState>> {
        let conn = self.connection()?;
        let competitors = load_competitors(&conn)?;
        let games = load_games(&conn)?;
        let history = load_history(&conn)?;

        if competitors.is_empty() && games.is_empty() && history.is_empty() {
            return Ok(None);
        }

        Ok(Some(LedgerState {
            competitors,
            games: games.into(),
            history: history.into(),
        }))
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let mut conn = self.connection()?;
        let tx = conn
            .transaction()
            .context("Failed to begin snapshot transaction")?;

        replace_competitors(&tx, &state.competitors)?;
        replace_games(&tx, state.games.iter())?;
        replace_history(&tx, state.history.iter())?;

        tx.commit().context("Failed to commit ledger snapshot")
    }
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn load_competitors(conn: &Connection) -> Result<HashMap<CompetitorId, CompetitorRecord>> {
    let sql = "SELECT id, rating, games_played, wins, losses, draws FROM competitors";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_competitor_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load competitors")?;

    Ok(rows.into_iter().map(|r| (r.id.clone(), r)).collect())
}

fn parse_competitor_row(row: &rusqlite::Row) -> rusqlite::Result<CompetitorRecord> {
    Ok(CompetitorRecord {
        id: row.get(0)?,
        rating: row.get(1)?,
        games_played: row.get(2)?,
        wins: row.get(3)?,
        losses: row.get(4)?,
        draws: row.get(5)?,
    })
}

fn load_games(conn: &Connection) -> Result<Vec<GameRecord>> {
    let sql = "SELECT id, first_id, second_id, outcome, timestamp, first_rating_before, first_rating_after, second_rating_before, second_rating_after, rating_change FROM games ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load game log")?;

    Ok(rows)
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<GameRecord> {
    Ok(GameRecord {
        id: row.get(0)?,
        first_id: row.get(1)?,
        second_id: row.get(2)?,
        outcome: parse_outcome_column(row, 3)?,
        timestamp: row.get(4)?,
        first_rating_before: row.get(5)?,
        first_rating_after: row.get(6)?,
        second_rating_before: row.get(7)?,
        second_rating_after: row.get(8)?,
        rating_change: row.get(9)?,
    })
}

fn parse_outcome_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Outcome> {
    let tag: String = row.get(idx)?;
    Outcome::parse(&tag).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unknown outcome tag: {tag}").into(),
        )
    })
}

fn load_history(conn: &Connection) -> Result<Vec<RatingHistoryEntry>> {
    let sql = "SELECT competitor_id, opponent_id, rating_before, rating, timestamp, game_id FROM rating_history ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_history_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load rating history")?;

    Ok(rows)
}

fn parse_history_row(row: &rusqlite::Row) -> rusqlite::Result<RatingHistoryEntry> {
    Ok(RatingHistoryEntry {
        competitor_id: row.get(0)?,
        opponent_id: row.get(1)?,
        rating_before: row.get(2)?,
        rating: row.get(3)?,
        timestamp: row.get(4)?,
        game_id: row.get(5)?,
    })
}

fn replace_competitors(
    conn: &Connection,
    competitors: &HashMap<CompetitorId, CompetitorRecord>,
) -> Result<()> {
    conn.execute("DELETE FROM competitors", [])
        .context("Failed to clear competitors")?;

    let sql = "INSERT INTO competitors (id, rating, games_played, wins, losses, draws) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
    let mut stmt = conn.prepare(sql)?;
    for record in competitors.values() {
        stmt.execute(params![
            record.id,
            record.rating,
            record.games_played,
            record.wins,
            record.losses,
            record.draws
        ])
        .context("Failed to insert competitor")?;
    }

    Ok(())
}

fn replace_games<'a>(
    conn: &Connection,
    games: impl Iterator<Item = &'a GameRecord>,
) -> Result<()> {
    conn.execute("DELETE FROM games", [])
        .context("Failed to clear game log")?;

    let sql = "INSERT INTO games (position, id, first_id, second_id, outcome, timestamp, first_rating_before, first_rating_after, second_rating_before, second_rating_after, rating_change) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
    let mut stmt = conn.prepare(sql)?;
    for (position, game) in games.enumerate() {
        stmt.execute(params![
            position as i64,
            game.id,
            game.first_id,
            game.second_id,
            game.outcome.as_str(),
            game.timestamp,
            game.first_rating_before,
            game.first_rating_after,
            game.second_rating_before,
            game.second_rating_after,
            game.rating_change
        ])
        .context("Failed to insert game")?;
    }

    Ok(())
}

fn replace_history<'a>(
    conn: &Connection,
    history: impl Iterator<Item = &'a RatingHistoryEntry>,
) -> Result<()> {
    conn.execute("DELETE FROM rating_history", [])
        .context("Failed to clear rating history")?;

    let sql = "INSERT INTO rating_history (position, competitor_id, opponent_id, rating_before, rating, timestamp, game_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
    let mut stmt = conn.prepare(sql)?;
    for (position, entry) in history.enumerate() {
        stmt.execute(params![
            position as i64,
            entry.competitor_id,
            entry.opponent_id,
            entry.rating_before,
            entry.rating,
            entry.timestamp,
            entry.game_id
        ])
        .context("Failed to insert rating history entry")?;
    }

    Ok(())
}
