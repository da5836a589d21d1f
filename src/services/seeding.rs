use anyhow::{Context, Result};
use log::info;

use crate::config::settings::AppConfig;
use crate::ledger::RatingLedger;
use crate::rating::Outcome;

const CLAUDE_HAIKU: &str = "anthropic_claude_haiku";
const GPT4O_MINI: &str = "openai_gpt4o_mini";
const HUMAN: &str = "human";

/// Fixed outcome schedule replayed by the `seed` command, as
/// (first, second, outcome) triples. Deterministic on purpose.
const DEMO_GAMES: &[(&str, &str, Outcome)] = &[
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::FirstWins),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::SecondWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::SecondWins),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::FirstWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::Draw),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::SecondWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::FirstWins),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::SecondWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::SecondWins),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::FirstWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::FirstWins),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::SecondWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::Draw),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::FirstWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::SecondWins),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::SecondWins),
    (CLAUDE_HAIKU, GPT4O_MINI, Outcome::FirstWins),
    (GPT4O_MINI, CLAUDE_HAIKU, Outcome::FirstWins),
    (HUMAN, CLAUDE_HAIKU, Outcome::SecondWins),
    (HUMAN, GPT4O_MINI, Outcome::Draw),
];

pub struct SeedService {
    config: AppConfig,
}

impl SeedService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        let mut ledger = super::open_ledger(&self.config)?;
        let recorded = seed_demo_games(&mut ledger)?;

        info!("Seeded {recorded} demo games");
        for record in ledger.ratings() {
            info!(
                "  {}: rating {} ({}W-{}L-{}D)",
                record.id, record.rating, record.wins, record.losses, record.draws
            );
        }
        Ok(())
    }
}

/// Replays the demo schedule through `ledger`, returning the number of
/// games recorded.
pub fn seed_demo_games(ledger: &mut RatingLedger) -> Result<usize> {
    for (idx, (first, second, outcome)) in DEMO_GAMES.iter().enumerate() {
        let game = ledger
            .record_outcome(first, second, *outcome)
            .with_context(|| format!("Failed to record demo game {}", idx + 1))?;

        info!(
            "  Game {}: {} vs {} -> {} ({} rating points)",
            idx + 1,
            first,
            second,
            outcome.as_str(),
            game.rating_change
        );
    }

    Ok(DEMO_GAMES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RatingSettings;
    use crate::storage::MemoryStore;

    #[test]
    fn seeding_populates_all_demo_competitors() {
        let mut ledger =
            RatingLedger::open(Box::new(MemoryStore::new()), RatingSettings::default());

        let recorded = seed_demo_games(&mut ledger).unwrap();
        assert_eq!(recorded, DEMO_GAMES.len());

        let ratings = ledger.ratings();
        assert_eq!(ratings.len(), 3);
        let total_games: i32 = ratings.iter().map(|r| r.games_played).sum();
        assert_eq!(total_games as usize, 2 * DEMO_GAMES.len());
        assert_eq!(ledger.recent_games(1000).len(), DEMO_GAMES.len());
    }

    #[test]
    fn seeding_is_deterministic() {
        let mut first =
            RatingLedger::open(Box::new(MemoryStore::new()), RatingSettings::default());
        let mut second =
            RatingLedger::open(Box::new(MemoryStore::new()), RatingSettings::default());

        seed_demo_games(&mut first).unwrap();
        seed_demo_games(&mut second).unwrap();

        assert_eq!(first.ratings(), second.ratings());
    }
}
