pub mod elo;
pub mod types;

pub use elo::{EloExchange, expected_score, rate_pair};
pub use types::{CompetitorId, Outcome, SideResult};
