use thiserror::Error;

/// Failures surfaced by ledger operations. Invalid input is rejected
/// before any state is touched.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("competitor identifier must not be empty")]
    EmptyCompetitorId,

    #[error("competitor {0:?} cannot play itself")]
    SelfPlay(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            LedgerError::EmptyCompetitorId | LedgerError::SelfPlay(_)
        )
    }
}
