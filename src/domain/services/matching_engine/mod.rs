use thiserror::Error;

pub mod matching_engine;

pub use self::matching_engine::MatchingEngine;

use crate::domain::services::ledger::LedgerError;
use crate::domain::services::orderbook::BookError;

/// Errors that can occur during the matching process.
///
/// Under the single atomic unit that wraps every placement these can only arise from a
/// logic defect (an indexed order vanishing mid-run, a balance overflowing); they are
/// propagated rather than swallowed so the placement fails loudly instead of recording
/// a half-applied trade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchingError {
    /// Order store error occurred
    #[error("Order store error: {0}")]
    Book(#[from] BookError),

    /// Ledger error occurred
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
