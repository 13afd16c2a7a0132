use thiserror::Error;
use uuid::Uuid;

pub mod exchange;

pub use self::exchange::{Exchange, Placement, SelfTradePolicy};

use crate::domain::models::types::OrderStatus;
use crate::domain::services::ledger::LedgerError;
use crate::domain::services::matching_engine::MatchingError;
use crate::domain::services::orderbook::BookError;

/// Errors that can occur during order placement and cancellation.
///
/// Every variant except `Internal` is a rejection of the caller's request: the call
/// leaves all state exactly as it was and the caller may retry with adjusted parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// No account exists with the given id
    #[error("Account {0} not found")]
    AccountNotFound(Uuid),

    /// The account's balance cannot cover the order's reservation
    #[error("Insufficient balance for account {account}: needed {needed}, available {available}")]
    InsufficientBalance {
        account: Uuid,
        needed: u64,
        available: u64,
    },

    /// Order quantity must be strictly positive
    #[error("Order quantity must be positive")]
    InvalidQuantity,

    /// Order limit price must be strictly positive
    #[error("Order price must be positive")]
    InvalidPrice,

    /// No order exists with the given id
    #[error("Order {0} not found")]
    OrderNotFound(Uuid),

    /// The requesting account does not own the order
    #[error("Account {account} does not own order {order}")]
    NotOwner { order: Uuid, account: Uuid },

    /// The order is not Active and cannot be cancelled
    #[error("Order {id} cannot be cancelled in status {status:?}")]
    InvalidState { id: Uuid, status: OrderStatus },

    /// The order would cross a resting order of the same account
    #[error("Order for account {0} would cross the account's own resting order")]
    SelfTradeRejected(Uuid),

    /// A defect surfaced mid-operation; nothing the caller can correct
    #[error("Internal exchange error: {0}")]
    Internal(String),
}

impl From<LedgerError> for ExchangeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(id) => Self::AccountNotFound(id),
            LedgerError::InsufficientBalance {
                account,
                needed,
                available,
            } => Self::InsufficientBalance {
                account,
                needed,
                available,
            },
            LedgerError::BalanceOverflow(id) => {
                Self::Internal(format!("balance overflow for account {id}"))
            }
        }
    }
}

impl From<BookError> for ExchangeError {
    fn from(err: BookError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<MatchingError> for ExchangeError {
    fn from(err: MatchingError) -> Self {
        Self::Internal(err.to_string())
    }
}
