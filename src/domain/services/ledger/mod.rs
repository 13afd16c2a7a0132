use thiserror::Error;
use uuid::Uuid;

pub mod ledger;

pub use self::ledger::BalanceLedger;

/// Errors that can occur within the balance ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No account exists with the given id
    #[error("Account {0} not found")]
    AccountNotFound(Uuid),

    /// The account's balance cannot cover the requested reservation
    #[error("Insufficient balance for account {account}: needed {needed}, available {available}")]
    InsufficientBalance {
        account: Uuid,
        needed: u64,
        available: u64,
    },

    /// A credit would overflow the stored balance
    #[error("Balance overflow for account {0}")]
    BalanceOverflow(Uuid),
}
