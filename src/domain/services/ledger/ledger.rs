//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The balance ledger owns every account's gold and rial balances and is the only path
// through which they move. A reservation is an immediate debit: reserved funds are not
// tracked separately from spendable funds, so whatever part of a reservation goes unused
// must be explicitly credited back (cancellation refund).
//
// | Name          | Description                                        | Key Methods          |
// |---------------|----------------------------------------------------|----------------------|
// | BalanceLedger | Account registry and sole balance mutation path    | open_account         |
// |               |                                                    | reserve              |
// |               |                                                    | credit               |
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::domain::models::types::{Account, BalanceError, Denomination};

use super::LedgerError;

/// Registry of trading accounts and the sole mutation path for their balances.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    accounts: HashMap<Uuid, Account>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an account with the given starting balances and returns it.
    pub fn open_account(&mut self, gold_balance: u64, rial_balance: u64) -> Account {
        let account = Account::new(Uuid::new_v4(), gold_balance, rial_balance);
        debug!(account_id = %account.id, gold_balance, rial_balance, "account opened");
        self.accounts.insert(account.id, account);
        account
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account exists with the given id.
    pub fn account(&self, account_id: Uuid) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    /// Reserves `amount` of the account's balance in `denomination` by debiting it.
    ///
    /// Fails without any mutation when the balance cannot cover the amount; the caller
    /// is responsible for crediting back whatever part of the reservation goes unused.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the account id is unknown
    /// * `InsufficientBalance` - the balance is short of `amount`
    pub fn reserve(
        &mut self,
        account_id: Uuid,
        denomination: Denomination,
        amount: u64,
    ) -> Result<u64, LedgerError> {
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let balance = account
            .debit(denomination, amount)
            .map_err(|err| Self::map_balance_error(account_id, err))?;
        debug!(%account_id, ?denomination, amount, balance, "balance reserved");
        Ok(balance)
    }

    /// Unconditionally credits `amount` to the account's balance in `denomination`.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the account id is unknown
    /// * `BalanceOverflow` - the credit would overflow the stored balance
    pub fn credit(
        &mut self,
        account_id: Uuid,
        denomination: Denomination,
        amount: u64,
    ) -> Result<u64, LedgerError> {
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let balance = account
            .credit(denomination, amount)
            .map_err(|err| Self::map_balance_error(account_id, err))?;
        debug!(%account_id, ?denomination, amount, balance, "balance credited");
        Ok(balance)
    }

    fn map_balance_error(account_id: Uuid, err: BalanceError) -> LedgerError {
        match err {
            BalanceError::Insufficient { needed, available } => LedgerError::InsufficientBalance {
                account: account_id,
                needed,
                available,
            },
            BalanceError::Overflow => LedgerError::BalanceOverflow(account_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_account_and_lookup() {
        let mut ledger = BalanceLedger::new();
        let account = ledger.open_account(15_000, 100_000_000);

        let found = ledger.account(account.id).unwrap();
        assert_eq!(found.gold_balance(), 15_000);
        assert_eq!(found.rial_balance(), 100_000_000);
    }

    #[test]
    fn test_unknown_account() {
        let ledger = BalanceLedger::new();
        let id = Uuid::new_v4();
        assert_eq!(
            ledger.account(id).unwrap_err(),
            LedgerError::AccountNotFound(id)
        );
    }

    #[test]
    fn test_reserve_debits_immediately() {
        let mut ledger = BalanceLedger::new();
        let account = ledger.open_account(0, 500_000_000);

        let balance = ledger
            .reserve(account.id, Denomination::Rial, 200_000_000)
            .unwrap();
        assert_eq!(balance, 300_000_000);
        assert_eq!(ledger.account(account.id).unwrap().rial_balance(), 300_000_000);
    }

    #[test]
    fn test_reserve_insufficient_is_rejected_without_mutation() {
        let mut ledger = BalanceLedger::new();
        let account = ledger.open_account(0, 100);

        let err = ledger
            .reserve(account.id, Denomination::Rial, 1_000)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                account: account.id,
                needed: 1_000,
                available: 100
            }
        );
        assert_eq!(ledger.account(account.id).unwrap().rial_balance(), 100);
    }

    #[test]
    fn test_credit() {
        let mut ledger = BalanceLedger::new();
        let account = ledger.open_account(1_000, 0);

        let balance = ledger.credit(account.id, Denomination::Gold, 2_500).unwrap();
        assert_eq!(balance, 3_500);
    }

    #[test]
    fn test_reserve_then_refund_round_trip() {
        let mut ledger = BalanceLedger::new();
        let account = ledger.open_account(10_000, 0);

        ledger.reserve(account.id, Denomination::Gold, 10_000).unwrap();
        assert_eq!(ledger.account(account.id).unwrap().gold_balance(), 0);

        ledger.credit(account.id, Denomination::Gold, 10_000).unwrap();
        assert_eq!(ledger.account(account.id).unwrap().gold_balance(), 10_000);
    }
}
