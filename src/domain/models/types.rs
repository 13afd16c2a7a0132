//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the core data types of the gold exchange: trading accounts, limit
// orders and executed trades, plus the enums describing order sides and lifecycle states.
//
// | Section            | Description                                                      |
// |--------------------|------------------------------------------------------------------|
// | ENUMS              | Side, OrderStatus, Denomination                                  |
// | STRUCTS            | Account, Order, Trade                                            |
// | TESTS              | Unit tests for the defined types                                 |
//--------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::units::notional;

/// Represents the side of an order (Buy or Sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// An order to buy gold against rial.
    Buy,
    /// An order to sell gold for rial.
    Sell,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::str::FromStr for Side {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(TypeError::InvalidSide(other.to_string())),
        }
    }
}

/// Represents the lifecycle status of an order.
///
/// `Completed` and `Cancelled` are terminal: once an order reaches either state its
/// remaining quantity is frozen and it never re-enters the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// The order rests in the book and may still be matched or cancelled.
    Active,
    /// The order has been matched down to zero remaining quantity.
    Completed,
    /// The order was cancelled before being fully matched.
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// The two balances every account carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// Gold by weight, in integer milligrams.
    Gold,
    /// Rial, in integer minor units.
    Rial,
}

/// Errors that can occur during type validation or conversion within this module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Occurs when attempting to create a `Side` from an unrecognized string.
    #[error("Invalid side specified: {0}")]
    InvalidSide(String),
}

/// Errors raised by account balance mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    /// The balance in the requested denomination cannot cover the amount.
    #[error("Insufficient balance: needed {needed}, available {available}")]
    Insufficient { needed: u64, available: u64 },

    /// The credit would overflow the stored balance.
    #[error("Balance overflow")]
    Overflow,
}

/// A trading account holding a gold balance and a rial balance.
///
/// Balances are private and only move through `credit` and `debit`, both of which use
/// checked arithmetic. Unsigned storage makes negative balances unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account.
    pub id: Uuid,
    gold_balance: u64,
    rial_balance: u64,
}

impl Account {
    /// Creates an account with the given opening balances.
    pub fn new(id: Uuid, gold_balance: u64, rial_balance: u64) -> Self {
        Self {
            id,
            gold_balance,
            rial_balance,
        }
    }

    /// Gold balance in milligrams.
    #[inline]
    pub fn gold_balance(&self) -> u64 {
        self.gold_balance
    }

    /// Rial balance in minor units.
    #[inline]
    pub fn rial_balance(&self) -> u64 {
        self.rial_balance
    }

    /// Balance in the given denomination.
    #[inline]
    pub fn balance(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Gold => self.gold_balance,
            Denomination::Rial => self.rial_balance,
        }
    }

    /// Increments the balance in `denomination`, returning the new balance.
    pub(crate) fn credit(
        &mut self,
        denomination: Denomination,
        amount: u64,
    ) -> Result<u64, BalanceError> {
        let slot = match denomination {
            Denomination::Gold => &mut self.gold_balance,
            Denomination::Rial => &mut self.rial_balance,
        };
        *slot = slot.checked_add(amount).ok_or(BalanceError::Overflow)?;
        Ok(*slot)
    }

    /// Decrements the balance in `denomination`, returning the new balance.
    ///
    /// Fails without mutation when the balance cannot cover `amount`.
    pub(crate) fn debit(
        &mut self,
        denomination: Denomination,
        amount: u64,
    ) -> Result<u64, BalanceError> {
        let slot = match denomination {
            Denomination::Gold => &mut self.gold_balance,
            Denomination::Rial => &mut self.rial_balance,
        };
        if *slot < amount {
            return Err(BalanceError::Insufficient {
                needed: amount,
                available: *slot,
            });
        }
        *slot -= amount;
        Ok(*slot)
    }
}

/// A limit order to trade gold against rial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier for the order.
    pub id: Uuid,
    /// Identifier of the account that placed the order.
    pub account_id: Uuid,
    /// Side of the order (Buy or Sell).
    pub side: Side,
    /// Original quantity in milligrams. Strictly positive.
    pub quantity: u64,
    /// Quantity still open to match, in milligrams. Never exceeds `quantity` and only
    /// decreases while the order is Active.
    pub remaining: u64,
    /// Limit price in rials per gram. Strictly positive.
    pub price_per_gram: u64,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Timestamp of order creation.
    pub created_at: DateTime<Utc>,
    /// Monotonic sequence assigned at acceptance; the tie-break for time priority.
    pub sequence: u64,
}

impl Order {
    /// Creates a new Active order with its full quantity open.
    pub fn new(
        account_id: Uuid,
        side: Side,
        quantity: u64,
        price_per_gram: u64,
        sequence: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            side,
            quantity,
            remaining: quantity,
            price_per_gram,
            status: OrderStatus::Active,
            created_at: Utc::now(),
            sequence,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    /// Rial value of the order's remaining quantity at its own limit price.
    #[inline]
    pub fn remaining_notional(&self) -> u64 {
        notional(self.remaining, self.price_per_gram)
    }
}

/// An executed trade between one buy order and one sell order.
///
/// Trades are immutable once recorded; the trade log is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique identifier for the trade.
    pub id: Uuid,
    /// The buy-side order.
    pub buy_order_id: Uuid,
    /// The sell-side order.
    pub sell_order_id: Uuid,
    /// The account that bought gold.
    pub buyer_id: Uuid,
    /// The account that sold gold.
    pub seller_id: Uuid,
    /// Matched quantity in milligrams. Strictly positive.
    pub quantity: u64,
    /// Execution price in rials per gram: the resting order's limit price.
    pub price_per_gram: u64,
    /// Rial value of the match (`quantity` at `price_per_gram`).
    pub total_amount: u64,
    /// Commission withheld from the seller's proceeds, in rials.
    pub commission: u64,
    /// Timestamp of execution.
    pub executed_at: DateTime<Utc>,
}
