//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Append-only log of executed trades with the recency-ordered query shapes the history
// surface needs. Trades are immutable once recorded.
//--------------------------------------------------------------------------------------------------

use uuid::Uuid;

use crate::domain::models::types::Trade;

/// Append-only record of every executed trade, in execution order.
#[derive(Debug, Default)]
pub struct TradeLog {
    trades: Vec<Trade>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trade to the log.
    pub fn record(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Trades in which the account was buyer or seller, most recent first.
    pub fn account_trades(&self, account_id: Uuid) -> Vec<Trade> {
        self.trades
            .iter()
            .rev()
            .filter(|t| t.buyer_id == account_id || t.seller_id == account_id)
            .cloned()
            .collect()
    }

    /// Every trade, most recent first.
    pub fn all_trades(&self) -> Vec<Trade> {
        self.trades.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
