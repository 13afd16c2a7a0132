//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the core matching logic: given a freshly accepted order, walk the
// compatible resting orders in price-time priority and execute trades until the new order
// is filled or no compatible resting order remains.
//
// | Component       | Description                                                           |
// |-----------------|-----------------------------------------------------------------------|
// | MatchingEngine  | Walks crossing candidates and executes trades                         |
//
//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name            | Description                                      | Return Type            |
// |-----------------|--------------------------------------------------|------------------------|
// | run             | Matches a new order against the book             | Result<Vec<Trade>, ..> |
// | execute_trade   | Settles one match between two orders             | Result<(Trade, Order)> |
//--------------------------------------------------------------------------------------------------

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::models::types::{Denomination, Order, Side, Trade};
use crate::domain::models::units::notional;
use crate::domain::services::commission::CommissionSchedule;
use crate::domain::services::ledger::BalanceLedger;
use crate::domain::services::orderbook::{BookError, OrderBookStore};
use crate::domain::services::trades::TradeLog;

use super::MatchingError;

/// The matching engine for the gold/rial pair.
///
/// # Price-Time Priority
///
/// Resting orders are consumed in strict price-time priority:
///
/// * Better prices match first (higher resting buys, lower resting sells)
/// * At the same price level, the earlier-accepted order matches first
///
/// # Maker Price
///
/// Every trade executes at the resting order's limit price. The order that was already in
/// the book took the earlier risk and sets the price; a buyer never pays more and a seller
/// never receives less than their own stated limit, because only crossing candidates are
/// considered at all.
///
/// # Settlement
///
/// The counter-value of every order was already debited when the order was placed, so a
/// trade only pays out: the buyer receives the matched gold, the seller receives the
/// notional net of commission. Commission is retained by the house and never credited to
/// either side.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingEngine {
    commission: CommissionSchedule,
}

impl MatchingEngine {
    /// Creates a matching engine charging fees per the given schedule.
    pub fn new(commission: CommissionSchedule) -> Self {
        Self { commission }
    }

    /// Matches the order identified by `taker_id` against the book.
    ///
    /// Walks the crossing resting orders in the store's priority order, executing one
    /// trade per candidate for `min(taker remaining, candidate remaining)`, until the
    /// taker is filled or candidates run out. The taker's own status transition happens
    /// inside the same remaining-quantity mutation that empties it; there is no separate
    /// finalize step.
    ///
    /// # Arguments
    ///
    /// * `book` - the order store holding the taker and all resting orders
    /// * `ledger` - the balance ledger receiving the settlement credits
    /// * `log` - the append-only trade log
    /// * `taker_id` - id of the freshly accepted Active order
    ///
    /// # Returns
    ///
    /// The trades executed for this order, in execution order (possibly empty).
    pub fn run(
        &self,
        book: &mut OrderBookStore,
        ledger: &mut BalanceLedger,
        log: &mut TradeLog,
        taker_id: Uuid,
    ) -> Result<Vec<Trade>, MatchingError> {
        let mut taker = book
            .order(taker_id)
            .ok_or(BookError::OrderNotFound(taker_id))?
            .clone();

        let candidates = book.crossing_orders(taker.side.opposite(), taker.price_per_gram);

        let mut trades = Vec::new();
        for resting_id in candidates {
            if taker.remaining == 0 {
                break;
            }

            let resting = book
                .order(resting_id)
                .ok_or(BookError::OrderNotFound(resting_id))?
                .clone();

            let trade_qty = taker.remaining.min(resting.remaining);
            if trade_qty == 0 {
                // Stale index entry; nothing to match here
                continue;
            }

            let (trade, taker_after) =
                self.execute_trade(book, ledger, log, &resting, &taker, trade_qty)?;
            taker = taker_after;
            trades.push(trade);
        }

        Ok(trades)
    }

    /// Settles one match of `trade_qty` milligrams between a resting order and the taker.
    ///
    /// Which side buys and which sells is determined by the orders themselves, independent
    /// of which one is resting. The execution price is the resting order's limit price.
    /// Settlement appends the trade record, credits the buyer's gold and the seller's rial
    /// net of commission, and decrements both orders' remaining quantities; the mutation
    /// that empties an order also completes it.
    ///
    /// Both post-mutation order snapshots come back from the store, and the taker's one is
    /// returned so the matching loop never re-reads the order it is filling.
    fn execute_trade(
        &self,
        book: &mut OrderBookStore,
        ledger: &mut BalanceLedger,
        log: &mut TradeLog,
        resting: &Order,
        taker: &Order,
        trade_qty: u64,
    ) -> Result<(Trade, Order), MatchingError> {
        let (buy_order, sell_order) = match resting.side {
            Side::Buy => (resting, taker),
            Side::Sell => (taker, resting),
        };

        let execution_price = resting.price_per_gram;
        let total_amount = notional(trade_qty, execution_price);
        let commission = self.commission.commission(trade_qty, total_amount);

        let trade = Trade {
            id: Uuid::new_v4(),
            buy_order_id: buy_order.id,
            sell_order_id: sell_order.id,
            buyer_id: buy_order.account_id,
            seller_id: sell_order.account_id,
            quantity: trade_qty,
            price_per_gram: execution_price,
            total_amount,
            commission,
            executed_at: Utc::now(),
        };
        log.record(trade.clone());

        ledger.credit(trade.buyer_id, Denomination::Gold, trade_qty)?;
        ledger.credit(trade.seller_id, Denomination::Rial, total_amount - commission)?;

        let buy_after = book.update_remaining(buy_order.id, buy_order.remaining - trade_qty)?;
        let sell_after = book.update_remaining(sell_order.id, sell_order.remaining - trade_qty)?;

        info!(
            trade_id = %trade.id,
            quantity_mg = trade_qty,
            price_per_gram = execution_price,
            total_amount,
            commission,
            "trade executed"
        );

        let taker_after = if taker.id == buy_after.id {
            buy_after
        } else {
            sell_after
        };
        Ok((trade, taker_after))
    }
}
