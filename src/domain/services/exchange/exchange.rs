//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The exchange is the order lifecycle manager and the concurrency boundary of the core.
// Placement (reserve counter-value, create order, run matching) and cancellation (validate
// ownership and state, refund the unused reservation, close the order) each execute as one
// atomic unit under a single global lock over the shared ledger/book/log state.
//
// | Name          | Description                                        | Key Methods          |
// |---------------|----------------------------------------------------|----------------------|
// | Exchange      | Order lifecycle manager over the locked state      | place_order          |
// |               |                                                    | cancel_order         |
// |               |                                                    | open_account         |
// | Placement     | Outcome of a placement: order + its trades         |                      |
//--------------------------------------------------------------------------------------------------

use parking_lot::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::domain::models::types::{Account, Denomination, Order, Side, Trade};
use crate::domain::models::units::notional;
use crate::domain::services::ledger::BalanceLedger;
use crate::domain::services::matching_engine::MatchingEngine;
use crate::domain::services::orderbook::OrderBookStore;
use crate::domain::services::trades::TradeLog;

use super::ExchangeError;

/// Policy for an order that would cross a resting order of the same account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfTradePolicy {
    /// Let the two orders of the one account trade with each other.
    #[default]
    Allow,
    /// Reject the incoming order before any funds move.
    Reject,
}

impl std::str::FromStr for SelfTradePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown self-trade policy: {other}")),
        }
    }
}

/// Outcome of a successful placement: the post-matching order snapshot and the trades the
/// placement produced, in execution order.
#[derive(Debug, Clone)]
pub struct Placement {
    pub order: Order,
    pub trades: Vec<Trade>,
}

/// The shared mutable state of the venue. Everything a placement or cancellation touches
/// lives behind one lock so each operation is serializable against all others.
#[derive(Debug, Default)]
struct ExchangeState {
    ledger: BalanceLedger,
    book: OrderBookStore,
    trades: TradeLog,
    next_sequence: u64,
}

/// Order lifecycle manager for the gold/rial venue.
///
/// All entry points take `&self`; internal state sits behind a global mutex, which is the
/// whole concurrency story: two placements that could contend for the same resting order
/// are serialized, so a resting order's remaining quantity is always read and decremented
/// without an intervening conflicting write.
#[derive(Debug, Default)]
pub struct Exchange {
    state: Mutex<ExchangeState>,
    engine: MatchingEngine,
    self_trade_policy: SelfTradePolicy,
}

impl Exchange {
    /// Creates an exchange with the given matching engine and self-trade policy.
    pub fn new(engine: MatchingEngine, self_trade_policy: SelfTradePolicy) -> Self {
        Self {
            state: Mutex::new(ExchangeState::default()),
            engine,
            self_trade_policy,
        }
    }

    /// Opens a trading account with the given starting balances.
    pub fn open_account(&self, gold_balance: u64, rial_balance: u64) -> Account {
        self.state.lock().ledger.open_account(gold_balance, rial_balance)
    }

    /// Looks up an account's current balances.
    pub fn account(&self, account_id: Uuid) -> Result<Account, ExchangeError> {
        Ok(*self.state.lock().ledger.account(account_id)?)
    }

    /// Places a limit order and matches it against the book.
    ///
    /// Reserves the order's counter-value up front (a buy locks rial for the full
    /// quantity at its own limit; a sell locks the gold itself), accepts the order as
    /// Active, and runs the matching engine. The reservation failing means the order is
    /// never created.
    ///
    /// # Arguments
    ///
    /// * `account_id` - the placing account
    /// * `side` - Buy or Sell
    /// * `quantity_mg` - order quantity in milligrams, strictly positive
    /// * `price_per_gram` - limit price in rials per gram, strictly positive
    ///
    /// # Errors
    ///
    /// * `InvalidQuantity` / `InvalidPrice` - non-positive inputs
    /// * `AccountNotFound` - unknown account
    /// * `SelfTradeRejected` - under the `Reject` policy, the order would cross one of
    ///   the account's own resting orders
    /// * `InsufficientBalance` - the account cannot cover the reservation
    pub fn place_order(
        &self,
        account_id: Uuid,
        side: Side,
        quantity_mg: u64,
        price_per_gram: u64,
    ) -> Result<Placement, ExchangeError> {
        if quantity_mg == 0 {
            return Err(ExchangeError::InvalidQuantity);
        }
        if price_per_gram == 0 {
            return Err(ExchangeError::InvalidPrice);
        }

        let mut state = self.state.lock();
        state.ledger.account(account_id)?;

        // The self-trade check runs before any funds move, so a rejection is a clean
        // no-op rather than a half-applied placement.
        if self.self_trade_policy == SelfTradePolicy::Reject {
            let crossing = state.book.crossing_orders(side.opposite(), price_per_gram);
            let crosses_own = crossing
                .iter()
                .filter_map(|id| state.book.order(*id))
                .any(|order| order.account_id == account_id);
            if crosses_own {
                return Err(ExchangeError::SelfTradeRejected(account_id));
            }
        }

        let (denomination, reservation) = match side {
            Side::Buy => (Denomination::Rial, notional(quantity_mg, price_per_gram)),
            Side::Sell => (Denomination::Gold, quantity_mg),
        };
        state.ledger.reserve(account_id, denomination, reservation)?;

        state.next_sequence += 1;
        let order = Order::new(account_id, side, quantity_mg, price_per_gram, state.next_sequence);
        let order_id = order.id;
        state.book.insert(order)?;

        let ExchangeState {
            ledger,
            book,
            trades: log,
            ..
        } = &mut *state;
        let trades = self.engine.run(book, ledger, log, order_id)?;

        let order = book
            .order(order_id)
            .cloned()
            .ok_or_else(|| ExchangeError::Internal(format!("placed order {order_id} missing")))?;

        info!(
            order_id = %order.id,
            %account_id,
            ?side,
            quantity_mg,
            price_per_gram,
            reservation,
            trades = trades.len(),
            status = ?order.status,
            "order placed"
        );
        Ok(Placement { order, trades })
    }

    /// Cancels a resting order on behalf of its owner.
    ///
    /// Refunds exactly the unused reservation: the remaining quantity priced at the
    /// order's own limit for a buy, the remaining gold itself for a sell. The order's
    /// remaining quantity is frozen from this point on.
    ///
    /// # Errors
    ///
    /// * `OrderNotFound` - unknown order id
    /// * `NotOwner` - the requesting account did not place the order
    /// * `InvalidState` - the order already completed or was already cancelled
    pub fn cancel_order(
        &self,
        order_id: Uuid,
        requesting_account: Uuid,
    ) -> Result<Order, ExchangeError> {
        let mut state = self.state.lock();

        let order = state
            .book
            .order(order_id)
            .cloned()
            .ok_or(ExchangeError::OrderNotFound(order_id))?;
        if order.account_id != requesting_account {
            return Err(ExchangeError::NotOwner {
                order: order_id,
                account: requesting_account,
            });
        }
        if !order.is_active() {
            return Err(ExchangeError::InvalidState {
                id: order_id,
                status: order.status,
            });
        }

        let (denomination, refund) = match order.side {
            Side::Buy => (Denomination::Rial, order.remaining_notional()),
            Side::Sell => (Denomination::Gold, order.remaining),
        };
        state.ledger.credit(order.account_id, denomination, refund)?;

        let cancelled = state.book.cancel(order_id)?;

        info!(
            order_id = %order_id,
            account_id = %requesting_account,
            refund,
            ?denomination,
            "order cancelled"
        );
        Ok(cancelled)
    }

    /// Active orders of one side in matching priority order.
    pub fn active_orders(&self, side: Side) -> Vec<Order> {
        self.state.lock().book.active_orders(side)
    }

    /// All orders ever placed by an account, most recent first.
    pub fn account_orders(&self, account_id: Uuid) -> Vec<Order> {
        self.state.lock().book.account_orders(account_id)
    }

    /// Trades in which the account was buyer or seller, most recent first.
    pub fn account_trades(&self, account_id: Uuid) -> Vec<Trade> {
        self.state.lock().trades.account_trades(account_id)
    }

    /// Every trade on the venue, most recent first.
    pub fn all_trades(&self) -> Vec<Trade> {
        self.state.lock().trades.all_trades()
    }
}
