//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the order store for the single gold/rial pair. It keeps every
// order ever accepted (orders are closed, never deleted) together with price-time priority
// indexes over the Active subset of each side.
//
// | Component      | Description                                                              |
// |----------------|--------------------------------------------------------------------------|
// | OrderBookStore | Order registry plus per-side BTreeMap price levels                       |
// | FIFO Queue     | Orders within each price level are queued first-in-first-out             |
//
//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name              | Description                                      | Return Type           |
// |-------------------|--------------------------------------------------|-----------------------|
// | insert            | Accepts a new Active order                       | Result<(), BookError> |
// | order             | Looks up an order by id                          | Option<&Order>        |
// | crossing_orders   | Active orders of a side crossing a limit price   | Vec<Uuid>             |
// | update_remaining  | Sets remaining quantity, closing at zero         | Result<Order, ...>    |
// | cancel            | Active -> Cancelled transition                   | Result<Order, ...>    |
// | active_orders     | Active orders of a side in priority order        | Vec<Order>            |
// | account_orders    | An account's orders, most recent first           | Vec<Order>            |
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, HashMap, VecDeque};

use uuid::Uuid;

use crate::domain::models::types::{Order, OrderStatus, Side};

use super::BookError;

/// Order store for the gold/rial pair, maintaining price-time priority over Active orders.
///
/// Buy orders are ranked best-price-first by descending price, sell orders by ascending
/// price; within one price level orders queue in arrival order. Terminal orders stay in
/// the registry for the history surface but leave the price indexes.
#[derive(Debug, Default)]
pub struct OrderBookStore {
    /// Every order ever accepted, keyed by id.
    orders: HashMap<Uuid, Order>,
    /// Active buy order ids per price level, FIFO within a level.
    buys: BTreeMap<u64, VecDeque<Uuid>>,
    /// Active sell order ids per price level, FIFO within a level.
    sells: BTreeMap<u64, VecDeque<Uuid>>,
    /// Order ids per account in acceptance order.
    by_account: HashMap<Uuid, Vec<Uuid>>,
}

impl OrderBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a new order into the store and indexes it as Active.
    ///
    /// # Errors
    ///
    /// * `DuplicateOrder` - an order with this id is already stored
    /// * `OrderClosed` - the order is not Active
    pub fn insert(&mut self, order: Order) -> Result<(), BookError> {
        if self.orders.contains_key(&order.id) {
            return Err(BookError::DuplicateOrder(order.id));
        }
        if !order.is_active() {
            return Err(BookError::OrderClosed {
                id: order.id,
                status: order.status,
            });
        }

        self.level_queue(order.side, order.price_per_gram)
            .push_back(order.id);
        self.by_account
            .entry(order.account_id)
            .or_default()
            .push(order.id);
        self.orders.insert(order.id, order);
        Ok(())
    }

    /// Looks up an order by id.
    #[inline]
    pub fn order(&self, order_id: Uuid) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Returns the ids of Active orders on `side` whose limit price crosses `limit_price`,
    /// in matching priority order.
    ///
    /// Crossing means a resting sell at price q matches a buy limit p when q <= p, and a
    /// resting buy at price q matches a sell limit p when q >= p. Results are ordered by
    /// best price for that side first (descending for buys, ascending for sells), then
    /// first-in-first-out within a price level.
    pub fn crossing_orders(&self, side: Side, limit_price: u64) -> Vec<Uuid> {
        let mut result = Vec::new();
        match side {
            Side::Buy => {
                // Resting buys at or above the taker's limit, highest price first
                for (_, queue) in self.buys.range(limit_price..).rev() {
                    result.extend(queue.iter().copied());
                }
            }
            Side::Sell => {
                // Resting sells at or below the taker's limit, lowest price first
                for (_, queue) in self.sells.range(..=limit_price) {
                    result.extend(queue.iter().copied());
                }
            }
        }
        result
    }

    /// Sets an order's remaining quantity, returning the post-mutation snapshot.
    ///
    /// A new remaining of zero completes the order and removes it from the price index;
    /// callers therefore never need to re-read the order after a mutation.
    ///
    /// # Errors
    ///
    /// * `OrderNotFound` - the order id is unknown
    /// * `OrderClosed` - the order already reached a terminal status
    pub fn update_remaining(
        &mut self,
        order_id: Uuid,
        new_remaining: u64,
    ) -> Result<Order, BookError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(BookError::OrderNotFound(order_id))?;
        if !order.is_active() {
            return Err(BookError::OrderClosed {
                id: order_id,
                status: order.status,
            });
        }

        order.remaining = new_remaining;
        if order.remaining == 0 {
            order.status = OrderStatus::Completed;
        }
        let snapshot = order.clone();

        if !snapshot.is_active() {
            self.remove_from_level(snapshot.side, snapshot.price_per_gram, order_id);
        }
        Ok(snapshot)
    }

    /// Cancels an Active order, returning the post-mutation snapshot.
    ///
    /// Cancelling an order that already reached a terminal status is a no-op that
    /// returns the stored order unchanged.
    ///
    /// # Errors
    ///
    /// * `OrderNotFound` - the order id is unknown
    pub fn cancel(&mut self, order_id: Uuid) -> Result<Order, BookError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(BookError::OrderNotFound(order_id))?;
        if !order.is_active() {
            return Ok(order.clone());
        }

        order.status = OrderStatus::Cancelled;
        let snapshot = order.clone();
        self.remove_from_level(snapshot.side, snapshot.price_per_gram, order_id);
        Ok(snapshot)
    }

    /// Returns all Active orders of `side` in matching priority order.
    pub fn active_orders(&self, side: Side) -> Vec<Order> {
        let levels = match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        };
        let ids: Vec<Uuid> = match side {
            // Buy side ranks best (highest) price first
            Side::Buy => levels
                .iter()
                .rev()
                .flat_map(|(_, queue)| queue.iter().copied())
                .collect(),
            Side::Sell => levels
                .iter()
                .flat_map(|(_, queue)| queue.iter().copied())
                .collect(),
        };
        ids.into_iter()
            .filter_map(|id| self.orders.get(&id).cloned())
            .collect()
    }

    /// Returns all of an account's orders, most recently accepted first.
    pub fn account_orders(&self, account_id: Uuid) -> Vec<Order> {
        self.by_account
            .get(&account_id)
            .map(|ids| {
                ids.iter()
                    .rev()
                    .filter_map(|id| self.orders.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of orders ever accepted.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    fn level_queue(&mut self, side: Side, price: u64) -> &mut VecDeque<Uuid> {
        let levels = match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        };
        levels.entry(price).or_default()
    }

    /// Drops an order id from its price level, clearing the level once empty.
    fn remove_from_level(&mut self, side: Side, price: u64, order_id: Uuid) {
        let levels = match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        };
        if let Some(queue) = levels.get_mut(&price) {
            queue.retain(|id| *id != order_id);
            if queue.is_empty() {
                levels.remove(&price);
            }
        }
    }
}
