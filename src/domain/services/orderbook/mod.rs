use thiserror::Error;
use uuid::Uuid;

pub mod orderbook;

pub use self::orderbook::OrderBookStore;

use crate::domain::models::types::OrderStatus;

/// Errors that can occur within the order book store.
///
/// This enum represents the error conditions that can arise while inserting,
/// mutating, or querying orders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Order not found in the store
    #[error("Order {0} not found")]
    OrderNotFound(Uuid),

    /// An order with this id is already stored
    #[error("Order {0} already exists")]
    DuplicateOrder(Uuid),

    /// The order has reached a terminal status and can no longer be mutated
    #[error("Order {id} is closed with status {status:?}")]
    OrderClosed { id: Uuid, status: OrderStatus },
}
