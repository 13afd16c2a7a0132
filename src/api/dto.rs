//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                 | Description                               | Key Methods         |
// |----------------------|-------------------------------------------|---------------------|
// | OpenAccountRequest   | Request to open a trading account         |                     |
// | AccountResponse      | Account balances                          | from                |
// | PlaceOrderRequest    | Request to place a limit order            | quantity_mg         |
// | CancelOrderRequest   | Request to cancel an order                |                     |
// | OrderResponse        | Order with full details                   | from                |
// | TradeResponse        | Executed trade                            | from                |
// | PlacementResponse    | Placed order plus the trades it produced  | from                |
//--------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::types::{Account, Order, OrderStatus, Side, Trade};
use crate::domain::models::units::{grams_to_milligrams, milligrams_to_grams};
use crate::domain::services::exchange::Placement;

use super::error::ApiError;

/// Request to open a trading account with starting balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccountRequest {
    /// Starting gold balance in grams (up to 3 decimal places)
    #[serde(default)]
    pub gold_balance: Decimal,
    /// Starting rial balance in minor units
    #[serde(default)]
    pub rial_balance: u64,
}

impl OpenAccountRequest {
    /// Converts the gold balance to milligrams, rejecting sub-milligram precision.
    pub fn gold_balance_mg(&self) -> Result<u64, ApiError> {
        grams_to_milligrams(self.gold_balance).map_err(|err| ApiError::BadRequest(err.to_string()))
    }
}

/// Response carrying an account's balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    /// Gold balance in grams
    pub gold_balance: Decimal,
    /// Rial balance in minor units
    pub rial_balance: u64,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            gold_balance: milligrams_to_grams(account.gold_balance()),
            rial_balance: account.rial_balance(),
        }
    }
}

/// Request to place a limit order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Identifier of the account placing the order
    pub account_id: Uuid,
    /// Order quantity in grams (positive, up to 3 decimal places)
    pub quantity: Decimal,
    /// Limit price in rials per gram (positive)
    pub price_per_gram: u64,
}

impl PlaceOrderRequest {
    /// Validates and converts the quantity to milligrams.
    pub fn quantity_mg(&self) -> Result<u64, ApiError> {
        let quantity_mg =
            grams_to_milligrams(self.quantity).map_err(|err| ApiError::BadRequest(err.to_string()))?;
        if quantity_mg == 0 {
            return Err(ApiError::BadRequest("quantity must be positive".to_string()));
        }
        Ok(quantity_mg)
    }

    /// Validates the limit price.
    pub fn validated_price(&self) -> Result<u64, ApiError> {
        if self.price_per_gram == 0 {
            return Err(ApiError::BadRequest(
                "price_per_gram must be positive".to_string(),
            ));
        }
        Ok(self.price_per_gram)
    }
}

/// Request to cancel an order on behalf of its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    /// Identifier of the account requesting the cancellation
    pub account_id: Uuid,
}

/// Response for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub side: Side,
    /// Original quantity in grams
    pub quantity: Decimal,
    /// Remaining quantity in grams
    pub remaining: Decimal,
    /// Limit price in rials per gram
    pub price_per_gram: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            account_id: order.account_id,
            side: order.side,
            quantity: milligrams_to_grams(order.quantity),
            remaining: milligrams_to_grams(order.remaining),
            price_per_gram: order.price_per_gram,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

/// Response for an executed trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeResponse {
    pub id: Uuid,
    pub buy_order_id: Uuid,
    pub sell_order_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    /// Matched quantity in grams
    pub quantity: Decimal,
    /// Execution price in rials per gram
    pub price_per_gram: u64,
    /// Matched notional in rials
    pub total_amount: u64,
    /// Commission withheld in rials
    pub commission: u64,
    pub executed_at: DateTime<Utc>,
}

impl From<Trade> for TradeResponse {
    fn from(trade: Trade) -> Self {
        Self {
            id: trade.id,
            buy_order_id: trade.buy_order_id,
            sell_order_id: trade.sell_order_id,
            buyer_id: trade.buyer_id,
            seller_id: trade.seller_id,
            quantity: milligrams_to_grams(trade.quantity),
            price_per_gram: trade.price_per_gram,
            total_amount: trade.total_amount,
            commission: trade.commission,
            executed_at: trade.executed_at,
        }
    }
}

/// Response for a placement: the order plus the trades it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementResponse {
    pub order: OrderResponse,
    pub trades: Vec<TradeResponse>,
}

impl From<Placement> for PlacementResponse {
    fn from(placement: Placement) -> Self {
        Self {
            order: placement.order.into(),
            trades: placement.trades.into_iter().map(TradeResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_place_order_request_validation() {
        let request = PlaceOrderRequest {
            account_id: Uuid::new_v4(),
            quantity: dec!(2.5),
            price_per_gram: 100_000_000,
        };
        assert_eq!(request.quantity_mg().unwrap(), 2_500);
        assert_eq!(request.validated_price().unwrap(), 100_000_000);
    }

    #[test]
    fn test_place_order_request_rejects_bad_inputs() {
        let zero_qty = PlaceOrderRequest {
            account_id: Uuid::new_v4(),
            quantity: dec!(0),
            price_per_gram: 1,
        };
        assert!(zero_qty.quantity_mg().is_err());

        let too_fine = PlaceOrderRequest {
            account_id: Uuid::new_v4(),
            quantity: dec!(0.0001),
            price_per_gram: 1,
        };
        assert!(too_fine.quantity_mg().is_err());

        let zero_price = PlaceOrderRequest {
            account_id: Uuid::new_v4(),
            quantity: dec!(1),
            price_per_gram: 0,
        };
        assert!(zero_price.validated_price().is_err());
    }
}
