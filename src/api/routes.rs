//--------------------------------------------------------------------------------------------------
// FUNCTIONS
//--------------------------------------------------------------------------------------------------
// | Name                  | Description                            | Return Type         |
// |-----------------------|----------------------------------------|---------------------|
// | health                | Health check endpoint                  | Response            |
// | open_account          | Open a trading account                 | ApiResult<Response> |
// | get_account           | Get an account's balances              | ApiResult<Response> |
// | place_buy_order       | Place a buy limit order                | ApiResult<Response> |
// | place_sell_order      | Place a sell limit order               | ApiResult<Response> |
// | cancel_order          | Cancel a resting order                 | ApiResult<Response> |
// | get_account_orders    | An account's orders, recent first      | ApiResult<Response> |
// | get_active_orders     | Active orders of one side              | ApiResult<Response> |
// | get_account_trades    | An account's trades, recent first      | ApiResult<Response> |
// | get_trade_history     | All trades, recent first               | ApiResult<Response> |
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::domain::models::types::Side;

use super::{
    AccountResponse, ApiError, ApiResult, AppState, CancelOrderRequest, OpenAccountRequest,
    OrderResponse, PlaceOrderRequest, PlacementResponse, TradeResponse,
};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

/// Open a trading account with starting balances
pub async fn open_account(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<OpenAccountRequest>,
) -> ApiResult<Response> {
    let gold_balance_mg = req.gold_balance_mg()?;
    let account = state.exchange.open_account(gold_balance_mg, req.rial_balance);

    let response = AccountResponse::from(account);
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Get an account's current balances
pub async fn get_account(
    Extension(state): Extension<Arc<AppState>>,
    Path(account_id): Path<Uuid>,
) -> ApiResult<Response> {
    let account = state.exchange.account(account_id)?;

    let response = AccountResponse::from(account);
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Place a buy limit order
pub async fn place_buy_order(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<Response> {
    place_order(state, req, Side::Buy)
}

/// Place a sell limit order
pub async fn place_sell_order(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<Response> {
    place_order(state, req, Side::Sell)
}

/// Shared placement path: validate the request, hand it to the exchange.
fn place_order(state: Arc<AppState>, req: PlaceOrderRequest, side: Side) -> ApiResult<Response> {
    let quantity_mg = req.quantity_mg()?;
    let price_per_gram = req.validated_price()?;

    let placement = state
        .exchange
        .place_order(req.account_id, side, quantity_mg, price_per_gram)?;

    let response = PlacementResponse::from(placement);
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Cancel a resting order on behalf of its owner
pub async fn cancel_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<CancelOrderRequest>,
) -> ApiResult<Response> {
    let order = state.exchange.cancel_order(order_id, req.account_id)?;

    let response = OrderResponse::from(order);
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Get all orders of an account, most recent first
pub async fn get_account_orders(
    Extension(state): Extension<Arc<AppState>>,
    Path(account_id): Path<Uuid>,
) -> ApiResult<Response> {
    let orders: Vec<OrderResponse> = state
        .exchange
        .account_orders(account_id)
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(orders)).into_response())
}

/// Get the active orders of one side in price-time priority order
pub async fn get_active_orders(
    Extension(state): Extension<Arc<AppState>>,
    Path(side): Path<String>,
) -> ApiResult<Response> {
    let side: Side = side
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown side: {side}")))?;

    let orders: Vec<OrderResponse> = state
        .exchange
        .active_orders(side)
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(orders)).into_response())
}

/// Get the trades an account took part in, most recent first
pub async fn get_account_trades(
    Extension(state): Extension<Arc<AppState>>,
    Path(account_id): Path<Uuid>,
) -> ApiResult<Response> {
    let trades: Vec<TradeResponse> = state
        .exchange
        .account_trades(account_id)
        .into_iter()
        .map(TradeResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(trades)).into_response())
}

/// Get the full trade history, most recent first
pub async fn get_trade_history(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Response> {
    let trades: Vec<TradeResponse> = state
        .exchange
        .all_trades()
        .into_iter()
        .map(TradeResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(trades)).into_response())
}
