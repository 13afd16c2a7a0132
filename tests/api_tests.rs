//--------------------------------------------------------------------------------------------------
// TEST MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Integration tests for the REST API. Each test drives the full stack (router, DTO
// validation, exchange, matching engine, ledger) through in-memory requests and verifies
// the JSON responses and the resulting balances.
//--------------------------------------------------------------------------------------------------

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, from_slice, json};
use tower::ServiceExt;
use uuid::Uuid;

use bullion_matching::{
    Api, CommissionSchedule, Exchange, MatchingEngine, SelfTradePolicy,
};

/// Price used across the scenarios: 100 million rials per gram.
const PRICE: u64 = 100_000_000;

/// Sets up a test router over a fresh exchange.
fn setup_test_router() -> Router {
    let engine = MatchingEngine::new(CommissionSchedule::default());
    let exchange = Exchange::new(engine, SelfTradePolicy::Allow);

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], 0));
    Api::new(addr, exchange).routes()
}

/// Helper to parse JSON responses
async fn parse_json_response(response: Response) -> Value {
    let body_bytes = to_bytes(response.into_body(), 1024 * 1024) // 1MB limit
        .await
        .unwrap();
    from_slice(&body_bytes).unwrap()
}

/// Helper to POST a JSON body
async fn post_json(app: &Router, path: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::post(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Helper to GET a path
async fn get(app: &Router, path: &str) -> Response {
    app.clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Opens an account with the given balances and returns its id.
async fn open_account(app: &Router, gold_grams: &str, rial: u64) -> Uuid {
    let response = post_json(
        app,
        "/api/v1/accounts",
        json!({ "gold_balance": gold_grams, "rial_balance": rial }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_json_response(response).await;
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

/// Reads a decimal field out of a JSON value.
fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

/// Fetches an account's balances as (gold grams, rial minor units).
async fn balances(app: &Router, account_id: Uuid) -> (Decimal, u64) {
    let response = get(app, &format!("/api/v1/accounts/{account_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_json_response(response).await;
    (decimal(&body["gold_balance"]), body["rial_balance"].as_u64().unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_router();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_open_account_and_read_balances() {
    let app = setup_test_router();

    let account_id = open_account(&app, "15.0", 100_000_000).await;

    let (gold, rial) = balances(&app, account_id).await;
    assert_eq!(gold, dec!(15));
    assert_eq!(rial, 100_000_000);
}

#[tokio::test]
async fn test_unknown_account_is_not_found() {
    let app = setup_test_router();

    let response = get(&app, &format!("/api/v1/accounts/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_place_buy_order_reserves_balance() {
    let app = setup_test_router();
    let account_id = open_account(&app, "0", 500_000_000).await;

    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({
            "account_id": account_id,
            "quantity": "2.0",
            "price_per_gram": PRICE,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_json_response(response).await;
    assert_eq!(body["order"]["side"], "buy");
    assert_eq!(body["order"]["status"], "active");
    assert_eq!(decimal(&body["order"]["quantity"]), dec!(2));
    assert_eq!(decimal(&body["order"]["remaining"]), dec!(2));
    assert!(body["trades"].as_array().unwrap().is_empty());

    // The full counter-value is debited at placement time
    let (_, rial) = balances(&app, account_id).await;
    assert_eq!(rial, 500_000_000 - 200_000_000);
}

#[tokio::test]
async fn test_insufficient_balance_is_rejected_without_state_change() {
    let app = setup_test_router();
    let account_id = open_account(&app, "0", 100).await;

    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({
            "account_id": account_id,
            "quantity": "1.0",
            "price_per_gram": 1_000,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = parse_json_response(response).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("Insufficient"));

    // No order was created and the balance is untouched
    let (_, rial) = balances(&app, account_id).await;
    assert_eq!(rial, 100);

    let orders = parse_json_response(get(&app, &format!("/api/v1/orders/user/{account_id}")).await).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_validation() {
    let app = setup_test_router();
    let account_id = open_account(&app, "0", 1_000_000_000).await;

    // Sub-milligram precision
    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({ "account_id": account_id, "quantity": "0.0001", "price_per_gram": PRICE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero quantity
    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({ "account_id": account_id, "quantity": "0", "price_per_gram": PRICE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero price
    let response = post_json(
        &app,
        "/api/v1/orders/sell",
        json!({ "account_id": account_id, "quantity": "1", "price_per_gram": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown side in the active orders listing
    let response = get(&app, "/api/v1/orders/active/gold").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_trading_scenario() {
    let app = setup_test_router();

    // Two cash-rich buyers and one gold-holding seller
    let ahmad = open_account(&app, "0", 500_000_000_000).await;
    let reza = open_account(&app, "0", 800_000_000_000).await;
    let akbar = open_account(&app, "15.0", 100_000_000).await;

    // Step 1: Ahmad bids for 2 grams
    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({ "account_id": ahmad, "quantity": "2.0", "price_per_gram": PRICE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let (_, rial) = balances(&app, ahmad).await;
    assert_eq!(rial, 500_000_000_000 - 200_000_000);

    // Step 2: Reza bids for 5 grams at the same price
    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({ "account_id": reza, "quantity": "5.0", "price_per_gram": PRICE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let (_, rial) = balances(&app, reza).await;
    assert_eq!(rial, 800_000_000_000 - 500_000_000);

    // Step 3: both bids rest in the book
    let active = parse_json_response(get(&app, "/api/v1/orders/active/buy").await).await;
    assert_eq!(active.as_array().unwrap().len(), 2);

    // Step 4: Akbar offers 10 grams and sweeps both bids
    let response = post_json(
        &app,
        "/api/v1/orders/sell",
        json!({ "account_id": akbar, "quantity": "10.0", "price_per_gram": PRICE }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_json_response(response).await;

    let trades = body["trades"].as_array().unwrap();
    assert_eq!(trades.len(), 2);
    // FIFO: Ahmad's earlier bid filled first
    assert_eq!(trades[0]["buyer_id"].as_str().unwrap(), ahmad.to_string());
    assert_eq!(decimal(&trades[0]["quantity"]), dec!(2));
    assert_eq!(trades[0]["total_amount"].as_u64().unwrap(), 200_000_000);
    assert_eq!(trades[0]["commission"].as_u64().unwrap(), 3_000_000);
    assert_eq!(trades[1]["buyer_id"].as_str().unwrap(), reza.to_string());
    assert_eq!(decimal(&trades[1]["quantity"]), dec!(5));
    assert_eq!(trades[1]["total_amount"].as_u64().unwrap(), 500_000_000);
    assert_eq!(trades[1]["commission"].as_u64().unwrap(), 7_500_000);

    // Akbar's order stays active with the unmatched remainder
    assert_eq!(body["order"]["status"], "active");
    assert_eq!(decimal(&body["order"]["remaining"]), dec!(3));

    // Step 5: gold delivered, proceeds net of commission, book emptied of bids
    let (gold, _) = balances(&app, ahmad).await;
    assert_eq!(gold, dec!(2));
    let (gold, _) = balances(&app, reza).await;
    assert_eq!(gold, dec!(5));
    let (gold, rial) = balances(&app, akbar).await;
    assert_eq!(gold, dec!(5));
    assert_eq!(rial, 100_000_000 + 197_000_000 + 492_500_000);

    let active = parse_json_response(get(&app, "/api/v1/orders/active/buy").await).await;
    assert!(active.as_array().unwrap().is_empty());

    // Step 6: history surfaces
    let history = parse_json_response(get(&app, "/api/v1/transactions/history").await).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
    // Most recent first: Reza's fill happened after Ahmad's
    assert_eq!(
        history[0]["buyer_id"].as_str().unwrap(),
        reza.to_string()
    );

    let akbar_trades =
        parse_json_response(get(&app, &format!("/api/v1/transactions/user/{akbar}")).await).await;
    assert_eq!(akbar_trades.as_array().unwrap().len(), 2);
    let ahmad_trades =
        parse_json_response(get(&app, &format!("/api/v1/transactions/user/{ahmad}")).await).await;
    assert_eq!(ahmad_trades.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancel_order_refunds_reservation() {
    let app = setup_test_router();
    let account_id = open_account(&app, "0", 1_000_000_000).await;

    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({ "account_id": account_id, "quantity": "5.0", "price_per_gram": PRICE }),
    )
    .await;
    let body = parse_json_response(response).await;
    let order_id = body["order"]["id"].as_str().unwrap().to_string();

    let (_, rial) = balances(&app, account_id).await;
    assert_eq!(rial, 500_000_000);

    // Cancel and get the full reservation back
    let response = app
        .clone()
        .oneshot(
            Request::patch(&format!("/api/v1/orders/{order_id}/cancel"))
                .header("Content-Type", "application/json")
                .body(Body::from(json!({ "account_id": account_id }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_json_response(response).await;
    assert_eq!(body["status"], "cancelled");
    assert_eq!(decimal(&body["remaining"]), dec!(5));

    let (_, rial) = balances(&app, account_id).await;
    assert_eq!(rial, 1_000_000_000);
}

#[tokio::test]
async fn test_cancel_guards() {
    let app = setup_test_router();
    let owner = open_account(&app, "0", 1_000_000_000).await;
    let stranger = open_account(&app, "0", 0).await;

    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({ "account_id": owner, "quantity": "1.0", "price_per_gram": PRICE }),
    )
    .await;
    let body = parse_json_response(response).await;
    let order_id = body["order"]["id"].as_str().unwrap().to_string();

    let cancel = |order: String, account: Uuid| {
        let app = app.clone();
        async move {
            app.oneshot(
                Request::patch(&format!("/api/v1/orders/{order}/cancel"))
                    .header("Content-Type", "application/json")
                    .body(Body::from(json!({ "account_id": account }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
        }
    };

    // Unknown order
    let response = cancel(Uuid::new_v4().to_string(), owner).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Someone else's order
    let response = cancel(order_id.clone(), stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // First cancel succeeds, the second hits a terminal order
    let response = cancel(order_id.clone(), owner).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = cancel(order_id, owner).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_active_orders_listing_order() {
    let app = setup_test_router();
    let account_id = open_account(&app, "0", 100_000_000_000).await;

    for price in [99_000_000_u64, 101_000_000, 100_000_000] {
        let response = post_json(
            &app,
            "/api/v1/orders/buy",
            json!({ "account_id": account_id, "quantity": "1.0", "price_per_gram": price }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let active = parse_json_response(get(&app, "/api/v1/orders/active/buy").await).await;
    let prices: Vec<u64> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["price_per_gram"].as_u64().unwrap())
        .collect();
    // Best bid first
    assert_eq!(prices, vec![101_000_000, 100_000_000, 99_000_000]);
}

#[tokio::test]
async fn test_maker_price_rule_over_http() {
    let app = setup_test_router();
    let buyer = open_account(&app, "0", 1_000_000_000).await;
    let seller = open_account(&app, "1.0", 0).await;

    // Seller rests at 95; buyer lifts with a 100 limit and pays the resting price
    let response = post_json(
        &app,
        "/api/v1/orders/sell",
        json!({ "account_id": seller, "quantity": "1.0", "price_per_gram": 95_000_000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        &app,
        "/api/v1/orders/buy",
        json!({ "account_id": buyer, "quantity": "1.0", "price_per_gram": PRICE }),
    )
    .await;
    let body = parse_json_response(response).await;

    let trades = body["trades"].as_array().unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0]["price_per_gram"].as_u64().unwrap(), 95_000_000);
    assert_eq!(trades[0]["total_amount"].as_u64().unwrap(), 95_000_000);
    assert_eq!(body["order"]["status"], "completed");
}
