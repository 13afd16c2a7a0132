//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the REST API over the exchange using Axum. It provides endpoints
// for account provisioning, order placement and cancellation, and trade history.
//
// | Component      | Description                                                |
// |----------------|-----------------------------------------------------------|
// | Api            | Main API structure coordinating routes and state           |
// | Routes         | Handler functions for API endpoints                        |
// | AppState       | Shared application state                                   |
// | DTOs           | Data transfer objects for API requests/responses           |
//--------------------------------------------------------------------------------------------------

mod dto;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::services::exchange::Exchange;

pub use dto::*;
pub use error::{ApiError, ApiResult};

/// Shared application state accessible by all handlers
pub struct AppState {
    /// The exchange backing every endpoint
    pub exchange: Arc<Exchange>,
}

impl AppState {
    /// Creates a new application state around an exchange
    pub fn new(exchange: Exchange) -> Self {
        Self {
            exchange: Arc::new(exchange),
        }
    }
}

/// Main API structure
pub struct Api {
    /// API address
    addr: SocketAddr,
    /// Shared application state
    state: Arc<AppState>,
}

impl Api {
    /// Creates a new API instance
    pub fn new(addr: SocketAddr, exchange: Exchange) -> Self {
        let state = Arc::new(AppState::new(exchange));
        Self { addr, state }
    }

    /// Creates all routes for the API
    pub fn routes(&self) -> Router {
        // Allow browser clients on the usual local dev origins
        let cors = CorsLayer::new()
            .allow_origin([
                "http://localhost:3000".parse::<HeaderValue>().unwrap(),
                "http://127.0.0.1:3000".parse::<HeaderValue>().unwrap(),
            ])
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

        Router::new()
            // Health check
            .route("/health", get(routes::health))
            // Accounts
            .route("/api/v1/accounts", post(routes::open_account))
            .route("/api/v1/accounts/:id", get(routes::get_account))
            // Order management
            .route("/api/v1/orders/buy", post(routes::place_buy_order))
            .route("/api/v1/orders/sell", post(routes::place_sell_order))
            .route("/api/v1/orders/:id/cancel", patch(routes::cancel_order))
            .route("/api/v1/orders/user/:account_id", get(routes::get_account_orders))
            .route("/api/v1/orders/active/:side", get(routes::get_active_orders))
            // Trade history
            .route(
                "/api/v1/transactions/user/:account_id",
                get(routes::get_account_trades),
            )
            .route("/api/v1/transactions/history", get(routes::get_trade_history))
            // Attach application state
            .layer(Extension(self.state.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Starts the API server and runs until shutdown
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.routes();

        info!("API listening on {}", self.addr);
        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
