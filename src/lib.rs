// Expose the modules
pub mod api;
pub mod config;
pub mod domain;

// Re-export key types for easier usage
pub use api::{Api, AppState};
pub use config::Config;
pub use domain::models::types::{Account, Order, OrderStatus, Side, Trade};
pub use domain::models::units::{MILLIGRAMS_PER_GRAM, notional};
pub use domain::services::commission::{CommissionSchedule, MAX_COMMISSION, MIN_COMMISSION};
pub use domain::services::exchange::{Exchange, ExchangeError, Placement, SelfTradePolicy};
pub use domain::services::ledger::{BalanceLedger, LedgerError};
pub use domain::services::matching_engine::{MatchingEngine, MatchingError};
pub use domain::services::orderbook::{BookError, OrderBookStore};
pub use domain::services::trades::TradeLog;
