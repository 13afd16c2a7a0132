pub mod trade_log;

pub use self::trade_log::TradeLog;
