pub mod commission;
pub mod exchange;
pub mod ledger;
pub mod matching_engine;
pub mod orderbook;
pub mod trades;
