use std::net::SocketAddr;

use dotenv::dotenv;
use std::env;

use crate::domain::services::exchange::SelfTradePolicy;

const BIND_ADDR: &str = "BIND_ADDR";
const SELF_TRADE_POLICY: &str = "SELF_TRADE_POLICY";

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub self_trade_policy: SelfTradePolicy,
}

impl Config {
    pub fn from_env() -> Config {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_from_env() -> Result<Config, String> {
        // Load .env file
        dotenv().ok();

        let bind_addr = match env::var(BIND_ADDR) {
            Ok(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|_| format!("failed to parse {}: {}", BIND_ADDR, raw))?,
            Err(_) => Self::default().bind_addr,
        };

        let self_trade_policy = match env::var(SELF_TRADE_POLICY) {
            Ok(raw) => raw
                .parse::<SelfTradePolicy>()
                .map_err(|err| format!("failed to parse {}: {}", SELF_TRADE_POLICY, err))?,
            Err(_) => SelfTradePolicy::default(),
        };

        Ok(Config {
            bind_addr,
            self_trade_policy,
        })
    }

    pub fn default() -> Config {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            self_trade_policy: SelfTradePolicy::Allow,
        }
    }
}
