use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bullion_matching::{
    Api, CommissionSchedule, Config, Exchange, MatchingEngine,
};

/// Gold/rial limit-order matching venue
#[derive(Parser, Debug)]
#[command(name = "bullion-matching")]
struct Args {
    /// Address to bind the API server to (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    info!(
        bind_addr = %config.bind_addr,
        self_trade_policy = ?config.self_trade_policy,
        "starting matching venue"
    );

    let engine = MatchingEngine::new(CommissionSchedule::default());
    let exchange = Exchange::new(engine, config.self_trade_policy);

    let api = Api::new(config.bind_addr, exchange);
    api.serve().await.map_err(|err| anyhow::anyhow!("{err}"))?;

    Ok(())
}
