use prior_testnet::api::HttpApiClient;
use prior_testnet::chain::EthersChainReader;
use prior_testnet::{BatchRunner, PriorConfig, RandomTxHash, SequencerDeps};

use anyhow::{Context, Result};
use clap::Parser;
use core_logic::{init_from_env, TokioPacer, WalletManager};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "chains/prior-testnet/config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_from_env(None);

    let args = Args::parse();
    info!("Loading config from: {}", args.config);

    let config = match PriorConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };

    let manager = match WalletManager::from_env() {
        Ok(m) => m,
        Err(e) => {
            error!("Failed to load wallets: {}", e);
            return Err(e.into());
        }
    };
    info!("Starting bot with {} wallets from {}", manager.count(), manager.source());
    for (i, address) in manager.list_wallets().iter().enumerate() {
        info!("  [{:03}] {}", i + 1, address);
    }

    let api = HttpApiClient::new(&config).context("Failed to build API client")?;
    let chain = EthersChainReader::new(&config).context("Failed to connect chain reader")?;

    let deps = SequencerDeps {
        api: Arc::new(api),
        chain: Arc::new(chain),
        pacer: Arc::new(TokioPacer),
        hashes: Arc::new(RandomTxHash),
    };

    let runner = BatchRunner::new(&config, deps);
    let stats = runner.run(manager.into_wallets()).await;

    if stats.failed > 0 {
        info!("{} of {} wallets failed, see log for details", stats.failed, stats.total());
    }

    Ok(())
}
