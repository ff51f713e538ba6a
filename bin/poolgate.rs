use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use jemallocator::Jemalloc;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use poolgate::{PoolService, RpcChainClient, Settings, UniswapV2Gateway};

/// Fetch Uniswap V2 pair snapshots from an Ethereum node.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pair contract addresses
    #[arg(required = true)]
    addresses: Vec<String>,
    /// Base name of the config file (config.yaml, config.toml, ...)
    #[arg(long, default_value = "config")]
    config: String,
    /// Per-pool deadline, overriding gateway.request_timeout_secs
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.log_level)
        .init()
        .context("Failed to install logger")?;

    let settings = Settings::from_file(&cli.config).context(
        "Failed to load settings. Provide a config file or set ETH_RPC_URL / POOLGATE__RPC__URL",
    )?;

    let client = Arc::new(
        RpcChainClient::connect_http(&settings.rpc.url).context("Failed to create RPC client")?,
    );
    let gateway = Arc::new(UniswapV2Gateway::new(client, settings.gateway.network.clone()));

    let timeout = cli
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.gateway.request_timeout());

    let shutdown = CancellationToken::new();
    let service = PoolService::new(gateway, timeout).with_shutdown(shutdown.clone());

    info!(
        "Fetching {} pool(s) on {} with a {:?} deadline",
        cli.addresses.len(),
        settings.gateway.network,
        timeout
    );

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal (Ctrl+C), cancelling in-flight fetches...");
            signal_token.cancel();
        }
    });

    let results = service.get_many(&cli.addresses).await;

    let mut failed = 0;
    for (address, result) in cli.addresses.iter().zip(results) {
        match result {
            Ok(snapshot) => {
                let json = serde_json::to_string_pretty(&snapshot)
                    .context("Failed to serialize snapshot")?;
                println!("{json}");
            },
            Err(e) => {
                error!("{address}: {e} ({:?})", e.kind());
                failed += 1;
            },
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} pool fetches failed", cli.addresses.len());
    }

    Ok(())
}
