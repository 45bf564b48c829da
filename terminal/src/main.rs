//! # Swap Terminal
//!
//! Headless swap runner: fetches a Jupiter quote for the configured inputs,
//! prints it, and submits the swap only when `--execute` is passed.
//!
//! ```text
//! swap-terminal            # quote only
//! swap-terminal --execute  # quote, sign, submit, confirm
//! ```

use anyhow::Context;
use lib_core::config::{core_config, init_config, Config};
use lib_core::tokens::StaticTokenDecimals;
use lib_solana::wallet::{default_keypair_path, KeypairWallet};
use lib_solana::{JupiterClient, SolanaClient};
use std::sync::Arc;
use swap_terminal::{debug, App, QuoteOutcome, Services, TracingNotifier};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = debug::init_logger();

    init_config().map_err(anyhow::Error::msg).context("Invalid configuration")?;
    let config = core_config().map_err(anyhow::Error::msg)?;

    let execute = std::env::args().skip(1).any(|arg| arg == "--execute");

    let app = App::new(config, build_services(config)?);

    match app.refresh_quote().await? {
        QuoteOutcome::Fetched(_) => {}
        QuoteOutcome::NoOp => anyhow::bail!("Nothing to quote: connect a wallet and set a positive SWAP_AMOUNT"),
        QuoteOutcome::Stale => anyhow::bail!("Quote was superseded"),
    }

    if let Some(view) = app.quote_view() {
        println!("{}", view);
    }

    if !execute {
        println!("Dry run: pass --execute to sign and submit this swap");
        return Ok(());
    }

    let signature = app.confirm_swap().await?;
    println!("Swap confirmed: {}", app.explorer_url(&signature));
    Ok(())
}

fn build_services(config: &Config) -> anyhow::Result<Services> {
    let provider = JupiterClient::builder()
        .api_base(config.jupiter_api_base_url.clone())
        .timeout(config.http_timeout())
        .build()?;

    let ledger = SolanaClient::builder()
        .network(config.network)
        .custom_rpc_url(config.rpc_url.clone())
        .poll_interval(config.confirm_poll_interval())
        .build();

    Ok(Services {
        provider: Arc::new(provider),
        wallet: Arc::new(load_wallet(config)?),
        ledger: Arc::new(ledger),
        notifier: Arc::new(TracingNotifier),
        decimals: Arc::new(StaticTokenDecimals::with_known_mints()),
    })
}

/// Explicit `SWAP_KEYPAIR_PATH` must load; the Solana CLI default is optional
fn load_wallet(config: &Config) -> anyhow::Result<KeypairWallet> {
    if let Some(path) = &config.keypair_path {
        return KeypairWallet::load_from_file(path)
            .with_context(|| format!("Failed to load SWAP_KEYPAIR_PATH {}", path.display()));
    }

    match default_keypair_path().filter(|path| path.exists()) {
        Some(path) => Ok(KeypairWallet::load_from_file(&path)?),
        None => {
            warn!("No keypair configured, running without a wallet");
            Ok(KeypairWallet::new())
        }
    }
    .map(|wallet| {
        if let Some(address) = wallet.address() {
            info!(wallet = %address, "Wallet connected");
        }
        wallet
    })
}
