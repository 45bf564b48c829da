//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! # fn main() -> Result<(), String> {
//! init_config()?;
//! let config = core_config()?;
//! let rpc_url = &config.rpc_url;
//! # Ok(())
//! # }
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].

use crate::tokens;
use lib_utils::envs::{get_env_opt, get_env_or, get_env_parse_or};
use lib_utils::validation::{validate_mint_address, validate_slippage_bps};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// Solana cluster the terminal talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Solana mainnet-beta (production network)
    Mainnet,
    /// Solana devnet (test network)
    Devnet,
}

impl Network {
    /// Public RPC endpoint for this cluster.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.mainnet-beta.solana.com",
            Network::Devnet => "https://api.devnet.solana.com",
        }
    }

    /// Cluster name as used by block explorers.
    pub fn cluster_name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet-beta",
            Network::Devnet => "devnet",
        }
    }

    /// Default output token (USDC) for this cluster.
    pub fn default_output_mint(&self) -> &'static str {
        match self {
            Network::Mainnet => tokens::USDC_MINT,
            Network::Devnet => tokens::USDC_DEVNET_MINT,
        }
    }

    /// Block explorer link for a transaction signature.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!("https://solscan.io/tx/{}?cluster={}", signature, self.cluster_name())
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Network::Mainnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(format!("Unknown SOLANA_NETWORK: {}", other)),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Target cluster
    pub network: Network,

    /// Solana JSON-RPC endpoint
    pub rpc_url: String,

    /// Jupiter swap API base URL (quote + swap endpoints)
    pub jupiter_api_base_url: String,

    /// Keypair file used for signing (Solana CLI JSON array or base58)
    pub keypair_path: Option<PathBuf>,

    /// Initial input mint
    pub input_mint: String,

    /// Initial output mint
    pub output_mint: String,

    /// Initial amount, human decimal
    pub amount: String,

    /// Initial slippage tolerance in basis points
    pub slippage_bps: u16,

    /// Quiet window for quote debouncing
    pub quote_debounce_ms: u64,

    /// Retries delegated to the RPC node when broadcasting
    pub submit_max_retries: usize,

    /// Interval between confirmation status polls
    pub confirm_poll_interval_ms: u64,

    /// HTTP request timeout for the quote provider
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let network = Network::Devnet;
        Self {
            network,
            rpc_url: network.default_rpc_url().to_string(),
            jupiter_api_base_url: DEFAULT_JUPITER_API_BASE_URL.to_string(),
            keypair_path: None,
            input_mint: tokens::SOL_MINT.to_string(),
            output_mint: network.default_output_mint().to_string(),
            amount: "0.1".to_string(),
            slippage_bps: 50,
            quote_debounce_ms: 500,
            submit_max_retries: 5,
            confirm_poll_interval_ms: 1_000,
            http_timeout_secs: 10,
        }
    }
}

/// Jupiter v6 swap API.
pub const DEFAULT_JUPITER_API_BASE_URL: &str = "https://quote-api.jup.ag/v6";

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let network: Network = get_env_or("SOLANA_NETWORK", "devnet").parse()?;

        let rpc_url = get_env_or("SOLANA_RPC_URL", network.default_rpc_url());
        let jupiter_api_base_url = get_env_or("JUPITER_API_BASE_URL", DEFAULT_JUPITER_API_BASE_URL);
        let keypair_path = get_env_opt("SWAP_KEYPAIR_PATH").map(PathBuf::from);

        let input_mint = get_env_or("SWAP_INPUT_MINT", tokens::SOL_MINT);
        let output_mint = get_env_or("SWAP_OUTPUT_MINT", network.default_output_mint());
        let amount = get_env_or("SWAP_AMOUNT", "0.1");

        let slippage_bps = get_env_parse_or("SWAP_SLIPPAGE_BPS", 50u16).map_err(|e| e.to_string())?;
        let quote_debounce_ms = get_env_parse_or("QUOTE_DEBOUNCE_MS", 500u64).map_err(|e| e.to_string())?;
        let submit_max_retries = get_env_parse_or("SUBMIT_MAX_RETRIES", 5usize).map_err(|e| e.to_string())?;
        let confirm_poll_interval_ms =
            get_env_parse_or("CONFIRM_POLL_INTERVAL_MS", 1_000u64).map_err(|e| e.to_string())?;
        let http_timeout_secs = get_env_parse_or("HTTP_TIMEOUT_SECS", 10u64).map_err(|e| e.to_string())?;

        Ok(Self {
            network,
            rpc_url,
            jupiter_api_base_url,
            keypair_path,
            input_mint,
            output_mint,
            amount,
            slippage_bps,
            quote_debounce_ms,
            submit_max_retries,
            confirm_poll_interval_ms,
            http_timeout_secs,
        })
    }

    /// Validate configuration values against business rules.
    pub fn validate(&self) -> Result<(), String> {
        validate_mint_address(&self.input_mint, "SWAP_INPUT_MINT")?;
        validate_mint_address(&self.output_mint, "SWAP_OUTPUT_MINT")?;
        validate_slippage_bps(self.slippage_bps)?;

        if self.rpc_url.trim().is_empty() {
            return Err("SOLANA_RPC_URL cannot be empty".to_string());
        }

        if self.quote_debounce_ms > 10_000 {
            return Err("QUOTE_DEBOUNCE_MS must be at most 10000".to_string());
        }

        if self.confirm_poll_interval_ms == 0 {
            return Err("CONFIRM_POLL_INTERVAL_MS must be greater than 0".to_string());
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    pub fn quote_debounce(&self) -> Duration {
        Duration::from_millis(self.quote_debounce_ms)
    }

    pub fn confirm_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirm_poll_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// Loads a `.env` file if present, then reads and validates the environment.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<(), String> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;

    CONFIG.set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration.
///
/// Fails if [`init_config()`] has not been called yet.
pub fn core_config() -> Result<&'static Config, String> {
    CONFIG
        .get()
        .ok_or_else(|| "Config must be initialized with init_config() before use".to_string())
}
