//! # Keypair Wallet
//!
//! Local keypair signer implementing [`Wallet`].
//!
//! ## Features
//! - Load keypair from a Solana CLI JSON file or a base58 string
//! - Generate throwaway keypairs
//! - Sign versioned transactions in the wallet's signer slot
//! - Connect/disconnect at runtime

use async_trait::async_trait;
use lib_core::error::WalletError;
use lib_core::service::Wallet;
use parking_lot::RwLock;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Wallet backed by an in-memory keypair
pub struct KeypairWallet {
    /// Optional keypair (None if disconnected)
    keypair: RwLock<Option<Keypair>>,
}

impl KeypairWallet {
    /// Create a disconnected wallet
    pub fn new() -> Self {
        Self {
            keypair: RwLock::new(None),
        }
    }

    /// Create a connected wallet from an existing keypair
    pub fn from_keypair(keypair: Keypair) -> Self {
        Self {
            keypair: RwLock::new(Some(keypair)),
        }
    }

    /// Load keypair from file
    ///
    /// Supports the Solana CLI JSON array format (`[1,2,3,...]`, 64 bytes of
    /// secret+public key, or a bare 32-byte secret) and base58 text.
    ///
    /// # Example
    /// ```no_run
    /// # use lib_solana::wallet::KeypairWallet;
    /// let wallet = KeypairWallet::load_from_file("/home/me/.config/solana/id.json")?;
    /// # Ok::<(), lib_core::error::WalletError>(())
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| WalletError::KeypairLoadError(format!("Failed to read {}: {}", path.display(), e)))?;

        let keypair = parse_keypair(&contents)?;
        info!(wallet = %keypair.pubkey(), path = %path.display(), "Keypair loaded");

        Ok(Self::from_keypair(keypair))
    }

    /// Load keypair from a base58 encoded secret
    pub fn load_from_base58(base58_key: &str) -> Result<Self, WalletError> {
        Ok(Self::from_keypair(keypair_from_base58(base58_key)?))
    }

    /// Generate a new random keypair
    pub fn generate() -> Self {
        Self::from_keypair(Keypair::new())
    }

    /// Replace the current keypair
    pub fn connect(&self, keypair: Keypair) {
        debug!(wallet = %keypair.pubkey(), "Wallet connected");
        *self.keypair.write() = Some(keypair);
    }

    pub fn disconnect(&self) {
        if self.keypair.write().take().is_some() {
            debug!("Wallet disconnected");
        }
    }

    /// Wallet address as base58, if connected
    pub fn address(&self) -> Option<String> {
        self.public_key().map(|pk| pk.to_string())
    }
}

impl Default for KeypairWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.keypair.read().as_ref().map(|kp| kp.pubkey())
    }

    async fn sign_transaction(&self, mut transaction: VersionedTransaction) -> Result<VersionedTransaction, WalletError> {
        let guard = self.keypair.read();
        let keypair = guard.as_ref().ok_or(WalletError::NotConnected)?;
        let pubkey = keypair.pubkey();

        let required = usize::from(transaction.message.header().num_required_signatures);
        let position = transaction
            .message
            .static_account_keys()
            .iter()
            .take(required)
            .position(|key| key == &pubkey)
            .ok_or_else(|| {
                WalletError::SigningError(format!("{} is not a required signer of this transaction", pubkey))
            })?;

        if transaction.signatures.len() < required {
            transaction.signatures.resize(required, Signature::default());
        }

        let message_bytes = transaction.message.serialize();
        transaction.signatures[position] = keypair.sign_message(&message_bytes);

        debug!(wallet = %pubkey, signer_index = position, "Transaction signed");
        Ok(transaction)
    }
}

/// Parse keypair file contents: JSON byte array or base58 text
pub fn parse_keypair(contents: &str) -> Result<Keypair, WalletError> {
    let trimmed = contents.trim();
    if trimmed.starts_with('[') {
        let bytes: Vec<u8> = serde_json::from_str(trimmed)
            .map_err(|e| WalletError::InvalidKeypair(format!("Invalid JSON format: {}", e)))?;
        keypair_from_bytes(&bytes)
    } else {
        keypair_from_base58(trimmed)
    }
}

pub fn keypair_from_base58(base58_key: &str) -> Result<Keypair, WalletError> {
    let bytes = bs58::decode(base58_key.trim())
        .into_vec()
        .map_err(|e| WalletError::InvalidKeypair(format!("Invalid base58: {}", e)))?;
    keypair_from_bytes(&bytes)
}

/// Build a keypair from 64 bytes (secret ‖ public) or a 32-byte secret
pub fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, WalletError> {
    match bytes.len() {
        64 => {
            let mut secret = [0u8; 32];
            secret.copy_from_slice(&bytes[..32]);
            let keypair = Keypair::new_from_array(secret);
            if keypair.pubkey().to_bytes()[..] != bytes[32..] {
                return Err(WalletError::InvalidKeypair(
                    "Public key does not match secret key".to_string(),
                ));
            }
            Ok(keypair)
        }
        32 => {
            let mut secret = [0u8; 32];
            secret.copy_from_slice(bytes);
            Ok(Keypair::new_from_array(secret))
        }
        n => Err(WalletError::InvalidKeypair(format!("Expected 64 or 32 bytes, got {}", n))),
    }
}

/// Default Solana CLI keypair location (`~/.config/solana/id.json`)
pub fn default_keypair_path() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(Path::new(&home).join(".config").join("solana").join("id.json"))
}
