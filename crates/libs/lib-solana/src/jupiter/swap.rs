//! # Jupiter Swap Transaction Building
//!
//! Swap transaction building from Jupiter quotes.

use super::client::{transport_error, JupiterHttpClient};
use lib_core::dto::{SwapRequest, SwapTransaction};
use lib_core::error::ProviderError;
use tracing::{debug, instrument};

impl JupiterHttpClient {
    /// Build an unsigned swap transaction from a quote
    #[instrument(skip(self, request), fields(user = %request.user_public_key))]
    pub async fn get_swap_transaction(&self, request: &SwapRequest) -> Result<SwapTransaction, ProviderError> {
        let url = self.endpoint("swap");

        debug!("Jupiter swap transaction request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("Jupiter swap request failed", e))?;

        let swap: SwapTransaction = self.read_json(response).await?;

        if swap.swap_transaction.trim().is_empty() {
            return Err(ProviderError::Empty);
        }

        debug!(
            last_valid_block_height = swap.last_valid_block_height,
            prioritization_fee_lamports = ?swap.prioritization_fee_lamports,
            "Jupiter swap transaction received"
        );

        Ok(swap)
    }
}
