//! # Jupiter Quote API
//!
//! Quote API integration for getting swap quotes from Jupiter.

use super::client::{transport_error, JupiterHttpClient};
use lib_core::dto::{Quote, QuoteRequest};
use lib_core::error::ProviderError;
use tracing::{debug, instrument};

impl JupiterHttpClient {
    /// Get a swap quote from Jupiter Aggregator V6
    #[instrument(skip(self), fields(input = %request.input_mint, output = %request.output_mint))]
    pub async fn get_swap_quote(&self, request: &QuoteRequest) -> Result<Quote, ProviderError> {
        let url = self.endpoint("quote");
        let amount = request.amount.to_string();
        let slippage = request.slippage_bps.to_string();

        debug!(amount = request.amount, slippage_bps = request.slippage_bps, "Jupiter quote request");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("inputMint", request.input_mint.as_str()),
                ("outputMint", request.output_mint.as_str()),
                ("amount", amount.as_str()),
                ("slippageBps", slippage.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_error("Jupiter quote request failed", e))?;

        let quote: Quote = self.read_json(response).await?;

        debug!(
            in_amount = %quote.in_amount,
            out_amount = %quote.out_amount,
            price_impact_pct = %quote.price_impact_pct,
            hops = quote.route_plan.len(),
            "Jupiter quote received"
        );

        Ok(quote)
    }
}
