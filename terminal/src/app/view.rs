//! # Quote View
//!
//! Display model for the stored quote.

use crate::app::state::{StoredQuote, SwapInputs};
use crate::utils::amount::{format_ui_amount, parse_decimal, to_ui_amount};
use lib_core::service::TokenDecimals;
use lib_utils::format::truncate_address;
use rust_decimal::Decimal;
use std::fmt;

/// Decimal places for the input amount
pub const INPUT_DISPLAY_PLACES: u32 = 4;
/// Decimal places for output amounts
pub const OUTPUT_DISPLAY_PLACES: u32 = 6;
/// Decimal places for the price impact percentage
pub const PRICE_IMPACT_PLACES: u32 = 4;
/// Price impact fraction above which the quote is flagged (5%)
pub const HIGH_PRICE_IMPACT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Human-readable rendering of a stored quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    pub input_amount: String,
    pub input_mint: String,
    pub output_amount: String,
    pub output_mint: String,
    /// Minimum output after slippage
    pub minimum_received: String,
    /// Percentage, e.g. `"0.0120%"`
    pub price_impact: String,
    pub high_price_impact: bool,
    /// Route labels joined with `" → "`
    pub route: String,
    pub slippage_bps: u16,
    /// The inputs changed since this quote was fetched
    pub provisional: bool,
}

impl QuoteView {
    pub fn new(stored: &StoredQuote, current: &SwapInputs, decimals: &dyn TokenDecimals) -> Self {
        let quote = &stored.quote;
        let output_decimals = decimals.decimals(&quote.output_mint);

        let (price_impact, high_price_impact) = match parse_decimal(&quote.price_impact_pct) {
            Ok(fraction) => match fraction.checked_mul(Decimal::ONE_HUNDRED) {
                Some(percent) => (
                    format!("{}%", format_ui_amount(percent, PRICE_IMPACT_PLACES)),
                    fraction > HIGH_PRICE_IMPACT,
                ),
                None => (quote.price_impact_pct.clone(), true),
            },
            Err(_) => (quote.price_impact_pct.clone(), false),
        };

        Self {
            input_amount: display_amount(
                &quote.in_amount,
                decimals.decimals(&quote.input_mint),
                INPUT_DISPLAY_PLACES,
            ),
            input_mint: truncate_address(&quote.input_mint),
            output_amount: display_amount(&quote.out_amount, output_decimals, OUTPUT_DISPLAY_PLACES),
            output_mint: truncate_address(&quote.output_mint),
            minimum_received: display_amount(&quote.other_amount_threshold, output_decimals, OUTPUT_DISPLAY_PLACES),
            price_impact,
            high_price_impact,
            route: quote.route_labels().join(" → "),
            slippage_bps: quote.slippage_bps,
            provisional: !stored.matches(current),
        }
    }
}

/// Scaled and fixed-place when decimals are known, raw units otherwise
fn display_amount(raw: &str, decimals: Option<u8>, places: u32) -> String {
    decimals
        .and_then(|d| to_ui_amount(raw, d).ok())
        .map(|value| format_ui_amount(value, places))
        .unwrap_or_else(|| raw.to_string())
}

impl fmt::Display for QuoteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input:        {} ({})", self.input_amount, self.input_mint)?;
        writeln!(f, "Output (est): {} ({})", self.output_amount, self.output_mint)?;
        writeln!(f, "Min received: {}", self.minimum_received)?;
        let warning = if self.high_price_impact { "  [HIGH]" } else { "" };
        writeln!(f, "Price impact: {}{}", self.price_impact, warning)?;
        writeln!(f, "Slippage:     {} bps", self.slippage_bps)?;
        write!(f, "Route:        {}", self.route)?;
        if self.provisional {
            write!(f, "\n(provisional: inputs changed since this quote)")?;
        }
        Ok(())
    }
}
