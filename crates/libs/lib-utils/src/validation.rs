//! # Validation Utilities
//!
//! Input validation helpers for swap form fields.

/// Upper bound for slippage tolerance (100%).
pub const MAX_SLIPPAGE_BPS: u16 = 10_000;

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate that a string is a base58-encoded 32-byte address (token mint or wallet).
pub fn validate_mint_address(value: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(value, field_name)?;

    let bytes = bs58::decode(value.trim())
        .into_vec()
        .map_err(|e| format!("{} is not valid base58: {}", field_name, e))?;

    if bytes.len() != 32 {
        return Err(format!(
            "{} must decode to 32 bytes, got {}",
            field_name,
            bytes.len()
        ));
    }
    Ok(())
}

/// Validate a slippage tolerance expressed in basis points.
pub fn validate_slippage_bps(bps: u16) -> Result<(), String> {
    if bps > MAX_SLIPPAGE_BPS {
        Err(format!("Slippage must be at most {} bps", MAX_SLIPPAGE_BPS))
    } else {
        Ok(())
    }
}

/// Convert a slippage percentage typed by the user (e.g. `"0.5"`) to basis points.
///
/// Rounds to the nearest basis point, so `"0.555"` becomes 56 bps.
pub fn parse_slippage_percent(value: &str) -> Result<u16, String> {
    let pct: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid slippage percentage: {:?}", value))?;

    if !pct.is_finite() || pct < 0.0 {
        return Err(format!("Invalid slippage percentage: {:?}", value));
    }

    let bps = (pct * 100.0).round();
    if bps > f64::from(MAX_SLIPPAGE_BPS) {
        return Err(format!("Slippage must be at most {}%", MAX_SLIPPAGE_BPS / 100));
    }
    Ok(bps as u16)
}
