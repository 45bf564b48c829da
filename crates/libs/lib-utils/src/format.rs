//! # Display Formatting
//!
//! Address shortening for log lines and quote display.

/// Format an address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// ```rust
/// use lib_utils::format::format_address;
///
/// let addr = "So11111111111111111111111111111111111111112";
/// assert_eq!(format_address(addr, 4, 4), "So11...1112");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    // base58 is ASCII-only, byte slicing is safe after the check above
    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format an address with the default 4-character prefix and suffix.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}

/// Shorten a transaction signature for notifications (first `len` characters).
pub fn short_signature(signature: &str, len: usize) -> &str {
    match signature.char_indices().nth(len) {
        Some((idx, _)) => &signature[..idx],
        None => signature,
    }
}
