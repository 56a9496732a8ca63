//! # Card Checksum
//!
//! The mod-10 (Luhn) check used by payment card numbering schemes.
//!
//! ```text
//!   4  1  1  1  1  1  1  1  1  1  1  1  1  1  1  1     digits
//!   ×2    ×2    ×2    ×2    ×2    ×2    ×2    ×2        every second from the right,
//!   8  1  2  1  2  1  2  1  2  1  2  1  2  1  2  1     starting at the second-from-right
//!                                                       (doubled > 9 → minus 9)
//!   sum = 30 → 30 % 10 == 0 → valid
//! ```

use crate::sanitize::sanitize_numeric;

/// Returns true if the digits of `card_number` pass the mod-10 checksum.
///
/// Separators are ignored; input without any digit is never valid.
///
/// ## Example
/// ```rust
/// use checkout_core::checksum::is_valid_checksum;
///
/// assert!(is_valid_checksum("4111 1111 1111 1111"));
/// assert!(!is_valid_checksum("4111111111111112"));
/// assert!(!is_valid_checksum(""));
/// ```
pub fn is_valid_checksum(card_number: &str) -> bool {
    let digits = sanitize_numeric(card_number);
    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(position, digit)| {
            if position % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}
