//! # Sanitizer
//!
//! Canonical forms every validator starts from.
//!
//! Numeric fields are reduced to their ASCII digits so that separators typed
//! by the customer ("4111 1111 1111 1111", "06-12-34-56-78") never cause a
//! false rejection. Free-text fields are trimmed and their whitespace runs
//! collapsed.

use serde_json::Value;

/// Returns only the ASCII digits of `input`, in their original order.
///
/// ## Example
/// ```rust
/// use checkout_core::sanitize::sanitize_numeric;
///
/// assert_eq!(sanitize_numeric("06 12-34.56 78"), "0612345678");
/// assert_eq!(sanitize_numeric("abc"), "");
/// ```
pub fn sanitize_numeric(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// [`sanitize_numeric`] for untyped JSON input.
///
/// Anything that is not a JSON string (null, numbers, booleans, arrays,
/// objects) sanitizes to the empty string.
pub fn sanitize_value(value: &Value) -> String {
    match value {
        Value::String(text) => sanitize_numeric(text),
        _ => String::new(),
    }
}

/// Trims `input` and collapses every internal whitespace run to one space.
pub fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_keeps_digits_in_order() {
        assert_eq!(sanitize_numeric("4111 1111 1111 1111"), "4111111111111111");
        assert_eq!(sanitize_numeric("a1b2c3"), "123");
        assert_eq!(sanitize_numeric(""), "");
        // Non-ASCII digits are not card digits.
        assert_eq!(sanitize_numeric("١٢٣4"), "4");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["12 rue", "0612-345-678", "", "no digits", "7 5 0 0 1"] {
            let once = sanitize_numeric(input);
            assert_eq!(sanitize_numeric(&once), once);
        }
    }

    #[test]
    fn test_sanitize_value_non_text() {
        assert_eq!(sanitize_value(&json!("75 001")), "75001");
        assert_eq!(sanitize_value(&json!(null)), "");
        assert_eq!(sanitize_value(&json!(75001)), "");
        assert_eq!(sanitize_value(&json!(["1"])), "");
        assert_eq!(sanitize_value(&json!({ "a": "1" })), "");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Rue   de\tla  Paix "), "Rue de la Paix");
        assert_eq!(normalize_text("   "), "");
    }
}
