//! # Address Module
//!
//! Splitting a free-text address into its order parts, joining them back,
//! and validating a full single-line address.
//!
//! ## Decomposition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "12 Rue de la Paix, 75001 Paris"                                      │
//! │   ──  ──────────────  ─────  ─────                                     │
//! │   │         │           │      └── discarded (after the postal code)   │
//! │   │         │           └───────── postal code: first standalone       │
//! │   │         │                      5-digit run after the number        │
//! │   │         └───────────────────── street name: what lies between      │
//! │   └─────────────────────────────── street number: leading digits,      │
//! │                                    optionally one letter ("12b")       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The postal code cuts the street name wherever it appears, including
//! mid-string: "3 Rue 75001 des Lilas" yields the street name "Rue".
//! Splitting is lossy on ambiguous text and is kept exactly as is so that
//! client and server split the same way.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FieldResult, ValidationError};
use crate::sanitize::normalize_text;
use crate::types::{AddressComponents, ValidationResult};
use crate::validation::letter_count;

pub const FIELD_ADDRESS: &str = "L'adresse";

pub const ADDRESS_MIN_CHARS: usize = 10;
pub const ADDRESS_MIN_LETTERS: usize = 5;

// Word boundaries are ASCII-only, as in the storefront's regexes: an accented
// letter next to a digit run still delimits it.
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[A-Za-z]?(?-u:\b)").expect("street number pattern"));

static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9]{5}(?-u:\b)").expect("postal code pattern"));

static ADDRESS_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ0-9 ,.'\-]+$").expect("address pattern"));

// =============================================================================
// Decompose / Recompose
// =============================================================================

/// Splits a free-text address into street number, street name and postal code.
///
/// Missing parts come back empty. The postal-code search starts after the
/// street-number token, so "12345 Rue Haute 75001" keeps 12345 as the number.
///
/// ## Example
/// ```rust
/// use checkout_core::address::decompose;
///
/// let parts = decompose("12 Rue de la Paix, 75001 Paris");
/// assert_eq!(parts.street_number, "12");
/// assert_eq!(parts.street_name, "Rue de la Paix");
/// assert_eq!(parts.postal_code, "75001");
/// ```
pub fn decompose(address: &str) -> AddressComponents {
    let text = normalize_text(address);

    let number = LEADING_NUMBER.find(&text);
    let name_start = number.map_or(0, |m| m.end());

    let postal = POSTAL_CODE.find_at(&text, name_start);
    let name_end = postal.map_or(text.len(), |m| m.start());

    let street_name = text[name_start..name_end]
        .trim_matches(|c: char| c.is_whitespace() || c == ',');

    AddressComponents {
        street_number: number.map(|m| m.as_str().to_string()).unwrap_or_default(),
        street_name: street_name.to_string(),
        postal_code: postal.map(|m| m.as_str().to_string()).unwrap_or_default(),
    }
}

/// Joins the non-empty, trimmed parts with single spaces, in fixed order.
///
/// ## Example
/// ```rust
/// use checkout_core::address::recompose;
///
/// assert_eq!(recompose(" 12 ", "Rue de la Paix", "75001"), "12 Rue de la Paix 75001");
/// assert_eq!(recompose("", "Rue de la Paix", ""), "Rue de la Paix");
/// ```
pub fn recompose(street_number: &str, street_name: &str, postal_code: &str) -> String {
    [street_number, street_name, postal_code]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for AddressComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&recompose(
            &self.street_number,
            &self.street_name,
            &self.postal_code,
        ))
    }
}

// =============================================================================
// Full Address Validator
// =============================================================================

/// Full single-line address.
///
/// ## Rules
/// - Whitespace is trimmed and collapsed before any check
/// - At least 10 characters
/// - Letters (accented included), digits, spaces, `,`, `.`, `-`, `'` only
/// - A standalone 5-digit postal code somewhere in the text
/// - At least 5 letters
pub fn check_address(input: &str) -> FieldResult {
    let address = normalize_text(input);
    if address.is_empty() {
        return Err(ValidationError::required(FIELD_ADDRESS));
    }

    if address.chars().count() < ADDRESS_MIN_CHARS {
        return Err(ValidationError::TooShort {
            field: FIELD_ADDRESS.to_string(),
            min: ADDRESS_MIN_CHARS,
        });
    }

    if !ADDRESS_CHARS.is_match(&address) {
        return Err(ValidationError::InvalidCharacters {
            field: FIELD_ADDRESS.to_string(),
        });
    }

    if !POSTAL_CODE.is_match(&address) {
        return Err(ValidationError::MissingPostalCode);
    }

    if letter_count(&address) < ADDRESS_MIN_LETTERS {
        return Err(ValidationError::TooFewLetters {
            field: FIELD_ADDRESS.to_string(),
            min: ADDRESS_MIN_LETTERS,
        });
    }

    Ok(())
}

pub fn validate_address(input: &str) -> ValidationResult {
    check_address(input).into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(number: &str, name: &str, postal: &str) -> AddressComponents {
        AddressComponents {
            street_number: number.to_string(),
            street_name: name.to_string(),
            postal_code: postal.to_string(),
        }
    }

    #[test]
    fn test_decompose_common_shapes() {
        assert_eq!(
            decompose("12 Rue de la Paix 75001"),
            parts("12", "Rue de la Paix", "75001")
        );
        assert_eq!(
            decompose("  12   Rue de la Paix ,  75001   Paris "),
            parts("12", "Rue de la Paix", "75001")
        );
        assert_eq!(
            decompose("3b Avenue Foch 69006 Lyon"),
            parts("3b", "Avenue Foch", "69006")
        );
        assert_eq!(decompose(""), AddressComponents::default());
    }

    #[test]
    fn test_decompose_without_number() {
        assert_eq!(
            decompose("Rue de la Paix 75001 Paris"),
            parts("", "Rue de la Paix", "75001")
        );
        // "12bis" is not a number token: digits plus more than one letter.
        assert_eq!(decompose("12bis Rue Haute"), parts("", "12bis Rue Haute", ""));
    }

    #[test]
    fn test_decompose_without_postal_code() {
        assert_eq!(
            decompose("12 Rue de la Paix Paris"),
            parts("12", "Rue de la Paix Paris", "")
        );
    }

    #[test]
    fn test_postal_code_mid_string_truncates_name() {
        assert_eq!(
            decompose("3 Rue 75001 des Lilas"),
            parts("3", "Rue", "75001")
        );
        // Only standalone runs count; 6 digits are not a postal code.
        assert_eq!(
            decompose("3 Rue 750011 des Lilas 13008"),
            parts("3", "Rue 750011 des Lilas", "13008")
        );
    }

    #[test]
    fn test_leading_five_digits_stay_the_number() {
        assert_eq!(
            decompose("12345 Rue Haute 75001"),
            parts("12345", "Rue Haute", "75001")
        );
    }

    #[test]
    fn test_accented_letter_delimits_digit_runs() {
        assert_eq!(decompose("Allée75001 Paris"), parts("", "Allée", "75001"));
        assert_eq!(
            decompose("12 Rue André75001 Paris"),
            parts("12", "Rue André", "75001")
        );
        assert!(validate_address("12 Rue André75001 Paris").is_valid());
        // ASCII letters still glue to digits.
        assert_eq!(decompose("Rue A75001"), parts("", "Rue A75001", ""));
    }

    #[test]
    fn test_recompose() {
        assert_eq!(recompose("12", "Rue de la Paix", "75001"), "12 Rue de la Paix 75001");
        assert_eq!(recompose("", "", "75001"), "75001");
        assert_eq!(recompose("  ", " ", ""), "");
        assert_eq!(
            parts("12", "Rue de la Paix", "75001").to_string(),
            "12 Rue de la Paix 75001"
        );
    }

    #[test]
    fn test_round_trip() {
        let x = decompose("12 Rue de la Paix 75001");
        let line = recompose(&x.street_number, &x.street_name, &x.postal_code);
        assert!(line.contains("75001"));
        assert!(line.contains("Rue de la Paix"));

        for number in ["1", "12", "123", "12345", "123456"] {
            for name in ["Rue de la Paix", "Avenue du 8 Mai 1945", "Allée des Érables", "B Rue"] {
                for postal in ["75001", "13008", ""] {
                    let back = decompose(&recompose(number, name, postal));
                    assert_eq!(back.postal_code, postal, "{number} {name} {postal}");
                    assert!(back.street_name.contains(name), "{number} {name} {postal}");
                }
            }
        }
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("12 Rue de la Paix, 75001 Paris").is_valid());
        assert!(validate_address("Chemin d'Aigues-Mortes 30220").is_valid());

        let short = validate_address("12 Rue");
        assert!(short.error().unwrap().contains("10 caractères"));

        let no_postal = validate_address("12 Rue de la Paix Paris");
        assert!(no_postal.error().unwrap().contains("code postal"));

        assert!(matches!(
            check_address("12 Rue de la Paix; 75001"),
            Err(ValidationError::InvalidCharacters { .. })
        ));
        assert!(matches!(
            check_address("12 34 56, 75001 A"),
            Err(ValidationError::TooFewLetters { .. })
        ));
        assert!(matches!(check_address("   "), Err(ValidationError::Required { .. })));
    }
}
