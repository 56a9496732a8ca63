//! # Error Types
//!
//! Rejection reasons produced by the checkout validators.
//!
//! ## Rejection Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rejection Kinds                                  │
//! │                                                                         │
//! │  Missing   - field absent, null or blank          "champ requis"       │
//! │  Format    - length or character class wrong      "5 chiffres"         │
//! │  Semantic  - well-formed but wrong                 checksum, expiry,    │
//! │                                                    phone prefix        │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationResult { valid, error } → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Messages
//! Every `Display` string is French and is part of the observable contract.
//! Callers and tests should match on stable fragments ("5 chiffres",
//! "13 à 19", "06 ou 07") rather than whole sentences.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Rejection Kind
// =============================================================================

/// Coarse category of a rejection.
///
/// Lets a caller tell "malformed" apart from "well-formed but wrong" without
/// parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// The field is absent or blank.
    Missing,
    /// Length or character-class failure.
    Format,
    /// Domain rule failure (checksum, expiry, phone prefix).
    Semantic,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Why a field was rejected.
///
/// `field` values are already phrased for the sentence they land in
/// ("Le code postal", "L'adresse", or the caller-supplied label for names).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} : champ requis")]
    Required { field: String },

    /// Text is shorter than the minimum length.
    #[error("{field} doit contenir au moins {min} caractères")]
    TooShort { field: String, min: usize },

    /// Text is longer than the maximum length.
    #[error("{field} ne peut pas dépasser {max} caractères")]
    TooLong { field: String, max: usize },

    /// Text contains characters outside the allowed set.
    #[error("{field} contient des caractères non autorisés")]
    InvalidCharacters { field: String },

    /// Text does not contain enough letters.
    #[error("{field} doit contenir au moins {min} lettres")]
    TooFewLetters { field: String, min: usize },

    /// A name contains digits.
    #[error("{field} ne peut pas contenir de chiffres")]
    ContainsDigits { field: String },

    /// Sanitized digit count is wrong.
    ///
    /// `expected` is the human range: "5", "3 ou 4", "13 à 19".
    #[error("{field} doit contenir {expected} chiffres")]
    DigitCount { field: String, expected: String },

    /// No digit at all where only digits are expected.
    #[error("{field} ne doit contenir que des chiffres")]
    DigitsOnly { field: String },

    /// Expiry month outside 01..=12.
    #[error("Le mois d'expiration doit être compris entre 01 et 12")]
    MonthOutOfRange,

    /// Card number is well-formed but fails the mod-10 checksum.
    #[error("Le numéro de carte est invalide")]
    InvalidCardNumber,

    /// Expiry date is before the current month.
    #[error("La carte est expirée ou la date d'expiration est invalide")]
    Expired,

    /// Phone number does not start with a mobile prefix.
    #[error("Le numéro de téléphone doit commencer par 06 ou 07")]
    InvalidPhonePrefix,

    /// Full address carries no standalone 5-digit postal code.
    #[error("L'adresse doit contenir un code postal à 5 chiffres")]
    MissingPostalCode,

    /// Quantity is not a whole number of at least one.
    #[error("Quantité invalide")]
    InvalidQuantity,
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::DigitCount`].
    pub fn digit_count(field: impl Into<String>, expected: impl Into<String>) -> Self {
        ValidationError::DigitCount {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Returns the coarse category of this rejection.
    pub fn kind(&self) -> RejectionKind {
        match self {
            ValidationError::Required { .. } => RejectionKind::Missing,
            ValidationError::InvalidCardNumber
            | ValidationError::Expired
            | ValidationError::InvalidPhonePrefix => RejectionKind::Semantic,
            _ => RejectionKind::Format,
        }
    }
}

/// Result of a typed field check.
pub type FieldResult = Result<(), ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::digit_count("Le code postal", "5");
        assert_eq!(err.to_string(), "Le code postal doit contenir 5 chiffres");

        let err = ValidationError::TooShort {
            field: "Le prénom".to_string(),
            min: 2,
        };
        assert_eq!(
            err.to_string(),
            "Le prénom doit contenir au moins 2 caractères"
        );
    }

    #[test]
    fn test_rejection_kinds() {
        assert_eq!(ValidationError::required("Le CVV").kind(), RejectionKind::Missing);
        assert_eq!(
            ValidationError::digit_count("Le CVV", "3 ou 4").kind(),
            RejectionKind::Format
        );
        assert_eq!(ValidationError::InvalidCardNumber.kind(), RejectionKind::Semantic);
        assert_eq!(ValidationError::Expired.kind(), RejectionKind::Semantic);
        assert_eq!(ValidationError::InvalidPhonePrefix.kind(), RejectionKind::Semantic);
        assert_eq!(ValidationError::MissingPostalCode.kind(), RejectionKind::Format);
    }
}
