//! Shared conformance vectors.
//!
//! `vectors/conformance.json` is the single description of how checkout
//! input must be judged. The storefront runs the same file against its own
//! implementation; both must agree on every entry.

use checkout_core::address::{decompose, validate_address};
use checkout_core::checksum::is_valid_checksum;
use checkout_core::sanitize::sanitize_value;
use checkout_core::types::{QuantityInput, ValidationResult, YearFormat, YearMonth};
use checkout_core::validation::*;
use serde::Deserialize;
use serde_json::Value;

const VECTORS: &str = include_str!("vectors/conformance.json");

#[derive(Debug, Deserialize)]
struct Suite {
    today: YearMonth,
    checksum: Vec<ChecksumVector>,
    fields: Vec<FieldVector>,
    decompose: Vec<DecomposeVector>,
}

#[derive(Debug, Deserialize)]
struct ChecksumVector {
    input: Value,
    valid: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldVector {
    validator: String,
    #[serde(default)]
    input: Value,
    #[serde(default)]
    month: Value,
    #[serde(default)]
    year: Value,
    label: Option<String>,
    format: Option<YearFormat>,
    valid: bool,
    error_contains: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecomposeVector {
    input: String,
    street_number: String,
    street_name: String,
    postal_code: String,
}

fn suite() -> Suite {
    serde_json::from_str(VECTORS).expect("conformance vectors must parse")
}

/// Text input as a validator sees it: non-string JSON is absent.
fn text(value: &Value) -> &str {
    value.as_str().unwrap_or("")
}

fn run(vector: &FieldVector, today: YearMonth) -> ValidationResult {
    let input = text(&vector.input);
    match vector.validator.as_str() {
        "cardNumber" => validate_card_number(input),
        "cvv" => validate_cvv(input),
        "expiryMonth" => validate_expiry_month(input),
        "expiryYear" => validate_expiry_year(input, vector.format.expect("format")),
        "expiryDate" => validate_expiry_date(text(&vector.month), text(&vector.year), today),
        "postalCode" => validate_postal_code(input),
        "phone" => validate_phone(input),
        "streetNumber" => validate_street_number(input),
        "streetName" => validate_street_name(input),
        "personName" => validate_person_name(input, vector.label.as_deref().unwrap_or("Le nom")),
        "address" => validate_address(input),
        "quantity" => {
            let quantity: Option<QuantityInput> = serde_json::from_value(vector.input.clone()).ok();
            match quantity {
                Some(quantity) => validate_quantity(&quantity),
                None => validate_quantity(&QuantityInput::Text(String::new())),
            }
        }
        other => panic!("unknown validator in vectors: {other}"),
    }
}

#[test]
fn field_vectors() {
    let suite = suite();
    assert!(!suite.fields.is_empty());

    for vector in &suite.fields {
        let result = run(vector, suite.today);
        assert_eq!(result.is_valid(), vector.valid, "{vector:?} → {result:?}");
        // valid ⇔ no error
        assert_eq!(result.error().is_none(), result.is_valid(), "{vector:?}");

        if let Some(fragment) = &vector.error_contains {
            let message = result.error().unwrap_or_default();
            assert!(
                message.contains(fragment.as_str()),
                "{vector:?}: expected {fragment:?} in {message:?}"
            );
        }
    }
}

#[test]
fn checksum_vectors() {
    for vector in suite().checksum {
        let digits = sanitize_value(&vector.input);
        assert_eq!(is_valid_checksum(&digits), vector.valid, "{vector:?}");
    }
}

#[test]
fn decompose_vectors() {
    for vector in suite().decompose {
        let parts = decompose(&vector.input);
        assert_eq!(parts.street_number, vector.street_number, "{vector:?}");
        assert_eq!(parts.street_name, vector.street_name, "{vector:?}");
        assert_eq!(parts.postal_code, vector.postal_code, "{vector:?}");
    }
}
