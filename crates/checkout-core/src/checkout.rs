//! # Checkout Gate
//!
//! Runs every field validator over a submitted checkout form and produces the
//! report the order-submission layer gates on.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront "Commander" ──► CheckoutForm (JSON)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_checkout(form, today) ← THIS MODULE                          │
//! │       │                                                                 │
//! │       ├── payment:  card number, CVV, expiry date                      │
//! │       ├── identity: first name, last name, phone                       │
//! │       ├── shipping: street number, street name, postal code            │
//! │       │             (split from `address` when only a line is given)   │
//! │       └── quantity                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutReport { valid, fields[], address } ──► persist or reject     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields that arrive as the wrong JSON type (a number where text is
//! expected, an array, ...) are treated as absent and rejected as required.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::address::{check_address, decompose};
use crate::error::{FieldResult, ValidationError};
use crate::types::{AddressComponents, QuantityInput, ValidationResult, YearMonth};
use crate::validation::{
    check_card_number, check_cvv, check_expiry_date, check_person_name, check_phone,
    check_postal_code, check_quantity, check_street_name, check_street_number,
};

pub const LABEL_FIRST_NAME: &str = "Le prénom";
pub const LABEL_LAST_NAME: &str = "Le nom";

// =============================================================================
// Checkout Form
// =============================================================================

/// The checkout payload as submitted by the storefront.
///
/// Either the three address parts or the single `address` line may be sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default, deserialize_with = "text_or_absent")]
    pub card_number: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub cvv: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub expiry_month: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub expiry_year: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub street_number: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub street_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_absent")]
    pub postal_code: Option<String>,
    /// Free-text shipping line, split when the parts above are empty.
    #[serde(default, deserialize_with = "text_or_absent")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "quantity_or_absent")]
    pub quantity: Option<QuantityInput>,
}

/// Keeps JSON strings, drops every other JSON type.
fn text_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Keeps integers and strings, drops every other JSON type.
fn quantity_or_absent<'de, D>(deserializer: D) -> Result<Option<QuantityInput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(QuantityInput::Text(text)),
        Value::Number(number) => number.as_i64().map(QuantityInput::Count),
        _ => None,
    })
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

fn is_present(field: &Option<String>) -> bool {
    !text(field).trim().is_empty()
}

impl CheckoutForm {
    /// Shipping parts: the explicit fields when any is given, otherwise the
    /// decomposition of `address`.
    pub fn address_components(&self) -> AddressComponents {
        let has_parts = is_present(&self.street_number)
            || is_present(&self.street_name)
            || is_present(&self.postal_code);

        if !has_parts {
            if let Some(line) = self.address.as_deref() {
                return decompose(line);
            }
        }

        AddressComponents {
            street_number: text(&self.street_number).trim().to_string(),
            street_name: text(&self.street_name).trim().to_string(),
            postal_code: text(&self.postal_code).trim().to_string(),
        }
    }
}

// =============================================================================
// Checkout Report
// =============================================================================

/// The outcome for one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldReport {
    pub field: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// The outcome for a whole form, fields in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutReport {
    pub valid: bool,
    pub fields: Vec<FieldReport>,
    /// Shipping parts the order would be persisted with.
    pub address: AddressComponents,
}

impl CheckoutReport {
    /// The result for `field`, if it was checked.
    pub fn get(&self, field: &str) -> Option<&ValidationResult> {
        self.fields
            .iter()
            .find(|report| report.field == field)
            .map(|report| &report.result)
    }

    /// The first rejected field in form order.
    pub fn first_error(&self) -> Option<&FieldReport> {
        self.fields.iter().find(|report| !report.result.is_valid())
    }

    /// Rejected fields only.
    pub fn errors(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|report| !report.result.is_valid())
    }
}

// =============================================================================
// Gate
// =============================================================================

/// Validates every field of `form` against the rules shared with the
/// storefront.
///
/// ## Example
/// ```rust
/// use checkout_core::checkout::{validate_checkout, CheckoutForm};
/// use checkout_core::types::YearMonth;
///
/// let form: CheckoutForm = serde_json::from_value(serde_json::json!({
///     "cardNumber": "4111 1111 1111 1111",
///     "cvv": "123",
///     "expiryMonth": "12",
///     "expiryYear": "2030",
///     "firstName": "Camille",
///     "lastName": "Durand",
///     "phone": "06 12 34 56 78",
///     "address": "12 Rue de la Paix, 75001 Paris",
///     "quantity": 2
/// }))
/// .unwrap();
///
/// let report = validate_checkout(&form, YearMonth::new(2026, 10));
/// assert!(report.valid);
/// assert_eq!(report.address.postal_code, "75001");
/// ```
pub fn validate_checkout(form: &CheckoutForm, today: YearMonth) -> CheckoutReport {
    let address = form.address_components();

    let mut checks: Vec<(&str, FieldResult)> = vec![
        ("cardNumber", check_card_number(text(&form.card_number))),
        ("cvv", check_cvv(text(&form.cvv))),
        (
            "expiryDate",
            check_expiry_date(text(&form.expiry_month), text(&form.expiry_year), today),
        ),
        ("firstName", check_person_name(text(&form.first_name), LABEL_FIRST_NAME)),
        ("lastName", check_person_name(text(&form.last_name), LABEL_LAST_NAME)),
        ("phone", check_phone(text(&form.phone))),
    ];

    if is_present(&form.address) {
        checks.push(("address", check_address(text(&form.address))));
    }

    checks.extend([
        ("streetNumber", check_street_number(&address.street_number)),
        ("streetName", check_street_name(&address.street_name)),
        ("postalCode", check_postal_code(&address.postal_code)),
        (
            "quantity",
            form.quantity
                .as_ref()
                .map_or(Err(ValidationError::InvalidQuantity), check_quantity),
        ),
    ]);

    let fields: Vec<FieldReport> = checks
        .into_iter()
        .map(|(field, result)| FieldReport {
            field: field.to_string(),
            result: result.into(),
        })
        .collect();

    CheckoutReport {
        valid: fields.iter().all(|report| report.result.is_valid()),
        fields,
        address,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TODAY: YearMonth = YearMonth::new(2026, 10);

    fn valid_payload() -> Value {
        json!({
            "cardNumber": "4111 1111 1111 1111",
            "cvv": "123",
            "expiryMonth": "12",
            "expiryYear": "28",
            "firstName": "Camille",
            "lastName": "Durand",
            "phone": "0612345678",
            "streetNumber": "12",
            "streetName": "Rue de la Paix",
            "postalCode": "75001",
            "quantity": "1"
        })
    }

    fn form(payload: Value) -> CheckoutForm {
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn test_valid_form() {
        let report = validate_checkout(&form(valid_payload()), TODAY);
        assert!(report.valid, "{:?}", report.first_error());
        assert_eq!(report.address.to_string(), "12 Rue de la Paix 75001");
        assert!(report.get("address").is_none());
    }

    #[test]
    fn test_address_line_is_split() {
        let mut payload = valid_payload();
        let object = payload.as_object_mut().unwrap();
        object.remove("streetNumber");
        object.remove("streetName");
        object.remove("postalCode");
        object.insert("address".into(), json!("8 Avenue Foch, 69006 Lyon"));

        let report = validate_checkout(&form(payload), TODAY);
        assert!(report.valid, "{:?}", report.first_error());
        assert_eq!(report.address.street_number, "8");
        assert_eq!(report.address.street_name, "Avenue Foch");
        assert_eq!(report.address.postal_code, "69006");
        assert!(report.get("address").unwrap().is_valid());
    }

    #[test]
    fn test_wrong_json_types_are_absent() {
        let mut payload = valid_payload();
        payload["cardNumber"] = json!(4111111111111111u64);
        payload["phone"] = json!(null);
        payload["quantity"] = json!([1]);

        let report = validate_checkout(&form(payload), TODAY);
        assert!(!report.valid);
        assert!(report.get("cardNumber").unwrap().error().unwrap().contains("requis"));
        assert!(report.get("phone").unwrap().error().unwrap().contains("requis"));
        assert_eq!(report.get("quantity").unwrap().error(), Some("Quantité invalide"));
        assert_eq!(report.first_error().unwrap().field, "cardNumber");
    }

    #[test]
    fn test_errors_in_form_order() {
        let mut payload = valid_payload();
        payload["cvv"] = json!("12");
        payload["postalCode"] = json!("750");
        payload["expiryYear"] = json!("20");

        let report = validate_checkout(&form(payload), TODAY);
        let failed: Vec<&str> = report.errors().map(|r| r.field.as_str()).collect();
        assert_eq!(failed, vec!["cvv", "expiryDate", "postalCode"]);
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = validate_checkout(&CheckoutForm::default(), TODAY);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["fields"][0]["field"], "cardNumber");
        assert_eq!(json["fields"][0]["valid"], false);
        assert!(json["fields"][0]["error"].is_string());
    }

    #[test]
    fn test_report_read_back_keeps_invariant() {
        let report = validate_checkout(&CheckoutForm::default(), TODAY);
        let json = serde_json::to_string(&report).unwrap();
        let read_back: CheckoutReport = serde_json::from_str(&json).unwrap();
        assert_eq!(read_back, report);

        let forged = json!({ "field": "cvv", "valid": true, "error": "Le CVV doit contenir 3 ou 4 chiffres" });
        assert!(serde_json::from_value::<FieldReport>(forged).is_err());
    }
}
