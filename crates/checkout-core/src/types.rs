//! # Domain Types
//!
//! Value types shared by the validators, the address decomposer and the
//! checkout gate.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ValidationResult │   │AddressComponents│   │   YearMonth     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  valid          │   │  street_number  │   │  year           │       │
//! │  │  error (FR msg) │   │  street_name    │   │  month          │       │
//! │  │                 │   │  postal_code    │   │  (injected now) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   YearFormat    │   │ QuantityInput   │                             │
//! │  │  Short (YY)     │   │  Count(i64)     │                             │
//! │  │  Full (YYYY)    │   │  Text(String)   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every value here is produced and consumed within a single validation call.

use chrono::Datelike;
use serde::{de, Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{FieldResult, ValidationError};

// =============================================================================
// Validation Result
// =============================================================================

/// Wire shape of a validation outcome: `{ valid, error }`.
///
/// `valid == true` exactly when `error` is `None`. Fields are private so the
/// invariant cannot be broken after construction, and deserializing rejects
/// payloads that break it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ValidationResult {
    valid: bool,
    error: Option<String>,
}

impl ValidationResult {
    /// An accepted field.
    pub fn ok() -> Self {
        ValidationResult {
            valid: true,
            error: None,
        }
    }

    /// A rejected field carrying the error's French message.
    pub fn rejected(err: &ValidationError) -> Self {
        ValidationResult {
            valid: false,
            error: Some(err.to_string()),
        }
    }

    /// Whether the field was accepted.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The rejection message, if any.
    #[inline]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Deserialize)]
struct RawValidationResult {
    valid: bool,
    #[serde(default)]
    error: Option<String>,
}

impl<'de> Deserialize<'de> for ValidationResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawValidationResult::deserialize(deserializer)?;
        match (raw.valid, raw.error) {
            (true, None) => Ok(ValidationResult::ok()),
            (false, Some(error)) => Ok(ValidationResult {
                valid: false,
                error: Some(error),
            }),
            (true, Some(_)) => Err(de::Error::custom("a valid result cannot carry an error")),
            (false, None) => Err(de::Error::custom("a rejected result must carry an error")),
        }
    }
}

impl From<FieldResult> for ValidationResult {
    fn from(result: FieldResult) -> Self {
        match result {
            Ok(()) => ValidationResult::ok(),
            Err(err) => ValidationResult::rejected(&err),
        }
    }
}

// =============================================================================
// Address Components
// =============================================================================

/// A postal address split into the three parts an order carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressComponents {
    pub street_number: String,
    pub street_name: String,
    pub postal_code: String,
}

impl AddressComponents {
    /// Returns true if every part is empty.
    pub fn is_empty(&self) -> bool {
        self.street_number.is_empty() && self.street_name.is_empty() && self.postal_code.is_empty()
    }
}

// =============================================================================
// Year / Month
// =============================================================================

/// A calendar month, ordered chronologically.
///
/// Used as the injected "today" of expiry validation so the check stays pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    #[inline]
    pub const fn new(year: i32, month: u32) -> Self {
        YearMonth { year, month }
    }

    /// The current month on the local clock.
    pub fn current() -> Self {
        let now = chrono::Local::now();
        YearMonth::new(now.year(), now.month())
    }
}

/// Which expiry year spelling the caller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum YearFormat {
    /// Two digits ("27"), expanded by adding 2000.
    Short,
    /// Four digits ("2027").
    Full,
}

impl YearFormat {
    /// Number of digits this format requires.
    #[inline]
    pub const fn digits(&self) -> usize {
        match self {
            YearFormat::Short => 2,
            YearFormat::Full => 4,
        }
    }
}

// =============================================================================
// Quantity Input
// =============================================================================

/// A quantity as it arrives from a form: either a number or numeric text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum QuantityInput {
    Count(i64),
    Text(String),
}

impl From<i64> for QuantityInput {
    fn from(value: i64) -> Self {
        QuantityInput::Count(value)
    }
}

impl From<&str> for QuantityInput {
    fn from(value: &str) -> Self {
        QuantityInput::Text(value.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
