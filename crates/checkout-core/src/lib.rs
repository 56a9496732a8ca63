//! # checkout-core: Pure Checkout Validation
//!
//! This crate decides whether payment and shipping data submitted at checkout
//! are well-formed. Every function is pure, with zero I/O dependencies, so the
//! same rules can run behind the storefront and in the order backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Guard Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (TypeScript)                      │   │
//! │  │    Card form ──► Shipping form ──► Address autocomplete        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON payload                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ checkout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ sanitize  │  │ checksum  │  │validation │  │  address  │  │   │
//! │  │   │  digits   │  │  mod-10   │  │  fields   │  │ split/join│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                        ┌───────────┐                            │   │
//! │  │                        │ checkout  │ whole-form gate            │   │
//! │  │                        └───────────┘                            │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK (injected) • PURE FUNCTIONS    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              checkout-geo (Address Directory Client)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sanitize`] - Digit-only and whitespace-collapsed canonical forms
//! - [`checksum`] - Card number mod-10 checksum
//! - [`validation`] - One validator per checkout field
//! - [`address`] - Address decomposition, recomposition, full-line validator
//! - [`checkout`] - Whole-form gate used before an order is accepted
//! - [`types`] - `ValidationResult`, `AddressComponents`, `YearMonth`, ...
//! - [`error`] - `ValidationError` with its French messages
//!
//! ## Design Principles
//!
//! 1. **Total Functions**: Validators never panic; bad input yields a result
//! 2. **Sanitize First**: Separators never cause a numeric field rejection
//! 3. **Injected Time**: Expiry checks take the current month as a parameter
//! 4. **Stable Messages**: French messages are part of the contract
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::address::decompose;
//! use checkout_core::validation::validate_card_number;
//!
//! assert!(validate_card_number("4111 1111 1111 1111").is_valid());
//!
//! let parts = decompose("12 Rue de la Paix 75001");
//! assert_eq!(parts.postal_code, "75001");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod checkout;
pub mod checksum;
pub mod error;
pub mod sanitize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::decompose` instead of
// `use checkout_core::address::decompose`

pub use address::{decompose, recompose, validate_address};
pub use checkout::{validate_checkout, CheckoutForm, CheckoutReport, FieldReport};
pub use checksum::is_valid_checksum;
pub use error::{FieldResult, RejectionKind, ValidationError};
pub use sanitize::sanitize_numeric;
pub use types::*;
