//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs
//! before they reach the training file.
//!
//! # Examples
//!
//! ```
//! use simlife::domain::error::DomainError;
//! use simlife::domain::id::{ProductId, SaleId};
//! use simlife::domain::row::TrainingRow;
//! use rust_decimal_macros::dec;
//!
//! // Commas would shift the delimited columns
//! let result = TrainingRow::try_new(
//!     SaleId::new("sale,1"),
//!     ProductId::new("p1"),
//!     dec!(10.00),
//!     1,
//! );
//!
//! assert!(matches!(result, Err(DomainError::InvalidIdentifier { field: "sale_id", .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Identifiers end up unquoted in a comma-delimited file.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidIdentifier {
        /// Which identifier was rejected.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Unit price must not be negative.
    #[error("unit price must not be negative, got {price}")]
    NegativeUnitPrice {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// A sale line must move at least one unit.
    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The invalid quantity that was provided.
        quantity: u32,
    },

    /// A model root entry name did not encode a generation timestamp.
    #[error("'{name}' is not a model generation directory name")]
    InvalidGenerationName {
        /// The directory name that failed to parse.
        name: String,
    },
}
