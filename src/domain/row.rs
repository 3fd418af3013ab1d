//! Historical sale lines used as training input.

use rust_decimal::Decimal;

use super::error::DomainError;
use super::id::{ProductId, SaleId};

/// One sold product within one sale.
///
/// Rows are produced lazily by a training source and live only for the
/// duration of a single training run. Construction validates that every
/// field can be written unquoted into the comma-delimited training file.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    sale_id: SaleId,
    product_id: ProductId,
    unit_price: Decimal,
    quantity: u32,
}

impl TrainingRow {
    /// Create a validated training row.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] when an identifier is empty
    /// or contains a delimiter or line break, [`DomainError::NegativeUnitPrice`]
    /// for prices below zero and [`DomainError::NonPositiveQuantity`] for a
    /// zero quantity.
    pub fn try_new(
        sale_id: SaleId,
        product_id: ProductId,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        validate_identifier("sale_id", sale_id.as_str())?;
        validate_identifier("product_id", product_id.as_str())?;

        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(DomainError::NegativeUnitPrice { price: unit_price });
        }
        if quantity == 0 {
            return Err(DomainError::NonPositiveQuantity { quantity });
        }

        Ok(Self {
            sale_id,
            product_id,
            unit_price,
            quantity,
        })
    }

    #[must_use]
    pub fn sale_id(&self) -> &SaleId {
        &self.sale_id
    }

    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

fn validate_identifier(field: &'static str, value: &str) -> Result<(), DomainError> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains(',') {
        "must not contain commas"
    } else if value.contains(['\n', '\r']) {
        "must not contain line breaks"
    } else {
        return Ok(());
    };

    Err(DomainError::InvalidIdentifier {
        field,
        value: value.to_string(),
        reason,
    })
}
