//! Builders for domain primitives used across tests.

use futures_util::stream::{self, StreamExt};
use rust_decimal::Decimal;

use crate::domain::id::{ProductId, SaleId};
use crate::domain::row::TrainingRow;
use crate::error::Result;
use crate::port::inbound::similarity::TrainingRows;

/// Build a training row, panicking on invalid input.
pub fn row(sale: &str, product: &str, unit_price: Decimal, quantity: u32) -> TrainingRow {
    TrainingRow::try_new(SaleId::new(sale), ProductId::new(product), unit_price, quantity)
        .unwrap_or_else(|e| panic!("invalid test row: {e}"))
}

/// Wrap rows in the lazy sequence type consumed by training.
pub fn rows(rows: Vec<TrainingRow>) -> TrainingRows {
    stream::iter(rows.into_iter().map(Ok)).boxed()
}

/// Wrap pre-computed items (including errors) in a lazy sequence.
pub fn results(items: Vec<Result<TrainingRow>>) -> TrainingRows {
    stream::iter(items).boxed()
}

/// Convert string literals into product identifiers.
pub fn products(ids: &[&str]) -> Vec<ProductId> {
    ids.iter().map(|id| ProductId::new(*id)).collect()
}
