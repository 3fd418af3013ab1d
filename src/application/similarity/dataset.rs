//! Training data file materialization.
//!
//! Rows are serialized and appended one at a time as they arrive from the
//! lazy sequence, so the training set is never held in memory.

use futures_util::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::domain::row::TrainingRow;
use crate::error::Result;
use crate::port::inbound::similarity::TrainingRows;

/// Column header expected by the trainer.
pub const TRAINING_FILE_HEADER: &str = "quantidade_produto,preco_unitario,id_venda,id_produto";

/// Render one row as `quantity,unit_price,sale_id,product_id\n`.
///
/// No quoting is performed; [`TrainingRow`] construction already rejects
/// identifiers containing delimiters.
#[must_use]
pub fn csv_line(row: &TrainingRow) -> String {
    format!(
        "{},{},{},{}\n",
        row.quantity(),
        row.unit_price(),
        row.sale_id(),
        row.product_id()
    )
}

/// Write the header followed by every row of `rows`, then flush.
///
/// Returns the number of data rows written. Stops at the first `Err` item.
pub async fn write_training_file<W>(writer: &mut W, mut rows: TrainingRows) -> Result<u64>
where
    W: AsyncWrite + Unpin + Send,
{
    writer.write_all(TRAINING_FILE_HEADER.as_bytes()).await?;
    writer.write_all(b"\n").await?;

    let mut written = 0u64;
    while let Some(row) = rows.next().await {
        let row = row?;
        writer.write_all(csv_line(&row).as_bytes()).await?;
        written += 1;
    }

    writer.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::error::Error;
    use crate::testkit::domain::{results, row, rows};
    use rust_decimal_macros::dec;

    #[test]
    fn line_uses_fixed_column_order() {
        let line = csv_line(&row("sale-A", "product-X", dec!(1), 100));
        assert_eq!(line, "100,1,sale-A,product-X\n");
    }

    #[test]
    fn line_keeps_decimal_scale() {
        let line = csv_line(&row("s", "p", dec!(19.90), 3));
        assert_eq!(line, "3,19.90,s,p\n");
    }

    #[tokio::test]
    async fn writes_header_then_rows() {
        let mut out: Vec<u8> = Vec::new();
        let count = write_training_file(
            &mut out,
            rows(vec![row("A", "X", dec!(1), 100), row("B", "Y", dec!(2), 200)]),
        )
        .await
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "quantidade_produto,preco_unitario,id_venda,id_produto\n\
             100,1,A,X\n\
             200,2,B,Y\n"
        );
    }

    #[tokio::test]
    async fn empty_sequence_writes_header_only() {
        let mut out: Vec<u8> = Vec::new();
        let count = write_training_file(&mut out, rows(vec![])).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{TRAINING_FILE_HEADER}\n"));
    }

    #[tokio::test]
    async fn stops_at_first_error() {
        let mut out: Vec<u8> = Vec::new();
        let err = write_training_file(
            &mut out,
            results(vec![
                Ok(row("A", "X", dec!(1), 1)),
                Err(DomainError::NonPositiveQuantity { quantity: 0 }.into()),
                Ok(row("B", "Y", dec!(1), 1)),
            ]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Domain(_)));
        let written = String::from_utf8(out).unwrap();
        assert!(written.ends_with("1,1,A,X\n"));
        assert!(!written.contains(",B,"));
    }
}
