//! JSON-lines training source.
//!
//! Reads one sale line per JSON object:
//!
//! ```text
//! {"sale_id":"s-1","product_id":"p-9","unit_price":"19.90","quantity":2}
//! ```
//!
//! The file is streamed line by line; blank lines are skipped and the first
//! malformed line fails the sequence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::domain::id::{ProductId, SaleId};
use crate::domain::row::TrainingRow;
use crate::error::{Error, Result};
use crate::port::inbound::similarity::TrainingRows;
use crate::port::outbound::source::TrainingSource;

#[derive(Deserialize)]
struct RawRow {
    sale_id: String,
    product_id: String,
    unit_price: Decimal,
    quantity: u32,
}

impl TryFrom<RawRow> for TrainingRow {
    type Error = Error;

    fn try_from(raw: RawRow) -> Result<Self> {
        Ok(TrainingRow::try_new(
            SaleId::new(raw.sale_id),
            ProductId::new(raw.product_id),
            raw.unit_price,
            raw.quantity,
        )?)
    }
}

/// Parse a single JSON-lines record.
pub fn parse_line(line: &str) -> Result<TrainingRow> {
    serde_json::from_str::<RawRow>(line)?.try_into()
}

/// Training rows read lazily from a JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonLinesSource {
    path: PathBuf,
    name: String,
}

impl JsonLinesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

struct Cursor {
    lines: Lines<BufReader<File>>,
    done: bool,
}

#[async_trait]
impl TrainingSource for JsonLinesSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn open(&self) -> Result<TrainingRows> {
        let file = File::open(&self.path).await?;
        let cursor = Cursor {
            lines: BufReader::new(file).lines(),
            done: false,
        };

        let rows = stream::unfold(cursor, |mut cursor| async move {
            if cursor.done {
                return None;
            }
            loop {
                match cursor.lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => {
                        let row = parse_line(&line);
                        cursor.done = row.is_err();
                        return Some((row, cursor));
                    }
                    Ok(None) => return None,
                    Err(e) => {
                        cursor.done = true;
                        return Some((Err(e.into()), cursor));
                    }
                }
            }
        });

        Ok(rows.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_numeric_and_string_prices() {
        let row = parse_line(r#"{"sale_id":"s1","product_id":"p1","unit_price":2.5,"quantity":3}"#)
            .unwrap();
        assert_eq!(row.unit_price(), dec!(2.5));

        let row =
            parse_line(r#"{"sale_id":"s1","product_id":"p1","unit_price":"19.90","quantity":1}"#)
                .unwrap();
        assert_eq!(row.unit_price(), dec!(19.90));
    }

    #[test]
    fn domain_violations_surface_as_domain_errors() {
        let err =
            parse_line(r#"{"sale_id":"s,1","product_id":"p1","unit_price":1,"quantity":1}"#)
                .unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn streams_rows_and_skips_blank_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sales.jsonl");
        std::fs::write(
            &path,
            concat!(
                "{\"sale_id\":\"A\",\"product_id\":\"X\",\"unit_price\":1,\"quantity\":100}\n",
                "\n",
                "{\"sale_id\":\"B\",\"product_id\":\"Y\",\"unit_price\":2,\"quantity\":200}\n",
            ),
        )
        .unwrap();

        let source = JsonLinesSource::new(&path);
        let rows: Vec<_> = source.open().await.unwrap().collect().await;

        assert_eq!(rows.len(), 2);
        let second = rows[1].as_ref().unwrap();
        assert_eq!(second.sale_id().as_str(), "B");
        assert_eq!(second.quantity(), 200);
    }

    #[tokio::test]
    async fn stops_after_malformed_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sales.jsonl");
        std::fs::write(
            &path,
            concat!(
                "{\"sale_id\":\"A\",\"product_id\":\"X\",\"unit_price\":1,\"quantity\":1}\n",
                "not json\n",
                "{\"sale_id\":\"B\",\"product_id\":\"Y\",\"unit_price\":1,\"quantity\":1}\n",
            ),
        )
        .unwrap();

        let rows: Vec<_> = JsonLinesSource::new(&path)
            .open()
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        assert!(matches!(rows[1], Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn missing_file_fails_on_open() {
        let source = JsonLinesSource::new("/nonexistent/sales.jsonl");
        assert!(matches!(source.open().await, Err(Error::Io(_))));
    }
}
