//! Handler for the `generations` command.

use chrono::{DateTime, SecondsFormat};
use serde_json::json;

use crate::adapter::inbound::cli::output::{self, Cell, Table, Tone};
use crate::domain::generation::GenerationStatus;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::GenerationStore;

const WIDTHS: [usize; 4] = [22, 24, 10, 6];

/// Execute the generations command.
pub async fn execute(config: &Config) -> Result<()> {
    let store = bootstrap::build_store(&config.model);
    let generations = store.list().await?;
    let latest = store.latest().await?;

    let mut rows = Vec::with_capacity(generations.len());
    for generation in generations.iter().rev() {
        let status = store.status(generation).await?;
        let is_latest = latest.as_ref().is_some_and(|l| l == generation);
        rows.push((generation, status, is_latest));
    }

    if output::is_json() {
        let entries: Vec<_> = rows
            .iter()
            .map(|(generation, status, is_latest)| {
                json!({
                    "path": generation.path().display().to_string(),
                    "created_at_ms": generation.created_at_epoch_ms(),
                    "status": status.to_string(),
                    "latest": is_latest,
                })
            })
            .collect();
        output::document(json!({
            "root": store.root().display().to_string(),
            "generations": entries,
        }));
        return Ok(());
    }

    output::field("Root", store.root().display());
    if rows.is_empty() {
        output::note("No model generations found");
        return Ok(());
    }

    let table = Table::start(&[
        ("Generation", WIDTHS[0]),
        ("Created", WIDTHS[1]),
        ("Status", WIDTHS[2]),
        ("Latest", WIDTHS[3]),
    ]);
    for (generation, status, is_latest) in rows {
        let name = generation
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tone = match status {
            GenerationStatus::Usable => Tone::Good,
            GenerationStatus::Failed => Tone::Bad,
            GenerationStatus::Incomplete => Tone::Dim,
        };
        table.row(&[
            Cell::plain(name),
            Cell::plain(created_at(generation.created_at_epoch_ms())),
            Cell::new(status, tone),
            Cell::plain(if is_latest { "*" } else { "" }),
        ]);
    }
    Ok(())
}

fn created_at(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| epoch_ms.to_string())
}
