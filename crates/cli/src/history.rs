use clap::Args;
use pricewise_core::config::Settings;
use pricewise_core::history::stats::HistoryStats;
use pricewise_core::history::{HistoryBook, HistoryRecord, RecordId};
use serde::Serialize;

#[derive(Debug, Clone, Default, Args)]
pub struct HistoryArgs {
    /// Remove the record with this id before printing. Repeatable.
    #[arg(long = "remove", value_name = "ID")]
    remove: Vec<RecordId>,
}

#[derive(Debug, Serialize)]
struct HistoryReport {
    records: Vec<HistoryRecord>,
    removed: Vec<RecordId>,
    stats: HistoryStats,
}

pub fn run(settings: &Settings, args: HistoryArgs) -> anyhow::Result<serde_json::Value> {
    let report = build_report(settings.initial_history(), &args.remove);
    tracing::info!(
        records = report.records.len(),
        removed = report.removed.len(),
        "history report built"
    );
    Ok(serde_json::to_value(report)?)
}

fn build_report(mut book: HistoryBook, remove: &[RecordId]) -> HistoryReport {
    let mut removed = Vec::new();
    for &id in remove {
        if book.delete(id) {
            removed.push(id);
        } else {
            tracing::warn!(id, "no history record with this id");
        }
    }

    HistoryReport {
        stats: book.stats(),
        records: book.list().to_vec(),
        removed,
    }
}
