pub mod seed;
pub mod stats;

use crate::domain::prediction::Category;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type RecordId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: RecordId,
    pub product_name: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub predicted_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub actual_price: Decimal,
    pub timestamp: NaiveDateTime,
    pub accuracy_percent: u8,
}

/// Direction of the actual price relative to the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceMovement {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AccuracyBand {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            95.. => AccuracyBand::Excellent,
            90..=94 => AccuracyBand::Good,
            80..=89 => AccuracyBand::Fair,
            _ => AccuracyBand::Poor,
        }
    }
}

impl HistoryRecord {
    pub fn movement(&self) -> PriceMovement {
        match self.actual_price.cmp(&self.predicted_price) {
            std::cmp::Ordering::Greater => PriceMovement::Up,
            std::cmp::Ordering::Less => PriceMovement::Down,
            std::cmp::Ordering::Equal => PriceMovement::Flat,
        }
    }

    /// Absolute gap between actual and predicted price.
    pub fn difference(&self) -> Decimal {
        (self.actual_price - self.predicted_price).abs()
    }

    pub fn accuracy_band(&self) -> AccuracyBand {
        AccuracyBand::from_percent(self.accuracy_percent)
    }
}

/// Session-local list of past predictions. Only ever shrinks: records leave through
/// [`HistoryBook::delete`] and nothing is written anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryBook {
    records: Vec<HistoryRecord>,
}

impl HistoryBook {
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn seeded() -> Self {
        Self::new(seed::seed_records())
    }

    pub fn list(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes the record with `id`, keeping the others in order. Unknown ids are a no-op.
    /// Returns whether a record was removed.
    pub fn delete(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        tracing::debug!(id, removed, remaining = self.records.len(), "history delete");
        removed
    }

    pub fn stats(&self) -> stats::HistoryStats {
        stats::HistoryStats::from_records(&self.records)
    }
}
