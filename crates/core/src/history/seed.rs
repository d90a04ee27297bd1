use crate::domain::prediction::Category;
use crate::history::HistoryRecord;
use chrono::NaiveDateTime;
use rust_decimal_macros::dec;

const SEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The demo's past predictions, newest first.
pub fn seed_records() -> Vec<HistoryRecord> {
    [
        (1, "Smartphone X23", Category::Electronics, dec!(799.99), dec!(849.99), "2025-04-05T14:30:00", 94),
        (2, "Designer Jeans", Category::Clothing, dec!(89.95), dec!(79.99), "2025-04-03T09:15:00", 88),
        (3, "Coffee Table", Category::Furniture, dec!(249.50), dec!(259.99), "2025-04-01T11:45:00", 96),
        (4, "Fitness Tracker", Category::Electronics, dec!(129.99), dec!(119.99), "2025-03-28T16:20:00", 92),
        (5, "Desk Lamp", Category::Furniture, dec!(45.99), dec!(49.99), "2025-03-25T10:30:00", 92),
    ]
    .into_iter()
    .filter_map(
        |(id, product_name, category, predicted_price, actual_price, timestamp, accuracy_percent)| {
            let timestamp = NaiveDateTime::parse_from_str(timestamp, SEED_TIMESTAMP_FORMAT).ok()?;
            Some(HistoryRecord {
                id,
                product_name: product_name.to_string(),
                category,
                predicted_price,
                actual_price,
                timestamp,
                accuracy_percent,
            })
        },
    )
    .collect()
}
