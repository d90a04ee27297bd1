use crate::domain::prediction::Category;
use crate::estimator::round_cents;
use crate::history::HistoryRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const ACCURACY_LABEL_FORMAT: &str = "%b %d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: Category,
    pub count: usize,
    /// Whole percent, half rounded up.
    pub average_accuracy: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyPoint {
    pub label: String,
    pub accuracy: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_accuracy: Decimal,
    pub categories: Vec<CategoryStat>,
    pub most_accurate_category: Option<Category>,
    pub accuracy_series: Vec<AccuracyPoint>,
}

impl HistoryStats {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let categories = category_summary(records);
        Self {
            total: records.len(),
            average_accuracy: average_accuracy(records),
            most_accurate_category: most_accurate(&categories),
            categories,
            accuracy_series: accuracy_series(records),
        }
    }
}

/// Mean accuracy to two decimals; zero for an empty list.
pub fn average_accuracy(records: &[HistoryRecord]) -> Decimal {
    if records.is_empty() {
        return Decimal::ZERO;
    }
    let sum: u32 = records.iter().map(|r| u32::from(r.accuracy_percent)).sum();
    round_cents(Decimal::from(sum) / Decimal::from(records.len()))
}

/// Per-category counts and mean accuracy, in [`Category::ALL`] order, skipping empty categories.
pub fn category_summary(records: &[HistoryRecord]) -> Vec<CategoryStat> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let (count, sum) = records
                .iter()
                .filter(|r| r.category == *category)
                .fold((0u32, 0u32), |(n, s), r| {
                    (n + 1, s + u32::from(r.accuracy_percent))
                });
            if count == 0 {
                return None;
            }
            Some(CategoryStat {
                category: *category,
                count: count as usize,
                average_accuracy: (2 * sum + count) / (2 * count),
            })
        })
        .collect()
}

// Ties go to the earlier category.
fn most_accurate(categories: &[CategoryStat]) -> Option<Category> {
    let mut best: Option<&CategoryStat> = None;
    for stat in categories {
        if best.map_or(true, |b| stat.average_accuracy > b.average_accuracy) {
            best = Some(stat);
        }
    }
    best.map(|s| s.category)
}

/// Accuracy over time, oldest first, labelled like "Mar 25".
pub fn accuracy_series(records: &[HistoryRecord]) -> Vec<AccuracyPoint> {
    let mut ordered: Vec<&HistoryRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.timestamp);
    ordered
        .into_iter()
        .map(|r| AccuracyPoint {
            label: r.timestamp.format(ACCURACY_LABEL_FORMAT).to_string(),
            accuracy: r.accuracy_percent,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryBook;
    use rust_decimal_macros::dec;

    #[test]
    fn seeded_stats_match_dashboard_figures() {
        let stats = HistoryBook::seeded().stats();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.average_accuracy, dec!(92.40));

        let summary: Vec<_> = stats
            .categories
            .iter()
            .map(|c| (c.category, c.count, c.average_accuracy))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Category::Electronics, 2, 93),
                (Category::Clothing, 1, 88),
                (Category::Furniture, 2, 94),
            ]
        );
        assert_eq!(stats.most_accurate_category, Some(Category::Furniture));
    }

    #[test]
    fn accuracy_series_is_oldest_first() {
        let series = accuracy_series(HistoryBook::seeded().list());
        let points: Vec<_> = series
            .iter()
            .map(|p| (p.label.as_str(), p.accuracy))
            .collect();
        assert_eq!(
            points,
            vec![
                ("Mar 25", 92),
                ("Mar 28", 92),
                ("Apr 01", 96),
                ("Apr 03", 88),
                ("Apr 05", 94),
            ]
        );
    }

    #[test]
    fn empty_history_has_zero_average_and_no_leader() {
        let stats = HistoryStats::from_records(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_accuracy, Decimal::ZERO);
        assert!(stats.categories.is_empty());
        assert_eq!(stats.most_accurate_category, None);
        assert!(stats.accuracy_series.is_empty());
    }

    #[test]
    fn stats_follow_deletions() {
        let mut book = HistoryBook::seeded();
        book.delete(3);
        let stats = book.stats();
        assert_eq!(stats.total, 4);
        // (94 + 88 + 92 + 92) / 4
        assert_eq!(stats.average_accuracy, dec!(91.50));
        assert_eq!(stats.most_accurate_category, Some(Category::Electronics));
    }

    #[test]
    fn category_average_rounds_half_up() {
        let mut book = HistoryBook::seeded();
        book.delete(3);
        book.delete(5);
        let mut records = book.list().to_vec();
        records[0].accuracy_percent = 93;
        // electronics: (93 + 92) / 2 = 92.5
        let summary = category_summary(&records);
        assert_eq!(summary[0].category, Category::Electronics);
        assert_eq!(summary[0].average_accuracy, 93);
    }
}
