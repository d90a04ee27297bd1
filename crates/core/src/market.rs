use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendComparison {
    Above,
    Below,
}

/// Six months of prices for similar products, oldest first.
pub fn price_trend() -> Vec<PricePoint> {
    [
        ("Jan", 150),
        ("Feb", 165),
        ("Mar", 180),
        ("Apr", 170),
        ("May", 190),
        ("Jun", 210),
    ]
    .into_iter()
    .map(|(month, price)| PricePoint {
        month: month.to_string(),
        price: Decimal::from(price),
    })
    .collect()
}

pub fn last_month_price(series: &[PricePoint]) -> Option<Decimal> {
    series.last().map(|p| p.price)
}

/// Whether `price` beats the most recent month of `series`. Equal counts as below.
pub fn compare_to_last_month(price: Decimal, series: &[PricePoint]) -> Option<TrendComparison> {
    let last = last_month_price(series)?;
    Some(if price > last {
        TrendComparison::Above
    } else {
        TrendComparison::Below
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn trend_ends_at_210() {
        let series = price_trend();
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, "Jan");
        assert_eq!(last_month_price(&series), Some(dec!(210)));
    }

    #[test]
    fn compares_against_last_month() {
        let series = price_trend();
        assert_eq!(
            compare_to_last_month(dec!(138.00), &series),
            Some(TrendComparison::Below)
        );
        assert_eq!(
            compare_to_last_month(dec!(250.00), &series),
            Some(TrendComparison::Above)
        );
        assert_eq!(
            compare_to_last_month(dec!(210.00), &series),
            Some(TrendComparison::Below)
        );
    }

    #[test]
    fn empty_series_has_no_comparison() {
        assert_eq!(compare_to_last_month(dec!(1), &[]), None);
    }
}
