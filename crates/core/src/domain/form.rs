use crate::domain::error::EstimateError;
use crate::domain::prediction::{
    Category, Condition, MarketDemand, PredictionInput, Seasonality, MAX_FEATURE_COUNT,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_FEATURE_COUNT: u32 = 3;

/// The predict form as submitted. Selects that start unset are optional here, the base price
/// arrives as free text, and everything is checked by [`PredictionForm::validate_and_into_input`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionForm {
    #[serde(default)]
    pub product_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<Category>,
    #[serde(default = "default_feature_count")]
    pub feature_count: u32,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub base_price: String,
    #[serde(default)]
    pub market_demand: MarketDemand,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub seasonality: Option<Seasonality>,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            category: None,
            feature_count: DEFAULT_FEATURE_COUNT,
            condition: Condition::default(),
            base_price: String::new(),
            market_demand: MarketDemand::default(),
            seasonality: None,
        }
    }
}

impl PredictionForm {
    pub fn validate_and_into_input(self) -> Result<PredictionInput, EstimateError> {
        // Required fields are reported in form order.
        let product_name = self.product_name.trim();
        if product_name.is_empty() {
            return Err(EstimateError::MissingField {
                field: "product_name",
            });
        }
        let category = self
            .category
            .ok_or(EstimateError::MissingField { field: "category" })?;
        let raw_price = self.base_price.trim();
        if raw_price.is_empty() {
            return Err(EstimateError::MissingField {
                field: "base_price",
            });
        }
        let seasonality = self.seasonality.ok_or(EstimateError::MissingField {
            field: "seasonality",
        })?;

        let feature_count = u8::try_from(self.feature_count)
            .ok()
            .filter(|n| *n <= MAX_FEATURE_COUNT)
            .ok_or(EstimateError::FeatureCountOutOfRange {
                got: self.feature_count,
            })?;
        let base_price = parse_base_price(raw_price)?;

        PredictionInput::new(
            product_name,
            category,
            feature_count,
            self.condition,
            base_price,
            self.market_demand,
            seasonality,
        )
    }
}

/// Accepts plain (`"12.50"`) and scientific (`"1.25e1"`) notation. Digits beyond 28 decimal
/// places round away, so `"1e-30"` reads as zero just like its written-out form.
pub fn parse_base_price(raw: &str) -> Result<Decimal, EstimateError> {
    let trimmed = raw.trim();
    let non_numeric = || EstimateError::NonNumericBasePrice {
        raw: raw.to_string(),
    };

    // `Decimal::from_str` tolerates `_` separators; a typed price doesn't.
    if trimmed.contains('_') {
        return Err(non_numeric());
    }

    let (mantissa, exponent) = match trimmed.split_once(|c| c == 'e' || c == 'E') {
        Some((m, e)) => (m, e.parse::<i64>().map_err(|_| non_numeric())?),
        None => (trimmed, 0),
    };
    let mantissa = Decimal::from_str(mantissa).map_err(|_| non_numeric())?;
    if mantissa < Decimal::ZERO {
        return Err(EstimateError::BasePriceOutOfRange {
            raw: trimmed.to_string(),
        });
    }

    apply_exponent(mantissa, exponent).ok_or_else(|| EstimateError::BasePriceOutOfRange {
        raw: trimmed.to_string(),
    })
}

// `None` when the value is too large for `Decimal`.
fn apply_exponent(mantissa: Decimal, exponent: i64) -> Option<Decimal> {
    let mut value = mantissa;
    if exponent >= 0 {
        for _ in 0..exponent {
            if value.is_zero() {
                break;
            }
            value = value.checked_mul(Decimal::TEN)?;
        }
    } else {
        for _ in 0..exponent.unsigned_abs() {
            if value.is_zero() {
                break;
            }
            value /= Decimal::TEN;
        }
    }
    Some(value)
}

fn default_feature_count() -> u32 {
    DEFAULT_FEATURE_COUNT
}

// An unset select posts either nothing or "".
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
