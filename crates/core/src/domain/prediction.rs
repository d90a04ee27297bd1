use crate::domain::error::EstimateError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_FEATURE_COUNT: u8 = 1;
pub const MAX_FEATURE_COUNT: u8 = 10;

/// Largest accepted base price. The biggest multiplier chain is 1.50 * 1.20 * 1.15 * 1.20 = 2.484,
/// and 3e28 * 2.484 still fits under `Decimal::MAX` (~7.92e28).
pub const MAX_BASE_PRICE: Decimal = dec!(30000000000000000000000000000);

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?} (expected one of: {expected})")]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Furniture,
    Food,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    New,
    Good,
    Used,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketDemand {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seasonality {
    Peak,
    Regular,
    Off,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::Furniture,
        Category::Food,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Furniture => "furniture",
            Category::Food => "food",
            Category::Other => "other",
        }
    }

    /// Human-facing label ("Food & Beverage" rather than "food").
    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Furniture => "Furniture",
            Category::Food => "Food & Beverage",
            Category::Other => "Other",
        }
    }
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Good, Condition::Used];

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Good => "good",
            Condition::Used => "used",
        }
    }
}

impl MarketDemand {
    pub const ALL: [MarketDemand; 3] = [MarketDemand::High, MarketDemand::Medium, MarketDemand::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            MarketDemand::High => "high",
            MarketDemand::Medium => "medium",
            MarketDemand::Low => "low",
        }
    }
}

impl Seasonality {
    pub const ALL: [Seasonality; 3] = [Seasonality::Peak, Seasonality::Regular, Seasonality::Off];

    pub fn as_str(self) -> &'static str {
        match self {
            Seasonality::Peak => "peak",
            Seasonality::Regular => "regular",
            Seasonality::Off => "off",
        }
    }
}

fn parse_choice<T: Copy>(
    kind: &'static str,
    raw: &str,
    all: &[T],
    as_str: fn(T) -> &'static str,
) -> Result<T, ParseChoiceError> {
    let needle = raw.trim();
    all.iter()
        .copied()
        .find(|v| as_str(*v).eq_ignore_ascii_case(needle))
        .ok_or_else(|| ParseChoiceError {
            kind,
            value: raw.to_string(),
            expected: all
                .iter()
                .map(|v| as_str(*v))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

impl FromStr for Category {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("category", s, &Category::ALL, Category::as_str)
    }
}

impl FromStr for Condition {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("condition", s, &Condition::ALL, Condition::as_str)
    }
}

impl FromStr for MarketDemand {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("market demand", s, &MarketDemand::ALL, MarketDemand::as_str)
    }
}

impl FromStr for Seasonality {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("seasonality", s, &Seasonality::ALL, Seasonality::as_str)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MarketDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Seasonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated product attributes. Only constructible through [`PredictionInput::new`], so every
/// value reaching the estimator is in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionInput {
    product_name: String,
    category: Category,
    feature_count: u8,
    condition: Condition,
    #[serde(with = "rust_decimal::serde::float")]
    base_price: Decimal,
    market_demand: MarketDemand,
    seasonality: Seasonality,
}

impl PredictionInput {
    pub fn new(
        product_name: impl Into<String>,
        category: Category,
        feature_count: u8,
        condition: Condition,
        base_price: Decimal,
        market_demand: MarketDemand,
        seasonality: Seasonality,
    ) -> Result<Self, EstimateError> {
        let product_name = product_name.into().trim().to_string();
        if product_name.is_empty() {
            return Err(EstimateError::MissingField {
                field: "product_name",
            });
        }
        if !(MIN_FEATURE_COUNT..=MAX_FEATURE_COUNT).contains(&feature_count) {
            return Err(EstimateError::FeatureCountOutOfRange {
                got: u32::from(feature_count),
            });
        }
        if base_price < Decimal::ZERO || base_price > MAX_BASE_PRICE {
            return Err(EstimateError::BasePriceOutOfRange {
                raw: base_price.to_string(),
            });
        }

        Ok(Self {
            product_name,
            category,
            feature_count,
            condition,
            base_price,
            market_demand,
            seasonality,
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn feature_count(&self) -> u8 {
        self.feature_count
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn market_demand(&self) -> MarketDemand {
        self.market_demand
    }

    pub fn seasonality(&self) -> Seasonality {
        self.seasonality
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Factor {
    #[serde(rename = "Base Price")]
    BasePrice,
    #[serde(rename = "Features")]
    Features,
    #[serde(rename = "Condition")]
    Condition,
    #[serde(rename = "Market Demand")]
    MarketDemand,
    #[serde(rename = "Seasonality")]
    Seasonality,
}

impl Factor {
    pub fn label(self) -> &'static str {
        match self {
            Factor::BasePrice => "Base Price",
            Factor::Features => "Features",
            Factor::Condition => "Condition",
            Factor::MarketDemand => "Market Demand",
            Factor::Seasonality => "Seasonality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub impact_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub predicted_price: Decimal,
    pub factor_breakdown: Vec<FactorScore>,
}
