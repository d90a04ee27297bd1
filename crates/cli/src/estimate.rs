use anyhow::Context;
use clap::Args;
use pricewise_core::domain::form::{PredictionForm, DEFAULT_FEATURE_COUNT};
use pricewise_core::domain::prediction::{
    Category, Condition, FactorScore, MarketDemand, Seasonality,
};
use pricewise_core::market::{self, TrendComparison};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    #[arg(long)]
    product_name: Option<String>,

    /// electronics, clothing, furniture, food or other.
    #[arg(long)]
    category: Option<Category>,

    /// Number of features, 1..=10.
    #[arg(long = "features", default_value_t = DEFAULT_FEATURE_COUNT)]
    feature_count: u32,

    /// new, good or used.
    #[arg(long, default_value_t = Condition::New)]
    condition: Condition,

    /// Base price in dollars.
    #[arg(long)]
    base_price: Option<String>,

    /// high, medium or low.
    #[arg(long = "demand", default_value_t = MarketDemand::Medium)]
    market_demand: MarketDemand,

    /// peak, regular or off.
    #[arg(long)]
    seasonality: Option<Seasonality>,
}

impl EstimateArgs {
    fn into_form(self) -> PredictionForm {
        PredictionForm {
            product_name: self.product_name.unwrap_or_default(),
            category: self.category,
            feature_count: self.feature_count,
            condition: self.condition,
            base_price: self.base_price.unwrap_or_default(),
            market_demand: self.market_demand,
            seasonality: self.seasonality,
        }
    }
}

#[derive(Debug, Serialize)]
struct EstimateOutput {
    product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    predicted_price: Decimal,
    factor_breakdown: Vec<FactorScore>,
    trend_comparison: Option<TrendComparison>,
}

pub fn run(args: EstimateArgs) -> anyhow::Result<serde_json::Value> {
    let form = args.into_form();
    let product_name = form.product_name.trim().to_string();

    let result = pricewise_core::estimator::estimate_form(form)
        .context("estimate rejected")?;
    let trend = market::price_trend();

    tracing::info!(
        product_name = %product_name,
        predicted_price = %result.predicted_price,
        "estimate generated"
    );

    let output = EstimateOutput {
        product_name,
        trend_comparison: market::compare_to_last_month(result.predicted_price, &trend),
        predicted_price: result.predicted_price,
        factor_breakdown: result.factor_breakdown,
    };
    Ok(serde_json::to_value(output)?)
}
