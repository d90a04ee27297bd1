use crate::domain::error::EstimateError;
use crate::domain::form::PredictionForm;
use crate::domain::prediction::{
    Condition, Factor, FactorScore, MarketDemand, PredictionInput, PredictionResult, Seasonality,
};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const FEATURE_STEP: Decimal = dec!(0.05);
const BASE_PRICE_SCORE: u32 = 70;
const FEATURE_SCORE_STEP: u32 = 5;

/// Predicted price for a validated input. Pure: the same input always yields the same result.
pub fn estimate(input: &PredictionInput) -> PredictionResult {
    let raw = input.base_price()
        * feature_multiplier(input.feature_count())
        * condition_multiplier(input.condition())
        * demand_multiplier(input.market_demand())
        * season_multiplier(input.seasonality());

    PredictionResult {
        predicted_price: round_cents(raw),
        factor_breakdown: factor_breakdown(input),
    }
}

/// Validates a submitted form and estimates it.
pub fn estimate_form(form: PredictionForm) -> Result<PredictionResult, EstimateError> {
    let input = form.validate_and_into_input()?;
    let result = estimate(&input);
    tracing::debug!(
        product_name = input.product_name(),
        category = %input.category(),
        predicted_price = %result.predicted_price,
        "estimate computed"
    );
    Ok(result)
}

/// Illustrative per-factor scores for the factor chart. They do not feed the price.
pub fn factor_breakdown(input: &PredictionInput) -> Vec<FactorScore> {
    let condition = match input.condition() {
        Condition::New => 20,
        Condition::Good => 15,
        Condition::Used => 10,
    };
    let demand = match input.market_demand() {
        MarketDemand::High => 25,
        MarketDemand::Medium => 15,
        MarketDemand::Low => 5,
    };
    let season = match input.seasonality() {
        Seasonality::Peak => 20,
        Seasonality::Regular => 10,
        Seasonality::Off => 0,
    };

    vec![
        FactorScore {
            factor: Factor::BasePrice,
            impact_score: BASE_PRICE_SCORE,
        },
        FactorScore {
            factor: Factor::Features,
            impact_score: u32::from(input.feature_count()) * FEATURE_SCORE_STEP,
        },
        FactorScore {
            factor: Factor::Condition,
            impact_score: condition,
        },
        FactorScore {
            factor: Factor::MarketDemand,
            impact_score: demand,
        },
        FactorScore {
            factor: Factor::Seasonality,
            impact_score: season,
        },
    ]
}

pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn feature_multiplier(feature_count: u8) -> Decimal {
    Decimal::ONE + FEATURE_STEP * Decimal::from(feature_count)
}

fn condition_multiplier(condition: Condition) -> Decimal {
    match condition {
        Condition::New => dec!(1.20),
        Condition::Good => dec!(1.10),
        Condition::Used => Decimal::ONE,
    }
}

fn demand_multiplier(demand: MarketDemand) -> Decimal {
    match demand {
        MarketDemand::High => dec!(1.15),
        MarketDemand::Medium => Decimal::ONE,
        MarketDemand::Low => dec!(0.90),
    }
}

fn season_multiplier(seasonality: Seasonality) -> Decimal {
    match seasonality {
        Seasonality::Peak => dec!(1.20),
        Seasonality::Regular => Decimal::ONE,
        Seasonality::Off => dec!(0.90),
    }
}
