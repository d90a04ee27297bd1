use crate::domain::prediction::MAX_BASE_PRICE;
use serde::Serialize;

/// Why an estimate request was rejected. A rejected request never touches previously produced
/// results or the history list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("feature count must be between 1 and 10 (got {got})")]
    FeatureCountOutOfRange { got: u32 },

    #[error("base price must be a valid number (got {raw:?})")]
    NonNumericBasePrice { raw: String },

    #[error("base price must be between 0 and {max} (got {raw})", max = MAX_BASE_PRICE)]
    BasePriceOutOfRange { raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Parse,
}

impl EstimateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EstimateError::MissingField { .. } | EstimateError::FeatureCountOutOfRange { .. } => {
                ErrorKind::Validation
            }
            EstimateError::NonNumericBasePrice { .. } | EstimateError::BasePriceOutOfRange { .. } => {
                ErrorKind::Parse
            }
        }
    }

    /// Form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            EstimateError::MissingField { field } => field,
            EstimateError::FeatureCountOutOfRange { .. } => "feature_count",
            EstimateError::NonNumericBasePrice { .. } | EstimateError::BasePriceOutOfRange { .. } => {
                "base_price"
            }
        }
    }
}
