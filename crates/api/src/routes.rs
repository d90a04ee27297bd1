use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use pricewise_core::domain::error::{ErrorKind, EstimateError};
use pricewise_core::domain::form::PredictionForm;
use pricewise_core::domain::prediction::FactorScore;
use pricewise_core::history::stats::HistoryStats;
use pricewise_core::history::{
    AccuracyBand, HistoryBook, HistoryRecord, PriceMovement, RecordId,
};
use pricewise_core::market::{self, PricePoint, TrendComparison};

#[derive(Debug, Clone)]
pub struct AppState {
    history: Arc<RwLock<HistoryBook>>,
    trend: Arc<Vec<PricePoint>>,
}

impl AppState {
    pub fn new(history: HistoryBook) -> Self {
        Self {
            history: Arc::new(RwLock::new(history)),
            trend: Arc::new(market::price_trend()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/predictions", post(create_prediction))
        .route("/history", get(list_history))
        .route("/history/stats", get(history_stats))
        .route("/history/:id", delete(delete_history))
        .route("/market/trend", get(market_trend))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct ApiPrediction {
    #[serde(with = "rust_decimal::serde::float")]
    predicted_price: Decimal,
    factor_breakdown: Vec<FactorScore>,
    trend_comparison: Option<TrendComparison>,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
    kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl From<&EstimateError> for ApiError {
    fn from(err: &EstimateError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
            field: Some(err.field()),
        }
    }
}

// Well-formed JSON with a bad value (unknown select option, wrong type) is a validation failure;
// anything that isn't readable JSON is a parse failure.
impl From<&JsonRejection> for ApiError {
    fn from(rejection: &JsonRejection) -> Self {
        let kind = match rejection {
            JsonRejection::JsonDataError(_) => ErrorKind::Validation,
            _ => ErrorKind::Parse,
        };
        Self {
            error: rejection.body_text(),
            kind,
            field: None,
        }
    }
}

async fn create_prediction(
    State(state): State<AppState>,
    payload: Result<Json<PredictionForm>, JsonRejection>,
) -> Result<Json<ApiPrediction>, (StatusCode, Json<ApiError>)> {
    let Json(form) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "prediction body rejected");
        (rejection.status(), Json(ApiError::from(&rejection)))
    })?;

    let result = pricewise_core::estimator::estimate_form(form).map_err(|e| {
        tracing::warn!(error = %e, field = e.field(), "prediction rejected");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiError::from(&e)))
    })?;

    tracing::info!(predicted_price = %result.predicted_price, "prediction generated");

    Ok(Json(ApiPrediction {
        trend_comparison: market::compare_to_last_month(result.predicted_price, &state.trend),
        predicted_price: result.predicted_price,
        factor_breakdown: result.factor_breakdown,
    }))
}

#[derive(Debug, Serialize)]
struct ApiHistoryEntry {
    #[serde(flatten)]
    record: HistoryRecord,
    movement: PriceMovement,
    #[serde(with = "rust_decimal::serde::float")]
    difference: Decimal,
    accuracy_band: AccuracyBand,
}

impl From<&HistoryRecord> for ApiHistoryEntry {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            movement: record.movement(),
            difference: record.difference(),
            accuracy_band: record.accuracy_band(),
            record: record.clone(),
        }
    }
}

async fn list_history(State(state): State<AppState>) -> Json<Vec<ApiHistoryEntry>> {
    let history = state.history.read().await;
    Json(history.list().iter().map(ApiHistoryEntry::from).collect())
}

async fn delete_history(State(state): State<AppState>, Path(id): Path<RecordId>) -> StatusCode {
    let removed = state.history.write().await.delete(id);
    tracing::info!(id, removed, "history record delete requested");
    StatusCode::NO_CONTENT
}

async fn history_stats(State(state): State<AppState>) -> Json<HistoryStats> {
    Json(state.history.read().await.stats())
}

async fn market_trend(State(state): State<AppState>) -> Json<Vec<PricePoint>> {
    Json(state.trend.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use pricewise_core::domain::prediction::{Category, Seasonality};
    use rust_decimal_macros::dec;
    use serde_json::json;

    async fn extract_form(body: &str) -> Result<Json<PredictionForm>, JsonRejection> {
        let req = Request::builder()
            .method("POST")
            .uri("/predictions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        Json::<PredictionForm>::from_request(req, &()).await
    }

    fn state() -> AppState {
        AppState::new(HistoryBook::seeded())
    }

    fn form() -> PredictionForm {
        PredictionForm {
            product_name: "Smartphone X23".to_string(),
            category: Some(Category::Electronics),
            base_price: "100".to_string(),
            seasonality: Some(Seasonality::Regular),
            ..PredictionForm::default()
        }
    }

    #[tokio::test]
    async fn create_prediction_returns_price_breakdown_and_trend() {
        let Json(body) = create_prediction(State(state()), Ok(Json(form())))
            .await
            .unwrap();
        assert_eq!(body.predicted_price, dec!(138.00));
        assert_eq!(body.factor_breakdown.len(), 5);
        assert_eq!(body.trend_comparison, Some(TrendComparison::Below));

        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["predicted_price"], json!(138.0));
        assert_eq!(v["trend_comparison"], json!("below"));
        assert_eq!(v["factor_breakdown"][0]["factor"], json!("Base Price"));
    }

    #[tokio::test]
    async fn create_prediction_rejects_missing_seasonality() {
        let bad = PredictionForm {
            seasonality: None,
            ..form()
        };
        let (status, Json(body)) = create_prediction(State(state()), Ok(Json(bad)))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.kind, ErrorKind::Validation);
        assert_eq!(body.field, Some("seasonality"));
    }

    #[tokio::test]
    async fn create_prediction_rejects_non_numeric_price() {
        let bad = PredictionForm {
            base_price: "abc".to_string(),
            ..form()
        };
        let (status, Json(body)) = create_prediction(State(state()), Ok(Json(bad)))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.kind, ErrorKind::Parse);
    }

    #[tokio::test]
    async fn unknown_select_value_gets_json_error_body() {
        let payload = extract_form(
            r#"{"product_name":"Desk Lamp","category":"furniture","base_price":"45.99","seasonality":"monsoon"}"#,
        )
        .await;
        let (status, Json(body)) = create_prediction(State(state()), payload)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.kind, ErrorKind::Validation);
        assert_eq!(body.field, None);
        assert!(body.error.contains("monsoon"), "{}", body.error);

        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["kind"], json!("validation"));
        assert!(v.get("field").is_none());
    }

    #[tokio::test]
    async fn numeric_base_price_gets_json_error_body() {
        let payload = extract_form(
            r#"{"product_name":"Desk Lamp","category":"furniture","base_price":100,"seasonality":"peak"}"#,
        )
        .await;
        let (status, Json(body)) = create_prediction(State(state()), payload)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let payload = extract_form("{not json").await;
        let (status, Json(body)) = create_prediction(State(state()), payload)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, ErrorKind::Parse);
    }

    #[tokio::test]
    async fn delete_then_list_preserves_order() {
        let state = state();
        let status = delete_history(State(state.clone()), Path(2)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        // Unknown ids are accepted and change nothing.
        let status = delete_history(State(state.clone()), Path(99)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(entries) = list_history(State(state.clone())).await;
        let ids: Vec<_> = entries.iter().map(|e| e.record.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5]);

        let Json(stats) = history_stats(State(state)).await;
        assert_eq!(stats.total, 4);
    }

    #[tokio::test]
    async fn history_entries_carry_derived_fields() {
        let Json(entries) = list_history(State(state())).await;
        let v = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(v["id"], json!(1));
        assert_eq!(v["category"], json!("electronics"));
        assert_eq!(v["movement"], json!("up"));
        assert_eq!(v["difference"], json!(50.0));
        assert_eq!(v["accuracy_band"], json!("good"));
    }

    #[tokio::test]
    async fn market_trend_has_six_months() {
        let Json(series) = market_trend(State(state())).await;
        assert_eq!(series.len(), 6);
        assert_eq!(series[5].price, dec!(210));
    }
}
