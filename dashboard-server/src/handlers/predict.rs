//! Prediction simulator handler

use axum::{extract::State, Json};
use severity_core::AccidentRecord;
use validator::Validate;

use crate::{AppError, AppResult, AppState};
use crate::models::{PredictRequest, PredictResponse};

/// Score one accident description
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictResponse>> {
    req.validate()?;

    let predictor = state.model.predictor().ok_or_else(|| {
        AppError::ModelUnavailable("artifacts were not loaded at startup".to_string())
    })?;

    let record: AccidentRecord = req.into();
    let unknown = record.unknown_fields();
    if !unknown.is_empty() {
        tracing::info!("Record has values outside the form options: {:?}", unknown);
    }

    let prediction = predictor.predict(&record)?;

    tracing::info!(
        label = prediction.label(),
        inference_time_us = prediction.inference_time_us,
        "Prediction served"
    );

    Ok(Json(prediction.into()))
}
