//! Model status handler

use axum::{extract::State, Json};
use serde::Serialize;
use severity_core::{ArtifactMetadata, ModelState};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ArtifactMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_files: Vec<String>,
}

/// Artifact metadata, or why the model could not be loaded
pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    let status = match state.model.as_ref() {
        ModelState::Ready(predictor) => ModelStatus {
            loaded: true,
            metadata: Some(predictor.artifacts().metadata().clone()),
            reason: None,
            missing_files: Vec::new(),
        },
        ModelState::Unavailable { reason, missing } => ModelStatus {
            loaded: false,
            metadata: None,
            reason: Some(reason.clone()),
            missing_files: missing.iter().map(|p| p.display().to_string()).collect(),
        },
    };

    Json(status)
}
