//! Inference - record in, severity out
//!
//! encode -> align to the training schema -> classify -> decode.
//! Pure with respect to its inputs: the same record and artifacts always
//! give the same prediction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::logic::artifacts::Artifacts;
use crate::logic::features::{encode_record, AccidentRecord, FeatureVector, TrainingSchema};
use super::classifier::{Classifier, ClassifierKind};
use super::label::{LabelEncoder, Severity};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub severity: Severity,
    /// Raw class code returned by the classifier
    pub class_code: i64,
    /// Probability per severity, when the backend exposes them
    pub probabilities: Option<Vec<ClassProbability>>,
    /// Indicator columns of record values the classifier never saw
    pub unseen_columns: Vec<String>,
    pub inference_time_us: u64,
    pub method: ClassifierKind,
}

impl Prediction {
    pub fn label(&self) -> &'static str {
        self.severity.label()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub severity: Severity,
    pub probability: f32,
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Score one record against explicit artifacts.
///
/// Values the schema never saw contribute only zeros; they are reported in
/// `Prediction::unseen_columns`, never rejected.
pub fn predict(
    record: &AccidentRecord,
    classifier: &dyn Classifier,
    label_encoder: &LabelEncoder,
    training_columns: &TrainingSchema,
) -> Result<Prediction, InferenceError> {
    let start_time = std::time::Instant::now();

    let encoded = encode_record(record);
    let alignment = training_columns.align(&encoded);

    if !alignment.unseen.is_empty() {
        log::warn!(
            "Record values unseen at training time contribute zeros: {:?}",
            alignment.unseen
        );
    }

    let matrix = alignment.vector.to_matrix();

    let scores = classifier.classify(matrix.view())?;
    let class_code = match scores.labels.as_slice() {
        [code] => *code,
        other => return Err(InferenceError::RowCount(other.len())),
    };
    let severity = label_encoder.inverse_transform(class_code)?;

    // Probability columns follow class codes, the same order as the encoder
    let probabilities = scores.probabilities.and_then(|proba| {
        let row = proba.outer_iter().next()?;
        if row.len() != label_encoder.classes().len() {
            return None;
        }
        Some(
            label_encoder
                .classes()
                .iter()
                .zip(row.iter())
                .map(|(s, p)| ClassProbability {
                    severity: *s,
                    probability: *p,
                })
                .collect(),
        )
    });

    let inference_time_us = start_time.elapsed().as_micros() as u64;

    log::debug!(
        "Predicted {} (code {}) via {} in {}us",
        severity,
        class_code,
        classifier.kind().as_str(),
        inference_time_us
    );

    Ok(Prediction {
        severity,
        class_code,
        probabilities,
        unseen_columns: alignment.unseen,
        inference_time_us,
        method: classifier.kind(),
    })
}

/// Predictor bound to a loaded artifact set. Cheap to clone and safe to
/// share across threads; nothing is mutated after loading.
#[derive(Clone)]
pub struct Predictor {
    artifacts: Arc<Artifacts>,
}

impl Predictor {
    pub fn new(artifacts: Artifacts) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
        }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    pub fn predict(&self, record: &AccidentRecord) -> Result<Prediction, InferenceError> {
        predict(
            record,
            self.artifacts.classifier(),
            self.artifacts.label_encoder(),
            self.artifacts.schema(),
        )
    }

    /// Aligned feature vector for a record, without scoring it
    pub fn features(&self, record: &AccidentRecord) -> FeatureVector {
        self.artifacts.schema().align(&encode_record(record)).vector
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("metadata", self.artifacts.metadata())
            .finish()
    }
}
