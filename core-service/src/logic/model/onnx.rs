//! ONNX backend - ONNX Runtime Integration
//!
//! Runs a classifier exported to ONNX (skl2onnx for the random forest).
//! The first graph output holds int64 labels; a second output is read as
//! probabilities only when it is a float tensor `[rows, classes]`. The
//! ZipMap output skl2onnx emits by default is a sequence of maps and is
//! ignored.

use ndarray::{Array2, ArrayView2};
use ort::environment::Environment;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Tensor, TensorElementType, ValueType};
use parking_lot::Mutex;

use crate::error::{ArtifactError, ArtifactResult, InferenceError};
use super::classifier::{Classifier, ClassifierKind, Scores};

/// ONNX Runtime allows a single environment per process
static ENVIRONMENT: Mutex<Option<Environment>> = Mutex::new(None);

fn environment() -> ArtifactResult<Environment> {
    let mut slot = ENVIRONMENT.lock();
    if let Some(env) = slot.as_ref() {
        return Ok(env.clone());
    }

    let env = ort::init()
        .with_name("severity-core")
        .build()
        .map_err(|e| ArtifactError::Backend(format!("Environment error: {}", e)))?;
    *slot = Some(env.clone());
    Ok(env)
}

/// Fixed feature width of a `[rows, features]` input, `None` when dynamic
fn input_width(dtype: &ValueType) -> Option<usize> {
    let shape = dtype.tensor_shape()?;
    let last = *shape.last()?;
    usize::try_from(last).ok().filter(|&w| w > 0)
}

fn is_float_tensor(dtype: &ValueType) -> bool {
    dtype.tensor_type() == Some(TensorElementType::Float32)
}

/// ONNX session wrapper. `Session::run` needs `&mut`, so the session is
/// locked per call; everything else is immutable.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    label_output: String,
    proba_output: Option<String>,
    n_features: Option<usize>,
}

impl OnnxClassifier {
    /// Load ONNX model from bytes
    pub fn load_from_memory(model_bytes: &[u8]) -> ArtifactResult<Self> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let env = environment()?;
        let session = Session::builder(&env)
            .map_err(|e| ArtifactError::Backend(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ArtifactError::Backend(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ArtifactError::Backend(format!("Load from memory error: {}", e)))?;

        Self::from_session(session)
    }

    fn from_session(session: Session) -> ArtifactResult<Self> {
        let input = session
            .inputs()
            .first()
            .ok_or_else(|| ArtifactError::Backend("Model has no inputs".to_string()))?;
        let n_features = input_width(input.dtype());

        let label_output = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| ArtifactError::Backend("No output defined".to_string()))?;
        let proba_output = session
            .outputs()
            .get(1)
            .filter(|o| is_float_tensor(o.dtype()))
            .map(|o| o.name().to_string());

        log::info!(
            "ONNX model loaded: {} features, label output '{}', probability output {:?}",
            n_features.map_or_else(|| "dynamic".to_string(), |n| n.to_string()),
            label_output,
            proba_output
        );

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            proba_output,
            n_features,
        })
    }

    fn input_tensor(features: ArrayView2<'_, f32>) -> Result<Tensor<f32>, InferenceError> {
        let shape = [features.nrows(), features.ncols()];
        let data: Vec<f32> = features.iter().copied().collect();
        Tensor::from_array((shape, data))
            .map_err(|e| InferenceError::Backend(format!("Tensor error: {}", e)))
    }

    /// One session run; labels and probabilities come from the same outputs
    fn run(&self, features: ArrayView2<'_, f32>) -> Result<Scores, InferenceError> {
        let rows = features.nrows();
        let input_tensor = Self::input_tensor(features)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Backend(format!("Inference failed: {}", e)))?;

        let labels = outputs
            .get(self.label_output.as_str())
            .ok_or_else(|| InferenceError::Backend("No label output".to_string()))?
            .try_extract_tensor::<i64>()
            .map_err(|e| InferenceError::Backend(format!("Extract error: {}", e)))?
            .1
            .to_vec();

        let probabilities = match self.proba_output.as_deref().and_then(|name| outputs.get(name)) {
            Some(output) => match output.try_extract_tensor::<f32>() {
                Ok((_, data)) if rows > 0 && data.len() % rows == 0 => Some(
                    Array2::from_shape_vec((rows, data.len() / rows), data.to_vec())
                        .map_err(|e| InferenceError::Backend(format!("Array error: {}", e)))?,
                ),
                _ => None,
            },
            None => None,
        };

        Ok(Scores {
            labels,
            probabilities,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, InferenceError> {
        Ok(self.run(features)?.labels)
    }

    fn predict_proba(
        &self,
        features: ArrayView2<'_, f32>,
    ) -> Result<Option<Array2<f32>>, InferenceError> {
        if self.proba_output.is_none() {
            return Ok(None);
        }
        Ok(self.run(features)?.probabilities)
    }

    fn classify(&self, features: ArrayView2<'_, f32>) -> Result<Scores, InferenceError> {
        self.run(features)
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn kind(&self) -> ClassifierKind {
        ClassifierKind::Onnx
    }
}
