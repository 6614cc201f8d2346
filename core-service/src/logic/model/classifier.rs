//! Classifier trait shared by every inference backend

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Backend that produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    Onnx,
    Forest,
}

impl ClassifierKind {
    /// Backend for an artifact file, chosen by extension
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("onnx") => Some(Self::Onnx),
            Some("json") => Some(Self::Forest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onnx => "onnx",
            Self::Forest => "forest",
        }
    }
}

/// Labels and probabilities for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct Scores {
    pub labels: Vec<i64>,
    /// `[rows, classes]`, column `i` holding the probability of class code `i`
    pub probabilities: Option<Array2<f32>>,
}

/// Trait for classifier backends (ONNX, native forest, ...)
///
/// Implementations are read-only after construction and shared across
/// requests.
pub trait Classifier: Send + Sync {
    /// Predicted class code for every row of `features`
    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, InferenceError>;

    /// Class probabilities `[rows, classes]`, when the backend exposes them
    fn predict_proba(
        &self,
        _features: ArrayView2<'_, f32>,
    ) -> Result<Option<Array2<f32>>, InferenceError> {
        Ok(None)
    }

    /// Labels and probabilities together. Backends that produce both from a
    /// single evaluation override this.
    fn classify(&self, features: ArrayView2<'_, f32>) -> Result<Scores, InferenceError> {
        Ok(Scores {
            labels: self.predict(features)?,
            probabilities: self.predict_proba(features)?,
        })
    }

    /// Input width, when the backend knows it
    fn n_features(&self) -> Option<usize> {
        None
    }

    fn kind(&self) -> ClassifierKind;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::path::Path;

    struct Constant;

    impl Classifier for Constant {
        fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, InferenceError> {
            Ok(vec![1; features.nrows()])
        }

        fn predict_proba(
            &self,
            features: ArrayView2<'_, f32>,
        ) -> Result<Option<Array2<f32>>, InferenceError> {
            Ok(Some(Array2::from_elem((features.nrows(), 2), 0.5)))
        }

        fn kind(&self) -> ClassifierKind {
            ClassifierKind::Forest
        }
    }

    #[test]
    fn test_default_classify_combines_both() {
        let scores = Constant.classify(array![[0.0f32], [1.0]].view()).unwrap();
        assert_eq!(scores.labels, vec![1, 1]);
        assert_eq!(scores.probabilities.unwrap().dim(), (2, 2));
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            ClassifierKind::from_path(Path::new("modelo_rf_binario.onnx")),
            Some(ClassifierKind::Onnx)
        );
        assert_eq!(
            ClassifierKind::from_path(Path::new("dir/forest.json")),
            Some(ClassifierKind::Forest)
        );
        assert_eq!(ClassifierKind::from_path(Path::new("modelo.joblib")), None);
    }
}
