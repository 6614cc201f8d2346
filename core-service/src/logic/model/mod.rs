//! Model Module - Classifier Inference Engine
//!
//! Classifier backends behind one trait, the target label encoder, and the
//! predictor that ties them to the feature alignment.

pub mod classifier;
pub mod forest;
pub mod label;
pub mod inference;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use classifier::{Classifier, ClassifierKind, Scores};
pub use forest::ForestClassifier;
pub use label::{LabelEncoder, LabelEncoderFile, Severity};
pub use inference::{predict, Prediction, Predictor};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
