//! Accident Severity Core
//!
//! Scores a described road accident as "COM VITIMAS" (with victims) or
//! "SEM VITIMAS" (without victims) using a pre-trained classifier.
//!
//! # Pipeline
//!
//! ```text
//! AccidentRecord ──encode──▶ EncodedRecord ──align──▶ FeatureVector
//!                                                        │
//!                     Severity ◀──decode── class code ◀──┘ Classifier
//! ```
//!
//! The classifier, label encoder and training column schema come from
//! [`Artifacts::load`], built once and shared read-only.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{ArtifactError, ArtifactResult, InferenceError, InferenceResult};
pub use logic::artifacts::{ArtifactConfig, ArtifactMetadata, Artifacts, ModelState};
pub use logic::features::{
    encode_record, AccidentRecord, Alignment, EncodedRecord, FeatureVector, Field, TrainingSchema,
};
pub use logic::model::{
    predict, Classifier, ClassifierKind, ForestClassifier, LabelEncoder, Prediction, Predictor,
    Severity,
};
pub use logic::model::inference::ClassProbability;
