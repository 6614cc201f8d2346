//! Features Module - Feature Alignment Engine
//!
//! Turns an accident record into the exact row the classifier was fit on:
//! one-hot encode, then project onto the training column schema.

pub mod record;
pub mod encoder;
pub mod schema;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use record::{AccidentRecord, Field};
pub use encoder::{encode_record, column_name, EncodedColumn, EncodedRecord};
pub use schema::{Alignment, ColumnKind, SchemaColumn, SchemaInfo, TrainingSchema};
pub use vector::FeatureVector;
