//! Feature Vector - dense classifier input
//!
//! **Schema-stamped feature vector**
//!
//! Values are positioned by the training schema; the schema hash travels
//! with them so a vector built against one schema is never scored by a
//! classifier bound to another.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::schema::TrainingSchema;

/// Dense feature row aligned to a training schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// CRC32 of the schema the values are positioned by
    pub schema_hash: u32,
    /// Values in schema column order
    pub values: Vec<f32>,
}

impl FeatureVector {
    pub fn new(schema_hash: u32, values: Vec<f32>) -> Self {
        Self { schema_hash, values }
    }

    /// Zero vector for a schema
    pub fn zeros(schema: &TrainingSchema) -> Self {
        Self::new(schema.hash(), vec![0.0; schema.len()])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get feature by column name
    pub fn get_by_name(&self, schema: &TrainingSchema, name: &str) -> Option<f32> {
        schema.position(name).and_then(|i| self.get(i))
    }

    /// Whether this vector was aligned to `schema`
    pub fn matches(&self, schema: &TrainingSchema) -> bool {
        self.schema_hash == schema.hash() && self.values.len() == schema.len()
    }

    /// Positions holding a non-zero value
    pub fn active_indices(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Single-row matrix `[1, n]` for the classifier
    pub fn to_matrix(&self) -> Array2<f32> {
        Array1::from(self.values.clone()).insert_axis(Axis(0))
    }

    /// JSON-serializable form for logging
    pub fn to_log_entry(&self, schema: &TrainingSchema) -> serde_json::Value {
        let active: Vec<&str> = self
            .active_indices()
            .into_iter()
            .filter_map(|i| schema.columns().get(i).map(|c| c.name.as_str()))
            .collect();

        serde_json::json!({
            "schema_hash": format!("{:08x}", self.schema_hash),
            "len": self.values.len(),
            "active_columns": active,
        })
    }
}
