//! One-hot encoding of a single record
//!
//! Produces the sparse set of columns a dummy encoding of a one-row frame
//! would contain: `{prefix}_{category}` = 1 for every field. The boolean
//! field additionally yields its raw passthrough column, since the training
//! frame may have kept it un-dummied. Alignment decides which spelling the
//! schema actually uses and drops the other.

use serde::{Deserialize, Serialize};

use crate::constants::COLUMN_SEPARATOR;
use super::record::{AccidentRecord, Field};

/// One non-zero column of an encoded record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedColumn {
    pub field: Field,
    pub name: String,
    pub value: f32,
}

/// Sparse one-row encoding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodedRecord {
    pub columns: Vec<EncodedColumn>,
}

impl EncodedRecord {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EncodedColumn> {
        self.columns.iter()
    }
}

/// Indicator column name for a field/category pair
pub fn column_name(field: Field, category: &str) -> String {
    format!("{}{}{}", field.prefix(), COLUMN_SEPARATOR, category)
}

/// One-hot encode a record
pub fn encode_record(record: &AccidentRecord) -> EncodedRecord {
    let mut columns = Vec::with_capacity(Field::ALL.len() + 1);

    for field in Field::ALL {
        let category = record.category(field);

        if field.is_flag() {
            columns.push(EncodedColumn {
                field,
                name: field.prefix().to_string(),
                value: if record.weekend { 1.0 } else { 0.0 },
            });
        }

        columns.push(EncodedColumn {
            field,
            name: column_name(field, &category),
            value: 1.0,
        });
    }

    EncodedRecord { columns }
}
