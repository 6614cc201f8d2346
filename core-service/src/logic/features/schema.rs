//! Training Column Schema - the column contract of the classifier
//!
//! **This schema is loaded, never regenerated.**
//!
//! The classifier reads features by position, so the inference-time vector
//! must have exactly these columns in exactly this order. Each column is
//! parsed into an explicit `(field, category)` pair; alignment is a lookup
//! with a default of zero.

use std::collections::{HashMap, HashSet};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::constants::COLUMN_SEPARATOR;
use crate::error::{ArtifactError, ArtifactResult};
use super::encoder::EncodedRecord;
use super::record::Field;
use super::vector::FeatureVector;

// ============================================================================
// COLUMNS
// ============================================================================

/// What a schema column represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// One-hot indicator of `field == category`
    Indicator { field: Field, category: String },
    /// Raw boolean column kept as 0/1
    Flag { field: Field },
    /// Column matching no known field, always zero at inference time
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl SchemaColumn {
    /// Parse a column name against the known field prefixes.
    /// Longest prefix wins so that no prefix can shadow a longer one.
    pub fn parse(name: &str) -> Self {
        if let Some(field) = Field::from_prefix(name) {
            if field.is_flag() {
                return Self {
                    name: name.to_string(),
                    kind: ColumnKind::Flag { field },
                };
            }
        }

        let mut best: Option<(Field, &str)> = None;
        for field in Field::ALL {
            let Some(rest) = name.strip_prefix(field.prefix()) else {
                continue;
            };
            let Some(category) = rest.strip_prefix(COLUMN_SEPARATOR) else {
                continue;
            };
            let longer = best.map_or(true, |(b, _)| field.prefix().len() > b.prefix().len());
            if longer {
                best = Some((field, category));
            }
        }

        let kind = match best {
            Some((field, category)) => ColumnKind::Indicator {
                field,
                category: category.to_string(),
            },
            None => ColumnKind::Other,
        };

        Self {
            name: name.to_string(),
            kind,
        }
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered training columns with a name index
#[derive(Debug, Clone)]
pub struct TrainingSchema {
    columns: Vec<SchemaColumn>,
    index: HashMap<String, usize>,
    hash: u32,
}

impl TrainingSchema {
    /// Build from the ordered column names of the training frame
    pub fn from_names<I, S>(names: I) -> ArtifactResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = Vec::new();
        let mut index = HashMap::new();

        for (position, name) in names.into_iter().enumerate() {
            let name = name.as_ref();
            if index.insert(name.to_string(), position).is_some() {
                return Err(ArtifactError::malformed(
                    "training columns",
                    format!("duplicate column '{}'", name),
                ));
            }
            columns.push(SchemaColumn::parse(name));
        }

        if columns.is_empty() {
            return Err(ArtifactError::malformed("training columns", "schema is empty"));
        }

        let unmatched = columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Other)
            .count();
        if unmatched > 0 {
            log::warn!(
                "{} training column(s) match no record field and will always be zero",
                unmatched
            );
        }

        let hash = compute_schema_hash(columns.iter().map(|c| c.name.as_str()));

        Ok(Self { columns, index, hash })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Position of a column by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// CRC32 of the ordered column names
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Categories the classifier saw for a field, in schema order
    pub fn categories(&self, field: Field) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|c| match &c.kind {
                ColumnKind::Indicator { field: f, category } if *f == field => {
                    Some(category.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// Project an encoded record onto the schema.
    ///
    /// Every schema column absent from the encoding is 0; every encoded
    /// column absent from the schema is dropped. A field none of whose
    /// columns landed in the schema is reported as an unseen category.
    pub fn align(&self, encoded: &EncodedRecord) -> Alignment {
        let mut values = vec![0.0f32; self.columns.len()];
        let mut dropped = Vec::new();
        let mut matched: HashSet<Field> = HashSet::new();

        for column in encoded.iter() {
            match self.position(&column.name) {
                Some(i) => {
                    values[i] = column.value;
                    matched.insert(column.field);
                }
                None => dropped.push(column.name.clone()),
            }
        }

        // A flag fitted with one dummy dropped still knows both values
        let unseen = encoded
            .iter()
            .filter(|c| !matched.contains(&c.field) && c.name != c.field.prefix())
            .filter(|c| !(c.field.is_flag() && self.has_field(c.field)))
            .map(|c| c.name.clone())
            .collect();

        Alignment {
            vector: FeatureVector::new(self.hash, values),
            dropped,
            unseen,
        }
    }

    /// Whether any column was fitted on `field`
    fn has_field(&self, field: Field) -> bool {
        self.columns.iter().any(|c| match &c.kind {
            ColumnKind::Indicator { field: f, .. } | ColumnKind::Flag { field: f } => *f == field,
            ColumnKind::Other => false,
        })
    }

    pub fn info(&self) -> SchemaInfo {
        SchemaInfo {
            hash: self.hash,
            column_count: self.columns.len(),
            column_names: self.names().map(str::to_string).collect(),
        }
    }
}

/// Result of projecting an encoded record onto the schema
#[derive(Debug, Clone)]
pub struct Alignment {
    pub vector: FeatureVector,
    /// Encoded columns the schema does not know
    pub dropped: Vec<String>,
    /// Indicator columns of fields that contributed nothing
    pub unseen: Vec<String>,
}

// ============================================================================
// SCHEMA HASH
// ============================================================================

/// CRC32 over the ordered names, NUL separated
pub fn compute_schema_hash<'a>(names: impl Iterator<Item = &'a str>) -> u32 {
    let mut hasher = Hasher::new();
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Schema summary for logging and the model endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub hash: u32,
    pub column_count: usize,
    pub column_names: Vec<String>,
}
