//! Target Label Encoder
//!
//! Class code `i` decodes to `classes[i]`, the order the encoder was fitted
//! with. Only the two severity labels are accepted, so a decoded prediction
//! is always one of them.

use serde::{Deserialize, Serialize};

use crate::constants::{LABEL_WITHOUT_VICTIMS, LABEL_WITH_VICTIMS};
use crate::error::{ArtifactError, ArtifactResult, InferenceError};

/// Accident severity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "COM VITIMAS")]
    WithVictims,
    #[serde(rename = "SEM VITIMAS")]
    WithoutVictims,
}

impl Severity {
    pub const ALL: [Severity; 2] = [Severity::WithVictims, Severity::WithoutVictims];

    pub fn label(self) -> &'static str {
        match self {
            Severity::WithVictims => LABEL_WITH_VICTIMS,
            Severity::WithoutVictims => LABEL_WITHOUT_VICTIMS,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label.trim())
    }

    /// Whether the class calls for emergency resources
    pub fn has_victims(self) -> bool {
        matches!(self, Severity::WithVictims)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// On-disk form: `{"classes": ["COM VITIMAS", "SEM VITIMAS"]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoderFile {
    pub classes: Vec<String>,
}

impl LabelEncoderFile {
    pub fn build(&self) -> ArtifactResult<LabelEncoder> {
        LabelEncoder::from_classes(&self.classes)
    }
}

/// Bidirectional class code <-> severity mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<Severity>,
}

impl LabelEncoder {
    /// Build from fitted class labels, in code order
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> ArtifactResult<Self> {
        if classes.len() != Severity::ALL.len() {
            return Err(ArtifactError::malformed(
                "label encoder",
                format!("expected 2 classes, found {}", classes.len()),
            ));
        }

        let mut decoded = Vec::with_capacity(classes.len());
        for class in classes {
            let severity = Severity::from_label(class.as_ref()).ok_or_else(|| {
                ArtifactError::malformed(
                    "label encoder",
                    format!("unknown class '{}'", class.as_ref()),
                )
            })?;
            if decoded.contains(&severity) {
                return Err(ArtifactError::malformed(
                    "label encoder",
                    format!("duplicate class '{}'", severity),
                ));
            }
            decoded.push(severity);
        }

        Ok(Self { classes: decoded })
    }

    pub fn classes(&self) -> &[Severity] {
        &self.classes
    }

    /// Class code -> severity
    pub fn inverse_transform(&self, code: i64) -> Result<Severity, InferenceError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i).copied())
            .ok_or(InferenceError::UnknownClassCode(code))
    }

    /// Severity -> class code. Both classes are present after validation.
    pub fn transform(&self, severity: Severity) -> i64 {
        self.classes
            .iter()
            .position(|s| *s == severity)
            .map_or(-1, |i| i as i64)
    }

    /// Label string -> class code
    pub fn transform_label(&self, label: &str) -> Result<i64, InferenceError> {
        Severity::from_label(label)
            .map(|s| self.transform(s))
            .ok_or_else(|| InferenceError::UnknownLabel(label.to_string()))
    }
}
