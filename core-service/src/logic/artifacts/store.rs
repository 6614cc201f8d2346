//! Artifact Store - load once, share read-only
//!
//! Replaces process-wide cached globals with an explicit context object:
//! `Artifacts::load` runs once at startup and the result is passed by
//! reference (or `Arc`) into every prediction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ArtifactResult};
use crate::logic::features::TrainingSchema;
use crate::logic::model::classifier::{Classifier, ClassifierKind};
use crate::logic::model::forest::{ForestClassifier, ForestFile};
use crate::logic::model::label::{LabelEncoder, LabelEncoderFile, Severity};
use crate::logic::model::Predictor;
use super::config::ArtifactConfig;
use super::manifest::ArtifactManifest;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub model_path: String,
    pub backend: ClassifierKind,
    pub schema_hash: String,
    pub column_count: usize,
    pub classes: Vec<Severity>,
    pub manifest_version: Option<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// The three loaded artifacts
pub struct Artifacts {
    classifier: Box<dyn Classifier>,
    label_encoder: LabelEncoder,
    schema: TrainingSchema,
    metadata: ArtifactMetadata,
}

impl Artifacts {
    /// Assemble from already-built parts, checking they agree
    pub fn new(
        classifier: Box<dyn Classifier>,
        label_encoder: LabelEncoder,
        schema: TrainingSchema,
        model_path: impl Into<String>,
    ) -> ArtifactResult<Self> {
        if let Some(expected) = classifier.n_features() {
            if expected != schema.len() {
                return Err(ArtifactError::SchemaMismatch {
                    expected,
                    actual: schema.len(),
                });
            }
        }

        let metadata = ArtifactMetadata {
            model_path: model_path.into(),
            backend: classifier.kind(),
            schema_hash: format!("{:08x}", schema.hash()),
            column_count: schema.len(),
            classes: label_encoder.classes().to_vec(),
            manifest_version: None,
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self {
            classifier,
            label_encoder,
            schema,
            metadata,
        })
    }

    /// Load every artifact named by `config`
    pub fn load(config: &ArtifactConfig) -> ArtifactResult<Self> {
        let missing = config.missing_paths();
        if !missing.is_empty() {
            return Err(ArtifactError::NotFound(missing));
        }

        let manifest_path = config.manifest_path();
        let manifest = if manifest_path.exists() {
            Some(ArtifactManifest::load(&manifest_path)?)
        } else {
            None
        };

        let read_verified = |path: &Path, name: &str| -> ArtifactResult<Vec<u8>> {
            let bytes = read_file(path)?;
            if let Some(m) = &manifest {
                m.verify(name, &bytes)?;
            }
            Ok(bytes)
        };

        let columns_path = config.training_columns_path();
        let names: Vec<String> = parse_json(
            &columns_path,
            &read_verified(&columns_path, &config.training_columns_file)?,
        )?;
        let schema = TrainingSchema::from_names(names)?;

        let encoder_path = config.label_encoder_path();
        let encoder_file: LabelEncoderFile = parse_json(
            &encoder_path,
            &read_verified(&encoder_path, &config.label_encoder_file)?,
        )?;
        let label_encoder = encoder_file.build()?;

        let model_path = config.model_path();
        let model_bytes = read_verified(&model_path, &config.model_file)?;
        let classifier = load_classifier(&model_path, &model_bytes)?;

        let mut artifacts = Self::new(
            classifier,
            label_encoder,
            schema,
            model_path.display().to_string(),
        )?;
        artifacts.metadata.manifest_version = manifest.and_then(|m| m.version);

        log::info!(
            "Artifacts loaded: {} backend, {} training columns (schema {}), classes {:?}",
            artifacts.metadata.backend.as_str(),
            artifacts.metadata.column_count,
            artifacts.metadata.schema_hash,
            artifacts.metadata.classes
        );

        Ok(artifacts)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn label_encoder(&self) -> &LabelEncoder {
        &self.label_encoder
    }

    pub fn schema(&self) -> &TrainingSchema {
        &self.schema
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }
}

fn read_file(path: &Path) -> ArtifactResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, bytes: &[u8]) -> ArtifactResult<T> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the backend by file extension
fn load_classifier(path: &Path, bytes: &[u8]) -> ArtifactResult<Box<dyn Classifier>> {
    match ClassifierKind::from_path(path) {
        Some(ClassifierKind::Forest) => {
            let file: ForestFile = parse_json(path, bytes)?;
            Ok(Box::new(ForestClassifier::from_file(&file)?))
        }
        #[cfg(feature = "onnx")]
        Some(ClassifierKind::Onnx) => Ok(Box::new(
            crate::logic::model::onnx::OnnxClassifier::load_from_memory(bytes)?,
        )),
        #[cfg(not(feature = "onnx"))]
        Some(ClassifierKind::Onnx) => Err(ArtifactError::Backend(
            "built without the `onnx` feature".to_string(),
        )),
        None => Err(ArtifactError::malformed(
            path.display().to_string(),
            "unsupported model format, expected .onnx or .json",
        )),
    }
}

// ============================================================================
// MODEL STATE
// ============================================================================

/// Outcome of loading at startup. The presentation layer keeps running in
/// either case and only the prediction surface reports unavailability.
#[derive(Debug, Clone)]
pub enum ModelState {
    Ready(Predictor),
    Unavailable { reason: String, missing: Vec<PathBuf> },
}

impl ModelState {
    /// Load and never fail: errors become the unavailable state
    pub fn load(config: &ArtifactConfig) -> Self {
        match Artifacts::load(config) {
            Ok(artifacts) => ModelState::Ready(Predictor::new(artifacts)),
            Err(e) => {
                log::error!("Model unavailable: {}", e);
                let missing = match &e {
                    ArtifactError::NotFound(paths) => paths.clone(),
                    _ => Vec::new(),
                };
                ModelState::Unavailable {
                    reason: e.to_string(),
                    missing,
                }
            }
        }
    }

    pub fn predictor(&self) -> Option<&Predictor> {
        match self {
            ModelState::Ready(p) => Some(p),
            ModelState::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.predictor().is_some()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::artifacts::manifest::sha256_hex;

    const COLUMNS: &str = r#"["fase_dia_DIA", "fase_dia_NOITE"]"#;
    const ENCODER: &str = r#"{"classes": ["COM VITIMAS", "SEM VITIMAS"]}"#;

    /// NOITE -> code 0 (COM VITIMAS), DIA -> code 1
    fn forest_json(n_features: usize) -> String {
        serde_json::json!({
            "n_features": n_features,
            "classes": [0, 1],
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [1, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[1.0, 1.0], [0.0, 3.0], [3.0, 0.0]]
            }]
        })
        .to_string()
    }

    fn write_set(dir: &Path, forest: &str) -> ArtifactConfig {
        std::fs::write(dir.join("cols.json"), COLUMNS).unwrap();
        std::fs::write(dir.join("enc.json"), ENCODER).unwrap();
        std::fs::write(dir.join("forest.json"), forest).unwrap();
        ArtifactConfig::new(dir)
            .with_model_file("forest.json")
            .with_label_encoder_file("enc.json")
            .with_training_columns_file("cols.json")
    }

    #[test]
    fn test_load_forest_set() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_set(dir.path(), &forest_json(2));
        let artifacts = Artifacts::load(&cfg).unwrap();
        assert_eq!(artifacts.metadata().backend, ClassifierKind::Forest);
        assert_eq!(artifacts.metadata().column_count, 2);
        assert_eq!(artifacts.schema().len(), 2);
    }

    #[test]
    fn test_missing_files_reported_together() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("colunas_treino_binario_rf.json"), COLUMNS).unwrap();
        let err = Artifacts::load(&ArtifactConfig::new(dir.path())).err().unwrap();
        match err {
            ArtifactError::NotFound(paths) => assert_eq!(paths.len(), 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_set(dir.path(), &forest_json(3));
        assert!(matches!(
            Artifacts::load(&cfg),
            Err(ArtifactError::SchemaMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_manifest_checksums() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_set(dir.path(), &forest_json(2));

        let good = serde_json::json!({
            "version": "rf-2024",
            "files": { "cols.json": sha256_hex(COLUMNS.as_bytes()) }
        });
        std::fs::write(dir.path().join("manifest.json"), good.to_string()).unwrap();
        let artifacts = Artifacts::load(&cfg).unwrap();
        assert_eq!(artifacts.metadata().manifest_version.as_deref(), Some("rf-2024"));

        let bad = serde_json::json!({ "files": { "enc.json": sha256_hex(b"tampered") } });
        std::fs::write(dir.path().join("manifest.json"), bad.to_string()).unwrap();
        assert!(matches!(
            Artifacts::load(&cfg),
            Err(ArtifactError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_set(dir.path(), &forest_json(2));
        std::fs::write(dir.path().join("modelo.joblib"), b"\x80\x04").unwrap();
        let cfg = cfg.with_model_file("modelo.joblib");
        assert!(matches!(Artifacts::load(&cfg), Err(ArtifactError::Malformed { .. })));
    }

    #[test]
    fn test_model_state_unavailable_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let state = ModelState::load(&ArtifactConfig::new(dir.path()));
        assert!(!state.is_ready());
        match state {
            ModelState::Unavailable { missing, reason } => {
                assert_eq!(missing.len(), 3);
                assert!(reason.contains("not found"));
            }
            ModelState::Ready(_) => panic!("expected unavailable"),
        }
    }

    #[cfg(feature = "onnx")]
    mod onnx {
        use super::*;
        use crate::logic::features::AccidentRecord;

        /// Column 0 votes COM VITIMAS, column 1 SEM VITIMAS, column 2 nothing
        const MODEL: &[u8] = include_bytes!("../../../fixtures/two_outputs.onnx");
        const COLUMNS: &str =
            r#"["tipo_acidente_ATROPELAMENTO DE PEDESTRE", "fase_dia_NOITE", "final_semana"]"#;

        fn write_set(dir: &Path, columns: &str, model: &[u8]) -> ArtifactConfig {
            let cfg = ArtifactConfig::new(dir);
            std::fs::write(cfg.training_columns_path(), columns).unwrap();
            std::fs::write(cfg.label_encoder_path(), ENCODER).unwrap();
            std::fs::write(cfg.model_path(), model).unwrap();
            cfg
        }

        fn record(accident_type: &str, day_phase: &str) -> AccidentRecord {
            AccidentRecord {
                accident_type: accident_type.into(),
                day_phase: day_phase.into(),
                road_type: "DUPLA".into(),
                weather: "NORMAL".into(),
                vehicle_type: "AUTOMOVEL".into(),
                road_alignment: "RETA".into(),
                weekend: false,
                highway: "OUTROS".into(),
            }
        }

        #[test]
        fn test_onnx_set_predicts() {
            let dir = tempfile::tempdir().unwrap();
            let state = ModelState::load(&write_set(dir.path(), COLUMNS, MODEL));
            let predictor = state.predictor().unwrap();
            assert_eq!(predictor.artifacts().metadata().backend, ClassifierKind::Onnx);

            let p = predictor
                .predict(&record("ATROPELAMENTO DE PEDESTRE", "DIA"))
                .unwrap();
            assert_eq!(p.severity, Severity::WithVictims);
            let proba = p.probabilities.unwrap();
            assert_eq!(proba[0].severity, Severity::WithVictims);
            assert!((proba[0].probability - 0.8808).abs() < 1e-3);

            let p = predictor.predict(&record("TOMBAMENTO", "NOITE")).unwrap();
            assert_eq!(p.severity, Severity::WithoutVictims);
        }

        #[test]
        fn test_onnx_width_checked_at_load() {
            let dir = tempfile::tempdir().unwrap();
            let columns = r#"["fase_dia_DIA", "fase_dia_NOITE", "final_semana", "tipo_pista_DUPLA"]"#;
            let cfg = write_set(dir.path(), columns, MODEL);

            assert!(matches!(
                Artifacts::load(&cfg),
                Err(ArtifactError::SchemaMismatch { expected: 3, actual: 4 })
            ));
            assert!(!ModelState::load(&cfg).is_ready());
        }

        #[test]
        fn test_corrupt_onnx_leaves_model_unavailable() {
            let dir = tempfile::tempdir().unwrap();
            let cfg = write_set(dir.path(), COLUMNS, b"not an onnx graph");

            match ModelState::load(&cfg) {
                ModelState::Unavailable { reason, missing } => {
                    assert!(missing.is_empty());
                    assert!(reason.starts_with("classifier backend error"));
                }
                ModelState::Ready(_) => panic!("expected unavailable"),
            }
        }
    }
}
