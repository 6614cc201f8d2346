//! Prediction request/response models

use serde::{Deserialize, Serialize};
use severity_core::{AccidentRecord, ClassProbability, Field, Prediction};
use validator::Validate;

/// Simulator form submission. Keys match the training column prefixes.
///
/// Only shape is validated here; values outside the option lists are
/// scored with zero contribution, not rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, max = 128))]
    pub tipo_acidente: String,
    #[validate(length(min = 1, max = 128))]
    pub fase_dia: String,
    #[validate(length(min = 1, max = 128))]
    pub tipo_pista: String,
    #[validate(length(min = 1, max = 128))]
    pub condicao_tempo: String,
    #[validate(length(min = 1, max = 128))]
    pub tipo_veiculo: String,
    #[validate(length(min = 1, max = 128))]
    pub tracado_via_unico: String,
    pub final_semana: bool,
    #[validate(length(min = 1, max = 128))]
    pub rodovia: String,
}

impl From<PredictRequest> for AccidentRecord {
    fn from(req: PredictRequest) -> Self {
        AccidentRecord {
            accident_type: req.tipo_acidente,
            day_phase: req.fase_dia,
            road_type: req.tipo_pista,
            weather: req.condicao_tempo,
            vehicle_type: req.tipo_veiculo,
            road_alignment: req.tracado_via_unico,
            weekend: req.final_semana,
            highway: req.rodovia,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: &'static str,
    /// Victims expected: shown as an alert rather than a success banner
    pub alert: bool,
    pub message: String,
    pub class_code: i64,
    pub probabilities: Option<Vec<ClassProbability>>,
    pub unseen_columns: Vec<String>,
    pub inference_time_us: u64,
    pub method: &'static str,
}

impl From<Prediction> for PredictResponse {
    fn from(p: Prediction) -> Self {
        let alert = p.severity.has_victims();
        let message = if alert {
            format!("⚠️ A previsão é: {}", p.label())
        } else {
            format!("✅ A previsão é: {}", p.label())
        };

        Self {
            label: p.label(),
            alert,
            message,
            class_code: p.class_code,
            probabilities: p.probabilities,
            unseen_columns: p.unseen_columns,
            inference_time_us: p.inference_time_us,
            method: p.method.as_str(),
        }
    }
}

/// One selector of the simulator form
#[derive(Debug, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<serde_json::Value>,
}

impl FormField {
    pub fn from_field(field: Field) -> Self {
        let options = if field.is_flag() {
            vec![serde_json::Value::Bool(true), serde_json::Value::Bool(false)]
        } else {
            field
                .options()
                .iter()
                .map(|o| serde_json::Value::String(o.to_string()))
                .collect()
        };

        Self {
            key: field.prefix(),
            label: field.label(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictRequest {
        serde_json::from_value(serde_json::json!({
            "tipo_acidente": "COLISAO TRASEIRA",
            "fase_dia": "NOITE",
            "tipo_pista": "DUPLA",
            "condicao_tempo": "NORMAL",
            "tipo_veiculo": "AUTOMOVEL",
            "tracado_via_unico": "RETA",
            "final_semana": true,
            "rodovia": "RECIFE-BR-101.0"
        }))
        .unwrap()
    }

    #[test]
    fn test_request_maps_to_record() {
        let record: AccidentRecord = request().into();
        assert_eq!(record.accident_type, "COLISAO TRASEIRA");
        assert!(record.weekend);
        assert_eq!(record.highway, "RECIFE-BR-101.0");
    }

    #[test]
    fn test_empty_field_fails_validation() {
        let mut req = request();
        assert!(req.validate().is_ok());
        req.fase_dia.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_flag_field_offers_booleans() {
        let f = FormField::from_field(Field::Weekend);
        assert_eq!(f.key, "final_semana");
        assert_eq!(f.options, vec![serde_json::json!(true), serde_json::json!(false)]);
    }
}
