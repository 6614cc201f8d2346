//! Accident Record - one user-described accident
//!
//! Field keys follow the training column prefixes so a record serializes
//! exactly like a row of the training frame.

use serde::{Deserialize, Serialize};

use crate::constants::*;

// ============================================================================
// FIELDS
// ============================================================================

/// Categorical fields of a record, in training frame order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    AccidentType,
    DayPhase,
    RoadType,
    Weather,
    VehicleType,
    RoadAlignment,
    Weekend,
    Highway,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::AccidentType,
        Field::DayPhase,
        Field::RoadType,
        Field::Weather,
        Field::VehicleType,
        Field::RoadAlignment,
        Field::Weekend,
        Field::Highway,
    ];

    /// Column prefix used by the one-hot encoding
    pub fn prefix(self) -> &'static str {
        match self {
            Field::AccidentType => "tipo_acidente",
            Field::DayPhase => "fase_dia",
            Field::RoadType => "tipo_pista",
            Field::Weather => "condicao_tempo",
            Field::VehicleType => "tipo_veiculo",
            Field::RoadAlignment => "tracado_via_unico",
            Field::Weekend => "final_semana",
            Field::Highway => "rodovia",
        }
    }

    /// Human readable form label
    pub fn label(self) -> &'static str {
        match self {
            Field::AccidentType => "Tipo de Acidente",
            Field::DayPhase => "Fase do Dia",
            Field::RoadType => "Tipo de Pista",
            Field::Weather => "Condição do Tempo",
            Field::VehicleType => "Tipo de Veículo",
            Field::RoadAlignment => "Traçado da Via",
            Field::Weekend => "É Fim de Semana?",
            Field::Highway => "Rodovia",
        }
    }

    /// Closed list of categories accepted by the form
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Field::AccidentType => ACCIDENT_TYPES,
            Field::DayPhase => DAY_PHASES,
            Field::RoadType => ROAD_TYPES,
            Field::Weather => WEATHER_CONDITIONS,
            Field::VehicleType => VEHICLE_TYPES,
            Field::RoadAlignment => ROAD_ALIGNMENTS,
            Field::Weekend => WEEKEND_FLAGS,
            Field::Highway => HIGHWAY_SEGMENTS,
        }
    }

    /// Boolean fields also keep a raw passthrough column
    pub fn is_flag(self) -> bool {
        matches!(self, Field::Weekend)
    }

    pub fn from_prefix(prefix: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.prefix() == prefix)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// One accident description submitted for prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentRecord {
    #[serde(rename = "tipo_acidente")]
    pub accident_type: String,
    #[serde(rename = "fase_dia")]
    pub day_phase: String,
    #[serde(rename = "tipo_pista")]
    pub road_type: String,
    #[serde(rename = "condicao_tempo")]
    pub weather: String,
    #[serde(rename = "tipo_veiculo")]
    pub vehicle_type: String,
    #[serde(rename = "tracado_via_unico")]
    pub road_alignment: String,
    #[serde(rename = "final_semana")]
    pub weekend: bool,
    #[serde(rename = "rodovia")]
    pub highway: String,
}

impl AccidentRecord {
    /// Category value of a field, booleans rendered as `True`/`False`
    pub fn category(&self, field: Field) -> String {
        match field {
            Field::AccidentType => self.accident_type.clone(),
            Field::DayPhase => self.day_phase.clone(),
            Field::RoadType => self.road_type.clone(),
            Field::Weather => self.weather.clone(),
            Field::VehicleType => self.vehicle_type.clone(),
            Field::RoadAlignment => self.road_alignment.clone(),
            Field::Weekend => flag_category(self.weekend).to_string(),
            Field::Highway => self.highway.clone(),
        }
    }

    /// Fields whose value falls outside the form's closed option list
    pub fn unknown_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|&f| !f.options().contains(&self.category(f).as_str()))
            .collect()
    }
}

pub(crate) fn flag_category(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
