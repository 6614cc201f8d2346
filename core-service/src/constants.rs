//! Central Configuration Constants
//!
//! Single source of truth for artifact names and the closed category lists.
//! The option lists must match the categories seen by the classifier at
//! training time.

/// Default classifier artifact (ONNX export of the random forest)
pub const DEFAULT_MODEL_FILE: &str = "modelo_rf_binario.onnx";

/// Default target label encoder artifact
pub const DEFAULT_LABEL_ENCODER_FILE: &str = "label_encoder_alvo_binario_rf.json";

/// Default training column schema artifact
pub const DEFAULT_TRAINING_COLUMNS_FILE: &str = "colunas_treino_binario_rf.json";

/// Optional checksum manifest, looked up next to the artifacts
pub const MANIFEST_FILE: &str = "manifest.json";

/// Separator between field prefix and category in one-hot column names
pub const COLUMN_SEPARATOR: char = '_';

/// Label for accidents with victims
pub const LABEL_WITH_VICTIMS: &str = "COM VITIMAS";

/// Label for accidents without victims
pub const LABEL_WITHOUT_VICTIMS: &str = "SEM VITIMAS";

/// Library version
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Closed option lists (form selectors)
// ============================================

pub const ACCIDENT_TYPES: &[&str] = &[
    "COLISAO TRANSVERSAL",
    "QUEDA DE OCUPANTE DE VEICULO",
    "TOMBAMENTO",
    "COLISAO LATERAL MESMO SENTIDO",
    "COLISAO TRASEIRA",
    "COLISAO COM OBJETO",
    "CAPOTAMENTO",
    "SAIDA DE LEITO CARROCAVEL",
    "ENGAVETAMENTO",
    "ATROPELAMENTO DE ANIMAL",
    "ATROPELAMENTO DE PEDESTRE",
    "INCENDIO",
    "COLISAO LATERAL SENTIDO OPOSTO",
    "COLISAO FRONTAL",
    "DERRAMAMENTO DE CARGA",
    "EVENTOS ATIPICOS",
];

pub const DAY_PHASES: &[&str] = &["DIA", "NOITE"];

pub const ROAD_TYPES: &[&str] = &["DUPLA", "SIMPLES", "MULTIPLA"];

pub const WEATHER_CONDITIONS: &[&str] = &["NORMAL", "ADVERSO"];

pub const VEHICLE_TYPES: &[&str] = &[
    "MOTOCICLETA",
    "AUTOMOVEL",
    "ONIBUS",
    "CAMINHAO",
    "BICICLETA",
    "OUTROS",
];

pub const ROAD_ALIGNMENTS: &[&str] = &[
    "RETA",
    "PONTE",
    "CURVA",
    "INTERSECAO",
    "ACLIVE",
    "DECLIVE",
    "RETORNO",
    "OBRAS",
    "ROTATORIA",
    "DESVIO",
];

/// Boolean categories, rendered the way the training frame spelled them
pub const WEEKEND_FLAGS: &[&str] = &["True", "False"];

/// Most frequent highway segments; everything else was grouped as OUTROS
pub const HIGHWAY_SEGMENTS: &[&str] = &[
    "RECIFE-BR-101.0",
    "JABOATAO DOS GUARARAPES-BR-101.0",
    "IGARASSU-BR-101.0",
    "RECIFE-BR-232.0",
    "JABOATAO DOS GUARARAPES-BR-232.0",
    "IPOJUCA-BR-101.0",
    "JABOATAO DOS GUARARAPES-BR-408.0",
    "PAULISTA-BR-101.0",
    "CABO DE SANTO AGOSTINHO-BR-101.0",
    "ABREU E LIMA-BR-101.0",
    "SAO LOURENCO DA MATA-BR-408.0",
    "ITAPISSUMA-BR-101.0",
    "RECIFE-BR-408.0",
    "MORENO-BR-232.0",
    "RECIFE-BR-235.0",
    "OUTROS",
];
