//! Chart catalogue
//!
//! Charts are rendered offline and looked up by filename convention. A
//! missing file is listed as unavailable instead of failing the page.

use std::path::Path;

use serde::Serialize;

use super::content::Tab;

/// Columns compared between 2023 and 2024
pub const ANALYSIS_COLUMNS: &[&str] = &[
    "classificacao_acidente",
    "tipo_acidente",
    "fase_dia",
    "tipo_pista",
    "tipo_veiculo",
    "tracado_via_unico",
    "final_semana",
    "condicao_tempo",
    "rodovia",
];

/// Model comparison images, best model first in the listing
pub const MODEL_CHARTS: &[(&str, &str)] = &[
    ("2randonforest.png", "Random Forest - O MODELO ESCOLHIDO"),
    ("1xgboost.png", "XGBoost"),
    ("3svm.png", "SVM"),
    ("4decisiontree.png", "Decision Tree"),
    ("5lightgbm.png", "LightGBM"),
];

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub tab: Tab,
    pub file: String,
    pub caption: String,
    pub url: String,
    pub available: bool,
}

impl Chart {
    fn new(tab: Tab, file: String, caption: String, charts_dir: &Path) -> Self {
        let available = charts_dir.join(&file).is_file();
        Self {
            tab,
            url: format!("/charts/{}", file),
            file,
            caption,
            available,
        }
    }
}

fn readable(column: &str) -> String {
    column.replace('_', " ")
}

/// Every chart the dashboard shows, in display order
pub fn catalogue(charts_dir: &Path) -> Vec<Chart> {
    let mut charts = Vec::new();

    for column in ANALYSIS_COLUMNS {
        charts.push(Chart::new(
            Tab::YearlyAnalysis,
            format!("comparacao_{}.png", column),
            format!("Comparação de dados da coluna {} (2023 vs 2024).", readable(column)),
            charts_dir,
        ));
    }

    for column in ANALYSIS_COLUMNS {
        charts.push(Chart::new(
            Tab::Distribution,
            format!("grafico_{}_data_drift.png", column),
            format!(
                "Comparação da distribuição da coluna {} (2023 vs 2024).",
                readable(column)
            ),
            charts_dir,
        ));
    }

    charts.push(Chart::new(
        Tab::Correlation,
        "grafico_one_hot_encoding.png".to_string(),
        "Gráfico com one-hot encoding (dummies)".to_string(),
        charts_dir,
    ));
    charts.push(Chart::new(
        Tab::Correlation,
        "grafico_label_encoder.png".to_string(),
        "Gráfico label encoder".to_string(),
        charts_dir,
    ));

    for (file, caption) in MODEL_CHARTS {
        charts.push(Chart::new(
            Tab::Model,
            file.to_string(),
            caption.to_string(),
            charts_dir,
        ));
    }

    charts
}
