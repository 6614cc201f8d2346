//! Static dashboard content: panels, chart catalogue and form options

use axum::{extract::{Query, State}, Json};
use serde::{Deserialize, Serialize};
use severity_core::Field;

use crate::AppState;
use crate::models::{
    catalogue, sections_for, Chart, FormField, Section, Tab, DASHBOARD_TITLE, SECTIONS,
};

#[derive(Debug, Deserialize)]
pub struct TabFilter {
    pub tab: Option<Tab>,
}

#[derive(Debug, Serialize)]
pub struct TabInfo {
    pub id: Tab,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub title: &'static str,
    pub tabs: Vec<TabInfo>,
    pub sections: Vec<&'static Section>,
}

/// Descriptive text panels, optionally for one tab
pub async fn sections(Query(filter): Query<TabFilter>) -> Json<SectionsResponse> {
    let sections = match filter.tab {
        Some(tab) => sections_for(tab),
        None => SECTIONS.iter().collect(),
    };

    Json(SectionsResponse {
        title: DASHBOARD_TITLE,
        tabs: Tab::ALL
            .iter()
            .map(|&t| TabInfo { id: t, title: t.title() })
            .collect(),
        sections,
    })
}

#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub charts: Vec<Chart>,
    /// Shown when some images have not been exported yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

/// Chart catalogue with availability of each image
pub async fn charts(
    State(state): State<AppState>,
    Query(filter): Query<TabFilter>,
) -> Json<ChartsResponse> {
    let charts: Vec<Chart> = catalogue(&state.config.charts_dir)
        .into_iter()
        .filter(|c| filter.tab.map_or(true, |t| c.tab == t))
        .collect();

    let notice = charts
        .iter()
        .any(|c| !c.available)
        .then_some("Para exibir gráficos, salve-os como imagens .png na mesma pasta do script.");

    Json(ChartsResponse { charts, notice })
}

#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub fields: Vec<FormField>,
}

/// Closed option lists of the simulator form
pub async fn form() -> Json<FormResponse> {
    Json(FormResponse {
        fields: Field::ALL.iter().map(|&f| FormField::from_field(f)).collect(),
    })
}
