use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppError,
    services::{
        chart::{ChartOutcome, ChartSpec, ChartType, Palette, PALETTES},
        session::SavedChart,
    },
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chart", get(current_chart))
        .route("/chart/spec", put(replace_spec))
        .route("/chart/types", get(chart_types))
        .route("/chart/palettes", get(palettes))
        .route("/chart/saved", get(saved_chart).post(save_chart))
}

#[derive(Debug, Serialize)]
pub struct ChartTypeInfo {
    value: ChartType,
    label: &'static str,
}

async fn current_chart(State(state): State<Arc<AppState>>) -> Result<Json<ChartOutcome>, AppError> {
    let chart = state.session.read().chart()?;
    Ok(Json(chart))
}

async fn replace_spec(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<ChartSpec>,
) -> Result<Json<ChartOutcome>, AppError> {
    let mut session = state.session.write();
    session.set_chart_spec(spec)?;
    Ok(Json(session.chart()?))
}

async fn chart_types() -> Json<Vec<ChartTypeInfo>> {
    Json(
        ChartType::ALL
            .iter()
            .map(|&value| ChartTypeInfo {
                value,
                label: value.label(),
            })
            .collect(),
    )
}

async fn palettes() -> Json<&'static [Palette]> {
    Json(&PALETTES[..])
}

async fn save_chart(State(state): State<Arc<AppState>>) -> Result<Json<SavedChart>, AppError> {
    let saved = state.session.write().save_chart()?.clone();
    Ok(Json(saved))
}

async fn saved_chart(State(state): State<Arc<AppState>>) -> Result<Json<SavedChart>, AppError> {
    let saved = state.session.read().saved_chart().cloned();
    saved
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No chart has been saved".to_string()))
}
