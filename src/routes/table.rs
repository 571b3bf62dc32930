use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

use crate::{
    error::AppError,
    services::{session::TablePage, table::ViewState},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/table", get(current_page))
        .route("/table/state", put(replace_state))
        .route("/table/sort/:column", post(toggle_sort))
        .route("/table/export", get(export))
}

async fn current_page(State(state): State<Arc<AppState>>) -> Result<Json<TablePage>, AppError> {
    let page = state.session.read().table_page()?;
    Ok(Json(page))
}

async fn replace_state(
    State(state): State<Arc<AppState>>,
    Json(view): Json<ViewState>,
) -> Result<Json<TablePage>, AppError> {
    let mut session = state.session.write();
    session.set_view_state(view)?;
    Ok(Json(session.table_page()?))
}

async fn toggle_sort(
    State(state): State<Arc<AppState>>,
    Path(column): Path<String>,
) -> Result<Json<TablePage>, AppError> {
    let mut session = state.session.write();
    session.toggle_sort(&column)?;
    tracing::debug!(
        "Sorting by {} {:?}",
        column,
        session.view_state().sort_direction
    );
    Ok(Json(session.table_page()?))
}

async fn export(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let csv = state.session.read().export_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"data_export.csv\"",
            ),
        ],
        csv,
    ))
}
