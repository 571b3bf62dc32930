use axum::{body::Bytes, extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::{
    error::AppError,
    models::AnalyticsResult,
    services::overview::AnalyticsOverview,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analytics", get(overview).post(load_analytics))
}

async fn load_analytics(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AnalyticsOverview>, AppError> {
    let start = std::time::Instant::now();
    let result: AnalyticsResult = serde_json::from_slice(&body)?;
    tracing::info!("Received analytics result of {}KB", body.len() / 1024);

    let mut session = state.session.write();
    let loaded = session.load(result)?;
    let overview = AnalyticsOverview::from_result(&loaded);
    tracing::info!("Analytics result loaded in {:?}", start.elapsed());

    Ok(Json(overview))
}

async fn overview(State(state): State<Arc<AppState>>) -> Result<Json<AnalyticsOverview>, AppError> {
    let overview = state.session.read().overview()?;
    Ok(Json(overview))
}
