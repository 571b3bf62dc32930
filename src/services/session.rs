use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::config::ViewDefaults;
use crate::error::AppError;
use crate::models::{AnalyticsResult, SchemaField};
use crate::services::chart::{
    build_chart, palette_named, ChartOutcome, ChartSpec, LayoutSpec,
};
use crate::services::overview::AnalyticsOverview;
use crate::services::table::{
    compute_view, export_csv, filtered_rows, page_label, results_summary, total_pages,
    TableView, ViewState,
};

/// A chart configuration the user chose to keep.
#[derive(Debug, Clone, Serialize)]
pub struct SavedChart {
    pub spec: ChartSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSpec>,
    pub saved_at: DateTime<Utc>,
}

/// A table page with the text the pagination controls display.
#[derive(Debug, Clone, Serialize)]
pub struct TablePage {
    #[serde(flatten)]
    pub view: TableView,
    pub page: usize,
    pub rows_per_page: usize,
    pub total_pages: usize,
    pub label: String,
    pub summary: String,
}

/// Owns the current analytics result and the table/chart selections made
/// against it. Loading a new result resets every selection.
#[derive(Debug)]
pub struct DashboardSession {
    defaults: ViewDefaults,
    result: Option<Arc<AnalyticsResult>>,
    view: ViewState,
    chart: ChartSpec,
    saved_chart: Option<SavedChart>,
}

/// `x` is the first column and `y` the second, or the first again when the
/// schema has only one.
pub fn default_chart_spec(schema: &[SchemaField], defaults: &ViewDefaults) -> ChartSpec {
    let mut spec = ChartSpec::with_defaults(defaults);
    if let Some(first) = schema.first() {
        spec.x_column = first.name.clone();
        spec.y_column = schema.get(1).unwrap_or(first).name.clone();
    }
    spec
}

impl DashboardSession {
    pub fn new(defaults: ViewDefaults) -> Self {
        Self {
            defaults,
            result: None,
            view: ViewState::with_defaults(&defaults),
            chart: ChartSpec::with_defaults(&defaults),
            saved_chart: None,
        }
    }

    pub fn defaults(&self) -> &ViewDefaults {
        &self.defaults
    }

    /// Replaces the current result. An invalid result is rejected and the
    /// previous one stays loaded.
    pub fn load(&mut self, mut result: AnalyticsResult) -> Result<Arc<AnalyticsResult>, AppError> {
        result.normalize_rows();
        result.validate()?;

        tracing::info!(
            "Loaded analytics result: {} columns, {} sample rows",
            result.schema.len(),
            result.sample.len()
        );

        let result = Arc::new(result);
        self.result = Some(Arc::clone(&result));
        self.reset_selections();
        Ok(result)
    }

    pub fn reset_selections(&mut self) {
        self.view = ViewState::with_defaults(&self.defaults);
        self.chart = match &self.result {
            Some(result) => default_chart_spec(&result.schema, &self.defaults),
            None => ChartSpec::with_defaults(&self.defaults),
        };
    }

    pub fn result(&self) -> Result<&Arc<AnalyticsResult>, AppError> {
        self.result.as_ref().ok_or(AppError::NoAnalytics)
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn chart_spec(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn saved_chart(&self) -> Option<&SavedChart> {
        self.saved_chart.as_ref()
    }

    fn require_column(&self, column: &str) -> Result<(), AppError> {
        if self.result()?.has_column(column) {
            Ok(())
        } else {
            Err(AppError::InvalidSelection(column.to_string()))
        }
    }

    fn require_rows_per_page(&self, rows_per_page: usize) -> Result<(), AppError> {
        if self.defaults.allows_rows_per_page(rows_per_page) {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "Rows per page must be one of {:?}, got {}",
                self.defaults.rows_per_page_options, rows_per_page
            )))
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.search_term = term.into();
        self.view.page = 0;
    }

    /// `None` or an empty column disables the column filter.
    pub fn set_filter(&mut self, column: Option<String>, value: impl Into<String>) -> Result<(), AppError> {
        let column = column.filter(|c| !c.is_empty());
        if let Some(column) = &column {
            self.require_column(column)?;
        }
        self.view.filter_column = column;
        self.view.filter_value = value.into();
        self.view.page = 0;
        Ok(())
    }

    /// Same column flips direction; a different column starts ascending.
    pub fn toggle_sort(&mut self, column: &str) -> Result<(), AppError> {
        self.require_column(column)?;
        if self.view.active_sort() == Some(column) {
            self.view.sort_direction = self.view.sort_direction.toggled();
        } else {
            self.view.sort_column = Some(column.to_string());
            self.view.sort_direction = Default::default();
        }
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) {
        self.view.page = page;
    }

    /// Also returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), AppError> {
        self.require_rows_per_page(rows_per_page)?;
        self.view.rows_per_page = rows_per_page;
        self.view.page = 0;
        Ok(())
    }

    pub fn set_view_state(&mut self, state: ViewState) -> Result<(), AppError> {
        self.require_rows_per_page(state.rows_per_page)?;
        if let Some((column, _)) = state.active_filter() {
            self.require_column(column)?;
        }
        if let Some(column) = state.active_sort() {
            self.require_column(column)?;
        }
        self.view = state;
        Ok(())
    }

    pub fn set_chart_spec(&mut self, spec: ChartSpec) -> Result<(), AppError> {
        for column in [spec.x_column.as_str(), spec.y_column.as_str()] {
            if !column.is_empty() {
                self.require_column(column)?;
            }
        }
        if let Some(column) = spec.active_color_column() {
            self.require_column(column)?;
        }
        self.chart = spec;
        Ok(())
    }

    pub fn table_view(&self) -> Result<TableView, AppError> {
        let result = self.result()?;
        Ok(compute_view(&result.schema, &result.sample, &self.view))
    }

    pub fn table_page(&self) -> Result<TablePage, AppError> {
        let view = self.table_view()?;
        let total = self.result()?.sample.len();
        let rows_per_page = self.view.rows_per_page;
        Ok(TablePage {
            page: self.view.page,
            rows_per_page,
            total_pages: total_pages(view.total_matched, rows_per_page),
            label: page_label(self.view.page, rows_per_page, view.total_matched),
            summary: results_summary(view.rows.len(), view.total_matched, total),
            view,
        })
    }

    /// CSV of every matching row, ignoring pagination.
    pub fn export_csv(&self) -> Result<String, AppError> {
        let result = self.result()?;
        let rows = filtered_rows(&result.schema, &result.sample, &self.view);
        Ok(export_csv(&result.schema, rows))
    }

    pub fn chart(&self) -> Result<ChartOutcome, AppError> {
        let result = self.result()?;
        let palette = palette_named(&self.chart.styling.color_palette);
        Ok(build_chart(&result.schema, &result.sample, &self.chart, palette))
    }

    pub fn save_chart(&mut self) -> Result<&SavedChart, AppError> {
        let layout = self.chart()?.output().map(|output| output.layout.clone());
        let saved = SavedChart {
            spec: self.chart.clone(),
            layout,
            saved_at: Utc::now(),
        };
        tracing::info!("Saved {:?} chart", saved.spec.chart_type);
        Ok(self.saved_chart.insert(saved))
    }

    pub fn overview(&self) -> Result<AnalyticsOverview, AppError> {
        Ok(AnalyticsOverview::from_result(self.result()?))
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(ViewDefaults::STANDARD)
    }
}
