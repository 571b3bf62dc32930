use serde::{Deserialize, Serialize};

use crate::config::ViewDefaults;
use crate::models::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Histogram,
    Box,
    Heatmap,
    Area,
}

impl ChartType {
    pub const ALL: [ChartType; 8] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Scatter,
        ChartType::Pie,
        ChartType::Histogram,
        ChartType::Box,
        ChartType::Heatmap,
        ChartType::Area,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartType::Bar => "Bar Chart",
            ChartType::Line => "Line Chart",
            ChartType::Scatter => "Scatter Plot",
            ChartType::Pie => "Pie Chart",
            ChartType::Histogram => "Histogram",
            ChartType::Box => "Box Plot",
            ChartType::Heatmap => "Heatmap",
            ChartType::Area => "Area Chart",
        }
    }
}

/// Presentation options. Everything except `opacity` clamping is passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyling {
    pub title: String,
    pub color_palette: String,
    pub opacity: f64,
    pub show_legend: bool,
    pub show_grid: bool,
}

impl ChartStyling {
    pub fn with_defaults(defaults: &ViewDefaults) -> Self {
        Self {
            title: String::new(),
            color_palette: defaults.palette.to_string(),
            opacity: defaults.opacity,
            show_legend: defaults.show_legend,
            show_grid: defaults.show_grid,
        }
    }

    /// Opacity limited to `[0.1, 1.0]`.
    pub fn effective_opacity(&self) -> f64 {
        if self.opacity.is_nan() {
            return ViewDefaults::STANDARD.opacity;
        }
        self.opacity.clamp(0.1, 1.0)
    }
}

impl Default for ChartStyling {
    fn default() -> Self {
        Self::with_defaults(&ViewDefaults::STANDARD)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub x_column: String,
    pub y_column: String,
    pub color_column: Option<String>,
    pub styling: ChartStyling,
}

impl ChartSpec {
    pub fn with_defaults(defaults: &ViewDefaults) -> Self {
        Self {
            chart_type: defaults.chart_type,
            x_column: String::new(),
            y_column: String::new(),
            color_column: None,
            styling: ChartStyling::with_defaults(defaults),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.x_column.is_empty() && !self.y_column.is_empty()
    }

    pub fn active_color_column(&self) -> Option<&str> {
        self.color_column.as_deref().filter(|column| !column.is_empty())
    }
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self::with_defaults(&ViewDefaults::STANDARD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesMode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesAndMarkers,
}

/// Point data of one series, shaped by what the chart type consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SeriesData {
    /// Paired values, one per row.
    Points { x: Vec<CellValue>, y: Vec<CellValue> },
    /// Aggregated totals, one per category.
    Categories { labels: Vec<String>, values: Vec<f64> },
    /// Raw values for renderer-side binning or distribution.
    Values { values: Vec<CellValue> },
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Points { x, .. } => x.len(),
            SeriesData::Categories { labels, .. } => labels.len(),
            SeriesData::Values { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub chart_type: ChartType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub data: SeriesData,
    /// Per-point values of the color column, for renderer-side grouping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SeriesMode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fill_to_zero: bool,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub title: String,
    pub show_grid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSpec {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOutput {
    pub series: Vec<SeriesSpec>,
    pub layout: LayoutSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome {
    /// Axis bindings are unset or name columns outside the schema; nothing
    /// should be rendered.
    NotConfigured,
    Ready(ChartOutput),
}

impl ChartOutcome {
    pub fn output(&self) -> Option<&ChartOutput> {
        match self {
            ChartOutcome::Ready(output) => Some(output),
            ChartOutcome::NotConfigured => None,
        }
    }
}
