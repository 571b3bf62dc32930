use std::collections::HashMap;

use super::palette::Palette;
use super::types::*;
use crate::models::{column_type_of, CellValue, Row, SchemaField};

fn column_values(rows: &[Row], column: &str) -> Vec<CellValue> {
    rows.iter()
        .map(|row| row.get(column).cloned().unwrap_or_default())
        .collect()
}

/// Sums `y` per distinct `x`, keeping categories in first-seen order.
/// Values that are not numbers count as 0.
pub fn aggregate_categories(rows: &[Row], x_column: &str, y_column: &str) -> (Vec<String>, Vec<f64>) {
    let mut labels: Vec<String> = Vec::new();
    let mut totals: Vec<f64> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut non_numeric = 0usize;

    for row in rows {
        let label = row
            .get(x_column)
            .map(CellValue::to_string)
            .unwrap_or_else(|| CellValue::Null.to_string());
        let value = match row.get(y_column).and_then(CellValue::as_f64) {
            Some(value) => value,
            None => {
                non_numeric += 1;
                0.0
            }
        };

        match index.get(&label) {
            Some(&slot) => totals[slot] += value,
            None => {
                index.insert(label.clone(), labels.len());
                labels.push(label);
                totals.push(value);
            }
        }
    }

    if non_numeric > 0 {
        tracing::warn!(
            "{} non-numeric '{}' values counted as 0 in pie totals",
            non_numeric,
            y_column
        );
    }

    (labels, totals)
}

fn chart_title(spec: &ChartSpec) -> String {
    if !spec.styling.title.is_empty() {
        return spec.styling.title.clone();
    }
    format!(
        "{} of {} vs {}",
        spec.chart_type.label(),
        spec.y_column,
        spec.x_column
    )
}

fn build_layout(spec: &ChartSpec) -> LayoutSpec {
    LayoutSpec {
        title: chart_title(spec),
        x_axis: AxisSpec {
            title: spec.x_column.clone(),
            show_grid: spec.styling.show_grid,
        },
        y_axis: AxisSpec {
            title: spec.y_column.clone(),
            show_grid: spec.styling.show_grid,
        },
        show_legend: spec.styling.show_legend,
    }
}

fn build_series(rows: &[Row], spec: &ChartSpec, palette: &Palette, group_column: Option<&str>) -> SeriesSpec {
    let opacity = Some(spec.styling.effective_opacity());

    let mut series = SeriesSpec {
        chart_type: spec.chart_type,
        name: Some(spec.y_column.clone()),
        data: SeriesData::Points {
            x: column_values(rows, &spec.x_column),
            y: column_values(rows, &spec.y_column),
        },
        group: group_column.map(|column| column_values(rows, column)),
        mode: None,
        fill_to_zero: false,
        marker: Marker {
            colors: vec![palette.primary().to_string()],
            opacity,
            size: None,
        },
    };

    match spec.chart_type {
        ChartType::Bar | ChartType::Heatmap => {}
        ChartType::Line => series.mode = Some(SeriesMode::LinesAndMarkers),
        ChartType::Scatter => {
            series.mode = Some(SeriesMode::Markers);
            series.marker.size = Some(8);
        }
        ChartType::Area => {
            series.mode = Some(SeriesMode::Lines);
            series.fill_to_zero = true;
        }
        ChartType::Histogram => {
            series.data = SeriesData::Values {
                values: column_values(rows, &spec.y_column),
            };
        }
        ChartType::Box => {
            series.data = SeriesData::Values {
                values: column_values(rows, &spec.y_column),
            };
            series.marker.opacity = None;
        }
        ChartType::Pie => {
            let (labels, values) = aggregate_categories(rows, &spec.x_column, &spec.y_column);
            series.name = None;
            series.group = None;
            series.marker = Marker {
                colors: palette.cycle(labels.len()),
                opacity: None,
                size: None,
            };
            series.data = SeriesData::Categories { labels, values };
        }
    }

    series
}

/// Projects rows into renderer-neutral series plus layout.
///
/// Unset axis bindings, or bindings to columns outside `schema`, give
/// `NotConfigured`. An empty row set gives a ready chart with no series.
/// A color column outside `schema` is ignored.
pub fn build_chart(schema: &[SchemaField], rows: &[Row], spec: &ChartSpec, palette: &Palette) -> ChartOutcome {
    if !spec.is_configured() {
        return ChartOutcome::NotConfigured;
    }
    for column in [&spec.x_column, &spec.y_column] {
        if column_type_of(schema, column).is_none() {
            tracing::warn!("Chart references unknown column '{}'", column);
            return ChartOutcome::NotConfigured;
        }
    }

    let layout = build_layout(spec);
    if rows.is_empty() {
        return ChartOutcome::Ready(ChartOutput {
            series: Vec::new(),
            layout,
        });
    }

    let group_column = spec
        .active_color_column()
        .filter(|column| column_type_of(schema, column).is_some());

    let series = build_series(rows, spec, palette, group_column);
    tracing::debug!(
        "Built {:?} chart with {} points over {} rows",
        spec.chart_type,
        series.data.len(),
        rows.len()
    );

    ChartOutcome::Ready(ChartOutput {
        series: vec![series],
        layout,
    })
}
