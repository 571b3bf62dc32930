use serde::Serialize;

use crate::models::{AnalyticsResult, ColumnStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityRating {
    Excellent,
    Good,
    Poor,
}

impl QualityRating {
    pub fn from_missing(missing: usize, rows: usize) -> Self {
        if rows == 0 {
            return QualityRating::Excellent;
        }
        let ratio = missing as f64 / rows as f64;
        if ratio < 0.05 {
            QualityRating::Excellent
        } else if ratio < 0.1 {
            QualityRating::Good
        } else {
            QualityRating::Poor
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnOverview {
    #[serde(flatten)]
    pub stats: ColumnStats,
    pub quality: QualityRating,
}

/// Headline numbers for an analytics result, all derived from the
/// statistics the analysis already reported.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsOverview {
    pub column_count: usize,
    pub sample_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    /// Percentage of non-missing cells over all analysed rows.
    pub data_quality: u32,
    pub columns: Vec<ColumnOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AnalyticsOverview {
    pub fn from_result(result: &AnalyticsResult) -> Self {
        let rows = result.total_rows();
        let cells = rows * result.columns.len();
        let missing: usize = result.columns.iter().map(|col| col.missing).sum();
        let data_quality = if cells == 0 {
            100
        } else {
            ((1.0 - missing as f64 / cells as f64) * 100.0).round() as u32
        };

        AnalyticsOverview {
            column_count: result.schema.len(),
            sample_rows: result.sample.len(),
            row_count: result.row_count,
            data_quality,
            columns: result
                .columns
                .iter()
                .map(|stats| ColumnOverview {
                    stats: stats.clone(),
                    quality: QualityRating::from_missing(stats.missing, rows),
                })
                .collect(),
            summary: result.summary.clone(),
        }
    }
}
