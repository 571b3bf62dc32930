use serde::{Deserialize, Serialize};

use crate::config::ViewDefaults;
use crate::models::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Search, filter, sort and paging selections for the table.
///
/// Callers changing `rows_per_page` are expected to reset `page` to 0;
/// `compute_view` does not do it for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub search_term: String,
    pub filter_column: Option<String>,
    pub filter_value: String,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub rows_per_page: usize,
}

impl ViewState {
    pub fn with_defaults(defaults: &ViewDefaults) -> Self {
        Self {
            search_term: String::new(),
            filter_column: None,
            filter_value: String::new(),
            sort_column: None,
            sort_direction: SortDirection::Asc,
            page: 0,
            rows_per_page: defaults.rows_per_page,
        }
    }

    /// Column filter is active only with both a column and a value.
    pub fn active_filter(&self) -> Option<(&str, &str)> {
        match self.filter_column.as_deref() {
            Some(column) if !column.is_empty() && !self.filter_value.is_empty() => {
                Some((column, self.filter_value.as_str()))
            }
            _ => None,
        }
    }

    pub fn active_sort(&self) -> Option<&str> {
        self.sort_column.as_deref().filter(|column| !column.is_empty())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_defaults(&ViewDefaults::STANDARD)
    }
}

/// One page of the filtered and sorted sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub rows: Vec<Row>,
    pub total_matched: usize,
}

impl TableView {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total_matched: 0,
        }
    }
}
