use super::filter::{apply_column_filter, apply_search};
use super::sort::sort_rows;
use super::types::{TableView, ViewState};
use crate::models::{column_type_of, Row, SchemaField};

/// Search, column filter and sort, without paging. Selections naming a
/// column that is not in `schema` are ignored.
pub fn filtered_rows<'a>(
    schema: &[SchemaField],
    sample: &'a [Row],
    state: &ViewState,
) -> Vec<&'a Row> {
    let mut rows = apply_search(schema, sample.iter().collect(), &state.search_term);

    if let Some((column, value)) = state.active_filter() {
        if column_type_of(schema, column).is_some() {
            rows = apply_column_filter(rows, column, value);
        } else {
            tracing::warn!("Ignoring filter on unknown column '{}'", column);
        }
    }

    if let Some(column) = state.active_sort() {
        match column_type_of(schema, column) {
            Some(column_type) => {
                sort_rows(&mut rows, column, Some(column_type), state.sort_direction)
            }
            None => tracing::warn!("Ignoring sort on unknown column '{}'", column),
        }
    }

    rows
}

/// Slice bounds of `page`, clamped to `total`. Zero rows per page yields an
/// empty range.
pub fn page_bounds(page: usize, rows_per_page: usize, total: usize) -> (usize, usize) {
    let start = page.saturating_mul(rows_per_page).min(total);
    let end = start.saturating_add(rows_per_page).min(total);
    (start, end)
}

pub fn total_pages(total: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        0
    } else {
        total.div_ceil(rows_per_page)
    }
}

pub fn compute_view(schema: &[SchemaField], sample: &[Row], state: &ViewState) -> TableView {
    if sample.is_empty() {
        return TableView::empty();
    }

    let rows = filtered_rows(schema, sample, state);
    let total_matched = rows.len();
    let (start, end) = page_bounds(state.page, state.rows_per_page, total_matched);

    tracing::debug!(
        "Table view: {} of {} rows matched, page {} ({}..{})",
        total_matched,
        sample.len(),
        state.page,
        start,
        end
    );

    TableView {
        rows: rows[start..end].iter().map(|row| (*row).clone()).collect(),
        total_matched,
    }
}

/// "from-to of count" with 1-based bounds.
pub fn page_label(page: usize, rows_per_page: usize, total: usize) -> String {
    let (start, end) = page_bounds(page, rows_per_page, total);
    if start == end {
        return format!("0-0 of {}", total);
    }
    format!("{}-{} of {}", start + 1, end, total)
}

/// "Showing N of M rows", noting the unfiltered size when they differ.
pub fn results_summary(shown: usize, matched: usize, total: usize) -> String {
    let mut summary = format!("Showing {} of {} rows", shown, matched);
    if matched != total {
        summary.push_str(&format!(" (filtered from {} total)", total));
    }
    summary
}
