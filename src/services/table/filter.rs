use crate::models::{CellValue, Row, SchemaField};

fn cell_text(value: &CellValue) -> String {
    value.to_string().to_lowercase()
}

/// True when any schema column of the row contains `needle`, which must
/// already be lower-cased. Keys outside the schema are never displayed and
/// never match.
pub fn row_matches_search(schema: &[SchemaField], row: &Row, needle: &str) -> bool {
    schema
        .iter()
        .any(|field| cell_matches(row, &field.name, needle))
}

/// Absent cells compare as `null`, the same text the table renders.
pub fn cell_matches(row: &Row, column: &str, needle: &str) -> bool {
    let text = row
        .get(column)
        .map(cell_text)
        .unwrap_or_else(|| cell_text(&CellValue::Null));
    text.contains(needle)
}

pub fn apply_search<'a>(schema: &[SchemaField], rows: Vec<&'a Row>, term: &str) -> Vec<&'a Row> {
    if term.is_empty() {
        return rows;
    }
    let needle = term.to_lowercase();
    rows.into_iter()
        .filter(|row| row_matches_search(schema, row, &needle))
        .collect()
}

pub fn apply_column_filter<'a>(rows: Vec<&'a Row>, column: &str, value: &str) -> Vec<&'a Row> {
    if value.is_empty() {
        return rows;
    }
    let needle = value.to_lowercase();
    rows.into_iter()
        .filter(|row| cell_matches(row, column, &needle))
        .collect()
}
