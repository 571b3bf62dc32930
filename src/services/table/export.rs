use crate::models::{CellValue, Row, SchemaField};

/// Minimal CSV: a bare header line, then one line per row with every value
/// double-quoted in schema order.
///
/// Embedded quotes are not escaped, so a value containing `"` produces a line
/// that strict CSV readers will reject. This matches what the dashboard has
/// always exported.
pub fn export_csv<'a, I>(schema: &[SchemaField], rows: I) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    let header = schema
        .iter()
        .map(|field| field.name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let null = CellValue::Null;
    let lines = rows
        .into_iter()
        .map(|row| {
            schema
                .iter()
                .map(|field| format!("\"{}\"", row.get(&field.name).unwrap_or(&null)))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", header, lines)
}
