use std::cmp::Ordering;

use super::types::SortDirection;
use crate::models::{CellValue, ColumnType, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Digit,
    Letter,
    Other,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Space
    } else if c.is_ascii_punctuation() {
        CharClass::Punctuation
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Other
    }
}

/// Collation over lower-cased text: whitespace, then punctuation, then
/// digits, then letters. Within a class characters compare by code point.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = char_class(x).cmp(&char_class(y)).then(x.cmp(&y));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn text_key(value: &CellValue) -> String {
    value.to_string().to_lowercase()
}

/// On numeric columns (or when the type is unknown) numbers come first in
/// numeric order, followed by every other cell in text order. Other columns
/// compare everything as case-insensitive text.
pub fn compare_cells(a: &CellValue, b: &CellValue, column_type: Option<ColumnType>) -> Ordering {
    let numeric_column = column_type.map_or(true, ColumnType::is_numeric);
    if numeric_column {
        match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => return x.total_cmp(&y),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }
    }
    locale_compare(&text_key(a), &text_key(b))
}

/// Stable: rows with equal keys keep their relative order in both directions.
pub fn sort_rows(
    rows: &mut [&Row],
    column: &str,
    column_type: Option<ColumnType>,
    direction: SortDirection,
) {
    let null = CellValue::Null;
    rows.sort_by(|a, b| {
        let x = a.get(column).unwrap_or(&null);
        let y = b.get(column).unwrap_or(&null);
        let ord = compare_cells(x, y, column_type);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
