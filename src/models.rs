use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::AppError;

/// Declared type of a schema column. Accepts both the dashboard's names and
/// the dtype names the analysis backend reports; dtypes it does not
/// recognise are treated as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
}

impl From<&str> for ColumnType {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "integer" | "int" => ColumnType::Integer,
            "float" | "double" => ColumnType::Float,
            "boolean" | "bool" => ColumnType::Boolean,
            "date" => ColumnType::Date,
            other if other.starts_with("interval") => ColumnType::String,
            // int8..int64, uint8..uint64 and the nullable Int64/UInt64
            other if other.starts_with("int") || other.starts_with("uint") => ColumnType::Integer,
            other if other.starts_with("float") => ColumnType::Float,
            other if other.starts_with("datetime") || other.starts_with("timestamp") => {
                ColumnType::Date
            }
            _ => ColumnType::String,
        }
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        ColumnType::from(value.as_str())
    }
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        }
    }
}

/// One `[name, type]` schema entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, ColumnType)", into = "(String, ColumnType)")]
pub struct SchemaField {
    pub name: String,
    pub column_type: ColumnType,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

impl From<(String, ColumnType)> for SchemaField {
    fn from((name, column_type): (String, ColumnType)) -> Self {
        Self { name, column_type }
    }
}

impl From<SchemaField> for (String, ColumnType) {
    fn from(field: SchemaField) -> Self {
        (field.name, field.column_type)
    }
}

/// A single cell. Numbers keep their JSON representation so integers
/// stringify without a trailing `.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("null"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value.into())
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value.into())
    }
}

impl From<f64> for CellValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(CellValue::Null, CellValue::Number)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

pub type Row = BTreeMap<String, CellValue>;

/// Per-column statistics computed upstream. Numeric fields are absent for
/// non-numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub missing: usize,
    pub unique: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
}

impl ColumnStats {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            missing: 0,
            unique: 0,
            mean: None,
            median: None,
            mode: None,
            min: None,
            max: None,
            std: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub schema: Vec<SchemaField>,
    pub sample: Vec<Row>,
    pub columns: Vec<ColumnStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AnalyticsResult {
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        column_type_of(&self.schema, name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_type(name).is_some()
    }

    /// Rows the column stats were computed over. The sample may be only the
    /// head of the dataset.
    pub fn total_rows(&self) -> usize {
        self.row_count.unwrap_or(self.sample.len())
    }

    /// Checks the invariants tying `schema`, `columns` and `sample` together.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        for field in &self.schema {
            if !seen.insert(field.name.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate column '{}' in schema",
                    field.name
                )));
            }
        }

        if self.columns.len() != self.schema.len() {
            return Err(AppError::InvalidInput(format!(
                "Schema has {} columns but {} column stats were provided",
                self.schema.len(),
                self.columns.len()
            )));
        }

        if self.total_rows() < self.sample.len() {
            return Err(AppError::InvalidInput(format!(
                "row_count {} is smaller than the {} sample rows",
                self.total_rows(),
                self.sample.len()
            )));
        }

        let rows = self.total_rows();
        for (idx, (field, stats)) in self.schema.iter().zip(&self.columns).enumerate() {
            if field.name != stats.name {
                return Err(AppError::InvalidInput(format!(
                    "Column stats {} is '{}' but schema expects '{}'",
                    idx, stats.name, field.name
                )));
            }
            if stats.missing > rows {
                return Err(AppError::InvalidInput(format!(
                    "Column '{}' reports {} missing values in {} rows",
                    stats.name, stats.missing, rows
                )));
            }
            if stats.unique > rows - stats.missing {
                return Err(AppError::InvalidInput(format!(
                    "Column '{}' reports {} unique values but only {} are present",
                    stats.name,
                    stats.unique,
                    rows - stats.missing
                )));
            }
        }

        Ok(())
    }

    /// Fills absent schema keys with explicit nulls.
    pub fn normalize_rows(&mut self) {
        for row in &mut self.sample {
            for field in &self.schema {
                row.entry(field.name.clone()).or_insert(CellValue::Null);
            }
        }
    }
}

pub(crate) fn column_type_of(schema: &[SchemaField], name: &str) -> Option<ColumnType> {
    schema
        .iter()
        .find(|field| field.name == name)
        .map(|field| field.column_type)
}

/// Builds a row from `(column, value)` pairs.
pub fn row<K, V, I>(cells: I) -> Row
where
    K: Into<String>,
    V: Into<CellValue>,
    I: IntoIterator<Item = (K, V)>,
{
    cells
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
