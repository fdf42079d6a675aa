use csv::StringRecord;
use std::collections::HashMap;

use crate::error::{DataError, DataResult};
use crate::schema::{Column, ColumnType, NumberFormat, TableSchema};

/// A parsed row with every schema column coerced to its declared type
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub table: &'static str,
    /// 1-based line in the source file, header included
    pub line: u64,
    pub values: HashMap<&'static str, CellValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Count(u64),
    Real(f64),
    Text(String),
}

impl ParsedRow {
    fn cell(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&CellValue::Null)
    }

    fn mismatch(&self, column: &str, expected: &'static str) -> DataError {
        DataError::TypeCoercion {
            table: self.table.to_string(),
            line: self.line,
            column: column.to_string(),
            value: format!("{:?}", self.cell(column)),
            expected,
        }
    }

    pub fn integer(&self, column: &str) -> DataResult<i64> {
        match self.cell(column) {
            CellValue::Integer(i) => Ok(*i),
            CellValue::Count(c) => i64::try_from(*c).map_err(|_| self.mismatch(column, "an integer")),
            _ => Err(self.mismatch(column, "an integer")),
        }
    }

    pub fn count(&self, column: &str) -> DataResult<u64> {
        match self.cell(column) {
            CellValue::Count(c) => Ok(*c),
            CellValue::Integer(i) => u64::try_from(*i).map_err(|_| self.mismatch(column, "a non-negative integer")),
            _ => Err(self.mismatch(column, "a non-negative integer")),
        }
    }

    /// IBGE municipality code (7 digits)
    pub fn code(&self, column: &str) -> DataResult<u32> {
        let value = self.integer(column)?;
        u32::try_from(value).map_err(|_| self.mismatch(column, "a municipality code"))
    }

    pub fn year(&self, column: &str) -> DataResult<i32> {
        let value = self.integer(column)?;
        i32::try_from(value).map_err(|_| self.mismatch(column, "a year"))
    }

    pub fn text(&self, column: &str) -> DataResult<&str> {
        match self.cell(column) {
            CellValue::Text(s) => Ok(s.as_str()),
            _ => Err(self.mismatch(column, "text")),
        }
    }

    /// Key string built from the schema's unique-key columns
    pub fn key(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|c| match self.cell(c) {
                CellValue::Null => String::new(),
                CellValue::Integer(i) => i.to_string(),
                CellValue::Count(n) => n.to_string(),
                CellValue::Real(f) => f.to_string(),
                CellValue::Text(s) => s.clone(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Parse a CSV record into a row for the given table schema.
///
/// `header_map` maps each schema column to its position in the file.
pub fn parse_record(
    record: &StringRecord,
    header_map: &HashMap<&'static str, usize>,
    schema: &TableSchema,
    line: u64,
) -> DataResult<ParsedRow> {
    let mut values = HashMap::with_capacity(schema.columns.len());

    for col in schema.columns {
        let raw = header_map
            .get(col.name)
            .and_then(|idx| record.get(*idx))
            .unwrap_or("");

        let value = extract_value(raw, col, schema.number_format).ok_or_else(|| {
            DataError::TypeCoercion {
                table: schema.name.to_string(),
                line,
                column: col.name.to_string(),
                value: raw.to_string(),
                expected: col.col_type.describe(),
            }
        })?;
        values.insert(col.name, value);
    }

    Ok(ParsedRow {
        table: schema.name,
        line,
        values,
    })
}

/// Returns `None` when the cell cannot be coerced to the column's type
fn extract_value(raw: &str, col: &Column, format: NumberFormat) -> Option<CellValue> {
    let raw = raw.trim();

    if raw.is_empty() {
        return col.nullable.then_some(CellValue::Null);
    }

    match col.col_type {
        ColumnType::Text => Some(CellValue::Text(raw.to_string())),
        ColumnType::Integer => parse_integer(raw, format).map(CellValue::Integer),
        ColumnType::Count => parse_integer(raw, format)
            .and_then(|i| u64::try_from(i).ok())
            .map(CellValue::Count),
        ColumnType::Real => format
            .normalize(raw)
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(CellValue::Real),
    }
}

/// Integers may be written with a zero fraction ("1234.0") by spreadsheet exports
fn parse_integer(raw: &str, format: NumberFormat) -> Option<i64> {
    let normalized = format.normalize(raw);
    if let Ok(i) = normalized.parse::<i64>() {
        return Some(i);
    }
    let f = normalized.parse::<f64>().ok()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}
