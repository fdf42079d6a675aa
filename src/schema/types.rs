/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Signed integer (codes, years)
    Integer,
    /// Non-negative integer (population counts)
    Count,
    Real,
    Text,
}

impl ColumnType {
    pub fn describe(&self) -> &'static str {
        match self {
            ColumnType::Integer => "an integer",
            ColumnType::Count => "a non-negative integer",
            ColumnType::Real => "a number",
            ColumnType::Text => "text",
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    pub nullable: bool,
}

impl Column {
    /// Create an optional (nullable) column
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: true,
        }
    }

    /// Create a required (non-nullable) column
    pub const fn required(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: false,
        }
    }
}

/// Decimal and thousands markers used by a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal: char,
    pub thousands: Option<char>,
}

impl NumberFormat {
    /// `1234.5`
    pub const PLAIN: NumberFormat = NumberFormat {
        decimal: '.',
        thousands: None,
    };

    /// `1.234,5` as published by IBGE spreadsheets
    pub const PT_BR: NumberFormat = NumberFormat {
        decimal: ',',
        thousands: Some('.'),
    };

    /// Rewrite a locale-formatted number into the form Rust's parsers accept.
    pub fn normalize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for c in raw.trim().chars() {
            if Some(c) == self.thousands {
                continue;
            }
            if c == self.decimal {
                out.push('.');
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// Wide-to-long reshaping: every listed column becomes its own output record,
/// carrying the row's identifier columns along.
#[derive(Debug, Clone)]
pub struct MeltSpec {
    pub value_columns: &'static [&'static str],
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    /// Path relative to the data root
    pub source_file: &'static str,
    /// Columns that must be present; extra columns in the file are ignored
    pub columns: &'static [Column],
    pub melt: Option<MeltSpec>,
    /// Columns whose combined values must be unique per row
    pub unique_key: &'static [&'static str],
    pub number_format: NumberFormat,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pt_br() {
        assert_eq!(NumberFormat::PT_BR.normalize("1.234.567,89"), "1234567.89");
        assert_eq!(NumberFormat::PT_BR.normalize(" 42 "), "42");
    }

    #[test]
    fn test_normalize_plain_keeps_dot() {
        assert_eq!(NumberFormat::PLAIN.normalize("12.5"), "12.5");
    }
}
