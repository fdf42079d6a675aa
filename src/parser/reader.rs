use csv::StringRecord;
use std::collections::{HashMap, HashSet};
use std::io::Read;

use super::record::{parse_record, ParsedRow};
use crate::error::{DataError, DataResult};
use crate::schema::TableSchema;

/// Field separator shared by every source table
pub const DELIMITER: u8 = b';';

/// Read a `;`-delimited source into typed rows.
///
/// Fails with `SchemaMismatch` when a schema column is missing from the header,
/// `TypeCoercion` on the first bad cell and `DuplicateKey` when the schema's
/// unique key repeats.
pub fn read_table<R: Read>(source: R, schema: &TableSchema) -> DataResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers, schema)?;

    let mut rows = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line
        let line = idx as u64 + 2;
        let record = result?;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let row = parse_record(&record, &header_map, schema, line)?;

        if !schema.unique_key.is_empty() {
            let key = row.key(schema.unique_key);
            if !seen.insert(key.clone()) {
                return Err(DataError::DuplicateKey {
                    table: schema.name.to_string(),
                    key,
                });
            }
        }

        rows.push(row);
    }

    log::debug!("{}: read {} rows", schema.name, rows.len());
    Ok(rows)
}

/// Map every schema column to its position in the header
fn build_header_map(
    headers: &StringRecord,
    schema: &TableSchema,
) -> DataResult<HashMap<&'static str, usize>> {
    let positions: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect();

    schema
        .columns
        .iter()
        .map(|col| {
            positions
                .get(col.name)
                .map(|idx| (col.name, *idx))
                .ok_or_else(|| DataError::SchemaMismatch {
                    table: schema.name.to_string(),
                    column: col.name.to_string(),
                })
        })
        .collect()
}

/// Spreadsheet exports often prefix the first header with a UTF-8 BOM
fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{MUNICIPALITIES, POPULATION};

    #[test]
    fn test_reads_rows_with_bom_and_extra_columns() {
        let data = "\u{feff}cod;municipio;uf;regiao\n4125506;São José dos Pinhais;PR;Sul\n";
        let rows = read_table(data.as_bytes(), &MUNICIPALITIES).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code("cod").unwrap(), 4125506);
        assert_eq!(rows[0].text("uf").unwrap(), "PR");
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let data = "codmun;nomemun;ano;Total;Urbana\n1;A;2010;3;2\n";
        match read_table(data.as_bytes(), &POPULATION) {
            Err(DataError::SchemaMismatch { column, .. }) => assert_eq!(column, "Rural"),
            other => panic!("expected SchemaMismatch, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_duplicate_key() {
        let data = "cod;municipio;uf\n1;A;PR\n1;B;PR\n";
        assert!(matches!(
            read_table(data.as_bytes(), &MUNICIPALITIES),
            Err(DataError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = "cod;municipio;uf\n1;A;PR\n;;\n2;B;SC\n";
        let rows = read_table(data.as_bytes(), &MUNICIPALITIES).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].line, 4);
    }
}
