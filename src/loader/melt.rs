use crate::error::DataResult;
use crate::parser::ParsedRow;
use crate::schema::TableSchema;

/// One cell of a wide row, unpivoted
#[derive(Debug)]
pub struct MeltedCell<'a> {
    pub row: &'a ParsedRow,
    /// Header of the melted column ("Urbana", "2030", "5 a 9 anos", ...)
    pub variable: &'static str,
    pub value: u64,
}

/// Unpivot the schema's melt columns: one output cell per (row, melt column),
/// rows in file order and columns in schema order.
pub fn melt<'a>(rows: &'a [ParsedRow], schema: &TableSchema) -> DataResult<Vec<MeltedCell<'a>>> {
    let columns = schema.melt.as_ref().map(|m| m.value_columns).unwrap_or(&[]);
    let mut cells = Vec::with_capacity(rows.len() * columns.len());

    for row in rows {
        for &variable in columns {
            cells.push(MeltedCell {
                row,
                variable,
                value: row.count(variable)?,
            });
        }
    }

    Ok(cells)
}
