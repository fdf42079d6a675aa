use std::io::Read;

use crate::error::DataResult;
use crate::model::{ArrangementMembership, MunicipalityRef};
use crate::parser::read_table;
use crate::schema::tables::{ARRANGEMENTS, MUNICIPALITIES};

/// Load the municipality reference table. A repeated code is a `DuplicateKey`.
pub fn load_reference<R: Read>(source: R) -> DataResult<Vec<MunicipalityRef>> {
    read_table(source, &MUNICIPALITIES)?
        .iter()
        .map(|row| {
            Ok(MunicipalityRef {
                code: row.code("cod")?,
                name: row.text("municipio")?.to_string(),
                state: row.text("uf")?.to_uppercase(),
            })
        })
        .collect()
}

/// Load the arrangement membership table (pt-BR number format).
pub fn load_arrangements<R: Read>(source: R) -> DataResult<Vec<ArrangementMembership>> {
    read_table(source, &ARRANGEMENTS)?
        .iter()
        .map(|row| {
            Ok(ArrangementMembership {
                municipality_code: row.code("Código do município")?,
                arrangement_code: row.code("CodArranjo")?,
            })
        })
        .collect()
}
