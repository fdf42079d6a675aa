//! Census and projection tables, reshaped from wide to long format.

use std::io::Read;

use super::melt::melt;
use crate::error::{DataError, DataResult};
use crate::model::{AgeBand, AgeGroupRecord, PopulationRecord, ProjectionRecord, Sex, Situation};
use crate::parser::read_table;
use crate::schema::tables::{AGE_GROUPS, POPULATION, PROJECTION};

/// Load the urban/rural/total population table, one record per
/// (municipality, year, situation).
pub fn load_population<R: Read>(source: R) -> DataResult<Vec<PopulationRecord>> {
    let rows = read_table(source, &POPULATION)?;

    melt(&rows, &POPULATION)?
        .into_iter()
        .map(|cell| {
            let situation = Situation::from_label(cell.variable).ok_or_else(|| {
                DataError::SchemaMismatch {
                    table: POPULATION.name.to_string(),
                    column: cell.variable.to_string(),
                }
            })?;
            Ok(PopulationRecord {
                municipality_code: cell.row.code("codmun")?,
                year: cell.row.year("ano")?,
                situation,
                population: cell.value,
            })
        })
        .collect()
}

/// Load the population projection table, one record per (municipality, year).
pub fn load_projection<R: Read>(source: R) -> DataResult<Vec<ProjectionRecord>> {
    let rows = read_table(source, &PROJECTION)?;

    melt(&rows, &PROJECTION)?
        .into_iter()
        .map(|cell| {
            let year = cell.variable.parse::<i32>().map_err(|_| DataError::SchemaMismatch {
                table: PROJECTION.name.to_string(),
                column: cell.variable.to_string(),
            })?;
            Ok(ProjectionRecord {
                municipality_code: cell.row.code("codmun")?,
                year,
                population: cell.value,
            })
        })
        .collect()
}

/// Load the age structure table, one record per (municipality, sex, age band).
pub fn load_age_groups<R: Read>(source: R) -> DataResult<Vec<AgeGroupRecord>> {
    let rows = read_table(source, &AGE_GROUPS)?;

    melt(&rows, &AGE_GROUPS)?
        .into_iter()
        .map(|cell| {
            let raw_sex = cell.row.text("sexo")?;
            let sex = Sex::from_label(raw_sex).ok_or_else(|| DataError::TypeCoercion {
                table: AGE_GROUPS.name.to_string(),
                line: cell.row.line,
                column: "sexo".to_string(),
                value: raw_sex.to_string(),
                expected: "'Feminino' or 'Masculino'",
            })?;
            let age_band = AgeBand::from_label(cell.variable).ok_or_else(|| {
                DataError::SchemaMismatch {
                    table: AGE_GROUPS.name.to_string(),
                    column: cell.variable.to_string(),
                }
            })?;
            Ok(AgeGroupRecord {
                municipality_code: cell.row.code("codmun")?,
                sex,
                age_band,
                population: cell.value,
            })
        })
        .collect()
}
