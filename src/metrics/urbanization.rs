use super::round2;
use crate::error::{DataError, DataResult};
use crate::model::{PopulationRecord, Situation};

/// Share of the population living in urban areas, in percent, for the latest
/// census year available for `code`.
///
/// Fails with `NoData` when that year lacks a Total or Urban count, when the
/// Total is zero, or when the Urban count exceeds the Total.
pub fn urbanization_index(records: &[PopulationRecord], code: u32) -> DataResult<f64> {
    let latest = records
        .iter()
        .filter(|r| r.municipality_code == code)
        .map(|r| r.year)
        .max()
        .ok_or_else(|| DataError::no_data(code, "no census records"))?;

    let count = |situation: Situation| {
        records
            .iter()
            .find(|r| r.municipality_code == code && r.year == latest && r.situation == situation)
            .map(|r| r.population)
    };

    let (total, urban) = match (count(Situation::Total), count(Situation::Urban)) {
        (Some(total), Some(urban)) => (total, urban),
        _ => {
            return Err(DataError::no_data(
                code,
                format!("no Total/Urban pair for {}", latest),
            ))
        }
    };

    if total == 0 {
        return Err(DataError::no_data(code, format!("total population is zero in {}", latest)));
    }

    if urban > total {
        return Err(DataError::no_data(
            code,
            format!("urban population {} exceeds total {} in {}", urban, total, latest),
        ));
    }

    Ok(round2(urban as f64 / total as f64 * 100.0))
}
