use serde::Serialize;

use crate::error::{DataError, DataResult};
use crate::model::{AgeBand, AgeGroupRecord, PopulationRecord, ProjectionRecord, Sex};

/// Census records of one municipality, ordered by situation then year
pub fn population_series(records: &[PopulationRecord], code: u32) -> Vec<PopulationRecord> {
    let mut series: Vec<_> = records
        .iter()
        .filter(|r| r.municipality_code == code)
        .cloned()
        .collect();
    series.sort_by_key(|r| (r.situation, r.year));
    series
}

/// First and last census year available for `code`
pub fn year_span(records: &[PopulationRecord], code: u32) -> DataResult<(i32, i32)> {
    let years = records
        .iter()
        .filter(|r| r.municipality_code == code)
        .map(|r| r.year);

    let (min, max) = years.fold(None, |span: Option<(i32, i32)>, year| match span {
        None => Some((year, year)),
        Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
    })
    .ok_or_else(|| DataError::no_data(code, "no census records"))?;

    Ok((min, max))
}

/// Projected population of one municipality, ordered by year
pub fn projection_series(records: &[ProjectionRecord], code: u32) -> Vec<ProjectionRecord> {
    let mut series: Vec<_> = records
        .iter()
        .filter(|r| r.municipality_code == code)
        .cloned()
        .collect();
    series.sort_by_key(|r| r.year);
    series
}

/// Population per age band for each sex, youngest band first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgePyramid {
    pub municipality_code: u32,
    pub female: Vec<(AgeBand, u64)>,
    pub male: Vec<(AgeBand, u64)>,
}

impl AgePyramid {
    pub fn total(&self) -> u64 {
        self.female.iter().chain(&self.male).map(|(_, p)| p).sum()
    }
}

pub fn age_pyramid(records: &[AgeGroupRecord], code: u32) -> DataResult<AgePyramid> {
    let side = |sex: Sex| -> DataResult<Vec<(AgeBand, u64)>> {
        let mut bands: Vec<_> = records
            .iter()
            .filter(|r| r.municipality_code == code && r.sex == sex)
            .map(|r| (r.age_band, r.population))
            .collect();
        if bands.is_empty() {
            return Err(DataError::no_data(code, format!("no age structure for {}", sex)));
        }
        bands.sort_by_key(|(band, _)| *band);
        Ok(bands)
    };

    Ok(AgePyramid {
        municipality_code: code,
        female: side(Sex::Female)?,
        male: side(Sex::Male)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Situation;

    #[test]
    fn test_population_series_order() {
        let records = vec![
            PopulationRecord { municipality_code: 1, year: 2010, situation: Situation::Rural, population: 1 },
            PopulationRecord { municipality_code: 1, year: 2000, situation: Situation::Total, population: 2 },
            PopulationRecord { municipality_code: 2, year: 1990, situation: Situation::Total, population: 9 },
            PopulationRecord { municipality_code: 1, year: 2010, situation: Situation::Total, population: 3 },
        ];
        let series = population_series(&records, 1);
        let keys: Vec<_> = series.iter().map(|r| (r.situation, r.year)).collect();
        assert_eq!(
            keys,
            vec![(Situation::Total, 2000), (Situation::Total, 2010), (Situation::Rural, 2010)]
        );
        assert_eq!(year_span(&records, 1).unwrap(), (2000, 2010));
        assert!(year_span(&records, 3).is_err());
    }

    #[test]
    fn test_projection_series_sorted() {
        let records = vec![
            ProjectionRecord { municipality_code: 1, year: 2040, population: 4 },
            ProjectionRecord { municipality_code: 1, year: 2010, population: 1 },
        ];
        let years: Vec<_> = projection_series(&records, 1).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2010, 2040]);
    }

    #[test]
    fn test_age_pyramid() {
        let records = vec![
            AgeGroupRecord { municipality_code: 1, sex: Sex::Male, age_band: AgeBand::From80, population: 5 },
            AgeGroupRecord { municipality_code: 1, sex: Sex::Male, age_band: AgeBand::From0To4, population: 50 },
            AgeGroupRecord { municipality_code: 1, sex: Sex::Female, age_band: AgeBand::From5To9, population: 40 },
        ];
        let pyramid = age_pyramid(&records, 1).unwrap();
        assert_eq!(pyramid.male, vec![(AgeBand::From0To4, 50), (AgeBand::From80, 5)]);
        assert_eq!(pyramid.total(), 95);

        let only_male: Vec<_> = records.iter().filter(|r| r.sex == Sex::Male).cloned().collect();
        assert!(matches!(age_pyramid(&only_male, 1), Err(DataError::NoData { .. })));
    }
}
