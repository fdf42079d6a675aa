use super::round2;
use crate::error::{DataError, DataResult};
use crate::model::{PopulationRecord, Situation};

/// Average annual compound growth rate of the Total population between two
/// census years, in percent:
///
/// ```text
/// ((P(to) / P(from)) ^ (1 / (to - from)) - 1) * 100
/// ```
///
/// `InvalidRange` when `year_to <= year_from`; `NoData` when either endpoint is
/// missing or the starting population is zero.
pub fn compound_growth_rate(
    records: &[PopulationRecord],
    code: u32,
    year_from: i32,
    year_to: i32,
) -> DataResult<f64> {
    if year_to <= year_from {
        return Err(DataError::InvalidRange {
            from: year_from,
            to: year_to,
        });
    }

    let total_in = |year: i32| {
        records
            .iter()
            .find(|r| {
                r.municipality_code == code && r.year == year && r.situation == Situation::Total
            })
            .map(|r| r.population)
            .ok_or_else(|| DataError::no_data(code, format!("no Total population for {}", year)))
    };

    let start = total_in(year_from)?;
    let end = total_in(year_to)?;

    if start == 0 {
        return Err(DataError::no_data(
            code,
            format!("total population is zero in {}", year_from),
        ));
    }

    let years = f64::from(year_to - year_from);
    let ratio = end as f64 / start as f64;
    Ok(round2((ratio.powf(1.0 / years) - 1.0) * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(values: &[(i32, u64)]) -> Vec<PopulationRecord> {
        values
            .iter()
            .map(|&(year, population)| PopulationRecord {
                municipality_code: 1,
                year,
                situation: Situation::Total,
                population,
            })
            .collect()
    }

    #[test]
    fn test_doubling_over_a_decade() {
        let records = totals(&[(2000, 100), (2010, 200)]);
        assert_eq!(compound_growth_rate(&records, 1, 2000, 2010).unwrap(), 7.18);
    }

    #[test]
    fn test_decline_is_negative() {
        let records = totals(&[(2000, 200), (2010, 100)]);
        assert_eq!(compound_growth_rate(&records, 1, 2000, 2010).unwrap(), -6.7);
    }

    #[test]
    fn test_exponent_is_not_truncated() {
        // 1/3 must stay fractional: 1.331^(1/3) = 1.1
        let records = totals(&[(2000, 1000), (2003, 1331)]);
        assert_eq!(compound_growth_rate(&records, 1, 2000, 2003).unwrap(), 10.0);
    }

    #[test]
    fn test_invalid_range_checked_first() {
        let records = totals(&[]);
        assert!(matches!(
            compound_growth_rate(&records, 1, 2010, 2010),
            Err(DataError::InvalidRange { from: 2010, to: 2010 })
        ));
        assert!(matches!(
            compound_growth_rate(&records, 1, 2010, 2000),
            Err(DataError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_missing_endpoint() {
        let records = totals(&[(2010, 200)]);
        assert!(matches!(
            compound_growth_rate(&records, 1, 2000, 2010),
            Err(DataError::NoData { .. })
        ));
    }

    #[test]
    fn test_zero_start_is_no_data() {
        let records = totals(&[(2000, 0), (2010, 50)]);
        assert!(matches!(
            compound_growth_rate(&records, 1, 2000, 2010),
            Err(DataError::NoData { .. })
        ));
    }
}
