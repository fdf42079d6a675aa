//! One user's view of the data: tables loaded lazily through an injected
//! provider, metric results memoized for the lifetime of the session.
//!
//! A session is single-threaded and never shared; concurrent users each get
//! their own.

use once_cell::unsync::OnceCell;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Cursor;

use crate::config::Config;
use crate::error::{DataError, DataResult};
use crate::loader::{load_age_groups, load_arrangements, load_population, load_projection, load_reference};
use crate::metrics::{
    age_pyramid, compound_growth_rate, population_series, projection_series, urbanization_index,
    year_span, AgePyramid,
};
use crate::model::{
    AgeGroupRecord, ArrangementMembership, MunicipalityRef, PopulationRecord, ProjectionRecord,
};
use crate::schema::tables::{AGE_GROUPS, ARRANGEMENTS, MUNICIPALITIES, POPULATION, PROJECTION};
use crate::schema::TableSchema;
use crate::selection;
use crate::source::{FsProvider, SourceProvider, SourceRef};
use crate::spatial::{
    arrangement_map, arrangement_of, density_map, join_geometry, load_arrangement_geometry,
    load_sectors, ArrangementMap, DensityMap, GeoSector,
};

/// A loaded table and a hash of the bytes it was parsed from
struct Loaded<T> {
    records: Vec<T>,
    fingerprint: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Metric {
    Urbanization,
    GrowthRate { from: i32, to: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    metric: Metric,
    fingerprint: u64,
    code: u32,
}

pub struct Session<P: SourceProvider> {
    provider: P,
    config: Config,
    population: OnceCell<Loaded<PopulationRecord>>,
    projection: OnceCell<Loaded<ProjectionRecord>>,
    age_groups: OnceCell<Loaded<AgeGroupRecord>>,
    reference: OnceCell<Loaded<MunicipalityRef>>,
    arrangements: OnceCell<Loaded<ArrangementMembership>>,
    memo: RefCell<HashMap<MemoKey, f64>>,
}

impl Session<FsProvider> {
    /// Session over the data tree named by `config`
    pub fn open(config: Config) -> anyhow::Result<Self> {
        let provider = FsProvider::from_config(&config)?;
        log::info!("data root: {:?}", provider.root());
        Ok(Self::new(provider, config))
    }
}

impl<P: SourceProvider> Session<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self {
            provider,
            config,
            population: OnceCell::new(),
            projection: OnceCell::new(),
            age_groups: OnceCell::new(),
            reference: OnceCell::new(),
            arrangements: OnceCell::new(),
            memo: RefCell::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn load<T>(
        &self,
        schema: &'static TableSchema,
        loader: impl FnOnce(&[u8]) -> DataResult<Vec<T>>,
    ) -> DataResult<Loaded<T>> {
        let bytes = self.provider.read(&SourceRef::Table(schema))?;
        let records = loader(&bytes)?;
        log::info!("{}: loaded {} records", schema.name, records.len());
        Ok(Loaded {
            fingerprint: fingerprint(&bytes),
            records,
        })
    }

    fn population_table(&self) -> DataResult<&Loaded<PopulationRecord>> {
        self.population
            .get_or_try_init(|| self.load(&POPULATION, |bytes| load_population(bytes)))
    }

    pub fn population(&self) -> DataResult<&[PopulationRecord]> {
        Ok(&self.population_table()?.records)
    }

    pub fn projection(&self) -> DataResult<&[ProjectionRecord]> {
        let table = self
            .projection
            .get_or_try_init(|| self.load(&PROJECTION, |bytes| load_projection(bytes)))?;
        Ok(&table.records)
    }

    pub fn age_groups(&self) -> DataResult<&[AgeGroupRecord]> {
        let table = self
            .age_groups
            .get_or_try_init(|| self.load(&AGE_GROUPS, |bytes| load_age_groups(bytes)))?;
        Ok(&table.records)
    }

    pub fn reference(&self) -> DataResult<&[MunicipalityRef]> {
        let table = self
            .reference
            .get_or_try_init(|| self.load(&MUNICIPALITIES, |bytes| load_reference(bytes)))?;
        Ok(&table.records)
    }

    pub fn arrangements(&self) -> DataResult<&[ArrangementMembership]> {
        let table = self
            .arrangements
            .get_or_try_init(|| self.load(&ARRANGEMENTS, |bytes| load_arrangements(bytes)))?;
        Ok(&table.records)
    }

    pub fn states(&self) -> DataResult<Vec<String>> {
        Ok(selection::states(self.reference()?))
    }

    pub fn municipalities_in_state(&self, uf: &str) -> DataResult<Vec<&str>> {
        Ok(selection::municipalities_in_state(self.reference()?, uf))
    }

    pub fn municipality_code(&self, uf: &str, name: &str) -> DataResult<u32> {
        selection::municipality_code(self.reference()?, uf, name)
    }

    fn memoized(
        &self,
        metric: Metric,
        code: u32,
        compute: impl FnOnce(&[PopulationRecord]) -> DataResult<f64>,
    ) -> DataResult<f64> {
        let table = self.population_table()?;
        let key = MemoKey {
            metric,
            fingerprint: table.fingerprint,
            code,
        };

        if let Some(value) = self.memo.borrow().get(&key) {
            return Ok(*value);
        }

        let value = compute(&table.records)?;
        self.memo.borrow_mut().insert(key, value);
        Ok(value)
    }

    pub fn urbanization_index(&self, code: u32) -> DataResult<f64> {
        self.memoized(Metric::Urbanization, code, |records| {
            urbanization_index(records, code)
        })
    }

    pub fn growth_rate(&self, code: u32, year_from: i32, year_to: i32) -> DataResult<f64> {
        let metric = Metric::GrowthRate {
            from: year_from,
            to: year_to,
        };
        self.memoized(metric, code, |records| {
            compound_growth_rate(records, code, year_from, year_to)
        })
    }

    /// Census sectors of `code`, read from its state's sector file
    pub fn sectors(&self, code: u32) -> DataResult<Vec<GeoSector>> {
        let state = selection::state_of(code)?;
        let bytes = self.provider.read(&SourceRef::Sectors {
            uf: state.uf.to_string(),
            code,
        })?;
        let sectors = load_sectors(bytes.as_slice())?;
        Ok(join_geometry(&sectors, code))
    }

    pub fn density_map(&self, code: u32) -> DataResult<DensityMap> {
        let sectors = self.sectors(code)?;
        density_map(&sectors, code, self.config.sector_zoom)
    }

    /// Map of the population arrangement containing `code`, `None` when the
    /// municipality belongs to none.
    pub fn arrangement_map(&self, code: u32) -> DataResult<Option<ArrangementMap>> {
        let Some(arrangement) = arrangement_of(self.arrangements()?, code) else {
            return Ok(None);
        };

        let bytes = self
            .provider
            .read(&SourceRef::Arrangement { code: arrangement })?;
        let geometry = load_arrangement_geometry(arrangement, Cursor::new(bytes))?;
        arrangement_map(geometry, self.config.arrangement_zoom).map(Some)
    }

    /// Everything the dashboard shows for one municipality.
    ///
    /// Fails only when `code` is not in the reference table; every other
    /// problem becomes a `Panel::NoData`.
    pub fn select(&self, code: u32) -> DataResult<SelectionView> {
        let municipality = selection::find_municipality(self.reference()?, code)?.clone();
        let window = self.config.growth_window;

        let population = self.population();

        let growth_rate: Option<Panel<f64>> = match &population {
            Ok(records) if records
                .iter()
                .any(|r| r.municipality_code == code && r.year == window.from) =>
            {
                Some(self.growth_rate(code, window.from, window.to).into())
            }
            _ => None,
        };

        let population_panel = population
            .and_then(|records| non_empty(code, "census", population_series(records, code)));

        let projection = self
            .projection()
            .and_then(|records| non_empty(code, "projection", projection_series(records, code)));

        Ok(SelectionView {
            year_span: self.population().and_then(|r| year_span(r, code)).into(),
            urbanization_index: self.urbanization_index(code).into(),
            growth_rate,
            population: population_panel.into(),
            projection: projection.into(),
            age_pyramid: self.age_groups().and_then(|r| age_pyramid(r, code)).into(),
            density_map: self.density_map(code).into(),
            arrangement: self.arrangement_map(code).transpose().map(Panel::from),
            municipality,
        })
    }
}

fn non_empty<T>(code: u32, what: &str, series: Vec<T>) -> DataResult<Vec<T>> {
    if series.is_empty() {
        Err(DataError::no_data(code, format!("no {} records", what)))
    } else {
        Ok(series)
    }
}

fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// A dashboard panel: either renderable content or the reason it is empty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready(T),
    NoData { reason: String },
}

impl<T> Panel<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            Panel::NoData { .. } => None,
        }
    }
}

impl<T> From<DataResult<T>> for Panel<T> {
    fn from(result: DataResult<T>) -> Self {
        match result {
            Ok(value) => Panel::Ready(value),
            Err(err) => {
                if !err.is_no_data() {
                    log::warn!("panel unavailable: {}", err);
                }
                Panel::NoData {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Prepared content for one selected municipality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionView {
    pub municipality: MunicipalityRef,
    /// First and last census year
    pub year_span: Panel<(i32, i32)>,
    pub urbanization_index: Panel<f64>,
    /// Only present when the census has the window's starting year
    pub growth_rate: Option<Panel<f64>>,
    pub population: Panel<Vec<PopulationRecord>>,
    pub projection: Panel<Vec<ProjectionRecord>>,
    pub age_pyramid: Panel<AgePyramid>,
    pub density_map: Panel<DensityMap>,
    /// Only present when the municipality belongs to a population arrangement
    pub arrangement: Option<Panel<ArrangementMap>>,
}

impl SelectionView {
    pub fn to_json(&self) -> DataResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryProvider;
    use std::cell::Cell;

    const REFERENCE: &str = "cod;municipio;uf\n4125506;São José dos Pinhais;PR\n2507507;João Pessoa;PB\n";
    const POPULATION_CSV: &str = "codmun;nomemun;ano;Total;Urbana;Rural\n\
        4125506;SJP;2000;100;80;20\n\
        4125506;SJP;2010;200;150;50\n\
        2507507;JP;2010;700000;690000;10000\n";

    fn provider() -> MemoryProvider {
        MemoryProvider::new()
            .with(SourceRef::Table(&MUNICIPALITIES), REFERENCE)
            .with(SourceRef::Table(&POPULATION), POPULATION_CSV)
    }

    /// Counts reads to check that tables are loaded once
    struct CountingProvider {
        inner: MemoryProvider,
        reads: Cell<usize>,
    }

    impl SourceProvider for CountingProvider {
        fn read(&self, source: &SourceRef) -> DataResult<Vec<u8>> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read(source)
        }
    }

    #[test]
    fn test_tables_load_once() {
        let session = Session::new(
            CountingProvider {
                inner: provider(),
                reads: Cell::new(0),
            },
            Config::default(),
        );

        assert_eq!(session.urbanization_index(4125506).unwrap(), 75.0);
        assert_eq!(session.urbanization_index(4125506).unwrap(), 75.0);
        assert_eq!(session.growth_rate(4125506, 2000, 2010).unwrap(), 7.18);
        assert_eq!(session.provider.reads.get(), 1);
        assert_eq!(session.memo.borrow().len(), 2);
    }

    #[test]
    fn test_errors_are_not_memoized() {
        let session = Session::new(provider(), Config::default());
        assert!(session.growth_rate(2507507, 2000, 2010).is_err());
        assert!(session.memo.borrow().is_empty());
    }

    #[test]
    fn test_selection_helpers() {
        let session = Session::new(provider(), Config::default());
        assert_eq!(session.states().unwrap(), vec!["PB", "PR"]);
        assert_eq!(session.municipalities_in_state("PB").unwrap(), vec!["João Pessoa"]);
        assert_eq!(
            session.municipality_code("PR", "São José dos Pinhais").unwrap(),
            4125506
        );
    }

    #[test]
    fn test_select_degrades_to_no_data() {
        let session = Session::new(provider(), Config::default());
        let view = session.select(2507507).unwrap();

        assert_eq!(view.urbanization_index, Panel::Ready(98.57));
        // no 2000 census for this municipality
        assert!(view.growth_rate.is_none());
        assert!(!view.projection.is_ready());
        assert!(!view.age_pyramid.is_ready());
        assert!(!view.density_map.is_ready());
        // arrangement table missing entirely
        assert!(matches!(view.arrangement, Some(Panel::NoData { .. })));
        assert!(view.to_json().unwrap().contains("\"no_data\""));
    }

    #[test]
    fn test_select_unknown_municipality() {
        let session = Session::new(provider(), Config::default());
        assert!(matches!(session.select(1), Err(DataError::NoData { .. })));
    }
}
