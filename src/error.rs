use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading source tables or deriving metrics.
///
/// Every variant is recoverable by the caller. A presentation layer is expected
/// to show a "no data for this selection" state instead of aborting.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("{table}: expected column '{column}' is missing")]
    SchemaMismatch { table: String, column: String },

    #[error("{table}: line {line}, column '{column}': cannot read {value:?} as {expected}")]
    TypeCoercion {
        table: String,
        line: u64,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("{table}: duplicate key {key}")]
    DuplicateKey { table: String, key: String },

    #[error("no data for municipality {code}: {reason}")]
    NoData { code: u32, reason: String },

    #[error("no municipality named '{name}' in {uf}")]
    UnknownMunicipality { uf: String, name: String },

    #[error("invalid year range: {from} to {to}")]
    InvalidRange { from: i32, to: i32 },

    #[error("geometry collection is empty")]
    EmptyGeometry,
}

impl DataError {
    pub fn no_data(code: u32, reason: impl Into<String>) -> Self {
        DataError::NoData {
            code,
            reason: reason.into(),
        }
    }

    /// True for the "nothing to show" family, as opposed to broken input files.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            DataError::NoData { .. }
                | DataError::UnknownMunicipality { .. }
                | DataError::EmptyGeometry
                | DataError::InvalidRange { .. }
        )
    }
}

pub type DataResult<T> = Result<T, DataError>;
