//! Where source bytes come from.
//!
//! Loaders never open files themselves. A session is handed a
//! [`SourceProvider`], so tests can swap the data tree for in-memory fixtures.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{DataError, DataResult};
use crate::schema::TableSchema;

/// A file the session may need
#[derive(Debug, Clone)]
pub enum SourceRef {
    Table(&'static TableSchema),
    /// Census sectors of one municipality
    Sectors { uf: String, code: u32 },
    /// Zipped member outlines of one population arrangement
    Arrangement { code: u32 },
}

impl SourceRef {
    /// Path below the data root
    pub fn relative_path(&self) -> PathBuf {
        match self {
            SourceRef::Table(schema) => PathBuf::from(schema.source_file),
            SourceRef::Sectors { uf, code } => PathBuf::from("territorio/setores2010")
                .join(uf.to_uppercase())
                .join(format!("{}.geojson", code)),
            SourceRef::Arrangement { code } => PathBuf::from("territorio/arranjos_pop")
                .join(code.to_string())
                .join(format!("arranjo_{}_municipalities.zip", code)),
        }
    }
}

/// Trait for source implementations - the data tree on disk or fixtures in memory
pub trait SourceProvider {
    fn read(&self, source: &SourceRef) -> DataResult<Vec<u8>>;
}

/// Reads sources below a root directory
#[derive(Debug, Clone)]
pub struct FsProvider {
    root: PathBuf,
}

impl FsProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Provider rooted at the configured data directory
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.data_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceProvider for FsProvider {
    fn read(&self, source: &SourceRef) -> DataResult<Vec<u8>> {
        let path = self.root.join(source.relative_path());
        log::debug!("reading {:?}", path);
        fs::read(&path).map_err(|source| DataError::Io { path, source })
    }
}

/// In-memory sources keyed by their relative path
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: SourceRef, bytes: impl Into<Vec<u8>>) {
        self.files.insert(source.relative_path(), bytes.into());
    }

    pub fn with(mut self, source: SourceRef, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(source, bytes);
        self
    }
}

impl SourceProvider for MemoryProvider {
    fn read(&self, source: &SourceRef) -> DataResult<Vec<u8>> {
        let path = source.relative_path();
        self.files.get(&path).cloned().ok_or_else(|| DataError::Io {
            source: io::Error::new(io::ErrorKind::NotFound, "no such in-memory source"),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::POPULATION;

    #[test]
    fn test_relative_paths() {
        assert_eq!(
            SourceRef::Sectors { uf: "pr".into(), code: 4125506 }.relative_path(),
            PathBuf::from("territorio/setores2010/PR/4125506.geojson")
        );
        assert_eq!(
            SourceRef::Arrangement { code: 4106902 }.relative_path(),
            PathBuf::from("territorio/arranjos_pop/4106902/arranjo_4106902_municipalities.zip")
        );
        assert_eq!(
            SourceRef::Table(&POPULATION).relative_path(),
            PathBuf::from("pop/pop_urbano_rural_total_70_10.CSV")
        );
    }

    #[test]
    fn test_memory_provider() {
        let provider = MemoryProvider::new().with(SourceRef::Table(&POPULATION), "abc");
        assert_eq!(provider.read(&SourceRef::Table(&POPULATION)).unwrap(), b"abc");
        assert!(matches!(
            provider.read(&SourceRef::Arrangement { code: 1 }),
            Err(DataError::Io { .. })
        ));
    }

    #[test]
    fn test_fs_provider_from_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pop")).unwrap();
        fs::write(dir.path().join(POPULATION.source_file), "abc").unwrap();

        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let provider = FsProvider::from_config(&config).unwrap();
        assert_eq!(provider.root(), dir.path());
        assert_eq!(provider.read(&SourceRef::Table(&POPULATION)).unwrap(), b"abc");
    }

    #[test]
    fn test_fs_provider_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FsProvider::new(dir.path());
        match provider.read(&SourceRef::Table(&POPULATION)) {
            Err(DataError::Io { path, .. }) => assert!(path.starts_with(dir.path())),
            other => panic!("expected Io error, got {:?}", other.map(|b| b.len())),
        }
    }
}
