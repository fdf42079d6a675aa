use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::error::{DataError, DataResult};

/// Extensions accepted as the geometry entry of an archive
const GEOMETRY_EXTENSIONS: &[&str] = &["geojson", "json"];

/// Read the first GeoJSON entry of a zip archive into memory
pub fn read_geometry_entry<R: Read + Seek>(source: R) -> DataResult<Vec<u8>> {
    let mut archive = ZipArchive::new(source)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        // Entries may sit under a directory prefix
        let name = file.name().to_string();
        let is_geometry = Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| GEOMETRY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if !is_geometry {
            continue;
        }

        let mut buffer = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buffer).map_err(|source| DataError::Io {
            path: PathBuf::from(&name),
            source,
        })?;

        log::debug!("extracted {} ({} bytes) from archive", name, buffer.len());
        return Ok(buffer);
    }

    Err(DataError::Archive(zip::result::ZipError::FileNotFound))
}
