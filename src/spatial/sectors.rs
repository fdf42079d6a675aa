use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, GeoJson};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

use crate::error::{DataError, DataResult};
use crate::metrics::{density_bucket, DensityBucket};

/// Census sector id property (15 digits)
pub const SECTOR_ID_PROPERTY: &str = "CD_GEOCODI";
/// IBGE municipality code property
pub const MUNICIPALITY_PROPERTY: &str = "CD_GEOCODM";
/// Inhabitants per hectare
pub const DENSITY_PROPERTY: &str = "Pop/ha";

const SECTORS_TABLE: &str = "sectors";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoSector {
    pub sector_id: String,
    pub municipality_code: u32,
    pub geometry: MultiPolygon<f64>,
    /// `None` when the source has no density for the sector
    pub population_density: Option<f64>,
}

impl GeoSector {
    /// Density with the missing-value policy applied: absent counts as 0.
    pub fn density_or_zero(&self) -> f64 {
        self.population_density.unwrap_or(0.0)
    }

    pub fn density_bucket(&self) -> DensityBucket {
        density_bucket(self.density_or_zero())
    }
}

/// Parse a GeoJSON document into a feature collection
pub fn read_feature_collection<R: Read>(source: R) -> DataResult<FeatureCollection> {
    let geojson = GeoJson::from_reader(source)?;
    Ok(FeatureCollection::try_from(geojson)?)
}

/// Load census sectors from a GeoJSON feature collection.
///
/// Features without a polygonal geometry are skipped with a warning.
pub fn load_sectors<R: Read>(source: R) -> DataResult<Vec<GeoSector>> {
    let collection = read_feature_collection(source)?;
    let mut sectors = Vec::with_capacity(collection.features.len());

    for (idx, feature) in collection.features.iter().enumerate() {
        let line = idx as u64 + 1;

        let Some(geometry) = feature_polygons(feature)? else {
            log::warn!("sector feature {} has no polygon geometry, skipping", line);
            continue;
        };

        let sector_id = property_text(feature, SECTOR_ID_PROPERTY)
            .ok_or_else(|| missing_property(line, SECTOR_ID_PROPERTY, feature))?;
        let municipality_code = property_code(feature, MUNICIPALITY_PROPERTY)
            .ok_or_else(|| missing_property(line, MUNICIPALITY_PROPERTY, feature))?;

        sectors.push(GeoSector {
            sector_id,
            municipality_code,
            geometry,
            population_density: property_number(feature, DENSITY_PROPERTY),
        });
    }

    log::debug!("{}: read {} sectors", SECTORS_TABLE, sectors.len());
    Ok(sectors)
}

/// Sectors belonging to one municipality
pub fn join_geometry(sectors: &[GeoSector], code: u32) -> Vec<GeoSector> {
    sectors
        .iter()
        .filter(|s| s.municipality_code == code)
        .cloned()
        .collect()
}

/// Polygon or multipolygon geometry of a feature, `None` for anything else
pub(crate) fn feature_polygons(feature: &Feature) -> DataResult<Option<MultiPolygon<f64>>> {
    let Some(geometry) = &feature.geometry else {
        return Ok(None);
    };

    let shape = geo::Geometry::<f64>::try_from(geometry.value.clone())?;
    Ok(match shape {
        geo::Geometry::Polygon(polygon) => Some(MultiPolygon::new(vec![polygon])),
        geo::Geometry::MultiPolygon(multi) => Some(multi),
        _ => None,
    })
}

pub(crate) fn property_text(feature: &Feature, name: &str) -> Option<String> {
    match feature.property(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Codes appear both as strings and as numbers depending on the exporter
pub(crate) fn property_code(feature: &Feature, name: &str) -> Option<u32> {
    match feature.property(name)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        _ => None,
    }
}

fn property_number(feature: &Feature, name: &str) -> Option<f64> {
    let value = match feature.property(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn missing_property(line: u64, name: &str, feature: &Feature) -> DataError {
    DataError::TypeCoercion {
        table: SECTORS_TABLE.to_string(),
        line,
        column: name.to_string(),
        value: feature
            .property(name)
            .map(|v| v.to_string())
            .unwrap_or_default(),
        expected: "a sector property",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTORS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"CD_GEOCODI": "412550605000001", "CD_GEOCODM": "4125506", "Pop/ha": 42.5},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}
            },
            {
                "type": "Feature",
                "properties": {"CD_GEOCODI": "412550605000002", "CD_GEOCODM": 4125506, "Pop/ha": null},
                "geometry": {"type": "MultiPolygon", "coordinates": [[[[1,0],[2,0],[2,1],[1,1],[1,0]]]]}
            },
            {
                "type": "Feature",
                "properties": {"CD_GEOCODI": "250750705000001", "CD_GEOCODM": "2507507"},
                "geometry": {"type": "Polygon", "coordinates": [[[5,5],[6,5],[6,6],[5,6],[5,5]]]}
            },
            {
                "type": "Feature",
                "properties": {"CD_GEOCODI": "x", "CD_GEOCODM": "1"},
                "geometry": {"type": "Point", "coordinates": [0, 0]}
            }
        ]
    }"#;

    #[test]
    fn test_load_sectors() {
        let sectors = load_sectors(SECTORS.as_bytes()).unwrap();
        assert_eq!(sectors.len(), 3);
        assert_eq!(sectors[0].population_density, Some(42.5));
        assert_eq!(sectors[1].municipality_code, 4125506);
        assert_eq!(sectors[1].population_density, None);
        assert_eq!(sectors[1].density_bucket(), DensityBucket::UpTo10);
    }

    #[test]
    fn test_join_geometry() {
        let sectors = load_sectors(SECTORS.as_bytes()).unwrap();
        let joined = join_geometry(&sectors, 4125506);
        assert_eq!(joined.len(), 2);
        assert!(join_geometry(&sectors, 99).is_empty());
    }

    #[test]
    fn test_missing_code_is_error() {
        let data = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"CD_GEOCODI":"1"},
            "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
        assert!(matches!(
            load_sectors(data.as_bytes()),
            Err(DataError::TypeCoercion { .. })
        ));
    }
}
