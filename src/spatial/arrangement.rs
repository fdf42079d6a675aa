use geo::MultiPolygon;
use serde::Serialize;
use std::io::{Cursor, Read, Seek};

use super::archive::read_geometry_entry;
use super::sectors::{feature_polygons, property_text, read_feature_collection};
use super::viewport::{compute_viewport, Viewport, ZoomCalibration};
use crate::error::{DataError, DataResult};
use crate::model::ArrangementMembership;

/// Arrangement name property of the member features
pub const ARRANGEMENT_NAME_PROPERTY: &str = "NomeArranj";

/// Member municipality outlines of one population arrangement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrangementGeometry {
    pub arrangement_code: u32,
    pub name: String,
    pub members: Vec<MultiPolygon<f64>>,
}

/// Arrangement outlines framed for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrangementMap {
    pub arrangement_code: u32,
    pub name: String,
    pub members: Vec<MultiPolygon<f64>>,
    pub viewport: Viewport,
}

/// Arrangement the municipality belongs to, if any
pub fn arrangement_of(memberships: &[ArrangementMembership], code: u32) -> Option<u32> {
    memberships
        .iter()
        .find(|m| m.municipality_code == code)
        .map(|m| m.arrangement_code)
}

/// Load the zipped GeoJSON outlines of one arrangement
pub fn load_arrangement_geometry<R: Read + Seek>(
    arrangement_code: u32,
    archive: R,
) -> DataResult<ArrangementGeometry> {
    let entry = read_geometry_entry(archive)?;
    let collection = read_feature_collection(Cursor::new(entry))?;

    let name = collection
        .features
        .iter()
        .find_map(|f| property_text(f, ARRANGEMENT_NAME_PROPERTY))
        .unwrap_or_else(|| arrangement_code.to_string());

    let mut members = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        if let Some(polygons) = feature_polygons(feature)? {
            members.push(polygons);
        }
    }

    if members.is_empty() {
        return Err(DataError::EmptyGeometry);
    }

    Ok(ArrangementGeometry {
        arrangement_code,
        name,
        members,
    })
}

pub fn arrangement_map(
    geometry: ArrangementGeometry,
    calibration: ZoomCalibration,
) -> DataResult<ArrangementMap> {
    let viewport = compute_viewport(&geometry.members, calibration)?;
    Ok(ArrangementMap {
        arrangement_code: geometry.arrangement_code,
        name: geometry.name,
        members: geometry.members,
        viewport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const MEMBERS: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"CodArranjo":"4106902","NomeArranj":"Curitiba/PR"},
         "geometry":{"type":"Polygon","coordinates":[[[-49.4,-25.6],[-49.2,-25.6],[-49.2,-25.4],[-49.4,-25.4],[-49.4,-25.6]]]}},
        {"type":"Feature","properties":{"CodArranjo":"4106902","NomeArranj":"Curitiba/PR"},
         "geometry":{"type":"Polygon","coordinates":[[[-49.2,-25.6],[-49.0,-25.6],[-49.0,-25.4],[-49.2,-25.4],[-49.2,-25.6]]]}}
    ]}"#;

    fn zipped(body: &str) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("arranjo_4106902_municipalities.geojson", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(body.as_bytes()).unwrap();
        Cursor::new(writer.finish().unwrap().into_inner())
    }

    #[test]
    fn test_load_and_frame() {
        let geometry = load_arrangement_geometry(4106902, zipped(MEMBERS)).unwrap();
        assert_eq!(geometry.name, "Curitiba/PR");
        assert_eq!(geometry.members.len(), 2);

        let map = arrangement_map(geometry, ZoomCalibration::ARRANGEMENT).unwrap();
        assert!((map.viewport.center.0 - -25.5).abs() < 1e-9);
        assert!((map.viewport.center.1 - -49.2).abs() < 1e-9);
        assert!((map.viewport.zoom - (12.7 - (0.4 * 111.0f64).ln())).abs() < 1e-9);
    }

    #[test]
    fn test_arrangement_of() {
        let memberships = vec![ArrangementMembership {
            municipality_code: 4125506,
            arrangement_code: 4106902,
        }];
        assert_eq!(arrangement_of(&memberships, 4125506), Some(4106902));
        assert_eq!(arrangement_of(&memberships, 1), None);
    }
}
