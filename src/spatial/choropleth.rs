use geo::MultiPolygon;
use serde::Serialize;

use super::sectors::{join_geometry, GeoSector};
use super::viewport::{compute_viewport, Viewport, ZoomCalibration};
use crate::error::{DataError, DataResult};
use crate::metrics::DensityBucket;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedSector {
    pub sector_id: String,
    /// Density after the missing-as-zero policy
    pub density: f64,
    pub bucket: DensityBucket,
    pub geometry: MultiPolygon<f64>,
}

/// Sector density choropleth of one municipality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityMap {
    pub municipality_code: u32,
    pub sectors: Vec<ClassifiedSector>,
    /// Bucket labels in legend order
    pub legend: Vec<&'static str>,
    pub viewport: Viewport,
}

pub fn classify_sectors(sectors: &[GeoSector]) -> Vec<ClassifiedSector> {
    sectors
        .iter()
        .map(|sector| ClassifiedSector {
            sector_id: sector.sector_id.clone(),
            density: sector.density_or_zero(),
            bucket: sector.density_bucket(),
            geometry: sector.geometry.clone(),
        })
        .collect()
}

/// Join, classify and frame the sectors of `code`
pub fn density_map(
    sectors: &[GeoSector],
    code: u32,
    calibration: ZoomCalibration,
) -> DataResult<DensityMap> {
    let joined = join_geometry(sectors, code);
    if joined.is_empty() {
        return Err(DataError::no_data(code, "no census sectors"));
    }

    let geometries: Vec<_> = joined.iter().map(|s| s.geometry.clone()).collect();
    let viewport = compute_viewport(&geometries, calibration)?;

    Ok(DensityMap {
        municipality_code: code,
        sectors: classify_sectors(&joined),
        legend: DensityBucket::legend(),
        viewport,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    fn sector(id: &str, code: u32, x: f64, density: Option<f64>) -> GeoSector {
        let ring = LineString::from(vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0), (x, 0.0)]);
        GeoSector {
            sector_id: id.to_string(),
            municipality_code: code,
            geometry: MultiPolygon::new(vec![Polygon::new(ring, vec![])]),
            population_density: density,
        }
    }

    #[test]
    fn test_density_map() {
        let sectors = vec![
            sector("a", 1, 0.0, Some(120.0)),
            sector("b", 1, 1.0, None),
            sector("c", 2, 9.0, Some(30.0)),
        ];
        let map = density_map(&sectors, 1, ZoomCalibration::SECTOR_DENSITY).unwrap();

        assert_eq!(map.sectors.len(), 2);
        assert_eq!(map.sectors[0].bucket, DensityBucket::Above100);
        assert_eq!(map.sectors[1].bucket, DensityBucket::UpTo10);
        assert_eq!(map.sectors[1].density, 0.0);
        assert_eq!(map.legend.len(), 6);
        assert!((map.viewport.center.1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_municipality() {
        let sectors = vec![sector("a", 1, 0.0, Some(1.0))];
        assert!(matches!(
            density_map(&sectors, 7, ZoomCalibration::SECTOR_DENSITY),
            Err(DataError::NoData { code: 7, .. })
        ));
    }
}
