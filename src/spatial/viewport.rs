use geo::{BooleanOps, BoundingRect, Centroid, MultiPolygon};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Approximate ground distance of one degree
pub const KM_PER_DEGREE: f64 = 111.0;

/// Smallest extent used for the zoom formula, 1 m. Keeps `ln` finite for
/// point-like geometry.
pub const MIN_EXTENT_KM: f64 = 0.001;

/// Offset of the zoom formula `zoom = base - ln(extent_km)`.
///
/// The values are calibrated by eye against the map tile renderer. They are
/// not derived from any projection math, and the gap between the two call
/// sites has no known justification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomCalibration {
    pub base: f64,
}

impl ZoomCalibration {
    /// Census-sector density maps of a single municipality
    pub const SECTOR_DENSITY: ZoomCalibration = ZoomCalibration { base: 13.0 };

    /// Population-arrangement maps spanning several municipalities
    pub const ARRANGEMENT: ZoomCalibration = ZoomCalibration { base: 12.7 };
}

/// Map framing for a geometry collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// (latitude, longitude)
    pub center: (f64, f64),
    pub zoom: f64,
}

/// Center on the centroid of the union of all geometries and zoom out with
/// the larger side of their bounding box. Overlapping areas count once.
pub fn compute_viewport(
    geometries: &[MultiPolygon<f64>],
    calibration: ZoomCalibration,
) -> DataResult<Viewport> {
    let union = dissolve(geometries);

    let bounds = union.bounding_rect().ok_or(DataError::EmptyGeometry)?;
    let centroid = union.centroid().ok_or(DataError::EmptyGeometry)?;

    let extent_km = (bounds.width().max(bounds.height()) * KM_PER_DEGREE).max(MIN_EXTENT_KM);

    Ok(Viewport {
        center: (centroid.y(), centroid.x()),
        zoom: calibration.base - extent_km.ln(),
    })
}

fn dissolve(geometries: &[MultiPolygon<f64>]) -> MultiPolygon<f64> {
    geometries
        .iter()
        .filter(|multi| !multi.0.is_empty())
        .fold(MultiPolygon::new(vec![]), |acc, multi| {
            if acc.0.is_empty() {
                multi.clone()
            } else {
                acc.union(multi)
            }
        })
}
