//! Sector geometries, municipality joins and map framing.

pub mod archive;
pub mod arrangement;
pub mod choropleth;
pub mod sectors;
pub mod viewport;

pub use arrangement::*;
pub use choropleth::*;
pub use sectors::{join_geometry, load_sectors, GeoSector};
pub use viewport::*;
