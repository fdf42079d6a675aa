//! Scalar indicators and chart series derived from the tidy tables.
//!
//! All functions here are pure: same records in, same value out.

pub mod density;
pub mod growth;
pub mod series;
pub mod urbanization;

pub use density::*;
pub use growth::*;
pub use series::*;
pub use urbanization::*;

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
