use serde::Serialize;
use std::fmt;

/// Population density band (inhabitants per hectare) used to color the
/// sector choropleth.
///
/// Bands are left-closed: a value equal to a threshold belongs to the upper band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DensityBucket {
    UpTo10,
    From10To25,
    From25To50,
    From50To75,
    From75To100,
    Above100,
}

impl DensityBucket {
    /// Legend order, lowest density first
    pub const ALL: [DensityBucket; 6] = [
        DensityBucket::UpTo10,
        DensityBucket::From10To25,
        DensityBucket::From25To50,
        DensityBucket::From50To75,
        DensityBucket::From75To100,
        DensityBucket::Above100,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DensityBucket::UpTo10 => "Até 10",
            DensityBucket::From10To25 => "10 a 25",
            DensityBucket::From25To50 => "25 a 50",
            DensityBucket::From50To75 => "50 a 75",
            DensityBucket::From75To100 => "75 a 100",
            DensityBucket::Above100 => "acima de 100",
        }
    }

    /// Lower bound of the band, inclusive
    pub fn lower_bound(&self) -> f64 {
        match self {
            DensityBucket::UpTo10 => 0.0,
            DensityBucket::From10To25 => 10.0,
            DensityBucket::From25To50 => 25.0,
            DensityBucket::From50To75 => 50.0,
            DensityBucket::From75To100 => 75.0,
            DensityBucket::Above100 => 100.0,
        }
    }

    /// Legend labels in display order
    pub fn legend() -> Vec<&'static str> {
        Self::ALL.iter().map(|b| b.label()).collect()
    }
}

impl fmt::Display for DensityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a density value.
///
/// Policy: NaN and negative values are treated as a density of 0 and land in
/// "Até 10". Callers holding an optional density should pass
/// `density.unwrap_or(0.0)`; a sector without density is shown as the
/// lowest band, not dropped from the map.
pub fn density_bucket(value: f64) -> DensityBucket {
    let value = if value.is_nan() || value < 0.0 { 0.0 } else { value };

    DensityBucket::ALL
        .iter()
        .rev()
        .find(|bucket| value >= bucket.lower_bound())
        .copied()
        .unwrap_or(DensityBucket::UpTo10)
}
