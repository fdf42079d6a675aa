//! Tidy records produced by the loaders.

use serde::Serialize;
use std::fmt;

/// Census situation of a population count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Situation {
    Total,
    Urban,
    Rural,
}

impl Situation {
    pub const ALL: [Situation; 3] = [Situation::Total, Situation::Urban, Situation::Rural];

    /// Column header used by the IBGE tables
    pub fn label(&self) -> &'static str {
        match self {
            Situation::Total => "Total",
            Situation::Urban => "Urbana",
            Situation::Rural => "Rural",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "Feminino",
            Sex::Male => "Masculino",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Feminino" => Some(Sex::Female),
            "Masculino" => Some(Sex::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Five-year age bands of the census age structure, youngest first.
///
/// The derived ordering is the pyramid ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBand {
    From0To4,
    From5To9,
    From10To14,
    From15To19,
    From20To24,
    From25To29,
    From30To34,
    From35To39,
    From40To44,
    From45To49,
    From50To54,
    From55To59,
    From60To64,
    From65To69,
    From70To74,
    From75To79,
    From80,
}

impl AgeBand {
    pub const ALL: [AgeBand; 17] = [
        AgeBand::From0To4,
        AgeBand::From5To9,
        AgeBand::From10To14,
        AgeBand::From15To19,
        AgeBand::From20To24,
        AgeBand::From25To29,
        AgeBand::From30To34,
        AgeBand::From35To39,
        AgeBand::From40To44,
        AgeBand::From45To49,
        AgeBand::From50To54,
        AgeBand::From55To59,
        AgeBand::From60To64,
        AgeBand::From65To69,
        AgeBand::From70To74,
        AgeBand::From75To79,
        AgeBand::From80,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::From0To4 => "0 a 4 anos",
            AgeBand::From5To9 => "5 a 9 anos",
            AgeBand::From10To14 => "10 a 14 anos",
            AgeBand::From15To19 => "15 a 19 anos",
            AgeBand::From20To24 => "20 a 24 anos",
            AgeBand::From25To29 => "25 a 29 anos",
            AgeBand::From30To34 => "30 a 34 anos",
            AgeBand::From35To39 => "35 a 39 anos",
            AgeBand::From40To44 => "40 a 44 anos",
            AgeBand::From45To49 => "45 a 49 anos",
            AgeBand::From50To54 => "50 a 54 anos",
            AgeBand::From55To59 => "55 a 59 anos",
            AgeBand::From60To64 => "60 a 64 anos",
            AgeBand::From65To69 => "65 a 69 anos",
            AgeBand::From70To74 => "70 a 74 anos",
            AgeBand::From75To79 => "75 a 79 anos",
            AgeBand::From80 => "80 anos ou mais",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationRecord {
    pub municipality_code: u32,
    pub year: i32,
    pub situation: Situation,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionRecord {
    pub municipality_code: u32,
    pub year: i32,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeGroupRecord {
    pub municipality_code: u32,
    pub sex: Sex,
    pub age_band: AgeBand,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MunicipalityRef {
    pub code: u32,
    pub name: String,
    /// Two-letter UF abbreviation
    pub state: String,
}

/// Membership of a municipality in an IBGE population arrangement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrangementMembership {
    pub municipality_code: u32,
    pub arrangement_code: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_band_order_matches_labels() {
        let mut sorted = AgeBand::ALL;
        sorted.sort();
        assert_eq!(sorted, AgeBand::ALL);
        assert_eq!(AgeBand::from_label("80 anos ou mais"), Some(AgeBand::From80));
        assert_eq!(AgeBand::from_label("81 anos"), None);
    }

    #[test]
    fn test_situation_labels() {
        for s in Situation::ALL {
            assert_eq!(Situation::from_label(s.label()), Some(s));
        }
        assert_eq!(Sex::from_label("Feminino"), Some(Sex::Female));
        assert_eq!(Sex::from_label("F"), None);
    }
}
