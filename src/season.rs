//! Seasonal effect selection.
//!
//! Months fall into four contiguous three-month seasons starting in
//! December. The northern hemisphere maps them to snow, rain, sun, leaves;
//! the southern hemisphere is the same rotation shifted by two seasons.

use std::fmt;
use std::str::FromStr;

use particles::EffectKind;
use serde::Serialize;
use time::Month;

use crate::error::ConfigError;

#[cfg(test)]
#[path = "season_test.rs"]
mod season_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Non-negative latitude (and NaN) is north.
    #[must_use]
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 { Hemisphere::South } else { Hemisphere::North }
    }

    fn offset(self) -> usize {
        match self {
            Hemisphere::North => 0,
            Hemisphere::South => 2,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        })
    }
}

impl FromStr for Hemisphere {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Hemisphere::North),
            "south" | "s" => Ok(Hemisphere::South),
            other => Err(ConfigError::Invalid {
                key: "hemisphere".into(),
                message: format!("expected 'north' or 'south', got '{other}'"),
            }),
        }
    }
}

/// Northern-hemisphere effect per season, winter first.
const ROTATION: [EffectKind; 4] = [EffectKind::Snow, EffectKind::Rain, EffectKind::Sun, EffectKind::Leaves];

/// Season bucket 0-3 for `month`, with December-February as bucket 0.
#[must_use]
pub fn season_index(month: Month) -> usize {
    usize::from(u8::from(month) % 12 / 3)
}

/// The particle effect for `month` in `hemisphere`.
#[must_use]
pub fn seasonal_effect(month: Month, hemisphere: Hemisphere) -> EffectKind {
    ROTATION[(season_index(month) + hemisphere.offset()) % ROTATION.len()]
}
