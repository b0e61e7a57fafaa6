use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "kind_test.rs"]
mod kind_test;

/// The decorative effect currently shown on the overlay.
///
/// `None` is a real member of the set: it means "no particles" and is what
/// the selector returns for weather it has no effect for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Rain,
    Snow,
    Leaves,
    Sun,
    Mist,
    None,
}

impl EffectKind {
    /// Every kind, in declaration order.
    pub const ALL: [EffectKind; 6] = [
        EffectKind::Rain,
        EffectKind::Snow,
        EffectKind::Leaves,
        EffectKind::Sun,
        EffectKind::Mist,
        EffectKind::None,
    ];

    /// Number of particles a session of this kind keeps alive.
    #[must_use]
    pub fn particle_count(self) -> usize {
        match self {
            EffectKind::Rain => 150,
            EffectKind::Snow => 120,
            EffectKind::Leaves => 35,
            EffectKind::Sun => 25,
            EffectKind::Mist => 14,
            EffectKind::None => 0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::Rain => "rain",
            EffectKind::Snow => "snow",
            EffectKind::Leaves => "leaves",
            EffectKind::Sun => "sun",
            EffectKind::Mist => "mist",
            EffectKind::None => "none",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a name outside the effect set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown effect kind '{0}' (expected rain, snow, leaves, sun, mist or none)")]
pub struct UnknownKind(pub String);

impl FromStr for EffectKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}
