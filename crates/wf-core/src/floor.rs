//! Mall levels and their vertical ordering.
//!
//! All variants are always compiled in.  The derived `Ord` follows physical
//! stacking from the lowest level upwards, so `Floor::Basement < Floor::L2`.

use std::str::FromStr;

use crate::CoreError;

/// A vertically stacked level of the mall.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Floor {
    #[cfg_attr(feature = "serde", serde(rename = "B"))]
    Basement,
    #[cfg_attr(feature = "serde", serde(rename = "GL"))]
    Garden,
    #[cfg_attr(feature = "serde", serde(rename = "SL"))]
    Service,
    #[cfg_attr(feature = "serde", serde(rename = "ML"))]
    Main,
    L1,
    L2,
}

impl Floor {
    /// Every floor, lowest first.
    pub const ALL: [Floor; 6] = [
        Floor::Basement,
        Floor::Garden,
        Floor::Service,
        Floor::Main,
        Floor::L1,
        Floor::L2,
    ];

    /// Signed level number; Garden is level zero.
    #[inline]
    pub fn ordinal(self) -> i8 {
        match self {
            Floor::Basement => -1,
            Floor::Garden   => 0,
            Floor::Service  => 1,
            Floor::Main     => 2,
            Floor::L1       => 3,
            Floor::L2       => 4,
        }
    }

    /// Number of levels a rider crosses travelling between `self` and `other`.
    #[inline]
    pub fn levels_between(self, other: Floor) -> u32 {
        (self.ordinal() as i32 - other.ordinal() as i32).unsigned_abs()
    }

    /// Short code used on signage and in authored data.
    pub fn code(self) -> &'static str {
        match self {
            Floor::Basement => "B",
            Floor::Garden   => "GL",
            Floor::Service  => "SL",
            Floor::Main     => "ML",
            Floor::L1       => "L1",
            Floor::L2       => "L2",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Floor::Basement => "Basement",
            Floor::Garden   => "Garden Level",
            Floor::Service  => "Service Level",
            Floor::Main     => "Main Level",
            Floor::L1       => "Level 1",
            Floor::L2       => "Level 2",
        }
    }
}

impl FromStr for Floor {
    type Err = CoreError;

    /// Parse a floor code, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Floor::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CoreError::UnknownFloor(code.to_owned()))
    }
}

impl std::fmt::Display for Floor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
