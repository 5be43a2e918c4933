#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Weather vigilance taxonomy and forecast payload types.
//!
//! Defines the nine hazard phenomena and the severity color codes
//! published with the vigilance map, plus the flat per-day
//! [`PhenomenonRecord`] that the rest of the pipeline works with. The raw
//! upstream document shape lives in [`payload`].

pub mod payload;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of phenomenon indicator columns in a day table.
pub const PHENOMENON_COUNT: usize = 9;

/// Severity color code reported for a phenomenon.
///
/// Upstream codes run 1 (green) to 4 (red). Code 0 appears in some
/// archives for regions that were not rated and is kept as [`Self::Unrated`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SeverityColor {
    /// No rating published.
    Unrated = 0,
    /// No particular vigilance.
    Green = 1,
    /// Be attentive.
    Yellow = 2,
    /// Be very vigilant.
    Orange = 3,
    /// Absolute vigilance.
    Red = 4,
}

impl SeverityColor {
    /// Returns the upstream code of this color.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a color from its upstream code.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 0-4.
    pub const fn from_value(value: i64) -> Result<Self, InvalidCodeError> {
        match value {
            0 => Ok(Self::Unrated),
            1 => Ok(Self::Green),
            2 => Ok(Self::Yellow),
            3 => Ok(Self::Orange),
            4 => Ok(Self::Red),
            _ => Err(InvalidCodeError {
                kind: CodeKind::SeverityColor,
                value,
            }),
        }
    }

    /// Risk level shown on the map: the code shifted down by one.
    ///
    /// Green is `0` and red `3`; [`Self::Unrated`] comes out as `-1`.
    #[must_use]
    pub const fn risk_level(self) -> i8 {
        self as i8 - 1
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Unrated,
            Self::Green,
            Self::Yellow,
            Self::Orange,
            Self::Red,
        ]
    }
}

/// The nine hazard types covered by the vigilance map.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phenomenon {
    Wind = 1,
    Rain = 2,
    Thunderstorms = 3,
    Floods = 4,
    SnowOrIce = 5,
    Heatwave = 6,
    ColdWave = 7,
    Avalanches = 8,
    StormSurges = 9,
}

impl Phenomenon {
    /// Upstream phenomenon id (1-9).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Zero-based position of this phenomenon's indicator column.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Creates a phenomenon from its upstream id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not in the range 1-9.
    pub const fn from_id(id: i64) -> Result<Self, InvalidCodeError> {
        match id {
            1 => Ok(Self::Wind),
            2 => Ok(Self::Rain),
            3 => Ok(Self::Thunderstorms),
            4 => Ok(Self::Floods),
            5 => Ok(Self::SnowOrIce),
            6 => Ok(Self::Heatwave),
            7 => Ok(Self::ColdWave),
            8 => Ok(Self::Avalanches),
            9 => Ok(Self::StormSurges),
            _ => Err(InvalidCodeError {
                kind: CodeKind::Phenomenon,
                value: id,
            }),
        }
    }

    /// Human-readable label used in map popups.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wind => "wind",
            Self::Rain => "rain",
            Self::Thunderstorms => "thunderstorms",
            Self::Floods => "floods",
            Self::SnowOrIce => "snow or ice",
            Self::Heatwave => "heatwave",
            Self::ColdWave => "cold wave",
            Self::Avalanches => "avalanches",
            Self::StormSurges => "storm surges",
        }
    }

    /// Returns all variants in id order.
    #[must_use]
    pub const fn all() -> &'static [Self; PHENOMENON_COUNT] {
        &[
            Self::Wind,
            Self::Rain,
            Self::Thunderstorms,
            Self::Floods,
            Self::SnowOrIce,
            Self::Heatwave,
            Self::ColdWave,
            Self::Avalanches,
            Self::StormSurges,
        ]
    }
}

/// Which coded field an [`InvalidCodeError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Phenomenon,
    SeverityColor,
}

/// Error returned when an upstream numeric code is outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCodeError {
    /// Which field the code was read from.
    pub kind: CodeKind,
    /// The rejected value.
    pub value: i64,
}

impl std::fmt::Display for InvalidCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CodeKind::Phenomenon => {
                write!(f, "invalid phenomenon id {}: expected 1-9", self.value)
            }
            CodeKind::SeverityColor => {
                write!(f, "invalid severity color {}: expected 0-4", self.value)
            }
        }
    }
}

impl std::error::Error for InvalidCodeError {}

/// One phenomenon occurrence for a region on a given forecast day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenomenonRecord {
    /// Region (domain) code the phenomenon applies to.
    pub region_id: String,
    pub phenomenon: Phenomenon,
    /// Highest color reached by the phenomenon that day.
    pub severity_color: SeverityColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phenomenon_ids_roundtrip() {
        for phenomenon in Phenomenon::all() {
            let id = phenomenon.id();
            assert_eq!(Phenomenon::from_id(i64::from(id)).unwrap(), *phenomenon);
            assert_eq!(phenomenon.index(), usize::from(id) - 1);
        }
        assert!(Phenomenon::from_id(0).is_err());
        assert!(Phenomenon::from_id(10).is_err());
    }

    #[test]
    fn severity_from_value_bounds() {
        for v in 0..=4 {
            assert_eq!(i64::from(SeverityColor::from_value(v).unwrap().value()), v);
        }
        assert_eq!(SeverityColor::from_value(4).unwrap(), SeverityColor::Red);
        assert!(SeverityColor::from_value(-1).is_err());
        assert!(SeverityColor::from_value(5).is_err());
    }

    #[test]
    fn risk_level_is_shifted_code() {
        assert_eq!(SeverityColor::Unrated.risk_level(), -1);
        assert_eq!(SeverityColor::Green.risk_level(), 0);
        assert_eq!(SeverityColor::Yellow.risk_level(), 1);
        assert_eq!(SeverityColor::Orange.risk_level(), 2);
        assert_eq!(SeverityColor::Red.risk_level(), 3);
    }

    #[test]
    fn colors_order_by_severity() {
        assert!(SeverityColor::Red > SeverityColor::Orange);
        assert_eq!(SeverityColor::all().iter().max(), Some(&SeverityColor::Red));
    }

    #[test]
    fn phenomenon_strum_names() {
        assert_eq!(Phenomenon::SnowOrIce.to_string(), "snow_or_ice");
        assert_eq!(
            "cold_wave".parse::<Phenomenon>().unwrap(),
            Phenomenon::ColdWave
        );
        assert_eq!(Phenomenon::SnowOrIce.label(), "snow or ice");
    }

    #[test]
    fn invalid_code_messages() {
        let err = Phenomenon::from_id(12).unwrap_err();
        assert_eq!(err.to_string(), "invalid phenomenon id 12: expected 1-9");
        let err = SeverityColor::from_value(7).unwrap_err();
        assert_eq!(err.to_string(), "invalid severity color 7: expected 0-4");
    }
}
