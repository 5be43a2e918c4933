//! Raw shape of the vigilance map JSON document.
//!
//! ```text
//! product
//! └── periods[]                 one per forecast day (J0, J1)
//!     └── timelaps.domain_ids[] one per region/department
//!         └── phenomenon_items[]
//!             └── timelaps_items[] one per time window
//! ```
//!
//! Identifiers are published as strings in some vintages and as numbers
//! in others, so they are captured as [`RawCode`] and validated later.

use serde::{Deserialize, Serialize};

/// Top-level vigilance map document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VigilanceDocument {
    pub product: ForecastProduct,
}

/// The forecast product: metadata plus the per-day periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastProduct {
    #[serde(default)]
    pub warning_type: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    /// Day label, `"J"` or `"J1"`.
    #[serde(default)]
    pub echeance: Option<String>,
    #[serde(default)]
    pub begin_validity_time: Option<String>,
    #[serde(default)]
    pub end_validity_time: Option<String>,
    pub timelaps: PeriodTimelaps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTimelaps {
    #[serde(default)]
    pub domain_ids: Vec<DomainEntry>,
}

/// All phenomena reported for one region on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEntry {
    pub domain_id: RawCode,
    #[serde(default)]
    pub max_color_id: Option<RawCode>,
    #[serde(default)]
    pub phenomenon_items: Vec<PhenomenonItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenomenonItem {
    pub phenomenon_id: RawCode,
    pub phenomenon_max_color_id: RawCode,
    #[serde(default)]
    pub timelaps_items: Vec<TimelapsItem>,
}

/// A single time window within the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelapsItem {
    #[serde(default)]
    pub begin_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub color_id: Option<RawCode>,
}

/// A code that may arrive either as a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    Int(i64),
    Text(String),
}

impl RawCode {
    /// Numeric value, parsing textual codes such as `"3"`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for RawCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
