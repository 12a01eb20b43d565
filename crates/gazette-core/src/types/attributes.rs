//! Geo and temporal attribute bags.
//!
//! The enhancement stage attaches these to LOCATION and TIME entities as
//! side tables keyed by local entity id. Every field is optional: geocoding
//! or date parsing may have failed, and the integrator works with whatever
//! is present.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic attributes of a LOCATION entity, as produced by geocoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Full geocoder display name (e.g., "Vienna, Austria").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Geocoder feature class (e.g., "city", "administrative").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    /// Geocoder importance score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    /// OpenStreetMap object id, when the geocoder reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox_south: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox_north: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox_west: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox_east: Option<f64>,
}

impl LocationAttributes {
    /// Both coordinates present.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Granularity of a temporal expression, ordered from coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimePrecision {
    #[default]
    Unknown,
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl TimePrecision {
    /// Total order used by the precision-upgrade merge rule.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Year => 1,
            Self::Month => 2,
            Self::Day => 3,
            Self::Hour => 4,
            Self::Minute => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
        }
    }
}

impl fmt::Display for TimePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a temporal expression denotes an instant or a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeKind {
    #[default]
    Unknown,
    Point,
    Period,
}

impl TimeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Point => "POINT",
            Self::Period => "PERIOD",
        }
    }
}

impl fmt::Display for TimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Temporal attributes of a TIME entity.
///
/// Dates are ISO-8601 strings as emitted by the enhancement stage; the
/// integrator compares them by exact equality and never re-parses them.
///
/// `kind` reads from the side table's `type` field but serializes as
/// `time_type`, because the bag is flattened into entity objects that
/// already carry an entity-level `type` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<TimePrecision>,
    #[serde(
        rename(serialize = "time_type", deserialize = "type"),
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<TimeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Reliability of the date inference in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_reliability: Option<f64>,
}

impl TimeAttributes {
    /// A usable (non-empty) start date is present.
    pub fn has_start_date(&self) -> bool {
        self.start_date.as_deref().is_some_and(|d| !d.is_empty())
    }
}
