//! Normalized series metadata model
//!
//! The provider's wire format carries optional and loosely typed
//! attributes; this module defines the normalized representation the
//! rest of the application works with. Absent attributes are modeled
//! as `Option` or defaulted, never as sentinel values that could be
//! mistaken for real data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SeriesStatus {
    /// Series is actively maintained by the provider
    Active,
    /// Series is discontinued or dormant
    Inactive,
    /// Provider reported no status, or one we do not recognize
    #[default]
    Unknown,
}

impl SeriesStatus {
    /// Map a provider-reported status label onto the enum
    ///
    /// Unrecognized labels become `Unknown` rather than an error; the
    /// provider adds labels without notice.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for SeriesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Observation frequency of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    #[default]
    Unknown,
}

impl Frequency {
    /// Map a provider-reported frequency label onto the enum
    pub fn from_label(label: &str) -> Self {
        match label {
            "Daily" => Self::Daily,
            "Weekly" => Self::Weekly,
            "Monthly" => Self::Monthly,
            "Quarterly" => Self::Quarterly,
            "Semi-annual" | "SemiAnnual" => Self::SemiAnnual,
            "Annual" | "Yearly" => Self::Annual,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::SemiAnnual => write!(f, "Semi-annual"),
            Self::Annual => write!(f, "Annual"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Kind of a geographic association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoKind {
    Country,
    Region,
    /// Any other geographic tagging the provider emits
    Other,
}

impl GeoKind {
    /// Map a provider geo type tag ("COUNTRY", "REGION", ...) onto the enum
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "COUNTRY" => Self::Country,
            "REGION" => Self::Region,
            _ => Self::Other,
        }
    }
}

/// One geographic association of a series
///
/// A series carries at most one `Country` entry and zero or more
/// `Region` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoEntry {
    pub kind: GeoKind,
    pub name: String,
}

/// One node in a series' classification hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorNode {
    pub name: String,
}

/// Normalized snapshot of one series' descriptive metadata
///
/// `id` is stable across fetches and unique within one fetch session's
/// result set. All other attributes are best-effort: the provider
/// omits them freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Lifecycle status
    pub status: SeriesStatus,
    /// Observation frequency
    pub frequency: Frequency,
    /// When the provider last updated the series, if known
    pub last_update_time: Option<DateTime<Utc>>,
    /// Most recent observation value, if known
    pub last_value: Option<f64>,
    /// First observation date, if known
    pub start_date: Option<NaiveDate>,
    /// Last observation date, if known
    pub end_date: Option<NaiveDate>,
    /// Number of observations, if known
    pub number_of_observations: Option<u64>,
    /// Ordered classification hierarchy, may be empty
    pub indicator_path: Vec<IndicatorNode>,
    /// Geographic associations, may be empty
    pub geo_info: Vec<GeoEntry>,
    /// Series is a forecast
    pub is_forecast: bool,
    /// Series is flagged as a key series by the provider
    pub is_key_series: bool,
    /// Series has a continuous-series companion
    pub has_continuous_series: bool,
    /// Series carries vintage data
    pub has_vintage: bool,
    /// Series was recently added
    pub is_new_series: bool,
    /// Series has a release schedule
    pub has_schedule: bool,
}

impl MetadataRecord {
    /// Country entry of this series, if present
    pub fn country(&self) -> Option<&GeoEntry> {
        self.geo_info.iter().find(|g| g.kind == GeoKind::Country)
    }

    /// Region names of this series, sorted alphabetically
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self
            .geo_info
            .iter()
            .filter(|g| g.kind == GeoKind::Region)
            .map(|g| g.name.as_str())
            .collect();
        regions.sort_unstable();
        regions
    }

    /// Classification path rendered as "A -> B -> C", empty string when
    /// no path is known
    pub fn indicator_path_display(&self) -> String {
        self.indicator_path
            .iter()
            .map(|n| n.name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Case-insensitive keyword match over name and id
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword) || self.id.to_lowercase().contains(&keyword)
    }
}
