//! Territory domain models.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered set of street names owned by one encoder.
pub type StreetSet = BTreeSet<&'static str>;

/// The three barangay staff sub-roles that each own a slice of the street universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderRole {
    Encoder1,
    Encoder2,
    Encoder3,
}

impl EncoderRole {
    pub const ALL: [EncoderRole; 3] = [
        EncoderRole::Encoder1,
        EncoderRole::Encoder2,
        EncoderRole::Encoder3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderRole::Encoder1 => "encoder1",
            EncoderRole::Encoder2 => "encoder2",
            EncoderRole::Encoder3 => "encoder3",
        }
    }

    /// Parses the role column value used by the portal (`encoder1`..`encoder3`).
    pub fn from_role_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "encoder1" => Some(EncoderRole::Encoder1),
            "encoder2" => Some(EncoderRole::Encoder2),
            "encoder3" => Some(EncoderRole::Encoder3),
            _ => None,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            EncoderRole::Encoder1 => 0,
            EncoderRole::Encoder2 => 1,
            EncoderRole::Encoder3 => 2,
        }
    }
}

impl fmt::Display for EncoderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of streets a viewer may see counts for.
///
/// `Universal` is not an explicit match-all set: territory predicates are
/// skipped entirely for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Territory {
    Universal,
    Streets(&'static StreetSet),
}

impl Territory {
    pub fn is_universal(&self) -> bool {
        matches!(self, Territory::Universal)
    }

    /// Whether `street` lies inside this territory.
    pub fn contains(&self, street: &str) -> bool {
        match self {
            Territory::Universal => true,
            Territory::Streets(streets) => streets.contains(street.trim()),
        }
    }

    /// Territory predicate for a record. Records without a street fall
    /// outside every restricted territory.
    pub fn admits(&self, street: Option<&str>) -> bool {
        match self {
            Territory::Universal => true,
            Territory::Streets(streets) => street.is_some_and(|s| streets.contains(s.trim())),
        }
    }
}
