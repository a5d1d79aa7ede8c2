//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic reporting unit as named in the source table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Region(pub String);

impl Region {
    /// Creates a region from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The region name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Region {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The cumulative series published in the time-series tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Confirmed cases.
    Confirmed,
    /// Deaths.
    Deaths,
    /// Recovered cases.
    Recovered,
}

impl Quantity {
    /// All quantities in rendering order.
    pub const ALL: [Self; 3] = [Self::Confirmed, Self::Deaths, Self::Recovered];

    /// Human readable name used in axis labels.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed Cases",
            Self::Deaths => "Deaths",
            Self::Recovered => "Recovered Cases",
        }
    }

    /// Machine friendly key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
