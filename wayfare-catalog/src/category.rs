use serde::{Deserialize, Serialize};
use std::fmt;

/// Priced add-on categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddOnCategory {
    SeatSelection,
    Meal,
    CarryOn,
    CheckedBaggage,
    SportsEquipment,
}

/// A weight/category label indexing a tier table, e.g. `20kg`.
///
/// Any string is a valid key; keys the table doesn't declare price at zero.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierKey(String);

impl TierKey {
    pub const NONE: &'static str = "none";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn none() -> Self {
        Self(Self::NONE.to_string())
    }

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TierKey {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TierKey({})", self.0)
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TierKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TierKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Cabin bag allowance
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarryOn {
    #[default]
    Included,
    Extra,
}

impl CarryOn {
    /// Weight allowance reported to the booking API
    pub fn allowance(&self) -> &'static str {
        match self {
            CarryOn::Included => "7kg",
            CarryOn::Extra => "14kg",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CarryOn::Included => "included",
            CarryOn::Extra => "extra",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "included" | "7kg" => Some(CarryOn::Included),
            "extra" | "14kg" => Some(CarryOn::Extra),
            _ => None,
        }
    }
}
