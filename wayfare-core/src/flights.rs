use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    #[default]
    Economy,
    Business,
    First,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    OneWay,
    Return,
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CabinClass::Economy => "economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        };
        f.write_str(label)
    }
}

/// Flight details the booking flow needs from the catalogue backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightSummary {
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    /// Per-passenger base fare by cabin
    pub fares: BTreeMap<CabinClass, i64>,
}

impl FlightSummary {
    pub fn fare_for(&self, class: CabinClass) -> Option<i64> {
        self.fares.get(&class).copied()
    }

    /// Fare for `class`, failing when the flight doesn't sell that cabin
    pub fn require_fare(&self, class: CabinClass) -> CoreResult<i64> {
        self.fare_for(class).ok_or_else(|| {
            let msg = format!("Flight {} has no {} fare", self.flight_number, class);
            CoreError::ValidationError(msg)
        })
    }
}

#[async_trait]
pub trait FlightSource: Send + Sync {
    async fn fetch_flight(&self, flight_id: &str) -> CoreResult<FlightSummary>;
}

/// Outcome of the one-shot initial data fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    Ready(T),
}
