use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    #[serde(alias = "round_trip")]
    Roundtrip,
    #[serde(alias = "one_way")]
    Oneway,
}

/// A flight search as submitted by the search form.
///
/// Only `origin` and `destination` influence generated prices; the remaining
/// fields are carried through for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(alias = "from")]
    pub origin: String,
    #[serde(alias = "to")]
    pub destination: String,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default)]
    pub depart_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

fn default_passengers() -> u32 {
    1
}

impl SearchRequest {
    /// One-way, single passenger search on a route.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            trip_type: TripType::Oneway,
            depart_date: None,
            return_date: None,
            passengers: default_passengers(),
        }
    }

    /// Origin and destination concatenated, the input to the route hash.
    pub fn route_key(&self) -> String {
        format!("{}{}", self.origin, self.destination)
    }

    /// Only a blank endpoint is rejected; every other field is display-only.
    pub fn validate(&self) -> CoreResult<()> {
        if self.origin.trim().is_empty() {
            return Err(CoreError::Validation("origin is required".to_string()));
        }
        if self.destination.trim().is_empty() {
            return Err(CoreError::Validation("destination is required".to_string()));
        }
        Ok(())
    }
}
