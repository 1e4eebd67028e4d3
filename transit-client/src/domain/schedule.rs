//! Schedule types: raw trips in, per-stop timetables out.

use serde::{Deserialize, Serialize};

use super::StopId;
use super::de::lenient_vec;
use super::time::ClockTime;

/// One scheduled call of a trip at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripStopVisit {
    pub stop_id: StopId,

    #[serde(default)]
    pub stop_name: String,

    /// Service-day time, "HH:MM:SS". May exceed 24:00 for late trips.
    pub departure_time: String,
}

/// One scheduled run of a vehicle along a route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub stop_times: Vec<TripStopVisit>,
}

/// All departures from a single stop, ready for tabular display.
///
/// `times` is free of duplicates and sorted by time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSchedule {
    pub stop_id: StopId,
    pub stop_name: String,
    pub times: Vec<ClockTime>,
}

impl StopSchedule {
    /// Times joined for a table cell, or a placeholder when there are none.
    pub fn times_label(&self) -> String {
        if self.times.is_empty() {
            return "No times available".to_string();
        }
        self.times
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
