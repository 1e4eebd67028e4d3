//! Transit API response DTOs.
//!
//! Fields are optional or defaulted because the backend omits them rather
//! than sending empty values in several cases.

use serde::Deserialize;

use crate::domain::de::lenient_vec;
use crate::domain::{RouteItem, Trip};

/// Response from `GET /all-routes/details`.
#[derive(Debug, Clone, Deserialize)]
pub struct AllRoutesResponse {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub routes: Vec<RouteItem>,
}

/// Response from `GET /routes/{route_id}/schedule`.
///
/// The backend uses one shape for three outcomes: a list of trips, an
/// `error`, or an empty `schedule` with a `message` when there is no service
/// that day.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub schedule: Vec<Trip>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// A route's schedule as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteSchedule {
    /// Trips running today.
    Trips(Vec<Trip>),

    /// No service today; the backend may explain why.
    NoService { message: Option<String> },
}

impl ScheduleResponse {
    /// Interpret the response body.
    ///
    /// Returns `Err` with the backend's message when the body carries a
    /// non-empty `error` field.
    pub fn into_schedule(self) -> Result<RouteSchedule, String> {
        if let Some(error) = self.error.filter(|e| !e.trim().is_empty()) {
            return Err(error);
        }

        if self.schedule.is_empty() {
            return Ok(RouteSchedule::NoService {
                message: self.message.filter(|m| !m.trim().is_empty()),
            });
        }

        Ok(RouteSchedule::Trips(self.schedule))
    }
}
