//! Route schedules prepared for display.
//!
//! The backend returns a route's schedule as a list of trips, each a list of
//! stop visits. Riders want the reverse: for each stop, when does a bus
//! leave. [`normalize`] does that reshaping and [`filter_by_stop_name`]
//! narrows the result to the stops a rider searched for.

mod filter;
mod normalize;

pub use filter::{filter_by_stop_name, spell_out_symbols};
pub use normalize::{compare_stop_names, normalize};

use tracing::info;

use crate::api::{ApiError, RouteSchedule, TransitApiClient};
use crate::domain::{RouteId, StopSchedule};

/// Shown when a route has no schedule and the backend gave no reason.
pub const NO_SCHEDULE_MESSAGE: &str = "No schedule available for this route today.";

/// What a schedule screen should display.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleOutcome {
    /// One row per stop, sorted by stop name.
    Stops(Vec<StopSchedule>),

    /// Nothing to show, with a message for the rider.
    NoService { message: String },
}

impl ScheduleOutcome {
    /// Normalize a backend schedule.
    ///
    /// Trips that yield no stops are treated the same as an empty schedule.
    pub fn from_route_schedule(schedule: RouteSchedule) -> Self {
        match schedule {
            RouteSchedule::Trips(trips) => {
                let stops = normalize(&trips);
                if stops.is_empty() {
                    Self::no_service(None)
                } else {
                    Self::Stops(stops)
                }
            }
            RouteSchedule::NoService { message } => Self::no_service(message),
        }
    }

    fn no_service(message: Option<String>) -> Self {
        Self::NoService {
            message: message.unwrap_or_else(|| NO_SCHEDULE_MESSAGE.to_string()),
        }
    }
}

/// Fetch and normalize the schedule for one route.
pub async fn load_schedule(
    client: &TransitApiClient,
    route_id: &RouteId,
) -> Result<ScheduleOutcome, ApiError> {
    let schedule = client.route_schedule(route_id).await?;
    let outcome = ScheduleOutcome::from_route_schedule(schedule);

    if let ScheduleOutcome::Stops(stops) = &outcome {
        info!(%route_id, stops = stops.len(), "loaded schedule");
    }

    Ok(outcome)
}
