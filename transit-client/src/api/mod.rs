//! Transit backend HTTP API.
//!
//! Two endpoints are consumed:
//! - `GET /all-routes/details`: every route with its stops and shape
//! - `GET /routes/{route_id}/schedule`: today's trips for one route
//!
//! Failures are returned to the caller and never retried here.

mod client;
mod error;
mod types;


pub use client::{TransitApiClient, TransitApiConfig};
pub use error::ApiError;
pub use types::{AllRoutesResponse, RouteSchedule, ScheduleResponse};
