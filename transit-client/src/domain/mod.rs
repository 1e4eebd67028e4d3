//! Domain types for the transit client.
//!
//! These types mirror the backend's JSON payloads but parse them leniently:
//! identifiers may be strings or numbers, coordinates may be quoted, and
//! optional presentation fields fall back to defaults instead of failing the
//! whole payload.

pub(crate) mod de;
mod ids;
mod position;
mod route;
mod schedule;
mod time;

pub use ids::{RouteId, StopId};
pub use position::VehiclePosition;
pub use route::{LatLng, Polyline, Route, RouteItem, RouteStop, ShapePoint};
pub use schedule::{StopSchedule, Trip, TripStopVisit};
pub use time::{ClockTime, ServiceTime, TimeError};
