//! Route catalog types.
//!
//! A [`RouteItem`] bundles a route's metadata with its stops and the shape
//! points used to draw it. Only the fields this crate reads are typed; any
//! other route attributes the backend sends are kept in [`Route::extra`].

use serde::{Deserialize, Serialize};

use super::de::{float_or_string, lenient_vec, parse_string_or_number, string_or_number};
use super::{RouteId, StopId};

/// Route metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: RouteId,

    #[serde(default)]
    pub route_short_name: String,

    #[serde(default)]
    pub route_long_name: String,

    /// Hex colour without the leading `#`.
    #[serde(default)]
    pub route_color: Option<String>,

    /// Attributes this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Route {
    /// The route colour as `#RRGGBB`, or `#<default>` when none is set.
    pub fn color_or(&self, default: &str) -> String {
        match self.route_color.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => format!("#{}", c.trim_start_matches('#')),
            _ => format!("#{default}"),
        }
    }

    /// Label for route lists, e.g. "6: Campus Shuttle".
    pub fn display_name(&self) -> String {
        format!("{}: {}", self.route_short_name, self.route_long_name)
    }
}

/// A stop served by a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    #[serde(default)]
    pub stop_id: Option<StopId>,

    #[serde(default)]
    pub stop_name: Option<String>,

    #[serde(deserialize_with = "float_or_string")]
    pub latitude: f64,

    #[serde(deserialize_with = "float_or_string")]
    pub longitude: f64,
}

/// One vertex of a route shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    #[serde(deserialize_with = "string_or_number")]
    pub shape_id: String,

    #[serde(deserialize_with = "parse_string_or_number")]
    pub sequence: u32,

    #[serde(deserialize_with = "float_or_string")]
    pub latitude: f64,

    #[serde(deserialize_with = "float_or_string")]
    pub longitude: f64,
}

/// A route with its stops and shape geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteItem {
    pub route: Route,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub stops: Vec<RouteStop>,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub shape: Vec<ShapePoint>,
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// An ordered line for one shape of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub shape_id: String,
    pub points: Vec<LatLng>,
}

impl RouteItem {
    /// Returns the route identifier.
    pub fn id(&self) -> &RouteId {
        &self.route.route_id
    }

    /// Group the shape points into one polyline per shape.
    ///
    /// Shapes appear in the order their first point appears; points within a
    /// shape are ordered by sequence number.
    pub fn polylines(&self) -> Vec<Polyline> {
        let mut groups: Vec<(&str, Vec<&ShapePoint>)> = Vec::new();

        for point in &self.shape {
            match groups.iter_mut().find(|(id, _)| *id == point.shape_id) {
                Some((_, points)) => points.push(point),
                None => groups.push((point.shape_id.as_str(), vec![point])),
            }
        }

        groups
            .into_iter()
            .map(|(shape_id, mut points)| {
                points.sort_by_key(|p| p.sequence);
                Polyline {
                    shape_id: shape_id.to_string(),
                    points: points
                        .into_iter()
                        .map(|p| LatLng {
                            latitude: p.latitude,
                            longitude: p.longitude,
                        })
                        .collect(),
                }
            })
            .collect()
    }
}
