//! Live vehicle positions.

use serde::{Deserialize, Serialize};

use super::RouteId;
use super::de::{float_or_string, float_or_string_or_zero, string_or_number};

/// The current position of one vehicle, as reported by the live feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePosition {
    #[serde(deserialize_with = "string_or_number")]
    pub vehicle_id: String,

    pub route_id: RouteId,

    #[serde(deserialize_with = "float_or_string")]
    pub latitude: f64,

    #[serde(deserialize_with = "float_or_string")]
    pub longitude: f64,

    /// Heading in degrees clockwise from north.
    #[serde(default, deserialize_with = "float_or_string_or_zero")]
    pub bearing: f64,

    #[serde(default)]
    pub route_short_name: String,

    /// Hex colour without the leading `#`.
    #[serde(default)]
    pub route_color: Option<String>,
}

impl VehiclePosition {
    /// Marker colour: the route colour as `#RRGGBB`, or black.
    pub fn marker_color(&self) -> String {
        match self.route_color.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => format!("#{}", c.trim_start_matches('#')),
            _ => "black".to_string(),
        }
    }

    /// Rotation for the vehicle icon in degrees (0-360).
    ///
    /// The icon artwork points south, hence the half turn.
    pub fn icon_rotation(&self) -> f64 {
        (self.bearing + 180.0).rem_euclid(360.0)
    }

    /// Marker title, e.g. "Bus 1203".
    pub fn marker_title(&self) -> String {
        format!("Bus {}", self.vehicle_id)
    }

    /// Marker description, e.g. "Route: 6".
    pub fn marker_description(&self) -> String {
        format!("Route: {}", self.route_short_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(color: Option<&str>, bearing: f64) -> VehiclePosition {
        VehiclePosition {
            vehicle_id: "1203".to_string(),
            route_id: RouteId::new("6"),
            latitude: 39.1653,
            longitude: -86.5264,
            bearing,
            route_short_name: "6".to_string(),
            route_color: color.map(str::to_string),
        }
    }

    #[test]
    fn parse_full_position() {
        let json = r#"{
            "vehicle_id": "1203",
            "route_id": "6",
            "latitude": 39.1653,
            "longitude": -86.5264,
            "bearing": 270.0,
            "route_short_name": "6",
            "route_color": "990000"
        }"#;

        let pos: VehiclePosition = serde_json::from_str(json).unwrap();
        assert_eq!(pos.vehicle_id, "1203");
        assert_eq!(pos.route_id, RouteId::new("6"));
        assert_eq!(pos.bearing, 270.0);
        assert_eq!(pos.route_color.as_deref(), Some("990000"));
    }

    #[test]
    fn parse_sparse_position() {
        let json = r#"{"vehicle_id": 77, "route_id": 3, "latitude": "39.1", "longitude": "-86.5"}"#;

        let pos: VehiclePosition = serde_json::from_str(json).unwrap();
        assert_eq!(pos.vehicle_id, "77");
        assert_eq!(pos.route_id.as_str(), "3");
        assert_eq!(pos.bearing, 0.0);
        assert_eq!(pos.route_short_name, "");
        assert_eq!(pos.route_color, None);
    }

    #[test]
    fn missing_coordinates_rejected() {
        let json = r#"{"vehicle_id": "1", "route_id": "3", "latitude": 39.1}"#;
        assert!(serde_json::from_str::<VehiclePosition>(json).is_err());
    }

    #[test]
    fn marker_color_defaults_to_black() {
        assert_eq!(bus(Some("990000"), 0.0).marker_color(), "#990000");
        assert_eq!(bus(Some("#00FF00"), 0.0).marker_color(), "#00FF00");
        assert_eq!(bus(Some(""), 0.0).marker_color(), "black");
        assert_eq!(bus(None, 0.0).marker_color(), "black");
    }

    #[test]
    fn icon_rotation_wraps() {
        assert_eq!(bus(None, 0.0).icon_rotation(), 180.0);
        assert_eq!(bus(None, 270.0).icon_rotation(), 90.0);
        assert_eq!(bus(None, -90.0).icon_rotation(), 90.0);
    }

    #[test]
    fn marker_labels() {
        let b = bus(None, 0.0);
        assert_eq!(b.marker_title(), "Bus 1203");
        assert_eq!(b.marker_description(), "Route: 6");
    }
}
