//! Map presentation helpers.
//!
//! Route shapes, stop dots and stop info popups are drawn from catalog
//! data; vehicle markers come from [`VehiclePosition`](crate::domain::VehiclePosition).

use crate::domain::{Polyline, RouteItem, RouteStop};

/// Shape colour for routes without one.
pub const DEFAULT_SHAPE_COLOR: &str = "FF0000";

/// Stop dot colour for routes without one.
pub const DEFAULT_STOP_COLOR: &str = "000000";

/// Name shown for stops the backend left unnamed.
const DEFAULT_STOP_NAME: &str = "Bus Stop";

const STREET_VIEW_URL: &str = "https://maps.googleapis.com/maps/api/streetview";

/// Everything needed to draw one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    pub shape_color: String,
    pub stop_color: String,
    pub polylines: Vec<Polyline>,
    pub stops: Vec<RouteStop>,
}

impl RouteOverlay {
    /// Build the overlay for a catalog route.
    pub fn for_route(item: &RouteItem) -> Self {
        Self {
            shape_color: item.route.color_or(DEFAULT_SHAPE_COLOR),
            stop_color: item.route.color_or(DEFAULT_STOP_COLOR),
            polylines: item.polylines(),
            stops: item.stops.clone(),
        }
    }

    /// Popup content for every stop on the route, in route order.
    pub fn stop_infos(&self, maps_api_key: Option<&str>) -> Vec<StopInfo> {
        self.stops
            .iter()
            .map(|stop| StopInfo::for_stop(stop, maps_api_key))
            .collect()
    }
}

/// Popup content for a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct StopInfo {
    pub name: String,
    pub vicinity: String,
    /// Street-level photo, only when a maps key is configured
    pub photo_url: Option<String>,
}

impl StopInfo {
    /// Describe `stop`, linking a street-view photo when `maps_api_key` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_client::domain::RouteStop;
    /// use transit_client::map::StopInfo;
    ///
    /// let stop = RouteStop {
    ///     stop_id: None,
    ///     stop_name: None,
    ///     latitude: 39.1,
    ///     longitude: -86.5,
    /// };
    /// let info = StopInfo::for_stop(&stop, None);
    /// assert_eq!(info.name, "Bus Stop");
    /// assert_eq!(info.vicinity, "Lat: 39.1, Lng: -86.5");
    /// assert!(info.photo_url.is_none());
    /// ```
    pub fn for_stop(stop: &RouteStop, maps_api_key: Option<&str>) -> Self {
        let name = match stop.stop_name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => DEFAULT_STOP_NAME.to_string(),
        };

        let photo_url = maps_api_key.filter(|k| !k.is_empty()).map(|key| {
            format!(
                "{STREET_VIEW_URL}?size=600x300&location={},{}&key={key}",
                stop.latitude, stop.longitude
            )
        });

        Self {
            name,
            vicinity: format!("Lat: {}, Lng: {}", stop.latitude, stop.longitude),
            photo_url,
        }
    }
}
