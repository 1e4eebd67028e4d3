//! Selected routes, shared between the route list and the map.
//!
//! Exactly one [`SelectionWriter`] exists per selection; the route list owns
//! it. Everything else holds a cloneable [`SelectionHandle`] that can read
//! the current set and wait for changes.

use std::collections::HashSet;

use tokio::sync::watch;

use crate::domain::{RouteId, VehiclePosition};

/// Create an empty selection, returning its single writer and a reader.
pub fn channel() -> (SelectionWriter, SelectionHandle) {
    let (tx, rx) = watch::channel(HashSet::new());
    (SelectionWriter { tx }, SelectionHandle { rx })
}

/// The only way to change a selection.
#[derive(Debug)]
pub struct SelectionWriter {
    tx: watch::Sender<HashSet<RouteId>>,
}

impl SelectionWriter {
    /// Select the route if it is not selected, otherwise deselect it.
    ///
    /// Returns whether the route is selected afterwards.
    pub fn toggle(&self, route_id: &RouteId) -> bool {
        let mut selected = false;
        self.tx.send_modify(|set| {
            selected = if set.remove(route_id) {
                false
            } else {
                set.insert(route_id.clone());
                true
            };
        });
        selected
    }

    /// Select every route in `all` when nothing is selected; otherwise clear.
    pub fn toggle_all<I>(&self, all: I)
    where
        I: IntoIterator<Item = RouteId>,
    {
        self.tx.send_modify(|set| {
            if set.is_empty() {
                set.extend(all);
            } else {
                set.clear();
            }
        });
    }

    /// Replace the selection.
    pub fn set<I>(&self, routes: I)
    where
        I: IntoIterator<Item = RouteId>,
    {
        self.tx.send_replace(routes.into_iter().collect());
    }

    /// Deselect everything.
    pub fn clear(&self) {
        self.tx.send_if_modified(|set| {
            let changed = !set.is_empty();
            set.clear();
            changed
        });
    }

    /// A new reader for this selection.
    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read access to a selection.
#[derive(Debug, Clone)]
pub struct SelectionHandle {
    rx: watch::Receiver<HashSet<RouteId>>,
}

impl SelectionHandle {
    /// Whether `route_id` is selected.
    pub fn contains(&self, route_id: &RouteId) -> bool {
        self.rx.borrow().contains(route_id)
    }

    /// A copy of the current selection.
    pub fn snapshot(&self) -> HashSet<RouteId> {
        self.rx.borrow().clone()
    }

    /// Number of selected routes.
    pub fn len(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.rx.borrow().is_empty()
    }

    /// Keep only the positions on selected routes.
    pub fn filter_positions<'a>(&self, positions: &'a [VehiclePosition]) -> Vec<&'a VehiclePosition> {
        let selected = self.rx.borrow();
        positions
            .iter()
            .filter(|p| selected.contains(&p.route_id))
            .collect()
    }

    /// Wait until the selection changes.
    ///
    /// Returns `false` once the writer has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RouteId {
        RouteId::new(s)
    }

    fn bus(vehicle: &str, route: &str) -> VehiclePosition {
        VehiclePosition {
            vehicle_id: vehicle.to_string(),
            route_id: id(route),
            latitude: 39.0,
            longitude: -86.0,
            bearing: 0.0,
            route_short_name: route.to_string(),
            route_color: None,
        }
    }

    #[test]
    fn toggle_selects_and_deselects() {
        let (writer, handle) = channel();

        assert!(writer.toggle(&id("3")));
        assert!(handle.contains(&id("3")));

        assert!(!writer.toggle(&id("3")));
        assert!(!handle.contains(&id("3")));
        assert!(handle.is_empty());
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let (writer, handle) = channel();
        let all = || vec![id("1"), id("2"), id("3")];

        writer.toggle_all(all());
        assert_eq!(handle.len(), 3);

        writer.toggle_all(all());
        assert!(handle.is_empty());

        // Partial selection clears rather than completing
        writer.toggle(&id("2"));
        writer.toggle_all(all());
        assert!(handle.is_empty());
    }

    #[test]
    fn set_and_clear() {
        let (writer, handle) = channel();
        writer.set([id("4"), id("5")]);
        assert_eq!(
            handle.snapshot(),
            HashSet::from([id("4"), id("5")])
        );

        writer.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn filter_keeps_selected_routes_only() {
        let (writer, handle) = channel();
        let positions = vec![bus("a", "1"), bus("b", "2"), bus("c", "1")];

        assert!(handle.filter_positions(&positions).is_empty());

        writer.toggle(&id("1"));
        let visible: Vec<_> = handle
            .filter_positions(&positions)
            .into_iter()
            .map(|p| p.vehicle_id.as_str())
            .collect();
        assert_eq!(visible, vec!["a", "c"]);
        assert_eq!(positions.len(), 3);
    }

    #[tokio::test]
    async fn handles_observe_changes() {
        let (writer, mut handle) = channel();
        let other = writer.handle();

        writer.toggle(&id("7"));
        assert!(handle.changed().await);
        assert!(other.contains(&id("7")));

        drop(writer);
        assert!(!handle.changed().await);
    }

    #[tokio::test]
    async fn clearing_empty_selection_does_not_notify() {
        let (writer, mut handle) = channel();
        writer.clear();

        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(20), handle.changed()).await;
        assert!(waited.is_err());
        drop(writer);
    }
}
