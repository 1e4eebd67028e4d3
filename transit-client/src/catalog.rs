//! Route catalog.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{ApiError, TransitApiClient};
use crate::domain::{RouteId, RouteItem};

/// Thread-safe list of every route with its stops and shape.
///
/// Loaded once from the backend and replaced wholesale on refresh. Routes
/// keep the order the backend returned them in.
#[derive(Clone)]
pub struct RouteCatalog {
    inner: Arc<RwLock<Vec<RouteItem>>>,
    client: TransitApiClient,
}

impl RouteCatalog {
    /// Create a catalog by fetching from the backend.
    ///
    /// This will fail if the backend is unreachable.
    pub async fn fetch(client: TransitApiClient) -> Result<Self, ApiError> {
        let routes = client.all_routes().await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(routes)),
            client,
        })
    }

    /// Create an empty catalog; call [`refresh`](Self::refresh) to fill it.
    pub fn empty(client: TransitApiClient) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            client,
        }
    }

    /// Look up a route by id.
    pub async fn get(&self, route_id: &RouteId) -> Option<RouteItem> {
        let guard = self.inner.read().await;
        guard.iter().find(|r| r.id() == route_id).cloned()
    }

    /// A copy of every route.
    pub async fn routes(&self) -> Vec<RouteItem> {
        self.inner.read().await.clone()
    }

    /// Every route id, in catalog order.
    pub async fn ids(&self) -> Vec<RouteId> {
        let guard = self.inner.read().await;
        guard.iter().map(|r| r.id().clone()).collect()
    }

    /// Get the number of routes.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Refresh the catalog from the backend.
    ///
    /// On success, replaces the current routes. On failure, the existing
    /// routes are preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let routes = self.client.all_routes().await?;
        let count = routes.len();

        let mut guard = self.inner.write().await;
        *guard = routes;

        Ok(count)
    }
}
