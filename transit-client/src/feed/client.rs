//! Reconnecting live position feed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::domain::VehiclePosition;
use crate::selection::SelectionHandle;

use super::connector::{FeedConnector, FrameStream, WebSocketConnector};
use super::message::parse_positions;

/// Path of the position feed below the websocket base URL.
const FEED_PATH: &str = "/ws/bus-positions";

/// Delay between a connection closing and the next attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Configuration for the position feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Full websocket URL of the feed
    pub url: String,
    /// Fixed wait before reconnecting
    pub reconnect_delay: Duration,
}

impl FeedConfig {
    /// Feed at `{ws_base}/ws/bus-positions` with the default reconnect delay.
    pub fn new(ws_base: &str) -> Self {
        Self {
            url: format!("{}{}", ws_base.trim_end_matches('/'), FEED_PATH),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    /// Set the reconnect delay.
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

/// Lifecycle of the feed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Opening a connection.
    Connecting,
    /// Connected and receiving frames.
    Open,
    /// Connection lost; one reconnect is scheduled.
    ClosedPendingRetry,
    /// Not running: never connected, or disconnected on request.
    Stopped,
}

/// Shared snapshot of the latest vehicle positions.
pub type Positions = Arc<[VehiclePosition]>;

/// State shared between the client handle and its connection task.
struct Shared {
    config: FeedConfig,
    connector: Arc<dyn FeedConnector>,
    positions: watch::Sender<Positions>,
    state: watch::Sender<ConnectionState>,
    attempts: AtomicU64,
}

/// The running connection task and the means to stop it.
struct FeedTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// How a connection ended.
enum Closed {
    Remote,
    Shutdown,
}

/// Client for the live vehicle position feed.
///
/// After [`connect`](Self::connect) the client keeps one connection open in
/// a background task, replacing its position set with every message it
/// receives. When the connection drops it waits a fixed delay and connects
/// again, forever, until [`disconnect`](Self::disconnect).
///
/// The connection loop is a single task that is either connected or asleep
/// in one retry delay, so there is never more than one reconnect pending.
pub struct FeedClient {
    shared: Arc<Shared>,
    task: Mutex<Option<FeedTask>>,
}

impl FeedClient {
    /// Create a websocket feed client. Nothing connects until `connect`.
    pub fn new(config: FeedConfig) -> Self {
        Self::with_connector(config, WebSocketConnector)
    }

    /// Create a feed client over a custom transport.
    pub fn with_connector(config: FeedConfig, connector: impl FeedConnector) -> Self {
        let (positions, _) = watch::channel(Positions::from(Vec::new()));
        let (state, _) = watch::channel(ConnectionState::Stopped);

        Self {
            shared: Arc::new(Shared {
                config,
                connector: Arc::new(connector),
                positions,
                state,
                attempts: AtomicU64::new(0),
            }),
            task: Mutex::new(None),
        }
    }

    /// Start the connection loop. Does nothing if it is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self) {
        let mut task = self.lock_task();

        if let Some(running) = task.as_ref()
            && !running.handle.is_finished()
        {
            debug!("position feed already running");
            return;
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(Arc::clone(&self.shared), shutdown_rx));
        *task = Some(FeedTask { shutdown, handle });
    }

    /// Close the connection and cancel any pending reconnect.
    ///
    /// Waits for the connection task to finish. Positions received so far
    /// remain readable.
    pub async fn disconnect(&self) {
        let task = self.lock_task().take();

        if let Some(task) = task {
            let _ = task.shutdown.send(true);
            if let Err(e) = task.handle.await
                && e.is_panic()
            {
                warn!("position feed task panicked: {e}");
            }
        }

        self.shared.state.send_replace(ConnectionState::Stopped);
    }

    /// The latest position set.
    pub fn positions(&self) -> Positions {
        self.shared.positions.borrow().clone()
    }

    /// The latest positions on routes in `selection`.
    ///
    /// The stored set is not modified.
    pub fn visible_positions(&self, selection: &SelectionHandle) -> Vec<VehiclePosition> {
        let positions = self.positions();
        selection
            .filter_positions(&positions)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Receiver notified every time a new position set arrives.
    pub fn subscribe(&self) -> watch::Receiver<Positions> {
        self.shared.positions.subscribe()
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.shared.state.borrow()
    }

    /// Receiver notified on every connection state change.
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }

    /// Number of connection attempts made so far.
    pub fn connection_attempts(&self) -> u64 {
        self.shared.attempts.load(Ordering::Relaxed)
    }

    /// The feed URL.
    pub fn url(&self) -> &str {
        &self.shared.config.url
    }

    fn lock_task(&self) -> MutexGuard<'_, Option<FeedTask>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        let task = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.handle.abort();
        }
    }
}

/// Connection loop: connect, pump frames until closed, wait, repeat.
async fn run(shared: Arc<Shared>, mut shutdown: watch::Receiver<bool>) {
    info!(url = %shared.config.url, "starting position feed");

    loop {
        shared.state.send_replace(ConnectionState::Connecting);
        let attempt = shared.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(attempt, "connecting to position feed");

        let connected = tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            result = shared.connector.connect(&shared.config.url) => result,
        };

        match connected {
            Ok(frames) => {
                shared.state.send_replace(ConnectionState::Open);
                info!(attempt, "position feed connected");

                match shared.pump(frames, &mut shutdown).await {
                    Closed::Shutdown => break,
                    Closed::Remote => info!("position feed disconnected"),
                }
            }
            Err(e) => warn!(attempt, "position feed connection error: {e}"),
        }

        shared.state.send_replace(ConnectionState::ClosedPendingRetry);
        debug!(
            delay_ms = shared.config.reconnect_delay.as_millis() as u64,
            "scheduling position feed reconnect"
        );

        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = tokio::time::sleep(shared.config.reconnect_delay) => {}
        }
    }

    shared.state.send_replace(ConnectionState::Stopped);
    info!("position feed stopped");
}

impl Shared {
    /// Apply frames until the connection ends or shutdown is requested.
    async fn pump(&self, mut frames: FrameStream, shutdown: &mut watch::Receiver<bool>) -> Closed {
        loop {
            let frame = tokio::select! {
                biased;
                _ = shutdown.changed() => return Closed::Shutdown,
                frame = frames.next() => frame,
            };

            match frame {
                Some(Ok(text)) => self.apply(&text),
                Some(Err(e)) => {
                    warn!("position feed error: {e}");
                    return Closed::Remote;
                }
                None => return Closed::Remote,
            }
        }
    }

    /// Replace the position set with the contents of one message.
    fn apply(&self, text: &str) {
        match parse_positions(text) {
            Ok(positions) => {
                trace!(count = positions.len(), "position update");
                self.positions.send_replace(positions.into());
            }
            Err(e) => warn!("dropping position feed message: {e}"),
        }
    }
}
