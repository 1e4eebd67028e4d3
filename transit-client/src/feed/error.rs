//! Position feed error types.

use tokio_tungstenite::tungstenite;

/// Errors raised while connecting to or reading from the position feed.
///
/// These never reach callers of [`FeedClient`](super::FeedClient): the feed
/// logs them and reconnects.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The websocket handshake or stream failed
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// The transport could not establish a connection
    #[error("connection failed: {0}")]
    Connect(String),
}

/// Reasons a single feed message is discarded.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// Frame is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Frame has no `positions` array
    #[error("message has no positions array")]
    MissingPositions,
}
