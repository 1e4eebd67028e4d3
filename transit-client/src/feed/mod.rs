//! Live vehicle position feed.
//!
//! The backend pushes the complete set of vehicle positions over a
//! websocket at `/ws/bus-positions`. Each message supersedes the previous
//! one; nothing is merged.
//!
//! Key characteristics:
//! - One connection at a time, reopened after a fixed delay when it drops
//! - Retries never give up; only [`FeedClient::disconnect`] stops them
//! - Malformed messages are logged and dropped without touching the last
//!   good position set
//! - Messages are applied in arrival order; there is no sequence check

mod client;
mod connector;
mod error;
mod message;


pub use client::{ConnectionState, DEFAULT_RECONNECT_DELAY, FeedClient, FeedConfig, Positions};
pub use connector::{FeedConnector, FrameStream, WebSocketConnector};
pub use error::{FeedError, MessageError};
pub use message::parse_positions;
