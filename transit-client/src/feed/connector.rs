//! Transport seam for the position feed.

use futures::future::{self, BoxFuture};
use futures::stream::BoxStream;
use futures::{FutureExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace};

use super::error::FeedError;

/// Text frames from one feed connection. The stream ends when the
/// connection closes.
pub type FrameStream = BoxStream<'static, Result<String, FeedError>>;

/// Opens connections to the position feed.
pub trait FeedConnector: Send + Sync + 'static {
    /// Connect to `url` and return its text frames.
    fn connect(&self, url: &str) -> BoxFuture<'static, Result<FrameStream, FeedError>>;
}

/// Connects to the feed over a websocket.
#[derive(Debug, Clone, Default)]
pub struct WebSocketConnector;

impl FeedConnector for WebSocketConnector {
    fn connect(&self, url: &str) -> BoxFuture<'static, Result<FrameStream, FeedError>> {
        let url = url.to_string();

        async move {
            let (socket, response) = connect_async(url.as_str()).await?;
            debug!(%url, status = %response.status(), "websocket handshake complete");

            let frames = socket
                .filter_map(|message| future::ready(text_frame(message)))
                .boxed();

            Ok(frames)
        }
        .boxed()
    }
}

/// Keep text frames and errors; control frames are handled by tungstenite.
fn text_frame(
    message: Result<Message, tokio_tungstenite::tungstenite::Error>,
) -> Option<Result<String, FeedError>> {
    match message {
        Ok(Message::Text(text)) => Some(Ok(text)),
        Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
            Ok(text) => Some(Ok(text)),
            Err(_) => {
                debug!("ignoring non-UTF-8 binary frame");
                None
            }
        },
        Ok(Message::Close(frame)) => {
            debug!(?frame, "server closed position feed");
            None
        }
        Ok(other) => {
            trace!(?other, "ignoring control frame");
            None
        }
        Err(e) => Some(Err(e.into())),
    }
}
