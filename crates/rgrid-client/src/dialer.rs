//! Transport seam. The client only sees a sink and a stream of text frames.

use std::future::Future;
use std::pin::Pin;

use futures::{future, Sink, SinkExt, Stream, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use crate::ClientError;

/// Outbound text frames.
pub type FrameSink = Pin<Box<dyn Sink<String, Error = ClientError> + Send>>;

/// Inbound text frames. The stream ends when the peer closes.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// Opens one connection to the swarm stream.
pub trait Dialer: Send + Sync + 'static {
    fn dial<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(FrameSink, FrameStream), ClientError>> + Send + 'a>>;
}

/// Dials over WebSocket.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketDialer;

impl Dialer for WebSocketDialer {
    fn dial<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(FrameSink, FrameStream), ClientError>> + Send + 'a>> {
        Box::pin(async move {
            let (ws, _response) = tokio_tungstenite::connect_async(url).await?;
            let (write, read) = ws.split();

            let sink = write
                .sink_map_err(ClientError::from)
                .with(|text: String| future::ready(Ok::<_, ClientError>(Message::Text(text))));

            let stream = read.filter_map(|frame| {
                future::ready(match frame {
                    Ok(Message::Text(text)) => Some(Ok(text)),
                    Ok(Message::Binary(bytes)) => {
                        tracing::debug!(len = bytes.len(), "Ignoring binary frame");
                        None
                    }
                    // Ping/pong are answered by tungstenite; close ends the stream.
                    Ok(_) => None,
                    Err(e) => Some(Err(ClientError::from(e))),
                })
            });

            let sink: FrameSink = Box::pin(sink);
            let stream: FrameStream = Box::pin(stream);
            Ok((sink, stream))
        })
    }
}
