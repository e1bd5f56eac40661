use thiserror::Error;

/// Errors produced while decoding inbound swarm messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not a JSON object carrying a `type` tag.
    #[error("malformed envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The tag was recognized but its payload has the wrong shape.
    #[error("malformed '{tag}' payload: {source}")]
    Payload {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// An outbound command could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
}
