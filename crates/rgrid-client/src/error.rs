use thiserror::Error;

use rgrid_protocol::ProtocolError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Failure reported by a non-WebSocket transport.
    #[error("transport error: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_converts_transparently() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let protocol = ProtocolError::Encode(source);
        let expected = protocol.to_string();
        let err = ClientError::from(protocol);
        assert!(matches!(err, ClientError::Protocol(ProtocolError::Encode(_))));
        assert_eq!(err.to_string(), expected);
    }
}
