use futures::{SinkExt, StreamExt};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::messages::OutboundAudio;

/// Request header carrying the API credential.
const API_KEY_HEADER: &str = "xi-api-key";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("WebSocket handshake failed: {0}")]
    Connect(#[source] WsError),

    #[error("credential is not a valid header value")]
    Credential,

    #[error("failed to send frame: {0}")]
    Send(#[source] WsError),

    #[error("WebSocket receive failed: {0}")]
    Receive(#[source] WsError),

    #[error("no frame received within {0:?}")]
    IdleTimeout(Duration),

    #[error("failed to serialize outbound message: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The session's WebSocket connection to the agent endpoint.
///
/// Owned exclusively by the session loop for the session's lifetime.
pub struct SessionTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    idle_timeout: Duration,
}

impl SessionTransport {
    /// Open the connection to `{base_uri}?agent_id={agent_id}` with the
    /// credential attached as a request header.
    pub async fn connect(
        base_uri: &str,
        agent_id: &str,
        api_key: &str,
        idle_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let uri = format!("{base_uri}?agent_id={agent_id}");
        info!("Connecting to agent endpoint: {base_uri}");

        let mut request = uri.into_client_request().map_err(TransportError::Connect)?;
        let credential =
            HeaderValue::from_str(api_key).map_err(|_| TransportError::Credential)?;
        request.headers_mut().insert(API_KEY_HEADER, credential);

        let (stream, response) = connect_async(request)
            .await
            .map_err(TransportError::Connect)?;

        info!("WebSocket connection established (status {})", response.status());

        Ok(Self {
            stream,
            idle_timeout,
        })
    }

    /// Serialize the envelope and send it as a single text frame.
    pub async fn send(&mut self, envelope: &OutboundAudio) -> Result<(), TransportError> {
        let payload = serde_json::to_string(envelope)?;

        self.stream
            .send(Message::Text(payload))
            .await
            .map_err(TransportError::Send)
    }

    /// Wait for the next inbound frame.
    ///
    /// Returns `Ok(None)` when the peer closes the connection, normally or
    /// abnormally; closure ends the receive loop but is not a failure.
    /// Fails with [`TransportError::IdleTimeout`] if nothing arrives within
    /// the configured bound.
    pub async fn receive(&mut self) -> Result<Option<String>, TransportError> {
        loop {
            let message = match timeout(self.idle_timeout, self.stream.next()).await {
                Err(_) => return Err(TransportError::IdleTimeout(self.idle_timeout)),
                Ok(None) => return Ok(None),
                Ok(Some(Ok(message))) => message,
                Ok(Some(Err(e))) => {
                    return match e {
                        WsError::ConnectionClosed | WsError::AlreadyClosed => Ok(None),
                        WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
                            debug!("Peer dropped the connection without a close handshake");
                            Ok(None)
                        }
                        other => Err(TransportError::Receive(other)),
                    }
                }
            };

            match message {
                Message::Text(text) => return Ok(Some(text)),
                Message::Binary(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => return Ok(Some(text)),
                    Err(e) => {
                        warn!(
                            "Ignoring non-UTF-8 binary frame ({} bytes)",
                            e.as_bytes().len()
                        );
                        continue;
                    }
                },
                Message::Close(_) => return Ok(None),
                // Protocol-level keep-alives are answered underneath the
                // message layer; nothing to surface.
                Message::Ping(_) | Message::Pong(_) => continue,
                Message::Frame(_) => continue,
            }
        }
    }

    /// Best-effort close handshake; the connection is released either way.
    pub async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            match e {
                WsError::ConnectionClosed | WsError::AlreadyClosed => {}
                other => debug!("Error closing WebSocket: {other}"),
            }
        }
    }
}
