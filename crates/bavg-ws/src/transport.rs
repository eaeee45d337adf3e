//! Websocket transport abstraction
//!
//! The session and monitor code talk to the socket through [`Transport`], so
//! the subscribe handshake and the read loop can be exercised against
//! [`MockTransport`] without a network.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, instrument};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Socket-level failures
///
/// Messages never include the endpoint, since its query string holds the
/// ticket.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Handshake did not finish within the dial timeout
    #[error("dial timed out after {0:?}")]
    DialTimeout(Duration),

    /// Handshake was refused or the host was unreachable
    #[error("dial failed: {0}")]
    Dial(String),

    /// Used before `connect` or after the socket went away
    #[error("socket is not open")]
    Detached,

    /// A frame could not be written
    #[error("write failed: {0}")]
    Write(String),

    /// A frame could not be read
    #[error("read failed: {0}")]
    Read(String),

    /// Peer dropped the stream without a close frame
    #[error("socket closed")]
    Closed,
}

/// Duplex text-frame connection
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dial the endpoint
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Send a text frame
    async fn send(&mut self, message: &str) -> Result<(), TransportError>;

    /// Receive the next text frame
    ///
    /// Returns `None` if the peer closed the connection gracefully.
    async fn recv(&mut self) -> Result<Option<String>, TransportError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), TransportError>;

    /// Endpoint URL, including any query string
    fn endpoint(&self) -> &str;
}

/// tokio-tungstenite socket to a BitcoinAverage stream endpoint
pub struct WsTransport {
    url: String,
    dial_timeout: Duration,
    socket: Option<Socket>,
}

impl WsTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dial_timeout: Duration::from_secs(10),
            socket: None,
        }
    }

    /// Bound the time spent on the TCP, TLS and upgrade handshakes
    pub fn with_timeout(mut self, dial_timeout: Duration) -> Self {
        self.dial_timeout = dial_timeout;
        self
    }

    fn socket(&mut self) -> Result<&mut Socket, TransportError> {
        self.socket.as_mut().ok_or(TransportError::Detached)
    }
}

#[async_trait]
impl Transport for WsTransport {
    // The URL carries the ticket; keep it out of spans.
    #[instrument(skip(self))]
    async fn connect(&mut self) -> Result<(), TransportError> {
        let dial = connect_async(self.url.as_str());
        let (socket, response) = match timeout(self.dial_timeout, dial).await {
            Err(_) => return Err(TransportError::DialTimeout(self.dial_timeout)),
            Ok(result) => result.map_err(|e| TransportError::Dial(e.to_string()))?,
        };

        debug!(status = %response.status(), "Socket upgraded");
        self.socket = Some(socket);
        Ok(())
    }

    #[instrument(skip(self, message), fields(len = message.len()))]
    async fn send(&mut self, message: &str) -> Result<(), TransportError> {
        let frame = Message::Text(message.to_owned());
        self.socket()?
            .send(frame)
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        let socket = self.socket()?;

        while let Some(frame) = socket.next().await {
            match frame.map_err(|e| TransportError::Read(e.to_string()))? {
                Message::Text(text) => return Ok(Some(text)),
                Message::Binary(bytes) => {
                    return String::from_utf8(bytes)
                        .map(Some)
                        .map_err(|e| TransportError::Read(e.to_string()));
                }
                Message::Close(frame) => {
                    debug!(?frame, "Close frame received");
                    self.socket = None;
                    return Ok(None);
                }
                // tungstenite answers pings on the next write
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }

        self.socket = None;
        Err(TransportError::Closed)
    }

    #[instrument(skip(self))]
    async fn close(&mut self) -> Result<(), TransportError> {
        match self.socket.take() {
            Some(mut socket) => socket
                .close(None)
                .await
                .map_err(|e| TransportError::Write(e.to_string())),
            None => Ok(()),
        }
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Mock transport for testing
///
/// Replays scripted frames and captures sent ones.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockTransport {
    url: String,
    connected: bool,
    /// Frames to return on recv()
    pub responses: std::collections::VecDeque<Result<Option<String>, TransportError>>,
    /// Frames captured from send()
    pub sent_messages: Vec<String>,
    /// Simulate connection failure
    pub fail_connect: bool,
    /// Simulate send failure
    pub fail_send: bool,
    /// Block on recv() once the script is exhausted instead of reporting a close
    pub hold_open: bool,
    closed: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connected: false,
            responses: std::collections::VecDeque::new(),
            sent_messages: Vec::new(),
            fail_connect: false,
            fail_send: false,
            hold_open: false,
            closed: Default::default(),
        }
    }

    /// Add a frame to be returned on recv()
    pub fn push_response(&mut self, msg: impl Into<String>) {
        self.responses.push_back(Ok(Some(msg.into())));
    }

    /// Add multiple frames
    pub fn push_responses(&mut self, msgs: impl IntoIterator<Item = impl Into<String>>) {
        for msg in msgs {
            self.push_response(msg);
        }
    }

    /// Simulate a close
    pub fn push_close(&mut self) {
        self.responses.push_back(Ok(None));
    }

    /// Simulate a receive error
    pub fn push_error(&mut self, error: TransportError) {
        self.responses.push_back(Err(error));
    }

    /// Get sent frames
    pub fn take_sent(&mut self) -> Vec<String> {
        std::mem::take(&mut self.sent_messages)
    }

    /// Flag that turns true once close() has been called, readable after the
    /// transport has been moved into a session
    pub fn close_flag(&self) -> std::sync::Arc<std::sync::atomic::AtomicBool> {
        self.closed.clone()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn connect(&mut self) -> Result<(), TransportError> {
        if self.fail_connect {
            return Err(TransportError::Dial("mock connection failure".into()));
        }
        self.connected = true;
        Ok(())
    }

    async fn send(&mut self, message: &str) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::Detached);
        }
        if self.fail_send {
            return Err(TransportError::Write("mock send failure".into()));
        }
        self.sent_messages.push(message.to_string());
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        if !self.connected {
            return Err(TransportError::Detached);
        }
        match self.responses.pop_front() {
            Some(response) => response,
            None if self.hold_open => std::future::pending().await,
            None => Err(TransportError::Closed),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.connected = false;
        self.closed.store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
