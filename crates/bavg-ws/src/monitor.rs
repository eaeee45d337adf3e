//! Stream monitor
//!
//! One task per session owns the socket. It reads frames in arrival order and
//! routes each one to exactly one place: the decoded payload to the data
//! channel, or a [`StreamError`] to the error channel. The data channel is
//! bounded, so a slow consumer throttles socket reads rather than losing
//! frames.
//!
//! The task stops when the [`StopHandle`] fires or is dropped, when the data
//! receiver is dropped, or when the peer closes the socket. The stop signal is
//! raced against both the pending read and a blocked data send, so stopping
//! never waits on the network. On the way out the data channel is closed,
//! then the error channel, then the socket.

use crate::error::StreamError;
use crate::feed::Feed;
use crate::transport::{Transport, TransportError};
use std::marker::PhantomData;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Monitor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Reading frames
    Running,
    /// Channels and socket released
    Stopped,
}

/// Why a monitor stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Stop was requested, or the stop handle was dropped
    Requested,
    /// The data receiver was dropped
    ReceiverDropped,
    /// The peer closed the socket
    Disconnected,
}

/// Caller-facing handles of a live stream
///
/// The socket itself is never exposed; it belongs to the monitor task.
#[derive(Debug)]
pub struct StreamSession<P> {
    /// Decoded payloads, in arrival order
    pub data: mpsc::Receiver<P>,
    /// Per-frame failures, in arrival order
    pub errors: mpsc::UnboundedReceiver<StreamError>,
    /// Shuts the stream down
    pub stop: StopHandle,
}

/// One-shot shutdown trigger for a stream
///
/// Dropping the handle also stops the stream.
#[derive(Debug)]
pub struct StopHandle {
    signal: oneshot::Sender<()>,
    task: JoinHandle<StopReason>,
}

impl StopHandle {
    /// Request shutdown without waiting for it
    pub fn stop(self) {
        let _ = self.signal.send(());
    }

    /// Request shutdown and wait until the channels and socket are released
    ///
    /// Returns `None` if the monitor task panicked.
    pub async fn stop_and_wait(self) -> Option<StopReason> {
        let _ = self.signal.send(());
        self.task.await.ok()
    }

    /// Whether the monitor has already finished
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}

/// Read loop bound to one socket
pub(crate) struct StreamMonitor<F: Feed, T: Transport> {
    transport: T,
    data_tx: mpsc::Sender<F::Payload>,
    error_tx: mpsc::UnboundedSender<StreamError>,
    stop_rx: oneshot::Receiver<()>,
    state: MonitorState,
    _feed: PhantomData<F>,
}

impl<F: Feed, T: Transport + 'static> StreamMonitor<F, T> {
    /// Start a monitor for an already subscribed transport
    pub(crate) fn spawn(transport: T, data_capacity: usize) -> StreamSession<F::Payload> {
        let (data_tx, data) = mpsc::channel(data_capacity.max(1));
        let (error_tx, errors) = mpsc::unbounded_channel();
        let (signal, stop_rx) = oneshot::channel();

        let monitor = Self {
            transport,
            data_tx,
            error_tx,
            stop_rx,
            state: MonitorState::Running,
            _feed: PhantomData,
        };
        let task = tokio::spawn(monitor.run());

        StreamSession {
            data,
            errors,
            stop: StopHandle { signal, task },
        }
    }

    async fn run(mut self) -> StopReason {
        debug!("Monitoring websocket {}", F::PATH);

        let reason = loop {
            let frame = tokio::select! {
                biased;
                _ = &mut self.stop_rx => break StopReason::Requested,
                _ = self.data_tx.closed() => break StopReason::ReceiverDropped,
                frame = self.transport.recv() => frame,
            };

            match frame {
                Ok(Some(text)) => match F::decode(&text) {
                    Ok(payload) => {
                        tokio::select! {
                            biased;
                            _ = &mut self.stop_rx => break StopReason::Requested,
                            sent = self.data_tx.send(payload) => {
                                if sent.is_err() {
                                    break StopReason::ReceiverDropped;
                                }
                            }
                        }
                    }
                    Err(source) => {
                        debug!("Undecodable frame: {}", source);
                        self.report(StreamError::Decode { raw: text, source });
                    }
                },
                Ok(None) | Err(TransportError::Closed) => {
                    warn!("Websocket {} closed by peer", F::PATH);
                    self.report(StreamError::Disconnected);
                    break StopReason::Disconnected;
                }
                Err(e) => self.report(StreamError::Transport(e)),
            }
        };

        self.finish(reason).await
    }

    fn report(&self, error: StreamError) {
        // The error receiver may have been dropped; keep streaming data
        let _ = self.error_tx.send(error);
    }

    async fn finish(mut self, reason: StopReason) -> StopReason {
        drop(self.data_tx);
        drop(self.error_tx);
        if let Err(e) = self.transport.close().await {
            debug!("Error closing websocket: {}", e);
        }
        self.state = MonitorState::Stopped;

        info!(state = ?self.state, ?reason, "Stream monitor for {} finished", F::PATH);
        reason
    }
}
