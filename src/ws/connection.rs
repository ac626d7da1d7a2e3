#![expect(
    clippy::module_name_repetitions,
    reason = "Connection types expose their domain in the name for clarity"
)]

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::{SinkExt as _, StreamExt as _};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use url::Url;

use super::config::Config;
use super::error::WsError;
use super::traits::MessageHandler;
use crate::auth::Credentials;
use crate::error::Error;
use crate::{Result, error::Kind};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Shared slot holding the single registered inbound handler. Replaced on
/// each registration; read by the connection task on every parsed frame.
type HandlerSlot<M> = Arc<RwLock<Option<Box<dyn MessageHandler<M>>>>>;

/// Connection state tracking.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected; either never connected, explicitly disconnected, or the
    /// retry budget is exhausted
    Disconnected,
    /// Attempting to connect
    Connecting,
    /// Successfully connected
    Connected,
    /// Waiting to reconnect after a close or failed open
    Reconnecting {
        /// Current reconnection attempt number
        attempt: u32,
    },
}

impl ConnectionState {
    /// Check if the connection is currently active.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// The live connection owned by the manager. Torn down on `disconnect` or
/// replaced wholesale by a new `connect` call.
struct ActiveConnection {
    /// Sender for outgoing JSON text frames
    outbound_tx: mpsc::UnboundedSender<String>,
    /// Cancels the connection task, including a pending retry sleep
    cancel: CancellationToken,
    /// Handle of the spawned connection task
    task: JoinHandle<()>,
}

impl ActiveConnection {
    fn shutdown(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Manages the WebSocket connection to the chat backend.
///
/// Owns at most one live channel at a time. On open, an optional login
/// handshake is sent; on close (or transport error, which takes the same
/// path), a reconnect to the same endpoint is scheduled after a fixed delay
/// until the attempt budget is exhausted, at which point reconnection stops
/// silently. A successful open resets the budget.
///
/// Explicit [`disconnect`](Self::disconnect) cancels the connection task
/// outright, including a retry sleep that is already pending, so no stale
/// reconnect can fire afterwards.
///
/// # Type Parameters
///
/// - `M`: inbound message type, deserialized from each JSON text frame
///
/// # Example
///
/// ```ignore
/// let connection: ConnectionManager<ServerEvent> = ConnectionManager::new(Config::default());
/// connection.set_message_handler(|event: ServerEvent| {
///     println!("received: {event:?}");
/// });
/// connection.connect("wss://chat.example.com/ws", None)?;
/// connection.send_message(&request)?;
/// ```
pub struct ConnectionManager<M>
where
    M: DeserializeOwned + Send + 'static,
{
    inner: Arc<Inner<M>>,
}

impl<M> Clone for ConnectionManager<M>
where
    M: DeserializeOwned + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<M> {
    /// Reconnection configuration shared by every `connect` call
    config: Config,
    /// Watch channel sender for state changes
    state_tx: watch::Sender<ConnectionState>,
    /// Watch channel receiver for reading the current state
    state_rx: watch::Receiver<ConnectionState>,
    /// Single registered inbound message handler
    handler: HandlerSlot<M>,
    /// The live connection, if any
    active: Mutex<Option<ActiveConnection>>,
}

impl<M> ConnectionManager<M>
where
    M: DeserializeOwned + Send + 'static,
{
    /// Create a new manager with no active connection.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

        Self {
            inner: Arc::new(Inner {
                config,
                state_tx,
                state_rx,
                handler: Arc::new(RwLock::new(None)),
                active: Mutex::new(None),
            }),
        }
    }

    /// Connect to `endpoint`, tearing down any existing connection first.
    ///
    /// When `credentials` are supplied, a login payload is sent as the first
    /// frame after every successful open, including reopens after a reconnect.
    /// The endpoint must use the `ws` or `wss` scheme.
    ///
    /// Must be called within a tokio runtime; the connection runs in a
    /// spawned background task.
    pub fn connect(&self, endpoint: &str, credentials: Option<&Credentials>) -> Result<()> {
        let url = Url::parse(endpoint)?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(Error::validation(format!(
                "endpoint must use the ws or wss scheme, got {}",
                url.scheme()
            )));
        }

        let handshake = credentials.map(Credentials::login_payload).transpose()?;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let mut active = self
            .inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // At most one live channel at any instant.
        if let Some(previous) = active.take() {
            previous.shutdown();
        }

        let task = tokio::spawn(Self::connection_loop(
            endpoint.to_owned(),
            handshake,
            self.inner.config.clone(),
            outbound_rx,
            Arc::clone(&self.inner.handler),
            self.inner.state_tx.clone(),
            cancel.clone(),
        ));

        *active = Some(ActiveConnection {
            outbound_tx,
            cancel,
            task,
        });

        Ok(())
    }

    /// Disconnect and suppress any pending or future reconnect attempt.
    ///
    /// Idempotent; safe to call with no active connection.
    pub fn disconnect(&self) {
        let previous = self
            .inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(connection) = previous {
            connection.shutdown();
        }

        _ = self.inner.state_tx.send(ConnectionState::Disconnected);
    }

    /// Serialize `payload` to JSON text and send it over the live channel.
    ///
    /// # Errors
    ///
    /// Returns [`WsError::NotConnected`] when there is no active connection
    /// or the connection is not currently open. Messages are not queued for
    /// later delivery.
    pub fn send_message<R: Serialize>(&self, payload: &R) -> Result<()> {
        let active = self
            .inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(connection) = active.as_ref() else {
            return Err(WsError::NotConnected.into());
        };

        if !self.state().is_connected() {
            return Err(WsError::NotConnected.into());
        }

        let json = serde_json::to_string(payload)?;
        connection
            .outbound_tx
            .send(json)
            .map_err(|_e| WsError::ConnectionClosed)?;

        Ok(())
    }

    /// Register the inbound message handler, replacing any previous one.
    ///
    /// Only the most recently registered handler is active. The registration
    /// survives reconnects; it does not need to be repeated after a
    /// connection drop.
    pub fn set_message_handler<H: MessageHandler<M>>(&self, handler: H) {
        *self
            .inner
            .handler
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Box::new(handler));
    }

    /// Get the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.inner.state_rx.borrow()
    }

    /// Subscribe to connection state changes.
    ///
    /// Returns a receiver that notifies when the connection state changes.
    /// Useful for reacting to reconnections or to the retry budget running
    /// out.
    #[must_use]
    pub fn state_receiver(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state_tx.subscribe()
    }

    /// Connection loop with fixed-delay bounded reconnection.
    async fn connection_loop(
        endpoint: String,
        handshake: Option<String>,
        config: Config,
        mut outbound_rx: mpsc::UnboundedReceiver<String>,
        handler: HandlerSlot<M>,
        state_tx: watch::Sender<ConnectionState>,
        cancel: CancellationToken,
    ) {
        let mut attempt = 0_u32;

        loop {
            _ = state_tx.send(ConnectionState::Connecting);

            tokio::select! {
                () = cancel.cancelled() => {
                    _ = state_tx.send(ConnectionState::Disconnected);
                    return;
                }
                result = connect_async(&endpoint) => match result {
                    Ok((ws_stream, _)) => {
                        attempt = 0;
                        _ = state_tx.send(ConnectionState::Connected);

                        let cancelled = Self::run_session(
                            ws_stream,
                            handshake.as_deref(),
                            &mut outbound_rx,
                            &handler,
                            &cancel,
                        )
                        .await;

                        if cancelled {
                            _ = state_tx.send(ConnectionState::Disconnected);
                            return;
                        }
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(%endpoint, error = %e, "Unable to connect");
                        #[cfg(not(feature = "tracing"))]
                        let _ = &e;
                    }
                }
            }

            // Once the budget is exhausted, reconnection stops silently with
            // no terminal error event.
            if attempt >= config.reconnect.max_attempts {
                _ = state_tx.send(ConnectionState::Disconnected);
                return;
            }
            attempt = attempt.saturating_add(1);
            _ = state_tx.send(ConnectionState::Reconnecting { attempt });

            tokio::select! {
                () = cancel.cancelled() => {
                    _ = state_tx.send(ConnectionState::Disconnected);
                    return;
                }
                () = sleep(config.reconnect.retry_delay) => {}
            }
        }
    }

    /// Drive one open connection until it closes, errors, or is cancelled.
    ///
    /// Returns `true` when the session ended because of cancellation.
    async fn run_session(
        ws_stream: WsStream,
        handshake: Option<&str>,
        outbound_rx: &mut mpsc::UnboundedReceiver<String>,
        handler: &HandlerSlot<M>,
        cancel: &CancellationToken,
    ) -> bool {
        let (mut write, mut read) = ws_stream.split();

        if let Some(payload) = handshake
            && write.send(Message::Text(payload.into())).await.is_err()
        {
            return false;
        }

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    _ = write.send(Message::Close(None)).await;
                    return true;
                }
                msg = read.next() => match msg {
                    Some(Ok(Message::Text(text))) => Self::dispatch(text.as_str(), handler),
                    Some(Ok(Message::Close(_))) | None => return false,
                    Some(Ok(_)) => {
                        // Ignore binary and control frames.
                    }
                    Some(Err(e)) => {
                        // Transport errors end the session through the same
                        // path as a close; there is no separate error state.
                        #[cfg(feature = "tracing")]
                        tracing::warn!(error = %e, "WebSocket transport error");
                        #[cfg(not(feature = "tracing"))]
                        let _ = &e;
                        return false;
                    }
                },
                Some(text) = outbound_rx.recv() => {
                    if write.send(Message::Text(text.into())).await.is_err() {
                        return false;
                    }
                }
            }
        }
    }

    /// Parse an inbound text frame and invoke the registered handler.
    ///
    /// Malformed frames are dropped with a logged warning; the handler is
    /// not invoked for them and no error is propagated.
    fn dispatch(text: &str, handler: &HandlerSlot<M>) {
        match serde_json::from_str::<M>(text) {
            Ok(message) => {
                let guard = handler.read().unwrap_or_else(PoisonError::into_inner);
                if let Some(handler) = guard.as_ref() {
                    handler.on_message(message);
                }
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%text, error = %e, "Dropping malformed WebSocket frame");
                #[cfg(not(feature = "tracing"))]
                let _ = (&text, &e);
            }
        }
    }

    /// Check whether an `Error` is the hard send-while-disconnected failure.
    #[must_use]
    pub fn is_not_connected(error: &Error) -> bool {
        error.kind() == Kind::WebSocket
            && matches!(error.downcast_ref::<WsError>(), Some(WsError::NotConnected))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Ping {
        seq: u32,
    }

    fn handler_slot() -> (HandlerSlot<Ping>, Arc<Mutex<Vec<u32>>>) {
        let received: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);

        let slot: HandlerSlot<Ping> = Arc::new(RwLock::new(Some(Box::new(move |ping: Ping| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(ping.seq);
        }))));

        (slot, received)
    }

    #[test]
    fn dispatch_invokes_handler_with_parsed_message() {
        let (slot, received) = handler_slot();

        ConnectionManager::<Ping>::dispatch(r#"{"seq":7}"#, &slot);

        assert_eq!(
            *received.lock().unwrap_or_else(PoisonError::into_inner),
            vec![7]
        );
    }

    #[test]
    fn dispatch_drops_malformed_frame() {
        let (slot, received) = handler_slot();

        ConnectionManager::<Ping>::dispatch("{not valid json", &slot);
        ConnectionManager::<Ping>::dispatch(r#"{"seq":1}"#, &slot);

        assert_eq!(
            *received.lock().unwrap_or_else(PoisonError::into_inner),
            vec![1]
        );
    }

    #[test]
    fn dispatch_without_registered_handler_is_a_no_op() {
        let slot: HandlerSlot<Ping> = Arc::new(RwLock::new(None));

        ConnectionManager::<Ping>::dispatch(r#"{"seq":1}"#, &slot);
    }

    /// Captures tracing output to prove malformed frames are logged.
    #[cfg(feature = "tracing")]
    #[test]
    fn warning_is_emitted_for_malformed_frame() {
        use tracing_subscriber::layer::SubscriberExt as _;

        let warnings: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let warnings_clone = Arc::clone(&warnings);

        // Custom layer that captures warn events
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(move || {
                struct CaptureWriter(Arc<Mutex<Vec<String>>>);
                impl std::io::Write for CaptureWriter {
                    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                        if let Ok(s) = std::str::from_utf8(buf) {
                            self.0.lock().expect("lock").push(s.to_owned());
                        }
                        Ok(buf.len())
                    }
                    fn flush(&mut self) -> std::io::Result<()> {
                        Ok(())
                    }
                }
                CaptureWriter(Arc::clone(&warnings_clone))
            })
            .with_ansi(false);

        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let (slot, received) = handler_slot();
            ConnectionManager::<Ping>::dispatch("{not valid json", &slot);
            assert!(
                received
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .is_empty(),
                "malformed frame must not reach the handler"
            );
        });

        let captured = warnings.lock().expect("lock");
        let all_output = captured.join("");

        assert!(
            all_output.contains("malformed"),
            "Expected malformed-frame warning in output, got: {all_output}"
        );
    }
}
