//! Core traits for the WebSocket connection layer.

use serde::de::DeserializeOwned;

/// Handler for inbound messages.
///
/// The connection manager keeps exactly one registered handler; registering a
/// new one replaces the previous one. The manager owns the handler's lifetime
/// and keeps invoking it across reconnects, so there is no need to re-register
/// after a connection drop.
///
/// Implemented for any `Fn(M)` closure:
///
/// ```ignore
/// connection.set_message_handler(|event: ServerEvent| {
///     println!("received: {event:?}");
/// });
/// ```
pub trait MessageHandler<M: DeserializeOwned>: Send + Sync + 'static {
    /// Called with each successfully parsed inbound message.
    ///
    /// Runs on the connection task; malformed frames are dropped before this
    /// point and never reach the handler.
    fn on_message(&self, message: M);
}

impl<M, F> MessageHandler<M> for F
where
    M: DeserializeOwned,
    F: Fn(M) + Send + Sync + 'static,
{
    fn on_message(&self, message: M) {
        self(message);
    }
}
