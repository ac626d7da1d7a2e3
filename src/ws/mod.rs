//! WebSocket connection layer.
//!
//! This module owns the single live channel to the chat backend and its
//! lifecycle: connecting, the optional login handshake, bounded fixed-delay
//! reconnection, and dispatch of inbound JSON frames to the registered
//! handler.
//!
//! # Architecture
//!
//! - [`ConnectionManager`]: owns at most one live channel, reconnects on
//!   close until the retry budget is exhausted
//! - [`MessageHandler`]: trait for the single externally-registered inbound
//!   message callback
//!
//! # Example
//!
//! ```ignore
//! let connection: ConnectionManager<ServerEvent> = ConnectionManager::new(Config::default());
//! connection.set_message_handler(|event: ServerEvent| {
//!     println!("received: {event:?}");
//! });
//! connection.connect("wss://chat.example.com/ws", None)?;
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod traits;

pub use config::Config;
pub use connection::{ConnectionManager, ConnectionState};
#[expect(
    clippy::module_name_repetitions,
    reason = "WsError includes module name for clarity when used outside this module"
)]
pub use error::WsError;
pub use traits::MessageHandler;
