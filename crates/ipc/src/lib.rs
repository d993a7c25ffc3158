//! IPC message protocol for flagdraw
//!
//! Defines the message types exchanged between the UI and the drawing /
//! scoring core. All messages are JSON encoded.

pub mod commands;
pub mod error;
pub mod input;
pub mod messages;
pub mod types;

pub use commands::*;
pub use error::*;
pub use input::*;
pub use messages::*;
pub use types::*;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode a message for the wire
pub fn to_json<T: Serialize>(message: &T) -> Result<String, IpcError> {
    Ok(serde_json::to_string(message)?)
}

/// Decode a message from the wire
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, IpcError> {
    serde_json::from_str(text).map_err(|e| IpcError::InvalidFormat(e.to_string()))
}
