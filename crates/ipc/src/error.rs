//! Wire protocol errors

use thiserror::Error;

/// A message could not be encoded or decoded
#[derive(Debug, Error)]
pub enum IpcError {
    #[error("Could not encode message: {0}")]
    Encode(#[from] serde_json::Error),

    /// Decoding failures keep only the parser's description
    #[error("Malformed message: {0}")]
    InvalidFormat(String),
}
