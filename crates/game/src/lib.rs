//! flagdraw game - flag dataset and drawing rounds
//!
//! Ties a [`painting::DrawingSurface`] to the accuracy scorer: each round
//! shows one country, the player draws its flag, and finishing the round
//! scores the drawing and records it in the session history.

pub mod dataset;
pub mod session;

pub use dataset::{DATASET_URL, fetch_dataset, load_dataset, parse_dataset};
pub use session::{GameRecord, GameSession};

use flagdraw_scoring::FetchError;
use painting::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to download dataset: {0}")]
    Fetch(#[from] FetchError),

    #[error("Dataset is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Dataset has no playable countries")]
    Empty,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Round {index} is out of range for {len} countries")]
    RoundOutOfRange { index: usize, len: usize },

    #[error("Session has no countries to play")]
    NoCountries,

    #[error("Surface rejected the round's size: {0}")]
    Surface(#[from] ValidationError),
}
