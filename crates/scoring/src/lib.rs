//! Accuracy scoring for flagdraw
//!
//! Decodes a drawn image and a reference flag, normalizes the drawing onto
//! the reference's pixel grid and reports how many pixels match.

mod diff;
mod normalize;
mod remote;
mod scorer;

pub use diff::{DiffMask, DiffOptions, MAX_YIQ_DELTA, color_delta, diff_images, max_delta};
pub use normalize::{ImageSource, aspect_ratio, data_url_bytes, decode, resample};
pub use remote::HttpFetcher;
pub use scorer::{AccuracyScorer, Comparison, compare};

pub use flagdraw_ipc::ComparisonResult;

use std::time::Duration;

use thiserror::Error;

/// An image payload could not be turned into pixels
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid data URL: {0}")]
    DataUrl(String),

    #[error("Unrecognized or corrupt image: {0}")]
    Image(#[from] image::ImageError),
}

/// Two images could not be put on the same pixel grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("Cannot resample to an empty {width}x{height} grid")]
    Empty { width: u32, height: u32 },

    #[error("Image is {actual:?}, expected {expected:?}")]
    Mismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// A reference image could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid inline reference: {0}")]
    Inline(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Scoring task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Source of reference image bytes
#[allow(async_fn_in_trait)]
pub trait ReferenceFetcher {
    /// Retrieve the encoded image behind `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
