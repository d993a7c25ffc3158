//! Scoring a drawing against a reference flag

use flagdraw_config::{DEFAULT_ASPECT_RATIO, ScoringConfig};
use flagdraw_ipc::ComparisonResult;
use image::RgbaImage;
use tracing::{debug, warn};

use crate::diff::{DiffMask, DiffOptions, diff_images};
use crate::normalize::{ImageSource, aspect_ratio, decode, resample};
use crate::remote::HttpFetcher;
use crate::{DimensionError, FetchError, ReferenceFetcher, ScoringError};

/// Score plus the per-pixel mask it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub result: ComparisonResult,
    pub mask: DiffMask,
}

/// Compare a drawing to a reference on the reference's pixel grid
///
/// The drawing is stretched to the reference size first.
pub fn compare(
    drawn: &RgbaImage,
    reference: &RgbaImage,
    options: DiffOptions,
) -> Result<Comparison, DimensionError> {
    let (width, height) = reference.dimensions();
    let drawn = resample(drawn, width, height)?;
    let mask = diff_images(&drawn, reference, options)?;
    let result = ComparisonResult::from_counts(mask.differing(), mask.total());
    Ok(Comparison { result, mask })
}

/// Scores drawings against reference images retrieved by URL
#[derive(Debug, Clone)]
pub struct AccuracyScorer<F = HttpFetcher> {
    fetcher: F,
    config: ScoringConfig,
}

impl AccuracyScorer<HttpFetcher> {
    /// A scorer fetching references over HTTP
    pub fn new(config: ScoringConfig) -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(HttpFetcher::new(config.fetch_timeout())?, config))
    }
}

impl<F: ReferenceFetcher> AccuracyScorer<F> {
    pub fn with_fetcher(fetcher: F, config: ScoringConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a drawing, reporting why scoring failed
    pub async fn try_score(
        &self,
        drawn: ImageSource<'_>,
        reference_url: &str,
    ) -> Result<Comparison, ScoringError> {
        let drawn = decode(drawn)?;
        let reference = self.fetch_reference(reference_url).await?;
        let options = DiffOptions::from(&self.config);

        let comparison =
            tokio::task::spawn_blocking(move || compare(&drawn, &reference, options)).await??;
        debug!(
            "Scored against {}: {} ({} differing)",
            reference_url, comparison.result, comparison.result.differing_pixel_count
        );
        Ok(comparison)
    }

    /// Score an exported drawing (a data URL)
    ///
    /// Never fails: any decode, fetch or size problem yields
    /// [`ComparisonResult::ZERO`].
    pub async fn score_attempt(
        &self,
        drawn_data_url: &str,
        reference_url: &str,
    ) -> ComparisonResult {
        match self
            .try_score(ImageSource::DataUrl(drawn_data_url), reference_url)
            .await
        {
            Ok(comparison) => comparison.result,
            Err(e) => {
                warn!("Scoring against {} failed: {}", reference_url, e);
                ComparisonResult::ZERO
            }
        }
    }

    /// Width over height of the reference image, 3:2 if it can't be loaded
    pub async fn aspect_ratio_of(&self, reference_url: &str) -> f32 {
        match self.fetch_reference(reference_url).await {
            Ok(reference) => aspect_ratio(&reference),
            Err(e) => {
                warn!("Could not size reference {}: {}", reference_url, e);
                DEFAULT_ASPECT_RATIO
            }
        }
    }

    async fn fetch_reference(&self, url: &str) -> Result<RgbaImage, ScoringError> {
        let timeout = self.config.fetch_timeout();
        let bytes = tokio::time::timeout(timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| FetchError::Timeout(timeout))??;
        Ok(decode(ImageSource::Bytes(&bytes))?)
    }
}
