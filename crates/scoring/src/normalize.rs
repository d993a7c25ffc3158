//! Decoding and resampling of images onto a common grid

use data_url::DataUrl;
use flagdraw_config::DEFAULT_ASPECT_RATIO;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::{DecodeError, DimensionError};

/// Encoded image input
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// A `data:` URL carrying a base64 (or percent-encoded) image
    DataUrl(&'a str),
    /// Raw encoded bytes (PNG, JPEG, ...)
    Bytes(&'a [u8]),
}

/// Body of a `data:` URL
pub fn data_url_bytes(url: &str) -> Result<Vec<u8>, DecodeError> {
    let parsed = DataUrl::process(url).map_err(|e| DecodeError::DataUrl(format!("{:?}", e)))?;
    let (body, _fragment) = parsed
        .decode_to_vec()
        .map_err(|e| DecodeError::DataUrl(format!("{:?}", e)))?;
    Ok(body)
}

/// Decode an image into RGBA8 pixels
///
/// The format is sniffed from the bytes, not from the media type.
pub fn decode(source: ImageSource<'_>) -> Result<RgbaImage, DecodeError> {
    let owned;
    let bytes = match source {
        ImageSource::DataUrl(url) => {
            owned = data_url_bytes(url)?;
            &owned[..]
        }
        ImageSource::Bytes(bytes) => bytes,
    };
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Resample `image` to exactly `width x height` with a linear filter
///
/// Aspect ratio is not preserved: the image is stretched to fill the grid.
pub fn resample(image: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage, DimensionError> {
    if width == 0 || height == 0 {
        return Err(DimensionError::Empty { width, height });
    }
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, width, height, FilterType::Triangle))
}

/// Width over height of a decoded image
pub fn aspect_ratio(image: &RgbaImage) -> f32 {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return DEFAULT_ASPECT_RATIO;
    }
    width as f32 / height as f32
}
