use crate::types::Rgba;

/// Surface background; also the color the eraser paints.
pub const BACKGROUND_COLOR: Rgba = [255, 255, 255, 255];

/// Default pen color.
pub const DEFAULT_COLOR: Rgba = [0, 0, 0, 255];

/// Default line width in logical pixels.
pub const DEFAULT_LINE_WIDTH: u32 = 3;

/// Widest line the UI offers.
pub const MAX_LINE_WIDTH: u32 = 70;

/// Smallest brush radius in device pixels. Any circle this wide covers the
/// center of at least one pixel.
pub const MIN_BRUSH_RADIUS: f32 = 0.75;

/// Largest raster edge in device pixels. Bigger surfaces are refused before
/// anything is allocated.
pub const MAX_SURFACE_SIZE: u32 = 8192;
