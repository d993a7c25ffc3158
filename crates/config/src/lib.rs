//! Shared configuration for flagdraw
//!
//! This crate is the single source of truth for surface sizing, history
//! depth and scoring parameters. Every value has a default and can be
//! overridden from the environment; nothing here reads ambient display state.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Aspect ratio used before a reference image has been measured (3:2)
pub const DEFAULT_ASPECT_RATIO: f32 = 3.0 / 2.0;

/// Default device pixel scale (1.0 = no scaling)
pub const DEFAULT_SCALE: f32 = 1.0;

/// Default number of strokes kept in the undo history
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Default perceptual difference threshold (0.0 strict ..= 1.0 lenient)
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default reference image fetch timeout in milliseconds
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Errors produced while reading configuration overrides
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name}={value:?} is not a valid value")]
    Malformed { name: &'static str, value: String },

    #[error("{name}={value} is out of range")]
    OutOfRange { name: &'static str, value: String },
}

/// Sizing state of a drawing surface
///
/// `width` and `height` are logical (layout) pixels; the raster itself is
/// `scaled_width() x scaled_height()` device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Target width / height ratio
    pub aspect_ratio: f32,
    /// Display width in logical pixels (0 = not yet sized)
    pub width: u32,
    /// Display height in logical pixels
    pub height: u32,
    /// Device pixel scale factor
    pub scale: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            width: 0,
            height: 0,
            scale: DEFAULT_SCALE,
        }
    }
}

impl SurfaceConfig {
    /// Unsized config with the given device scale
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    /// Config for a display width at the given ratio and scale
    pub fn for_width(width: u32, aspect_ratio: f32, scale: f32) -> Self {
        Self {
            aspect_ratio,
            width,
            height: (width as f32 / aspect_ratio) as u32,
            scale,
        }
    }

    /// Whether the surface has been given a display width yet
    pub fn is_sized(&self) -> bool {
        self.width > 0
    }

    /// Logical height before truncation
    pub fn height_f32(&self) -> f32 {
        self.width as f32 / self.aspect_ratio
    }

    /// Width in device pixels
    pub fn scaled_width(&self) -> u32 {
        (self.width as f32 * self.scale) as u32
    }

    /// Height in device pixels
    pub fn scaled_height(&self) -> u32 {
        (self.height_f32() * self.scale) as u32
    }
}

/// Parameters for the accuracy scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Perceptual color distance threshold
    pub threshold: f64,
    /// Reference fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Leave anti-aliased edge pixels out of the differing count
    pub detect_antialiasing: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            detect_antialiasing: true,
        }
    }
}

impl ScoringConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagdrawConfig {
    /// Device pixel scale handed to new surfaces
    pub device_scale: f32,
    /// Maximum undo entries per surface
    pub history_depth: usize,
    pub scoring: ScoringConfig,
}

impl Default for FlagdrawConfig {
    fn default() -> Self {
        Self {
            device_scale: DEFAULT_SCALE,
            history_depth: DEFAULT_HISTORY_DEPTH,
            scoring: ScoringConfig::default(),
        }
    }
}

impl FlagdrawConfig {
    /// Build from defaults plus `FLAGDRAW_*` environment overrides
    ///
    /// Malformed overrides are reported and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        apply(&lookup, "FLAGDRAW_DEVICE_SCALE", &mut config.device_scale, |v: &f32| {
            v.is_finite() && *v > 0.0
        });
        apply(&lookup, "FLAGDRAW_HISTORY_DEPTH", &mut config.history_depth, |v: &usize| {
            *v > 0
        });
        apply(&lookup, "FLAGDRAW_THRESHOLD", &mut config.scoring.threshold, |v: &f64| {
            (0.0..=1.0).contains(v)
        });
        apply(
            &lookup,
            "FLAGDRAW_FETCH_TIMEOUT_MS",
            &mut config.scoring.fetch_timeout_ms,
            |v: &u64| *v > 0,
        );
        apply(
            &lookup,
            "FLAGDRAW_DETECT_ANTIALIASING",
            &mut config.scoring.detect_antialiasing,
            |_: &bool| true,
        );

        config
    }
}

/// Parse one override, `Ok(None)` when the variable is unset
pub fn parse_var<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
    valid: impl Fn(&T) -> bool,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Malformed {
            name,
            value: raw.clone(),
        })?;
    if !valid(&value) {
        return Err(ConfigError::OutOfRange { name, value: raw });
    }
    Ok(Some(value))
}

fn apply<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    slot: &mut T,
    valid: impl Fn(&T) -> bool,
) {
    match parse_var(lookup, name, valid) {
        Ok(Some(value)) => *slot = value,
        Ok(None) => {}
        Err(e) => warn!("Ignoring config override: {}", e),
    }
}
