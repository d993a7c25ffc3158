use std::fmt;
use std::str::FromStr;

use glam::Vec2;

pub use flagdraw_ipc::{Tool, UndoRedoState};

use crate::constants::{DEFAULT_COLOR, DEFAULT_LINE_WIDTH, MAX_LINE_WIDTH};
use crate::validation::{ValidationError, validate_line_width};

/// One 8-bit RGBA pixel
pub type Rgba = [u8; 4];

/// An opaque RGB color parsed from `#rrggbb` or `#rgb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// The color as a fully opaque pixel
    pub fn to_rgba(&self) -> Rgba {
        let [r, g, b] = self.0;
        [r, g, b, 255]
    }
}

impl Default for HexColor {
    fn default() -> Self {
        let [r, g, b, _] = DEFAULT_COLOR;
        Self([r, g, b])
    }
}

impl FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
        match digits.len() {
            6 => Ok(Self([
                channel(0..2).map_err(|_| invalid())?,
                channel(2..4).map_err(|_| invalid())?,
                channel(4..6).map_err(|_| invalid())?,
            ])),
            // #rgb expands each nibble: #f80 == #ff8800
            3 => {
                let mut rgb = [0u8; 3];
                for (i, slot) in rgb.iter_mut().enumerate() {
                    *slot = channel(i..i + 1).map_err(|_| invalid())? * 0x11;
                }
                Ok(Self(rgb))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Tool, color and width chosen in the UI
///
/// These live outside the surface: resetting the drawing keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSettings {
    pub tool: Tool,
    pub color: HexColor,
    width: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: HexColor::default(),
            width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl BrushSettings {
    pub fn new(tool: Tool, color: HexColor, width: u32) -> Result<Self, ValidationError> {
        validate_line_width(width)?;
        Ok(Self { tool, color, width })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Set the line width, clamped to the UI maximum
    pub fn set_width(&mut self, width: u32) -> Result<(), ValidationError> {
        validate_line_width(width)?;
        self.width = width.min(MAX_LINE_WIDTH);
        Ok(())
    }
}

/// State of the stroke currently being drawn
///
/// Exists only between pointer-down and pointer-up. Positions are in
/// device pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrokeState {
    pub tool: Tool,
    /// Color actually painted (background for the eraser)
    pub paint: Rgba,
    /// Width in logical pixels as requested
    pub width: u32,
    /// Brush radius in device pixels
    pub radius: f32,
    /// Last visited point
    pub last: Vec2,
}
