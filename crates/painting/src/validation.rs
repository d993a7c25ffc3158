use thiserror::Error;

/// Caller misuse of the surface API
///
/// These are the only failures the drawing surface reports; ordinary event
/// races (a move without a down, a second down) are ignored instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("Invalid line width: {0}")]
    InvalidLineWidth(u32),
    #[error("Invalid display width: {0}")]
    InvalidDisplayWidth(u32),
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f32),
    #[error("Invalid device scale: {0}")]
    InvalidScale(f32),
    #[error("Surface would be empty: {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
    #[error("Surface {width}x{height} exceeds the {max}px limit")]
    SurfaceTooLarge { width: u32, height: u32, max: u32 },
}

/// Line widths must be at least one logical pixel
pub fn validate_line_width(width: u32) -> Result<(), ValidationError> {
    if width == 0 {
        return Err(ValidationError::InvalidLineWidth(width));
    }
    Ok(())
}

/// Aspect ratios must be finite and positive
pub fn validate_aspect_ratio(ratio: f32) -> Result<(), ValidationError> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ValidationError::InvalidAspectRatio(ratio));
    }
    Ok(())
}

/// Device scales must be finite and positive
pub fn validate_scale(scale: f32) -> Result<(), ValidationError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ValidationError::InvalidScale(scale));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_validation() {
        assert!(validate_aspect_ratio(1.5).is_ok());
        assert!(validate_aspect_ratio(0.0).is_err());
        assert!(validate_aspect_ratio(-2.0).is_err());
        assert!(validate_aspect_ratio(f32::NAN).is_err());
        assert!(validate_aspect_ratio(f32::INFINITY).is_err());
    }

    #[test]
    fn test_scale_validation() {
        assert!(validate_scale(2.0).is_ok());
        assert_eq!(validate_scale(0.0), Err(ValidationError::InvalidScale(0.0)));
    }
}
