//! Common validation utilities shared across backends.

use std::fmt;

/// Largest image edge accepted for compositing.
pub const MAX_DIMENSION: u32 = 16384;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that an image resolution is at least 1x1 and within bounds.
///
/// # Example
/// ```
/// use specbridge_spec::validation::validate_resolution;
///
/// assert!(validate_resolution(1024, 1024).is_ok());
/// assert!(validate_resolution(0, 100).is_err());
/// ```
pub fn validate_resolution(width: u32, height: u32) -> Result<(), CommonValidationError> {
    if width == 0 || height == 0 {
        return Err(CommonValidationError::new(format!(
            "resolution must be at least 1x1, got [{}, {}]",
            width, height
        )));
    }

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CommonValidationError::new(format!(
            "resolution is too large: max is {}x{}, got [{}, {}]",
            MAX_DIMENSION, MAX_DIMENSION, width, height
        )));
    }

    Ok(())
}

/// Validate that an RGBA float pixel buffer matches its declared size.
pub fn validate_rgba_len(width: u32, height: u32, len: usize) -> Result<(), CommonValidationError> {
    validate_resolution(width, height)?;

    let expected = (width as usize) * (height as usize) * 4;
    if len != expected {
        return Err(CommonValidationError::new(format!(
            "expected {} floats for {}x{} RGBA, got {}",
            expected, width, height, len
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_bounds() {
        assert!(validate_resolution(1, 1).is_ok());
        assert!(validate_resolution(MAX_DIMENSION, 1).is_ok());
        assert!(validate_resolution(MAX_DIMENSION + 1, 1).is_err());
        assert!(validate_resolution(4, 0).is_err());
    }

    #[test]
    fn test_rgba_len() {
        assert!(validate_rgba_len(2, 3, 24).is_ok());
        let err = validate_rgba_len(2, 3, 18).unwrap_err();
        assert_eq!(err.message, "expected 24 floats for 2x3 RGBA, got 18");
    }
}
