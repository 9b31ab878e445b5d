//! Error types for buffer construction and geometry validation.

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when constructing pixel buffers.
///
/// All variants are precondition violations: once a buffer is constructed,
/// its geometry is consistent and the processing code has no error paths of
/// its own.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Supplied data length does not match the declared geometry.
    ///
    /// Returned by `from_data` constructors when `data.len()` disagrees with
    /// `width * height * channels`.
    #[error("buffer length mismatch for {width}x{height}: expected {expected} samples, got {got}")]
    LengthMismatch {
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        got: usize,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when width or height is zero, or when the sample count would
    /// overflow `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl CoreError {
    /// Creates a [`CoreError::LengthMismatch`] error.
    #[inline]
    pub fn length_mismatch(width: u32, height: u32, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            width,
            height,
            expected,
            got,
        }
    }

    /// Creates a [`CoreError::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = CoreError::length_mismatch(4, 4, 64, 48);
        let msg = err.to_string();
        assert!(msg.contains("4x4"));
        assert!(msg.contains("64"));
        assert!(msg.contains("48"));
    }

    #[test]
    fn test_invalid_dimensions_message() {
        let err = CoreError::invalid_dimensions(0, 10, "width is zero");
        assert!(err.to_string().contains("width is zero"));
    }
}
