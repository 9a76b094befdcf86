//! Error types for crop commits, image processing and edit sessions.

use thiserror::Error;

/// A crop commit that cannot be carried out.
///
/// Rejections never mutate tracker state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// The mapped rectangle extends past the image.
    #[error(
        "Crop exceeds image bounds: right {right:.2} / bottom {bottom:.2} for {image_width}x{image_height} image"
    )]
    ExceedsImage {
        right: f64,
        bottom: f64,
        image_width: f64,
        image_height: f64,
    },

    /// The mapped rectangle has no area.
    #[error("Crop area is empty: {width:.2}x{height:.2}")]
    EmptyArea { width: f64, height: f64 },

    /// A drag or commit is already in progress.
    #[error("Crop tracker is busy")]
    Busy,
}

/// Failure reported by an image processor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    /// The processor ran but the operation failed.
    #[error("Image operation failed: {0}")]
    Failed(String),

    /// The source image cannot be processed (bad buffer, zero size, ...).
    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

/// Errors surfaced by an edit session to its host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Another rotate or crop is still waiting for its result.
    #[error("An image operation is already pending")]
    OperationPending,

    /// A result was delivered but no operation of that kind was started.
    #[error("No matching image operation is pending")]
    NothingPending,

    /// The crop overlay must be open for this operation.
    #[error("Crop overlay is not open")]
    CropNotOpen,

    /// Submitting an unchanged image.
    #[error("There are no changes to submit")]
    NoChanges,

    #[error("Unknown sticker: {0}")]
    UnknownSticker(u32),

    /// Width or height is zero, negative or not finite.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_error_display() {
        let err = CropError::EmptyArea {
            width: 0.0,
            height: 12.5,
        };
        assert_eq!(err.to_string(), "Crop area is empty: 0.00x12.50");

        assert_eq!(CropError::Busy.to_string(), "Crop tracker is busy");
    }

    #[test]
    fn test_edit_error_is_transparent() {
        let err: EditError = ProcessError::Failed("disk full".to_string()).into();
        assert_eq!(err.to_string(), "Image operation failed: disk full");

        let err: EditError = CropError::Busy.into();
        assert!(matches!(err, EditError::Crop(CropError::Busy)));
    }

    #[test]
    fn test_unknown_sticker_display() {
        assert_eq!(EditError::UnknownSticker(7).to_string(), "Unknown sticker: 7");
    }

    #[test]
    fn test_invalid_dimensions_display() {
        let err = EditError::InvalidDimensions {
            width: f64::NAN,
            height: 928.0,
        };
        assert_eq!(err.to_string(), "Invalid dimensions: NaNx928");
    }
}
