//! WASM bindings for the pixel-level image operations.
//!
//! Web hosts that keep pixels in WASM memory use these to carry out the
//! rotate/crop requests issued by an edit session.

use crate::types::{JsCropSpec, JsDecodedImage};
use cropkit_core::transform::{crop_pixels, rotate_quarter, QuarterTurn};
use wasm_bindgen::prelude::*;

/// Rotate an image by a quarter turn.
///
/// # Arguments
///
/// * `image` - Source image
/// * `degrees` - `-90` (counter-clockwise) or `90` (clockwise)
///
/// # Errors
///
/// Rejects any other angle and malformed pixel buffers.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const turned = apply_rotation(sourceImage, 90);
/// ```
#[wasm_bindgen]
pub fn apply_rotation(image: &JsDecodedImage, degrees: i32) -> Result<JsDecodedImage, JsValue> {
    let turn = QuarterTurn::from_degrees(degrees)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported rotation: {} degrees", degrees)))?;
    rotate_quarter(&image.to_decoded(), turn)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop an image to a spec returned by `JsEditSession.begin_crop_commit`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const spec = session.begin_crop_commit();
/// const cropped = apply_crop(sourceImage, spec);
/// session.complete_crop_commit(cropped.width, cropped.height);
/// ```
#[wasm_bindgen]
pub fn apply_crop(image: &JsDecodedImage, spec: &JsCropSpec) -> Result<JsDecodedImage, JsValue> {
    crop_pixels(&image.to_decoded(), spec.inner())
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rotation_rejects_half_turn() {
        let img = JsDecodedImage::new(2, 2, vec![0u8; 12]);
        assert!(apply_rotation(&img, 180).is_err());
    }
}
