//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly types that wrap the core cropkit
//! types, handling the conversion between Rust and JavaScript data
//! representations. Geometry is exposed as small copyable structs with
//! getters so hosts can read it without going through JSON.

use cropkit_core::geometry::{NormalizedCropSpec, Rect};
use cropkit_core::raster::DecodedImage;
use wasm_bindgen::prelude::*;

/// A decoded RGB image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// A rectangle in screen coordinates.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsRect {
    inner: Rect,
}

#[wasm_bindgen]
impl JsRect {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }
}

impl From<Rect> for JsRect {
    fn from(inner: Rect) -> Self {
        Self { inner }
    }
}

/// A crop region in image pixels, as handed to the host's image manipulator.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsCropSpec {
    inner: NormalizedCropSpec,
}

#[wasm_bindgen]
impl JsCropSpec {
    #[wasm_bindgen(constructor)]
    pub fn new(origin_x: f64, origin_y: f64, width: f64, height: f64) -> JsCropSpec {
        JsCropSpec {
            inner: NormalizedCropSpec {
                origin_x,
                origin_y,
                width,
                height,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn origin_x(&self) -> f64 {
        self.inner.origin_x
    }

    #[wasm_bindgen(getter)]
    pub fn origin_y(&self) -> f64 {
        self.inner.origin_y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }
}

impl From<NormalizedCropSpec> for JsCropSpec {
    fn from(inner: NormalizedCropSpec) -> Self {
        Self { inner }
    }
}

impl JsCropSpec {
    pub(crate) fn inner(&self) -> &NormalizedCropSpec {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_creation() {
        let img = JsDecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_decoded_conversions() {
        let decoded = DecodedImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        let js_img = JsDecodedImage::from_decoded(decoded.clone());
        assert_eq!(js_img.pixels(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(js_img.to_decoded(), decoded);
    }

    #[test]
    fn test_js_rect_getters() {
        let rect = JsRect::from(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            (rect.x(), rect.y(), rect.width(), rect.height()),
            (1.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn test_js_crop_spec_getters() {
        let spec = JsCropSpec::from(NormalizedCropSpec {
            origin_x: 250.0,
            origin_y: 500.0,
            width: 750.0,
            height: 1500.0,
        });
        assert_eq!(spec.origin_x(), 250.0);
        assert_eq!(spec.origin_y(), 500.0);
        assert_eq!(spec.width(), 750.0);
        assert_eq!(spec.height(), 1500.0);
    }
}
