//! Cropkit WASM - WebAssembly bindings for Cropkit
//!
//! This crate provides WASM bindings to expose the cropkit-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and geometry
//! - `session` - The editing session: crop overlay, rotation, text stickers
//! - `transform` - Pixel rotate/crop for hosts without a native manipulator
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession, compute_fit_rect } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession(photo.width, photo.height, screen.width, screen.height);
//! const fit = session.fit_rect();
//! console.log(`Image drawn at ${fit.x},${fit.y} (${fit.width}x${fit.height})`);
//! ```

use cropkit_core::geometry::Dimensions;
use wasm_bindgen::prelude::*;

mod session;
mod transform;
mod types;

// Re-export public types
pub use session::JsEditSession;
pub use transform::{apply_crop, apply_rotation};
pub use types::{JsCropSpec, JsDecodedImage, JsRect};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Largest rectangle with the image's aspect ratio that fits in a viewport
/// of the given size, centred, relative to the viewport's top-left corner.
#[wasm_bindgen]
pub fn compute_fit_rect(
    viewport_width: f64,
    viewport_height: f64,
    image_width: f64,
    image_height: f64,
) -> JsRect {
    cropkit_core::compute_fit_rect(
        Dimensions::new(viewport_width, viewport_height),
        Dimensions::new(image_width, image_height),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_compute_fit_rect_letterbox() {
        let fit = compute_fit_rect(400.0, 800.0, 2000.0, 1000.0);
        assert_eq!(
            (fit.x(), fit.y(), fit.width(), fit.height()),
            (0.0, 300.0, 400.0, 200.0)
        );
    }

    #[test]
    fn test_compute_fit_rect_pillarbox() {
        let fit = compute_fit_rect(800.0, 400.0, 1000.0, 1000.0);
        assert_eq!(
            (fit.x(), fit.y(), fit.width(), fit.height()),
            (200.0, 0.0, 400.0, 400.0)
        );
    }
}
