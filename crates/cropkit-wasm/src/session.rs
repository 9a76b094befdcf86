//! WASM bindings for the editing session.
//!
//! The host (typically a React Native or web screen) keeps the actual image
//! and performs rotate/crop with its platform APIs. The session here only
//! tracks dimensions, so after each host operation the new width and height
//! are reported back through `complete_*`.
//!
//! # Usage
//!
//! ```typescript
//! const session = new JsEditSession(photo.width, photo.height, screen.width, screen.height);
//!
//! session.open_crop();
//! session.crop_begin_drag(0);            // TopLeft
//! session.crop_drag_to(moveX, moveY);
//! session.crop_end_drag();
//!
//! const spec = session.begin_crop_commit();
//! try {
//!   const result = await manipulateAsync(uri, [{ crop: {
//!     originX: spec.origin_x, originY: spec.origin_y,
//!     width: spec.width, height: spec.height } }]);
//!   session.complete_crop_commit(result.width, result.height);
//! } catch (e) {
//!   session.fail_pending(String(e));
//! }
//! ```

use std::collections::HashMap;

use cropkit_core::crop::Handle;
use cropkit_core::error::{EditError, ProcessError};
use cropkit_core::geometry::{Dimensions, Point};
use cropkit_core::session::{check_dimensions, EditSession, EditableImage, PendingOperation};
use cropkit_core::sticker::{StickerGesture, StickerPlacement};
use cropkit_core::transform::QuarterTurn;
use cropkit_core::EditorConfig;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{JsCropSpec, JsRect};

/// Dimensions of an image owned by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HostImage {
    width: f64,
    height: f64,
}

impl EditableImage for HostImage {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Result of `submit`, serialized for JavaScript.
#[derive(Debug, Serialize)]
struct JsEditOutcome {
    width: f64,
    height: f64,
    stickers: Vec<StickerPlacement>,
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// An image editing session driven from JavaScript.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession<HostImage>,
    gestures: HashMap<u32, StickerGesture>,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Start a session with the default configuration.
    ///
    /// Throws if either size is zero, negative or not a finite number.
    #[wasm_bindgen(constructor)]
    pub fn new(
        image_width: f64,
        image_height: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> Result<JsEditSession, JsValue> {
        Self::from_config(
            image_width,
            image_height,
            screen_width,
            screen_height,
            EditorConfig::default(),
        )
        .map_err(to_js_error)
    }

    /// Start a session with a configuration object.
    ///
    /// Any field left out of `config` keeps its default.
    pub fn with_config(
        image_width: f64,
        image_height: f64,
        screen_width: f64,
        screen_height: f64,
        config: JsValue,
    ) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?
        };
        Self::from_config(
            image_width,
            image_height,
            screen_width,
            screen_height,
            config,
        )
        .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn has_changes(&self) -> bool {
        self.inner.has_changes()
    }

    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> f64 {
        self.inner.image().width
    }

    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> f64 {
        self.inner.image().height
    }

    /// True while a rotate or crop is waiting for `complete_*`/`fail_pending`.
    #[wasm_bindgen(getter)]
    pub fn is_pending(&self) -> bool {
        self.inner.pending().is_some()
    }

    /// Where the image is drawn on screen.
    pub fn fit_rect(&self) -> JsRect {
        self.inner.fit_rect().into()
    }

    /// Report a new screen size. Unusable sizes are rejected and the layout
    /// is kept.
    pub fn set_screen(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner
            .set_screen(Dimensions::new(width, height))
            .map_err(to_js_error)
    }

    // ------------------------------------------------------------------
    // Crop overlay
    // ------------------------------------------------------------------

    pub fn open_crop(&mut self) {
        self.inner.open_crop();
    }

    pub fn close_crop(&mut self) -> Result<(), JsValue> {
        self.inner.close_crop().map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn is_crop_open(&self) -> bool {
        self.inner.is_crop_open()
    }

    /// Start dragging a handle: 0 TopLeft, 1 TopRight, 2 BottomLeft, 3 BottomRight.
    pub fn crop_begin_drag(&mut self, handle: u8) -> Result<(), JsValue> {
        let handle = Handle::from_u8(handle)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown crop handle: {}", handle)))?;
        let tracker = self
            .inner
            .crop_mut()
            .ok_or_else(|| to_js_error(EditError::CropNotOpen))?;
        tracker.begin_drag(handle).map_err(to_js_error)
    }

    /// The handle (0..3) under a touch at `(x, y)`, or `undefined`.
    pub fn crop_handle_at(&self, x: f64, y: f64) -> Option<u8> {
        let size = self.inner.config().layout.handle_size;
        self.inner
            .crop()
            .and_then(|tracker| tracker.handle_at(Point::new(x, y), size))
            .map(|handle| handle as u8)
    }

    /// Move the dragged handle. Returns false when no drag is active.
    pub fn crop_drag_to(&mut self, x: f64, y: f64) -> bool {
        self.inner
            .crop_mut()
            .is_some_and(|tracker| tracker.drag_to(Point::new(x, y)))
    }

    pub fn crop_end_drag(&mut self) {
        if let Some(tracker) = self.inner.crop_mut() {
            tracker.end_drag();
        }
    }

    /// Reset the crop rectangle to the full image. Returns whether it applied.
    pub fn crop_reset(&mut self) -> bool {
        self.inner
            .crop_mut()
            .is_some_and(|tracker| tracker.reset())
    }

    /// The crop rectangle, or `undefined` when the overlay is closed.
    pub fn crop_rect(&self) -> Option<JsRect> {
        self.inner
            .crop()
            .map(|tracker| tracker.crop_rect().into())
    }

    /// Handle hit targets as `[x, y, w, h]` quadruples in handle order.
    pub fn handle_rects(&self) -> Vec<f64> {
        let size = self.inner.config().layout.handle_size;
        self.inner
            .crop()
            .map(|tracker| {
                tracker
                    .handle_rects(size)
                    .iter()
                    .flat_map(|(_, r)| [r.x, r.y, r.width, r.height])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate the crop and return the region to cut from the image.
    ///
    /// Invalid rectangles are reported to the console as a warning and
    /// rejected; the session is unchanged.
    pub fn begin_crop_commit(&mut self) -> Result<JsCropSpec, JsValue> {
        match self.inner.begin_crop_commit() {
            Ok(spec) => Ok(spec.into()),
            Err(err @ EditError::Crop(_)) => {
                web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
                Err(to_js_error(err))
            }
            Err(err) => Err(to_js_error(err)),
        }
    }

    /// Report the dimensions of the cropped image.
    ///
    /// An unusable size counts as a failed crop: the overlay keeps its
    /// rectangle and the error is rethrown.
    pub fn complete_crop_commit(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner
            .complete_crop_commit(Ok(HostImage { width, height }))
            .map_err(to_js_error)
    }

    // ------------------------------------------------------------------
    // Rotation
    // ------------------------------------------------------------------

    /// Request a rotation of `-90` or `90` degrees.
    pub fn begin_rotate(&mut self, degrees: i32) -> Result<i32, JsValue> {
        let turn = QuarterTurn::from_degrees(degrees)
            .ok_or_else(|| JsValue::from_str(&format!("Unsupported rotation: {} degrees", degrees)))?;
        self.inner
            .begin_rotate(turn)
            .map(QuarterTurn::degrees)
            .map_err(to_js_error)
    }

    /// Report the dimensions of the rotated image.
    ///
    /// An unusable size counts as a failed rotation: the image is unchanged
    /// and the error is rethrown.
    pub fn complete_rotate(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner
            .complete_rotate(Ok(HostImage { width, height }))
            .map_err(to_js_error)
    }

    /// Report that the pending host operation failed.
    ///
    /// The session returns to its pre-operation state. Only errors if nothing
    /// was pending.
    pub fn fail_pending(&mut self, message: &str) -> Result<(), JsValue> {
        let failure = Err(ProcessError::Failed(message.to_string()));
        let result = match self.inner.pending() {
            Some(PendingOperation::Rotate(_)) => self.inner.complete_rotate(failure),
            Some(PendingOperation::Crop(_)) => self.inner.complete_crop_commit(failure),
            None => Err(EditError::NothingPending),
        };
        match result {
            Ok(()) | Err(EditError::Process(_)) => Ok(()),
            Err(err) => Err(to_js_error(err)),
        }
    }

    /// Discard all edits and return to the original image.
    pub fn reset_all(&mut self) -> Result<(), JsValue> {
        self.gestures.clear();
        self.inner.reset_all().map_err(to_js_error)
    }

    // ------------------------------------------------------------------
    // Stickers
    // ------------------------------------------------------------------

    pub fn add_text_sticker(&mut self) -> u32 {
        self.inner.add_text_sticker()
    }

    pub fn sticker_ids(&self) -> Vec<u32> {
        self.inner.stickers().iter().map(|s| s.id()).collect()
    }

    pub fn set_sticker_text(&mut self, id: u32, text: &str) -> Result<(), JsValue> {
        self.inner
            .sticker_mut(id)
            .map(|sticker| sticker.set_text(text))
            .map_err(to_js_error)
    }

    pub fn remove_sticker(&mut self, id: u32) -> Result<(), JsValue> {
        self.gestures.remove(&id);
        self.inner
            .remove_sticker(id)
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Whether a move of `(dx, dy)` should claim the touch for a sticker drag.
    pub fn sticker_should_start(&self, dx: f64, dy: f64) -> bool {
        StickerGesture::should_start(&self.inner.config().sticker, dx, dy)
    }

    pub fn sticker_begin_gesture(&mut self, id: u32) -> Result<(), JsValue> {
        let gesture = self
            .inner
            .sticker_mut(id)
            .map(|sticker| sticker.begin_gesture())
            .map_err(to_js_error)?;
        self.gestures.insert(id, gesture);
        Ok(())
    }

    /// Apply a move event.
    ///
    /// `touches` holds the current touch points flattened as `[x0, y0, x1, y1, ...]`.
    /// Returns false when no gesture is active for the sticker.
    pub fn sticker_move(&mut self, id: u32, dx: f64, dy: f64, touches: Vec<f64>) -> bool {
        let Some(gesture) = self.gestures.get_mut(&id) else {
            return false;
        };
        let config = self.inner.config().sticker.clone();
        let Ok(sticker) = self.inner.sticker_mut(id) else {
            return false;
        };

        let points: Vec<Point> = touches
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        gesture.update(sticker, Point::new(dx, dy), &points, &config);
        true
    }

    pub fn sticker_end_gesture(&mut self, id: u32) {
        self.gestures.remove(&id);
    }

    /// Current rendered transform as `[x, y, rotation, scale]`, or empty for an
    /// unknown sticker.
    pub fn sticker_transform(&self, id: u32) -> Vec<f64> {
        self.inner
            .sticker(id)
            .map(|s| {
                let position = s.position();
                vec![position.x, position.y, s.rotation(), s.scale()]
            })
            .unwrap_or_default()
    }

    /// Advance sticker animations by `dt` seconds. Returns true while moving.
    pub fn step_animations(&mut self, dt: f64) -> bool {
        self.inner.step_animations(dt)
    }

    /// Final image dimensions and sticker placements in image pixels.
    pub fn submit(&self) -> Result<JsValue, JsValue> {
        let outcome = self.inner.submit().map_err(to_js_error)?;
        let js = JsEditOutcome {
            width: outcome.image.width,
            height: outcome.image.height,
            stickers: outcome.stickers,
        };
        serde_wasm_bindgen::to_value(&js).map_err(to_js_error)
    }
}

impl JsEditSession {
    fn from_config(
        image_width: f64,
        image_height: f64,
        screen_width: f64,
        screen_height: f64,
        config: EditorConfig,
    ) -> Result<Self, EditError> {
        let image = check_dimensions(Dimensions::new(image_width, image_height))?;
        let screen = check_dimensions(Dimensions::new(screen_width, screen_height))?;
        let image = HostImage {
            width: image.width,
            height: image.height,
        };
        Ok(Self {
            inner: EditSession::new(image, screen, config),
            gestures: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Portrait photo on a screen whose viewport is 400x800.
    fn session() -> JsEditSession {
        JsEditSession::new(1000.0, 2000.0, 400.0, 928.0).unwrap()
    }

    #[test]
    fn test_fit_rect_below_chrome() {
        let fit = session().fit_rect();
        assert_eq!((fit.x(), fit.y(), fit.width(), fit.height()), (0.0, 64.0, 400.0, 800.0));
    }

    #[test]
    fn test_crop_flow() {
        let mut session = session();
        assert!(session.crop_rect().is_none());

        session.open_crop();
        session.crop_begin_drag(0).unwrap();
        assert!(session.crop_drag_to(100.0, 264.0));
        session.crop_end_drag();

        let rect = session.crop_rect().unwrap();
        assert_eq!(
            (rect.x(), rect.y(), rect.width(), rect.height()),
            (100.0, 264.0, 300.0, 600.0)
        );

        let spec = session.begin_crop_commit().unwrap();
        assert_eq!(spec.origin_x(), 250.0);
        assert_eq!(spec.origin_y(), 500.0);
        assert_eq!(spec.width(), 750.0);
        assert_eq!(spec.height(), 1500.0);
        assert!(session.is_pending());

        session.complete_crop_commit(750.0, 1500.0).unwrap();
        assert!(!session.is_pending());
        assert!(session.has_changes());
        assert!(!session.is_crop_open());
        assert_eq!(session.image_width(), 750.0);
    }

    #[test]
    fn test_drag_without_overlay_is_ignored() {
        let mut session = session();
        assert!(!session.crop_drag_to(10.0, 10.0));
        assert!(!session.crop_reset());
        assert!(session.handle_rects().is_empty());
    }

    #[test]
    fn test_handle_rects_layout() {
        let mut session = session();
        session.open_crop();
        let rects = session.handle_rects();
        assert_eq!(rects.len(), 16);
        assert_eq!(&rects[0..4], &[0.0, 64.0, 32.0, 32.0]);
        assert_eq!(&rects[12..16], &[368.0, 832.0, 32.0, 32.0]);
    }

    #[test]
    fn test_rotate_flow() {
        let mut session = session();
        assert_eq!(session.begin_rotate(90).unwrap(), 90);
        session.complete_rotate(2000.0, 1000.0).unwrap();

        assert!(session.has_changes());
        let fit = session.fit_rect();
        assert_eq!((fit.y(), fit.height()), (364.0, 200.0));
    }

    #[test]
    fn test_fail_pending_restores_state() {
        let mut session = session();
        session.begin_rotate(-90).unwrap();
        session.fail_pending("manipulator crashed").unwrap();

        assert!(!session.is_pending());
        assert!(!session.has_changes());
        assert_eq!(session.image_width(), 1000.0);
    }

    #[test]
    fn test_sticker_gesture_flow() {
        let mut session = session();
        let id = session.add_text_sticker();
        assert_eq!(session.sticker_ids(), vec![id]);
        assert!(session.sticker_should_start(0.0, 2.0));

        assert!(!session.sticker_move(id, 5.0, 5.0, vec![]));

        session.sticker_begin_gesture(id).unwrap();
        assert!(session.sticker_move(id, 20.0, -10.0, vec![0.0, 0.0]));
        session.sticker_end_gesture(id);

        while session.step_animations(1.0 / 60.0) {}
        assert_eq!(session.sticker_transform(id), vec![220.0, 390.0, 0.0, 1.0]);
        assert!(session.sticker_transform(id + 1).is_empty());
    }

    #[test]
    fn test_custom_layout_config() {
        let mut config = EditorConfig::default();
        config.layout.top_chrome = 0.0;
        config.layout.bottom_chrome = 0.0;
        let session = JsEditSession::from_config(1000.0, 2000.0, 400.0, 800.0, config).unwrap();

        let fit = session.fit_rect();
        assert_eq!((fit.x(), fit.y(), fit.width(), fit.height()), (0.0, 0.0, 400.0, 800.0));
    }

    #[test]
    fn test_unusable_sizes_rejected_at_start() {
        for (iw, ih, sw, sh) in [
            (f64::NAN, 2000.0, 400.0, 928.0),
            (1000.0, 0.0, 400.0, 928.0),
            (1000.0, 2000.0, -400.0, 928.0),
            (1000.0, 2000.0, 400.0, f64::INFINITY),
        ] {
            assert!(matches!(
                JsEditSession::from_config(iw, ih, sw, sh, EditorConfig::default()),
                Err(EditError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_unusable_rotation_result_keeps_image() {
        let mut session = session();
        session.begin_rotate(90).unwrap();

        // A host reporting `undefined` arrives as NaN
        let result = session.inner.complete_rotate(Ok(HostImage {
            width: f64::NAN,
            height: 1000.0,
        }));
        assert!(matches!(result, Err(EditError::Process(_))));
        assert!(!session.is_pending());
        assert_eq!(session.image_width(), 1000.0);

        session.open_crop();
        let spec = session.inner.begin_crop_commit().unwrap();
        assert_eq!((spec.width, spec.height), (1000.0, 2000.0));
    }

    #[test]
    fn test_unusable_crop_result_keeps_overlay() {
        let mut session = session();
        session.open_crop();
        session.crop_begin_drag(0).unwrap();
        session.crop_drag_to(100.0, 264.0);
        session.crop_end_drag();
        session.begin_crop_commit().unwrap();

        let result = session.inner.complete_crop_commit(Ok(HostImage {
            width: 750.0,
            height: -1.0,
        }));
        assert!(matches!(result, Err(EditError::Process(_))));
        assert!(session.is_crop_open());
        assert_eq!(session.crop_rect().unwrap().x(), 100.0);
        assert_eq!(session.image_height(), 2000.0);
    }

    #[test]
    fn test_unusable_screen_keeps_layout() {
        let mut session = session();
        let result = session.inner.set_screen(Dimensions::new(f64::NAN, 928.0));
        assert!(matches!(result, Err(EditError::InvalidDimensions { .. })));
        assert_eq!(session.fit_rect().y(), 64.0);
    }

    #[test]
    fn test_crop_handle_at() {
        let mut session = session();
        assert_eq!(session.crop_handle_at(5.0, 70.0), None);

        session.open_crop();
        assert_eq!(session.crop_handle_at(5.0, 70.0), Some(0));
        assert_eq!(session.crop_handle_at(390.0, 860.0), Some(3));
        assert_eq!(session.crop_handle_at(200.0, 400.0), None);
    }

    #[test]
    fn test_reset_all_clears_session() {
        let mut session = session();
        session.add_text_sticker();
        session.begin_rotate(90).unwrap();
        session.complete_rotate(2000.0, 1000.0).unwrap();

        session.reset_all().unwrap();
        assert!(!session.has_changes());
        assert!(session.sticker_ids().is_empty());
        assert_eq!(session.image_width(), 1000.0);
    }
}

/// WASM-specific tests that require JsValue.
///
/// These exercise the error paths and serde-wasm-bindgen conversions and can
/// only run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct PartialLayout {
        top_chrome: f64,
    }

    #[derive(Serialize)]
    struct PartialConfig {
        layout: PartialLayout,
    }

    #[wasm_bindgen_test]
    fn test_partial_config_keeps_defaults() {
        let config = serde_wasm_bindgen::to_value(&PartialConfig {
            layout: PartialLayout { top_chrome: 0.0 },
        })
        .unwrap();
        let session = JsEditSession::with_config(1000.0, 2000.0, 400.0, 864.0, config).unwrap();

        // Bottom chrome still defaults to 64
        let fit = session.fit_rect();
        assert_eq!((fit.y(), fit.height()), (0.0, 800.0));
    }

    #[wasm_bindgen_test]
    fn test_undefined_config_uses_defaults() {
        let session =
            JsEditSession::with_config(1000.0, 2000.0, 400.0, 928.0, JsValue::UNDEFINED).unwrap();
        assert_eq!(session.fit_rect().y(), 64.0);
    }

    #[wasm_bindgen_test]
    fn test_empty_crop_rejected() {
        let mut session = JsEditSession::new(1000.0, 2000.0, 400.0, 928.0).unwrap();
        session.open_crop();
        session.crop_begin_drag(3).unwrap();
        session.crop_drag_to(0.0, 0.0);
        session.crop_end_drag();

        assert!(session.begin_crop_commit().is_err());
        assert!(!session.is_pending());
    }

    #[wasm_bindgen_test]
    fn test_nan_sizes_rejected() {
        assert!(JsEditSession::new(f64::NAN, 2000.0, 400.0, 928.0).is_err());

        let mut session = JsEditSession::new(1000.0, 2000.0, 400.0, 928.0).unwrap();
        assert!(session.set_screen(400.0, f64::NAN).is_err());

        session.begin_rotate(90).unwrap();
        assert!(session.complete_rotate(f64::NAN, 1000.0).is_err());
        assert!(!session.is_pending());
        assert_eq!(session.image_width(), 1000.0);
    }

    #[wasm_bindgen_test]
    fn test_unknown_handle_rejected() {
        let mut session = JsEditSession::new(1000.0, 2000.0, 400.0, 928.0).unwrap();
        session.open_crop();
        assert!(session.crop_begin_drag(9).is_err());
    }

    #[wasm_bindgen_test]
    fn test_submit_without_changes_rejected() {
        let session = JsEditSession::new(1000.0, 2000.0, 400.0, 928.0).unwrap();
        assert!(session.submit().is_err());
    }

    #[wasm_bindgen_test]
    fn test_submit_serializes_outcome() {
        let mut session = JsEditSession::new(1000.0, 2000.0, 400.0, 928.0).unwrap();
        session.add_text_sticker();
        let value = session.submit().unwrap();
        assert!(value.is_object());
    }
}
