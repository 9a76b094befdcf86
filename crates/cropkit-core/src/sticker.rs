//! Text stickers that can be dragged, pinched and twisted over the image.
//!
//! Gesture bookkeeping lives in a [`StickerGesture`] created when a touch
//! sequence starts and dropped when it ends, so no state leaks between
//! gestures or between stickers.
//!
//! Positions are stored relative to the fit rectangle's top-left corner, so a
//! sticker stays on the same spot of the image while the chrome around it
//! changes. Rotation is in radians, positive clockwise on screen.

use serde::{Deserialize, Serialize};

use crate::animation::SpringValue;
use crate::config::StickerConfig;
use crate::geometry::{Dimensions, Point, Rect};

/// A text overlay with a spring-animated transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSticker {
    id: u32,
    text: String,
    x: SpringValue,
    y: SpringValue,
    rotation: f64,
    scale: SpringValue,
}

impl TextSticker {
    /// Create a sticker at rest at `position` (fit-local coordinates).
    pub fn new(id: u32, text: impl Into<String>, position: Point, config: &StickerConfig) -> Self {
        Self {
            id,
            text: text.into(),
            x: SpringValue::new(position.x, config.position_spring),
            y: SpringValue::new(position.y, config.position_spring),
            rotation: 0.0,
            scale: SpringValue::new(1.0, config.scale_spring),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Rendered position (in flight while animating).
    pub fn position(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    /// Position the sticker is settling towards.
    pub fn target_position(&self) -> Point {
        Point::new(self.x.target(), self.y.target())
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rendered scale (in flight while animating).
    pub fn scale(&self) -> f64 {
        self.scale.value()
    }

    pub fn target_scale(&self) -> f64 {
        self.scale.target()
    }

    pub fn is_animating(&self) -> bool {
        self.x.is_moving() || self.y.is_moving() || self.scale.is_moving()
    }

    /// Start a gesture from the sticker's current targets.
    pub fn begin_gesture(&self) -> StickerGesture {
        StickerGesture {
            start: self.target_position(),
            start_rotation: self.rotation,
            pinch_anchor: None,
        }
    }

    /// Advance all springs by `dt` seconds. Returns `true` while any is moving.
    pub fn step(&mut self, dt: f64) -> bool {
        self.x.step(dt);
        self.y.step(dt);
        self.scale.step(dt);
        self.is_animating()
    }

    /// Snap every spring to its target.
    pub fn settle(&mut self) {
        self.x.settle();
        self.y.settle();
        self.scale.settle();
    }

    /// Final transform mapped into image pixels, read from settled targets.
    pub fn placement(&self, fit: &Rect, image: Dimensions) -> StickerPlacement {
        let scale_x = image.width / fit.width;
        let scale_y = image.height / fit.height;

        StickerPlacement {
            id: self.id,
            text: self.text.clone(),
            x: self.x.target() * scale_x,
            y: self.y.target() * scale_y,
            rotation: self.rotation,
            scale: self.scale.target() * scale_x,
        }
    }
}

/// A sticker's transform expressed in image pixels, ready for rasterising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerPlacement {
    pub id: u32,
    pub text: String,
    /// Anchor x in image pixels
    pub x: f64,
    /// Anchor y in image pixels
    pub y: f64,
    /// Radians, clockwise
    pub rotation: f64,
    /// Scale relative to the on-screen text size, in image pixel units
    pub scale: f64,
}

/// State of one continuous touch sequence on a sticker.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerGesture {
    start: Point,
    start_rotation: f64,
    /// Finger angle captured on the first two-finger frame
    pinch_anchor: Option<f64>,
}

impl StickerGesture {
    /// Whether a movement of `(dx, dy)` is enough to claim the touch.
    pub fn should_start(config: &StickerConfig, dx: f64, dy: f64) -> bool {
        dx.abs() >= config.move_threshold || dy.abs() >= config.move_threshold
    }

    /// Apply one move event.
    ///
    /// # Arguments
    ///
    /// * `sticker` - Sticker being manipulated
    /// * `delta` - Accumulated translation since the gesture started
    /// * `touches` - Current touch points; exactly two engage pinch/rotate
    /// * `config` - Sticker configuration
    ///
    /// The first two-finger frame only records the reference angle (and the
    /// scale target); the sticker neither moves nor rotates on that frame.
    pub fn update(
        &mut self,
        sticker: &mut TextSticker,
        delta: Point,
        touches: &[Point],
        config: &StickerConfig,
    ) {
        if let [first, second] = touches {
            let angle = first.angle_to(*second);
            let distance = first.distance_to(*second);
            sticker
                .scale
                .set_target(distance / config.pinch_reference_distance);

            match self.pinch_anchor {
                None => {
                    self.pinch_anchor = Some(angle);
                    return;
                }
                Some(anchor) => {
                    sticker.rotation = self.start_rotation - (anchor - angle);
                }
            }
        } else {
            self.pinch_anchor = None;
        }

        sticker.x.set_target(self.start.x + delta.x);
        sticker.y.set_target(self.start.y + delta.y);
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_anchor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn sticker() -> (TextSticker, StickerConfig) {
        let config = StickerConfig::default();
        let sticker = TextSticker::new(1, "Hello", Point::new(200.0, 400.0), &config);
        (sticker, config)
    }

    #[test]
    fn test_new_sticker_at_rest() {
        let (sticker, _) = sticker();
        assert_eq!(sticker.position(), Point::new(200.0, 400.0));
        assert_eq!(sticker.scale(), 1.0);
        assert_eq!(sticker.rotation(), 0.0);
        assert!(!sticker.is_animating());
    }

    #[test]
    fn test_should_start_threshold() {
        let config = StickerConfig::default();
        assert!(!StickerGesture::should_start(&config, 0.5, -0.5));
        assert!(StickerGesture::should_start(&config, 0.0, -1.0));
        assert!(StickerGesture::should_start(&config, 3.0, 0.0));
    }

    #[test]
    fn test_single_finger_drag_targets_offset() {
        let (mut sticker, config) = sticker();
        let mut gesture = sticker.begin_gesture();

        gesture.update(&mut sticker, Point::new(10.0, -20.0), &[Point::new(0.0, 0.0)], &config);
        assert_eq!(sticker.target_position(), Point::new(210.0, 380.0));
        assert!(sticker.is_animating());

        // Deltas are cumulative from the gesture start, not incremental
        gesture.update(&mut sticker, Point::new(30.0, 5.0), &[Point::new(0.0, 0.0)], &config);
        assert_eq!(sticker.target_position(), Point::new(230.0, 405.0));

        sticker.settle();
        assert_eq!(sticker.position(), Point::new(230.0, 405.0));
    }

    #[test]
    fn test_first_pinch_frame_only_anchors() {
        let (mut sticker, config) = sticker();
        let mut gesture = sticker.begin_gesture();
        let touches = [Point::new(0.0, 0.0), Point::new(200.0, 0.0)];

        gesture.update(&mut sticker, Point::new(50.0, 50.0), &touches, &config);

        assert!(gesture.is_pinching());
        assert_eq!(sticker.target_scale(), 2.0);
        assert_eq!(sticker.rotation(), 0.0);
        assert_eq!(sticker.target_position(), Point::new(200.0, 400.0));
    }

    #[test]
    fn test_pinch_rotates_relative_to_anchor() {
        let (mut sticker, config) = sticker();
        let mut gesture = sticker.begin_gesture();

        let horizontal = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let vertical = [Point::new(0.0, 0.0), Point::new(0.0, 100.0)];
        gesture.update(&mut sticker, Point::default(), &horizontal, &config);
        gesture.update(&mut sticker, Point::new(5.0, 0.0), &vertical, &config);

        assert!((sticker.rotation() - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(sticker.target_scale(), 1.0);
        assert_eq!(sticker.target_position(), Point::new(205.0, 400.0));
    }

    #[test]
    fn test_lifting_a_finger_clears_anchor() {
        let (mut sticker, config) = sticker();
        let mut gesture = sticker.begin_gesture();
        let pair = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];

        gesture.update(&mut sticker, Point::default(), &pair, &config);
        assert!(gesture.is_pinching());
        gesture.update(&mut sticker, Point::default(), &[Point::new(0.0, 0.0)], &config);
        assert!(!gesture.is_pinching());
    }

    #[test]
    fn test_new_gesture_starts_from_previous_rotation() {
        let (mut sticker, config) = sticker();

        let mut gesture = sticker.begin_gesture();
        gesture.update(
            &mut sticker,
            Point::default(),
            &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            &config,
        );
        gesture.update(
            &mut sticker,
            Point::default(),
            &[Point::new(0.0, 0.0), Point::new(0.0, 100.0)],
            &config,
        );
        drop(gesture);

        let mut gesture = sticker.begin_gesture();
        assert!(!gesture.is_pinching());
        gesture.update(
            &mut sticker,
            Point::default(),
            &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            &config,
        );
        gesture.update(
            &mut sticker,
            Point::default(),
            &[Point::new(0.0, 0.0), Point::new(0.0, 100.0)],
            &config,
        );
        assert!((sticker.rotation() - 2.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_step_reaches_target() {
        let (mut sticker, config) = sticker();
        let mut gesture = sticker.begin_gesture();
        gesture.update(&mut sticker, Point::new(40.0, 0.0), &[], &config);

        let mut frames = 0;
        while sticker.step(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 1000, "sticker never settled");
        }
        assert_eq!(sticker.position(), Point::new(240.0, 400.0));
    }

    #[test]
    fn test_placement_in_image_pixels() {
        let (mut sticker, config) = sticker();
        let mut gesture = sticker.begin_gesture();
        gesture.update(
            &mut sticker,
            Point::default(),
            &[Point::new(0.0, 0.0), Point::new(150.0, 0.0)],
            &config,
        );

        let fit = Rect::new(0.0, 64.0, 400.0, 800.0);
        let placement = sticker.placement(&fit, Dimensions::new(1000.0, 2000.0));

        assert_eq!(placement.id, 1);
        assert_eq!(placement.text, "Hello");
        assert_eq!(placement.x, 500.0);
        assert_eq!(placement.y, 1000.0);
        assert_eq!(placement.scale, 1.5 * 2.5);
    }
}
