//! Plain geometry types shared by the viewport mapper, the crop tracker and
//! the sticker transforms.
//!
//! # Coordinate System
//!
//! - Screen coordinates are in logical pixels, origin at the top-left of the
//!   screen, y grows downwards
//! - Image coordinates are in native image pixels, origin at the top-left of
//!   the image

use serde::{Deserialize, Serialize};

/// Width and height in pixel units.
///
/// Used both for native image dimensions and for the screen/viewport area.
/// Callers are expected to supply positive, finite values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height divided by width.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.height / self.width
    }

    /// True when both sides are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle in radians of the vector from `self` to `other`.
    pub fn angle_to(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Axis-aligned rectangle stored as origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size anchored at the origin.
    pub fn from_size(size: Dimensions) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when `other` lies entirely inside `self`, allowing `epsilon` slack
    /// on every edge for accumulated floating-point error.
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.left() >= self.left() - epsilon
            && other.top() >= self.top() - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// A crop region in native image pixel units.
///
/// Produced by the crop tracker at commit time and handed to the image
/// processor. `origin + size` never exceeds the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedCropSpec {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedCropSpec {
    /// The spec covering the whole image.
    pub fn full(image: Dimensions) -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width: image.width,
            height: image.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.origin_x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin_y + self.height
    }
}
