//! The crop rectangle tracker.
//!
//! Each axis is stored as `origin`, `size` and `margin`, where the margin is
//! the distance from the crop's far edge to the viewport's far edge. Moving
//! the near edge keeps the margin (and so the far edge) fixed; moving the far
//! edge keeps the origin fixed and rewrites the margin. The same rule serves
//! both axes and all four handles.
//!
//! # State Machine
//!
//! ```text
//! Idle --begin_drag--> Dragging(handle) --end_drag--> Idle
//! Idle --begin_commit--> Committing --abort_commit--> Idle
//! ```
//!
//! A successful commit ends with the owner replacing the image and building a
//! fresh tracker, so there is no transition out of `Committing` besides abort.

use log::{debug, warn};

use super::handle::{EdgeSide, Handle};
use crate::error::CropError;
use crate::geometry::{Dimensions, NormalizedCropSpec, Point, Rect};
use crate::viewport::to_image_coordinates;

/// Relative tolerance applied to the image bounds check on commit.
const BOUNDS_TOLERANCE: f64 = 1e-9;

/// Where the tracker is in its gesture/commit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Idle,
    Dragging(Handle),
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisState {
    origin: f64,
    size: f64,
    margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisBounds {
    fit_near: f64,
    fit_far: f64,
    viewport_far: f64,
}

impl AxisBounds {
    fn full_extent(&self) -> AxisState {
        AxisState {
            origin: self.fit_near,
            size: self.fit_far - self.fit_near,
            margin: self.viewport_far - self.fit_far,
        }
    }
}

impl AxisState {
    fn apply(&mut self, bounds: &AxisBounds, side: EdgeSide, pointer: f64) {
        match side {
            EdgeSide::Near => {
                let far = (bounds.viewport_far - self.margin).max(bounds.fit_near);
                self.origin = clamp_between(pointer, bounds.fit_near, far);
                self.size = ((bounds.viewport_far - self.origin) - self.margin).max(0.0);
            }
            EdgeSide::Far => {
                let far = clamp_between(pointer, self.origin, bounds.fit_far);
                self.size = far - self.origin;
                self.margin = bounds.viewport_far - far;
            }
        }
    }
}

/// `lo` wins over `hi` if they are out of order; NaN pointers land on `lo`.
#[inline]
fn clamp_between(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

/// Tracks the crop rectangle while its corner handles are dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct CropTracker {
    fit: Rect,
    viewport: Rect,
    horizontal_bounds: AxisBounds,
    vertical_bounds: AxisBounds,
    horizontal: AxisState,
    vertical: AxisState,
    phase: TrackerPhase,
}

impl CropTracker {
    /// Create a tracker covering the whole fit rectangle.
    ///
    /// # Arguments
    ///
    /// * `fit` - Where the image is drawn, in screen coordinates
    /// * `viewport` - The area the fit rectangle was computed in
    pub fn new(fit: Rect, viewport: Rect) -> Self {
        let horizontal_bounds = AxisBounds {
            fit_near: fit.left(),
            fit_far: fit.right(),
            viewport_far: viewport.right(),
        };
        let vertical_bounds = AxisBounds {
            fit_near: fit.top(),
            fit_far: fit.bottom(),
            viewport_far: viewport.bottom(),
        };

        Self {
            fit,
            viewport,
            horizontal_bounds,
            vertical_bounds,
            horizontal: horizontal_bounds.full_extent(),
            vertical: vertical_bounds.full_extent(),
            phase: TrackerPhase::Idle,
        }
    }

    pub fn fit(&self) -> Rect {
        self.fit
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// The current crop rectangle in screen coordinates.
    pub fn crop_rect(&self) -> Rect {
        Rect::new(
            self.horizontal.origin,
            self.vertical.origin,
            self.horizontal.size,
            self.vertical.size,
        )
    }

    /// Distances `(right, bottom)` from the crop's far edges to the viewport's.
    pub fn margins(&self) -> (f64, f64) {
        (self.horizontal.margin, self.vertical.margin)
    }

    /// True when the crop rectangle still covers the whole fit rectangle.
    pub fn is_full_extent(&self) -> bool {
        self.horizontal == self.horizontal_bounds.full_extent()
            && self.vertical == self.vertical_bounds.full_extent()
    }

    /// Hit targets for the four handles, each a `size` square inside its corner.
    pub fn handle_rects(&self, size: f64) -> [(Handle, Rect); 4] {
        let crop = self.crop_rect();
        Handle::ALL.map(|handle| (handle, handle.hit_rect(&crop, size)))
    }

    /// The handle whose hit target contains `point`, if any.
    ///
    /// On a crop small enough for targets to overlap, the first handle in
    /// [`Handle::ALL`] order wins.
    pub fn handle_at(&self, point: Point, size: f64) -> Option<Handle> {
        self.handle_rects(size)
            .into_iter()
            .find(|(_, rect)| rect.contains_point(point))
            .map(|(handle, _)| handle)
    }

    /// Start dragging `handle`.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Busy` while a commit is waiting for its result.
    pub fn begin_drag(&mut self, handle: Handle) -> Result<(), CropError> {
        if self.phase == TrackerPhase::Committing {
            return Err(CropError::Busy);
        }
        self.phase = TrackerPhase::Dragging(handle);
        Ok(())
    }

    /// Move the active handle to `pointer`.
    ///
    /// Pointer positions outside the fit rectangle are clamped, never
    /// rejected. Returns `false` (and changes nothing) when no drag is active.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let TrackerPhase::Dragging(handle) = self.phase else {
            return false;
        };

        let edges = handle.edges();
        self.horizontal
            .apply(&self.horizontal_bounds, edges.horizontal, pointer.x);
        self.vertical
            .apply(&self.vertical_bounds, edges.vertical, pointer.y);
        true
    }

    /// Finish the active drag. No-op outside a drag.
    pub fn end_drag(&mut self) {
        if matches!(self.phase, TrackerPhase::Dragging(_)) {
            self.phase = TrackerPhase::Idle;
        }
    }

    /// A complete single-event drag of `handle` to `pointer`.
    pub fn drag(&mut self, handle: Handle, pointer: Point) -> Result<(), CropError> {
        self.begin_drag(handle)?;
        self.drag_to(pointer);
        self.end_drag();
        Ok(())
    }

    /// Return to the full fit rectangle, as if no handle was ever dragged.
    ///
    /// Ignored while a commit is pending. Returns whether the reset applied.
    pub fn reset(&mut self) -> bool {
        if self.phase == TrackerPhase::Committing {
            return false;
        }
        self.horizontal = self.horizontal_bounds.full_extent();
        self.vertical = self.vertical_bounds.full_extent();
        self.phase = TrackerPhase::Idle;
        true
    }

    /// Map the current rectangle onto `image` pixels and validate it.
    ///
    /// Does not mutate the tracker and does not log, so it is safe to poll.
    ///
    /// # Errors
    ///
    /// - `CropError::ExceedsImage` if the mapped rectangle passes the image's
    ///   right or bottom edge
    /// - `CropError::EmptyArea` if the mapped width or height is zero
    pub fn crop_spec(&self, image: Dimensions) -> Result<NormalizedCropSpec, CropError> {
        let spec = to_image_coordinates(&self.crop_rect(), &self.fit, image);
        validate_spec(spec, image)
    }

    /// Validate the current rectangle and enter `Committing`.
    ///
    /// The returned spec is what the image processor should crop. Until
    /// [`abort_commit`](Self::abort_commit) is called (or the tracker is
    /// replaced) drags and resets are refused.
    ///
    /// # Errors
    ///
    /// `CropError::Busy` when not idle, otherwise as [`crop_spec`](Self::crop_spec).
    /// The tracker is unchanged on error; invalid rectangles are logged as
    /// warnings.
    pub fn begin_commit(&mut self, image: Dimensions) -> Result<NormalizedCropSpec, CropError> {
        if self.phase != TrackerPhase::Idle {
            return Err(CropError::Busy);
        }
        let spec = self
            .crop_spec(image)
            .inspect_err(|err| warn!("Rejected crop: {}", err))?;
        self.phase = TrackerPhase::Committing;
        debug!(
            "Committing crop {:.1},{:.1} {:.1}x{:.1}",
            spec.origin_x, spec.origin_y, spec.width, spec.height
        );
        Ok(spec)
    }

    /// Leave `Committing` with the rectangle untouched.
    pub fn abort_commit(&mut self) {
        if self.phase == TrackerPhase::Committing {
            self.phase = TrackerPhase::Idle;
        }
    }
}

fn validate_spec(
    mut spec: NormalizedCropSpec,
    image: Dimensions,
) -> Result<NormalizedCropSpec, CropError> {
    let slack_x = BOUNDS_TOLERANCE * image.width;
    let slack_y = BOUNDS_TOLERANCE * image.height;

    if spec.right() > image.width + slack_x || spec.bottom() > image.height + slack_y {
        return Err(CropError::ExceedsImage {
            right: spec.right(),
            bottom: spec.bottom(),
            image_width: image.width,
            image_height: image.height,
        });
    }

    // Absorb the tolerated overshoot so the processor sees an in-bounds rect
    spec.width = spec.width.min(image.width - spec.origin_x);
    spec.height = spec.height.min(image.height - spec.origin_y);

    let empty = |extent: f64| extent.is_nan() || extent <= 0.0;
    if empty(spec.width) || empty(spec.height) {
        return Err(CropError::EmptyArea {
            width: spec.width,
            height: spec.height,
        });
    }

    Ok(spec)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
