//! The editing session behind the image editing screen.
//!
//! An [`EditSession`] owns the image being edited, the unsaved-changes flag,
//! the optional crop overlay and the text stickers. Image operations (rotate,
//! crop) are delegated to an [`ImageProcessor`] and run in two phases so a
//! host can await an asynchronous platform call in between:
//!
//! ```text
//! begin_rotate(turn)      -> host rotates   -> complete_rotate(result)
//! begin_crop_commit()     -> host crops     -> complete_crop_commit(result)
//! ```
//!
//! Only one operation may be pending at a time. The synchronous helpers
//! [`EditSession::rotate`] and [`EditSession::commit_crop`] run both phases
//! back to back against a processor.

use log::{debug, warn};

use crate::config::EditorConfig;
use crate::crop::CropTracker;
use crate::error::{EditError, ProcessError};
use crate::geometry::{Dimensions, NormalizedCropSpec, Point, Rect};
use crate::sticker::{StickerPlacement, TextSticker};
use crate::transform::QuarterTurn;
use crate::viewport::fit_rect_in;

/// An image the session can lay out and hand to a processor.
pub trait EditableImage: Clone {
    /// Native pixel dimensions.
    fn dimensions(&self) -> Dimensions;
}

/// Performs the actual pixel work for a session.
pub trait ImageProcessor<I> {
    /// Rotate the whole image by a quarter turn.
    fn rotate(&mut self, image: &I, turn: QuarterTurn) -> Result<I, ProcessError>;

    /// Crop the image to `spec` (image pixel units).
    fn crop(&mut self, image: &I, spec: &NormalizedCropSpec) -> Result<I, ProcessError>;
}

/// An image operation waiting for its result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingOperation {
    Rotate(QuarterTurn),
    Crop(NormalizedCropSpec),
}

/// What a successful submit hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome<I> {
    pub image: I,
    /// Stickers in image pixel coordinates, for the host to rasterise
    pub stickers: Vec<StickerPlacement>,
}

/// State of one image editing screen.
#[derive(Debug, Clone)]
pub struct EditSession<I> {
    config: EditorConfig,
    screen: Dimensions,
    original: I,
    image: I,
    has_changes: bool,
    viewport: Rect,
    fit: Rect,
    crop: Option<CropTracker>,
    stickers: Vec<TextSticker>,
    next_sticker_id: u32,
    pending: Option<PendingOperation>,
}

impl<I: EditableImage> EditSession<I> {
    /// Start editing `original` on a screen of the given size.
    pub fn new(original: I, screen: Dimensions, config: EditorConfig) -> Self {
        let viewport = config.layout.viewport_bounds(screen);
        let fit = fit_rect_in(viewport, original.dimensions());

        Self {
            config,
            screen,
            image: original.clone(),
            original,
            has_changes: false,
            viewport,
            fit,
            crop: None,
            stickers: Vec::new(),
            next_sticker_id: 0,
            pending: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn screen(&self) -> Dimensions {
        self.screen
    }

    /// The image as currently edited.
    pub fn image(&self) -> &I {
        &self.image
    }

    /// The image the session started with.
    pub fn original(&self) -> &I {
        &self.original
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// Screen area available to the image.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Where the current image is drawn, in screen coordinates.
    pub fn fit_rect(&self) -> Rect {
        self.fit
    }

    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// React to a new screen size (device rotation, split screen, ...).
    ///
    /// An open crop overlay restarts at full extent on the new layout, unless
    /// its commit is in flight; it is then rebuilt once the commit resolves.
    ///
    /// # Errors
    ///
    /// `EditError::InvalidDimensions` for a zero, negative or non-finite size;
    /// the layout is unchanged.
    pub fn set_screen(&mut self, screen: Dimensions) -> Result<(), EditError> {
        check_dimensions(screen)?;
        self.screen = screen;
        self.refresh_layout();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rotation
    // ------------------------------------------------------------------

    /// Request a quarter-turn rotation of the current image.
    ///
    /// # Errors
    ///
    /// `EditError::OperationPending` if another operation has not completed.
    pub fn begin_rotate(&mut self, turn: QuarterTurn) -> Result<QuarterTurn, EditError> {
        self.ensure_idle()?;
        self.pending = Some(PendingOperation::Rotate(turn));
        debug!("Rotation {:?} requested", turn);
        Ok(turn)
    }

    /// Deliver the result of a rotation started with [`begin_rotate`](Self::begin_rotate).
    ///
    /// # Errors
    ///
    /// - `EditError::NothingPending` if no rotation is pending
    /// - `EditError::Process` if the processor failed or returned an image
    ///   without a usable size; the image is unchanged
    pub fn complete_rotate(&mut self, result: Result<I, ProcessError>) -> Result<(), EditError> {
        match self.pending {
            Some(PendingOperation::Rotate(_)) => self.pending = None,
            _ => return Err(EditError::NothingPending),
        }

        match result.and_then(usable_image) {
            Ok(image) => {
                self.replace_image(image);
                Ok(())
            }
            Err(err) => {
                warn!("Rotation failed: {}", err);
                Err(err.into())
            }
        }
    }

    /// Rotate synchronously through `processor`.
    pub fn rotate<P>(&mut self, turn: QuarterTurn, processor: &mut P) -> Result<(), EditError>
    where
        P: ImageProcessor<I> + ?Sized,
    {
        self.begin_rotate(turn)?;
        let result = processor.rotate(&self.image, turn);
        self.complete_rotate(result)
    }

    // ------------------------------------------------------------------
    // Crop overlay
    // ------------------------------------------------------------------

    /// Show the crop overlay, creating a full-extent tracker if needed.
    pub fn open_crop(&mut self) -> &mut CropTracker {
        let (fit, viewport) = (self.fit, self.viewport);
        self.crop
            .get_or_insert_with(|| CropTracker::new(fit, viewport))
    }

    /// Hide the crop overlay, discarding its rectangle.
    ///
    /// # Errors
    ///
    /// `EditError::OperationPending` while the overlay's commit is in flight.
    pub fn close_crop(&mut self) -> Result<(), EditError> {
        if matches!(self.pending, Some(PendingOperation::Crop(_))) {
            return Err(EditError::OperationPending);
        }
        self.crop = None;
        Ok(())
    }

    pub fn is_crop_open(&self) -> bool {
        self.crop.is_some()
    }

    pub fn crop(&self) -> Option<&CropTracker> {
        self.crop.as_ref()
    }

    pub fn crop_mut(&mut self) -> Option<&mut CropTracker> {
        self.crop.as_mut()
    }

    /// Validate the crop rectangle and request the crop.
    ///
    /// Returns the region, in image pixels, to hand to the image processor.
    ///
    /// # Errors
    ///
    /// - `EditError::OperationPending` if another operation has not completed
    /// - `EditError::CropNotOpen` without an open overlay
    /// - `EditError::Crop` if the rectangle is rejected; nothing changes
    pub fn begin_crop_commit(&mut self) -> Result<NormalizedCropSpec, EditError> {
        self.ensure_idle()?;
        let image = self.image.dimensions();
        let tracker = self.crop.as_mut().ok_or(EditError::CropNotOpen)?;
        let spec = tracker.begin_commit(image)?;
        self.pending = Some(PendingOperation::Crop(spec));
        Ok(spec)
    }

    /// Deliver the result of a crop started with
    /// [`begin_crop_commit`](Self::begin_crop_commit).
    ///
    /// On success the image is replaced and the overlay closes. On failure the
    /// overlay returns to idle with its rectangle intact.
    ///
    /// # Errors
    ///
    /// - `EditError::NothingPending` if no crop is pending
    /// - `EditError::Process` if the processor failed or returned an image
    ///   without a usable size
    pub fn complete_crop_commit(
        &mut self,
        result: Result<I, ProcessError>,
    ) -> Result<(), EditError> {
        match self.pending {
            Some(PendingOperation::Crop(_)) => self.pending = None,
            _ => return Err(EditError::NothingPending),
        }

        match result.and_then(usable_image) {
            Ok(image) => {
                self.crop = None;
                self.replace_image(image);
                Ok(())
            }
            Err(err) => {
                warn!("Crop failed: {}", err);
                if let Some(tracker) = self.crop.as_mut() {
                    tracker.abort_commit();
                }
                // The layout may have changed while the commit was in flight
                self.refresh_layout();
                Err(err.into())
            }
        }
    }

    /// Commit the crop synchronously through `processor`.
    pub fn commit_crop<P>(&mut self, processor: &mut P) -> Result<(), EditError>
    where
        P: ImageProcessor<I> + ?Sized,
    {
        let spec = self.begin_crop_commit()?;
        let result = processor.crop(&self.image, &spec);
        self.complete_crop_commit(result)
    }

    // ------------------------------------------------------------------
    // Stickers
    // ------------------------------------------------------------------

    /// Add a text sticker at the centre of the image. Returns its id.
    pub fn add_text_sticker(&mut self) -> u32 {
        let id = self.next_sticker_id;
        self.next_sticker_id += 1;

        let center = Point::new(self.fit.width / 2.0, self.fit.height / 2.0);
        let sticker = TextSticker::new(
            id,
            self.config.sticker.default_text.clone(),
            center,
            &self.config.sticker,
        );
        self.stickers.push(sticker);
        self.has_changes = true;
        id
    }

    pub fn stickers(&self) -> &[TextSticker] {
        &self.stickers
    }

    pub fn sticker(&self, id: u32) -> Option<&TextSticker> {
        self.stickers.iter().find(|s| s.id() == id)
    }

    pub fn sticker_mut(&mut self, id: u32) -> Result<&mut TextSticker, EditError> {
        self.stickers
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(EditError::UnknownSticker(id))
    }

    pub fn remove_sticker(&mut self, id: u32) -> Result<TextSticker, EditError> {
        let index = self
            .stickers
            .iter()
            .position(|s| s.id() == id)
            .ok_or(EditError::UnknownSticker(id))?;
        Ok(self.stickers.remove(index))
    }

    /// Advance sticker animations. Returns `true` while anything is moving.
    pub fn step_animations(&mut self, dt: f64) -> bool {
        self.stickers
            .iter_mut()
            .fold(false, |moving, sticker| sticker.step(dt) || moving)
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Drop every edit and go back to the original image.
    ///
    /// # Errors
    ///
    /// `EditError::OperationPending` while an operation is in flight.
    pub fn reset_all(&mut self) -> Result<(), EditError> {
        self.ensure_idle()?;
        self.image = self.original.clone();
        self.has_changes = false;
        self.crop = None;
        self.stickers.clear();
        self.refresh_layout();
        debug!("Session reset to original image");
        Ok(())
    }

    /// Produce the final image and sticker placements.
    ///
    /// # Errors
    ///
    /// - `EditError::OperationPending` while an operation is in flight
    /// - `EditError::NoChanges` if nothing was edited
    pub fn submit(&self) -> Result<EditOutcome<I>, EditError> {
        self.ensure_idle()?;
        if !self.has_changes {
            return Err(EditError::NoChanges);
        }

        let dims = self.image.dimensions();
        Ok(EditOutcome {
            image: self.image.clone(),
            stickers: self
                .stickers
                .iter()
                .map(|s| s.placement(&self.fit, dims))
                .collect(),
        })
    }

    /// Abandon the session. Nothing is returned to the caller.
    pub fn cancel(self) {
        debug!(
            "Session cancelled with {} sticker(s), changes: {}",
            self.stickers.len(),
            self.has_changes
        );
    }

    fn ensure_idle(&self) -> Result<(), EditError> {
        match self.pending {
            Some(_) => Err(EditError::OperationPending),
            None => Ok(()),
        }
    }

    fn replace_image(&mut self, image: I) {
        self.image = image;
        self.has_changes = true;
        self.refresh_layout();
        let dims = self.image.dimensions();
        debug!("Image replaced, now {}x{}", dims.width, dims.height);
    }

    fn refresh_layout(&mut self) {
        self.viewport = self.config.layout.viewport_bounds(self.screen);
        self.fit = fit_rect_in(self.viewport, self.image.dimensions());

        let (fit, viewport) = (self.fit, self.viewport);
        if let Some(tracker) = self.crop.as_mut() {
            let stale = tracker.fit() != fit || tracker.viewport() != viewport;
            if stale && !matches!(self.pending, Some(PendingOperation::Crop(_))) {
                *tracker = CropTracker::new(fit, viewport);
            }
        }
    }
}

/// Check that a host-supplied size can be laid out.
pub fn check_dimensions(dims: Dimensions) -> Result<Dimensions, EditError> {
    if dims.is_valid() {
        Ok(dims)
    } else {
        Err(EditError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
        })
    }
}

fn usable_image<I: EditableImage>(image: I) -> Result<I, ProcessError> {
    let dims = image.dimensions();
    if dims.is_valid() {
        Ok(image)
    } else {
        Err(ProcessError::InvalidImage(format!(
            "result has no usable size ({}x{})",
            dims.width, dims.height
        )))
    }
}
