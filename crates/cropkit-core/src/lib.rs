//! Cropkit Core - geometry and gesture logic for an image editing screen
//!
//! This crate provides everything behind a mobile photo editor that is not
//! rendering: fitting the image into the screen, tracking the four-handle crop
//! overlay, mapping the crop back to image pixels, text sticker gestures, and
//! the session state machine that sequences rotate/crop operations against an
//! image processor.
//!
//! # Module Structure
//!
//! - `geometry` - Dimensions, points, rectangles and crop specs
//! - `viewport` - Fit rectangle computation and screen to image mapping
//! - `crop` - Crop rectangle tracker driven by corner handles
//! - `sticker` - Text stickers and their per-gesture state
//! - `animation` - Spring-animated values
//! - `session` - The editing session and the image processor trait
//! - `transform` - Reference pixel processor (quarter turns, cropping)
//! - `raster` - RGB pixel buffer used by the reference processor
//! - `config` - Layout and sticker settings
//! - `error` - Error types

pub mod animation;
pub mod config;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod session;
pub mod sticker;
pub mod transform;
pub mod viewport;

pub use config::{EditorConfig, EditorLayout, StickerConfig};
pub use crop::{CropTracker, Handle, TrackerPhase};
pub use error::{CropError, EditError, ProcessError};
pub use geometry::{Dimensions, NormalizedCropSpec, Point, Rect};
pub use raster::DecodedImage;
pub use session::{EditOutcome, EditSession, EditableImage, ImageProcessor, PendingOperation};
pub use transform::{PixelProcessor, QuarterTurn};
pub use viewport::{compute_fit_rect, fit_rect_in, to_image_coordinates};
