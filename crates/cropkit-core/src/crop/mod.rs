//! Crop overlay: four corner handles driving one rectangle.
//!
//! The tracker works in screen coordinates and only converts to image pixels
//! when a commit is requested. Handle behaviour is table driven: each handle
//! names which edge (near or far) it moves on each axis, and a single update
//! rule applies that choice.

mod handle;
mod tracker;

pub use handle::{EdgeSide, Handle, HandleEdges};
pub use tracker::{CropTracker, TrackerPhase};
