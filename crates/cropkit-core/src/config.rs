//! Editor configuration.
//!
//! All values have defaults matching the stock editing screen (64 px app bars
//! above and below the image, 32 px crop handles). The structs are serde
//! friendly so a host can pass a partial JSON object and rely on the defaults
//! for everything it omits.

use serde::{Deserialize, Serialize};

use crate::animation::SpringConfig;
use crate::geometry::{Dimensions, Rect};

/// Top-level configuration for an edit session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub layout: EditorLayout,
    pub sticker: StickerConfig,
}

/// Fixed chrome around the image viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorLayout {
    /// Height of the chrome above the viewport (app bar)
    pub top_chrome: f64,
    /// Height of the chrome below the viewport (tool bar)
    pub bottom_chrome: f64,
    /// Side length of the square crop handle hit targets
    pub handle_size: f64,
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self {
            top_chrome: 64.0,
            bottom_chrome: 64.0,
            handle_size: 32.0,
        }
    }
}

impl EditorLayout {
    /// Total vertical space taken by chrome.
    pub fn chrome_height(&self) -> f64 {
        self.top_chrome + self.bottom_chrome
    }

    /// The screen area available to the image, in screen coordinates.
    ///
    /// The viewport spans the full screen width and sits directly below the top
    /// chrome. Its height never goes negative on very short screens.
    pub fn viewport_bounds(&self, screen: Dimensions) -> Rect {
        Rect::new(
            0.0,
            self.top_chrome,
            screen.width,
            (screen.height - self.chrome_height()).max(0.0),
        )
    }
}

/// Text sticker gesture parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickerConfig {
    /// Text a new sticker starts with
    pub default_text: String,
    /// Two-finger distance (px) that corresponds to a scale of 1.0
    pub pinch_reference_distance: f64,
    /// Minimum movement (px) on either axis before a drag gesture starts
    pub move_threshold: f64,
    /// Spring driving the sticker position
    pub position_spring: SpringConfig,
    /// Spring driving the sticker scale
    pub scale_spring: SpringConfig,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            default_text: "Text".to_string(),
            pinch_reference_distance: 100.0,
            move_threshold: 1.0,
            position_spring: SpringConfig::position(),
            scale_spring: SpringConfig::scale(),
        }
    }
}
