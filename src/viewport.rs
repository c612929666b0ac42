//! Canvas logical-resolution computation
//!
//! Recomputed on every window resize. The simulation field is the result.

use glam::Vec2;

use crate::consts::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use crate::sim::Layout;

/// Canvas border (2 px each side)
pub const BORDER: f32 = 4.0;
/// Height reserved below the canvas for the touch controls
pub const TOUCH_CONTROLS_HEIGHT: f32 = 150.0;
/// Desktop aspect ratio (width / height)
pub const ASPECT: f32 = 4.0 / 3.0;

/// Space available to the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Container {
    pub width: f32,
    pub height: f32,
    /// Safe-area insets (notches, home indicators)
    pub safe_top: f32,
    pub safe_bottom: f32,
}

/// Logical canvas size for `layout` inside `container`, in whole pixels
pub fn canvas_size(layout: Layout, container: Container) -> Vec2 {
    let max_w = (container.width - BORDER).max(1.0);

    let size = match layout {
        Layout::Touch => {
            let max_h = container.height
                - TOUCH_CONTROLS_HEIGHT
                - container.safe_top
                - container.safe_bottom
                - BORDER;
            Vec2::new(max_w, max_h)
        }
        Layout::Desktop => {
            let max_h = (container.height - BORDER).max(1.0);
            let mut w = max_w;
            let mut h = w / ASPECT;
            if h > max_h {
                h = max_h;
                w = h * ASPECT;
            }
            Vec2::new(w.min(DEFAULT_FIELD_WIDTH), h.min(DEFAULT_FIELD_HEIGHT))
        }
    };

    size.floor().max(Vec2::ONE)
}
