//! Math utilities and types
//!
//! Screen-space types shared by the input, UI and rendering layers.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type (positions, sizes, texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 4D vector type, used for linear RGBA colors
pub type Vec4 = Vector4<f32>;

/// Axis-aligned rectangle in pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (non-negative for visible rectangles)
    pub width: f32,
    /// Height (non-negative for visible rectangles)
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle spanning two corners
    ///
    /// The result has negative extents when `max` lies left of or above `min`.
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    /// Whether the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }
}
