//! Scroll geometry reported by the host scroll view
//!
//! Axis and direction are unknown until the host performs its first
//! layout; consumers hold an `Option<ScrollLayout>` and render nothing
//! while it is `None` instead of scattering null checks.

use serde::Serialize;

/// Scroll axis of the host scroll view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Direction content moves when scrolling forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AxisDirection {
    /// Vertical, start edge at the top (the common list)
    Down,
    /// Vertical, reversed (start edge at the bottom)
    Up,
    /// Horizontal, start edge on the left
    Right,
    /// Horizontal, reversed (start edge on the right)
    Left,
}

impl AxisDirection {
    /// The axis this direction lies on
    pub fn axis(&self) -> Axis {
        match self {
            AxisDirection::Up | AxisDirection::Down => Axis::Vertical,
            AxisDirection::Left | AxisDirection::Right => Axis::Horizontal,
        }
    }

    /// Whether the scroll view is reversed (start edge at the far side)
    pub fn is_reversed(&self) -> bool {
        matches!(self, AxisDirection::Up | AxisDirection::Left)
    }
}

/// Layout measurements from the host scroll view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLayout {
    /// Resolved axis direction
    pub axis_direction: AxisDirection,
    /// Viewport extent along the scroll axis
    pub viewport_extent: f32,
    /// Content extent along the scroll axis
    pub content_extent: f32,
    /// Safe-area inset at the header edge
    pub leading_inset: f32,
    /// Safe-area inset at the footer edge
    pub trailing_inset: f32,
}

impl ScrollLayout {
    /// Convenience constructor for the common top-down vertical list
    pub fn vertical(viewport_extent: f32, content_extent: f32) -> Self {
        Self {
            axis_direction: AxisDirection::Down,
            viewport_extent,
            content_extent,
            leading_inset: 0.0,
            trailing_inset: 0.0,
        }
    }

    /// The scroll axis
    pub fn axis(&self) -> Axis {
        self.axis_direction.axis()
    }

    /// Maximum in-bounds scroll position (0 when content fits the viewport)
    pub fn max_scroll(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_resolution() {
        assert_eq!(AxisDirection::Down.axis(), Axis::Vertical);
        assert_eq!(AxisDirection::Left.axis(), Axis::Horizontal);
        assert!(AxisDirection::Up.is_reversed());
        assert!(!AxisDirection::Right.is_reversed());
    }

    #[test]
    fn test_max_scroll() {
        assert_eq!(ScrollLayout::vertical(400.0, 1000.0).max_scroll(), 600.0);
        // Content shorter than viewport: both bounds coincide
        assert_eq!(ScrollLayout::vertical(400.0, 100.0).max_scroll(), 0.0);
    }
}
