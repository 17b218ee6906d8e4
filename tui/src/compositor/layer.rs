//! Layer
//!
//! A positioned, z-ordered block of pre-styled text. Layers are plain values:
//! a canvas stores its own copy, so a caller can keep reusing the original.

use super::ansi;

/// A single layer destined for compositing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    /// Multi-line content, may contain ANSI escape sequences
    pub content: String,
    /// Paint priority (higher = on top)
    pub z: i32,
    /// Column of the top-left corner (may be negative or off-grid)
    pub x: i32,
    /// Row of the top-left corner (may be negative or off-grid)
    pub y: i32,
    /// Invisible layers stay in the list but are never painted
    pub visible: bool,
}

impl Layer {
    /// Create a visible layer at the origin
    pub fn new(content: impl Into<String>, z: i32) -> Self {
        Self {
            content: content.into(),
            z,
            x: 0,
            y: 0,
            visible: true,
        }
    }

    /// Place the layer's top-left corner at `(x, y)`
    #[must_use]
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Show or hide the layer
    #[must_use]
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Widest content line in cells
    pub fn width(&self) -> usize {
        self.content.split('\n').map(ansi::line_width).max().unwrap_or(0)
    }

    /// Number of content lines
    pub fn height(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Check if a grid cell falls inside this layer's bounding box
    pub fn contains(&self, col: i32, row: i32) -> bool {
        let (col, row) = (i64::from(col), i64::from(row));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        col >= x && col < x + self.width() as i64 && row >= y && row < y + self.height() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_defaults() {
        let layer = Layer::new("Hello", 5);
        assert_eq!(layer.content, "Hello");
        assert_eq!(layer.z, 5);
        assert_eq!((layer.x, layer.y), (0, 0));
        assert!(layer.visible);
    }

    #[test]
    fn test_builders() {
        let layer = Layer::new("Test", 1)
            .with_offset(10, 20)
            .with_visibility(false);
        assert_eq!((layer.x, layer.y), (10, 20));
        assert!(!layer.visible);
    }

    #[test]
    fn test_dimensions_ignore_styling() {
        let layer = Layer::new("\x1b[31mabc\x1b[0m\nde", 0);
        assert_eq!(layer.width(), 3);
        assert_eq!(layer.height(), 2);
    }

    #[test]
    fn test_contains() {
        let layer = Layer::new("xx\nxx", 0).with_offset(-1, 3);
        assert!(layer.contains(-1, 3));
        assert!(layer.contains(0, 4));
        assert!(!layer.contains(1, 4));
        assert!(!layer.contains(0, 5));
    }
}
