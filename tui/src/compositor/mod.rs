//! Layered Compositor
//!
//! Paints z-ordered text layers onto a fixed `width × height` grid and
//! returns the frame as one string, ready to be written to the terminal.
//!
//! Layers carry pre-styled text, so painting works on styled lines rather
//! than on a cell buffer: each content line replaces the cells it covers and
//! the background to its left and right is re-sliced with [`ansi::slice`],
//! which keeps color state intact across the cut.
//!
//! Whitespace is opaque. A space in an upper layer overwrites whatever is
//! beneath it; there are no transparent holes.

pub mod ansi;
mod compose;
mod layer;

pub use compose::{center_layer, overlay_simple, visual_height, visual_width, Compose};
pub use layer::Layer;

/// A fixed-size surface that composites layers
#[derive(Clone, Debug, Default)]
pub struct Canvas {
    width: usize,
    height: usize,
    /// Layers in insertion order (tie-break for equal z)
    layers: Vec<Layer>,
}

impl Canvas {
    /// Create an empty canvas
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Append a layer
    pub fn add_layer(&mut self, layer: Layer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Remove all layers
    pub fn clear_layers(&mut self) -> &mut Self {
        self.layers.clear();
        self
    }

    /// Composite all visible layers into a frame
    ///
    /// Returns an empty string when there is nothing visible to paint.
    /// Otherwise the frame has exactly `height` lines of `width` cells.
    pub fn render(&self) -> String {
        let ordered = self.render_order();
        if ordered.is_empty() {
            return String::new();
        }

        tracing::trace!(
            layers = ordered.len(),
            width = self.width,
            height = self.height,
            "compositing frame"
        );

        let mut rows = vec![" ".repeat(self.width); self.height];
        for layer in ordered {
            self.paint(&mut rows, layer);
        }

        rows.join("\n")
    }

    /// Topmost visible layer covering a cell (for mouse hit-testing)
    pub fn layer_at(&self, col: i32, row: i32) -> Option<&Layer> {
        self.render_order()
            .into_iter()
            .rev()
            .find(|layer| layer.contains(col, row))
    }

    /// Visible layers back to front
    fn render_order(&self) -> Vec<&Layer> {
        let mut ordered: Vec<&Layer> = self.layers.iter().collect();
        // Stable: equal z keeps insertion order
        ordered.sort_by_key(|layer| layer.z);
        ordered.retain(|layer| layer.visible);
        ordered
    }

    /// Paint one layer over the rows painted so far
    fn paint(&self, rows: &mut [String], layer: &Layer) {
        for (i, line) in layer.content.split('\n').enumerate() {
            let target_y = i64::from(layer.y) + i as i64;
            if target_y < 0 || target_y >= self.height as i64 {
                continue;
            }

            let row = &mut rows[target_y as usize];
            if let Some(painted) = place_line(row, line, i64::from(layer.x), self.width) {
                *row = painted;
            }
        }
    }
}

/// Overlay `content` onto `background` starting at column `x`
///
/// Returns `None` when nothing of the line lands on the grid.
fn place_line(background: &str, content: &str, x: i64, width: usize) -> Option<String> {
    let content_width = ansi::line_width(content);
    if content_width == 0 || x >= width as i64 {
        return None;
    }

    let right_edge = x + content_width as i64;
    if right_edge <= 0 {
        return None;
    }

    // Visible part of the content, in content columns
    let clip_start = (-x).max(0) as usize;
    let clip_end = (width as i64 - x).min(content_width as i64) as usize;
    let left = x.max(0) as usize;
    let resume = (right_edge as usize).min(width);

    let mut line = ansi::slice(background, 0, left);
    if clip_start == 0 && clip_end == content_width {
        line.push_str(content);
        if ansi::has_escapes(content) {
            line.push_str(ansi::RESET);
        }
    } else {
        line.push_str(&ansi::slice(content, clip_start, clip_end));
    }
    line.push_str(&ansi::slice(background, resume, width));

    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(frame: &str) -> Vec<&str> {
        frame.split('\n').collect()
    }

    #[test]
    fn test_empty_canvas_renders_nothing() {
        assert_eq!(Canvas::new(10, 5).render(), "");
    }

    #[test]
    fn test_only_invisible_layers_render_nothing() {
        let mut canvas = Canvas::new(10, 5);
        canvas.add_layer(Layer::new("hidden", 0).with_visibility(false));
        assert_eq!(canvas.render(), "");
    }

    #[test]
    fn test_single_layer_is_padded() {
        let mut canvas = Canvas::new(6, 3);
        canvas.add_layer(Layer::new("ab\ncd", 0).with_offset(1, 1));

        assert_eq!(rows(&canvas.render()), vec!["      ", " ab   ", " cd   "]);
    }

    #[test]
    fn test_foreground_on_background() {
        let bg = ["..........", "..........", ".........."].join("\n");
        let mut canvas = Canvas::new(10, 3);
        canvas.add_layer(Layer::new(bg, 0));
        canvas.add_layer(Layer::new("Hi", 1));

        let frame = canvas.render();
        let lines = rows(&frame);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Hi........");
    }

    #[test]
    fn test_offset_placement() {
        let bg = vec!["-".repeat(10); 5].join("\n");
        let mut canvas = Canvas::new(10, 5);
        canvas.add_layer(Layer::new(bg, 0));
        canvas.add_layer(Layer::new("XX\nXX", 1).with_offset(4, 2));

        let frame = canvas.render();
        let lines = rows(&frame);
        assert_eq!(lines[1], "----------");
        assert_eq!(lines[2], "----XX----");
        assert_eq!(lines[3], "----XX----");
    }

    #[test]
    fn test_highest_z_wins() {
        let mut canvas = Canvas::new(5, 1);
        canvas.add_layer(Layer::new("A", 0));
        canvas.add_layer(Layer::new("B", 2));
        canvas.add_layer(Layer::new("C", 1));

        assert_eq!(canvas.render(), "B    ");
    }

    #[test]
    fn test_equal_z_later_insertion_wins() {
        let mut canvas = Canvas::new(3, 1);
        canvas.add_layer(Layer::new("X", 4));
        canvas.add_layer(Layer::new("Y", 4));
        canvas.add_layer(Layer::new("Z", 1));

        assert_eq!(canvas.render(), "Y  ");
    }

    #[test]
    fn test_invisible_layer_not_painted() {
        let mut canvas = Canvas::new(5, 1);
        canvas.add_layer(Layer::new("A", 0));
        canvas.add_layer(Layer::new("B", 1).with_visibility(false));

        assert_eq!(canvas.render(), "A    ");
    }

    #[test]
    fn test_whitespace_is_opaque() {
        let mut canvas = Canvas::new(5, 1);
        canvas.add_layer(Layer::new("#####", 0));
        canvas.add_layer(Layer::new("a b", 1).with_offset(1, 0));

        assert_eq!(canvas.render(), "#a b#");
    }

    #[test]
    fn test_clips_right_edge() {
        let mut canvas = Canvas::new(5, 1);
        canvas.add_layer(Layer::new(".....", 0));
        canvas.add_layer(Layer::new("abcdef", 1).with_offset(3, 0));

        assert_eq!(canvas.render(), "...ab");
    }

    #[test]
    fn test_clips_left_edge() {
        let mut canvas = Canvas::new(5, 1);
        canvas.add_layer(Layer::new(".....", 0));
        canvas.add_layer(Layer::new("abcd", 1).with_offset(-2, 0));

        assert_eq!(canvas.render(), "cd...");
    }

    #[test]
    fn test_off_grid_layers_are_dropped() {
        let mut canvas = Canvas::new(4, 2);
        canvas.add_layer(Layer::new("....\n....", 0));
        canvas.add_layer(Layer::new("zz", 1).with_offset(4, 0));
        canvas.add_layer(Layer::new("zz", 1).with_offset(-2, 0));
        canvas.add_layer(Layer::new("zz\nzz", 1).with_offset(0, -2));
        canvas.add_layer(Layer::new("zz", 1).with_offset(0, 2));

        assert_eq!(canvas.render(), "....\n....");
    }

    #[test]
    fn test_partially_off_top_keeps_lower_lines() {
        let mut canvas = Canvas::new(3, 2);
        canvas.add_layer(Layer::new("ab\ncd\nef", 0).with_offset(0, -1));

        assert_eq!(canvas.render(), "cd \nef ");
    }

    #[test]
    fn test_extra_lines_beyond_height_are_dropped() {
        let mut canvas = Canvas::new(2, 2);
        canvas.add_layer(Layer::new("a\nb\nc\nd", 0));

        assert_eq!(rows(&canvas.render()).len(), 2);
    }

    #[test]
    fn test_styled_background_keeps_color_after_overlay() {
        let red_bg = format!("\x1b[31m{}\x1b[0m", "r".repeat(6));
        let mut canvas = Canvas::new(6, 1);
        canvas.add_layer(Layer::new(red_bg, 0));
        canvas.add_layer(Layer::new("XY", 1).with_offset(2, 0));

        let frame = canvas.render();
        assert_eq!(ansi::strip(&frame), "rrXYrr");
        // The right-hand remainder must still be red
        let tail = frame.rsplit("XY").next().unwrap_or_default();
        assert!(tail.starts_with("\x1b[31m"), "lost color: {frame:?}");
    }

    #[test]
    fn test_wide_characters_keep_row_width() {
        let mut canvas = Canvas::new(6, 1);
        canvas.add_layer(Layer::new("日本語", 0));
        canvas.add_layer(Layer::new("x", 1).with_offset(1, 0));

        let frame = canvas.render();
        assert_eq!(ansi::line_width(&frame), 6);
        assert_eq!(frame, " x本語");
    }

    #[test]
    fn test_clear_layers() {
        let mut canvas = Canvas::new(10, 5);
        canvas.add_layer(Layer::new("Test", 0));
        canvas.clear_layers();
        assert!(canvas.layers().is_empty());
        assert_eq!(canvas.render(), "");
    }

    #[test]
    fn test_layer_copy_does_not_alias() {
        let mut layer = Layer::new("one", 0);
        let mut canvas = Canvas::new(3, 1);
        canvas.add_layer(layer.clone());
        layer.content = "two".to_string();

        assert_eq!(canvas.render(), "one");
    }

    #[test]
    fn test_layer_at_picks_topmost() {
        let mut canvas = Canvas::new(10, 3);
        canvas.add_layer(Layer::new("aaaa", 0));
        canvas.add_layer(Layer::new("bb", 5).with_offset(1, 0));
        canvas.add_layer(Layer::new("cc", 9).with_offset(1, 0).with_visibility(false));

        assert_eq!(canvas.layer_at(1, 0).map(|l| l.z), Some(5));
        assert_eq!(canvas.layer_at(3, 0).map(|l| l.z), Some(0));
        assert!(canvas.layer_at(8, 2).is_none());
    }
}
