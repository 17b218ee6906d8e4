//! Composition helpers built on [`Canvas`]

use crossterm::style::ContentStyle;

use super::{ansi, Canvas, Layer};

/// Width of the widest line in cells
pub fn visual_width(content: &str) -> usize {
    content.split('\n').map(ansi::line_width).max().unwrap_or(0)
}

/// Number of lines
pub fn visual_height(content: &str) -> usize {
    content.split('\n').count()
}

/// Create a layer centered within a `canvas_width × canvas_height` area
///
/// Content larger than the area is pinned to the top-left corner.
pub fn center_layer(
    content: impl Into<String>,
    z: i32,
    canvas_width: usize,
    canvas_height: usize,
) -> Layer {
    let content = content.into();
    let x = canvas_width.saturating_sub(visual_width(&content)) / 2;
    let y = canvas_height.saturating_sub(visual_height(&content)) / 2;

    Layer::new(content, z).with_offset(clamp_coord(x), clamp_coord(y))
}

/// One-shot composite of `foreground` over `background`
pub fn overlay_simple(background: &str, foreground: &str, width: usize, height: usize) -> String {
    let mut canvas = Canvas::new(width, height);
    canvas
        .add_layer(Layer::new(background, 0))
        .add_layer(Layer::new(foreground, 1));
    canvas.render()
}

fn clamp_coord(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Fluent builder for a styled layer composition
///
/// ```
/// use arlo_tui::Compose;
///
/// let background = ["..........", "..........", ".........."].join("\n");
/// let frame = Compose::new(10, 3)
///     .layer(background, 0, 0, 0)
///     .centered_layer("Hi", 10)
///     .render();
///
/// assert_eq!(frame.split('\n').nth(1), Some("....Hi...."));
/// ```
#[derive(Clone, Debug)]
pub struct Compose {
    style: Option<ContentStyle>,
    layers: Vec<Layer>,
    width: usize,
    height: usize,
}

impl Compose {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            style: None,
            layers: Vec::new(),
            width,
            height,
        }
    }

    /// Outer style applied to every line of the composited frame
    #[must_use]
    pub fn with_style(mut self, style: ContentStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Add a layer at an explicit position
    #[must_use]
    pub fn layer(mut self, content: impl Into<String>, z: i32, x: i32, y: i32) -> Self {
        self.layers.push(Layer::new(content, z).with_offset(x, y));
        self
    }

    /// Add a layer centered in the composition area
    #[must_use]
    pub fn centered_layer(mut self, content: impl Into<String>, z: i32) -> Self {
        self.layers
            .push(center_layer(content, z, self.width, self.height));
        self
    }

    pub fn render(&self) -> String {
        let mut canvas = Canvas::new(self.width, self.height);
        for layer in &self.layers {
            canvas.add_layer(layer.clone());
        }
        let frame = canvas.render();

        match self.style {
            Some(style) if !frame.is_empty() => frame
                .split('\n')
                .map(|line| style.apply(line).to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => frame,
        }
    }
}
