// Hexbin module
//
// Node-health honeycomb: layout generation, hex binning, and pointer
// interaction. Everything here is pure data; the ui module draws it.

pub mod binning;
pub mod interaction;
pub mod layout;

pub use binning::{bin_cells, hexagon_vertices, HexBins, HexGeometry, HostStatusLevel};
pub use interaction::{HexbinClick, InteractionTracker};
pub use layout::{LayoutCache, LayoutParams};

/// A point in layout space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The visible window onto the honeycomb
///
/// `scroll_y` is how far the content is scrolled down. Layout coordinates
/// are content coordinates; tooltips are placed in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub size: Size,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(size: Size, scroll_y: f64) -> Self {
        Self { size, scroll_y }
    }

    /// View coordinates to content coordinates
    pub fn to_content(&self, point: Point) -> Point {
        Point::new(point.x, point.y + self.scroll_y)
    }

    /// Content coordinates to view coordinates
    pub fn to_view(&self, point: Point) -> Point {
        Point::new(point.x, point.y - self.scroll_y)
    }

    /// Largest useful scroll offset for content of the given height
    pub fn max_scroll(&self, content_height: f64) -> f64 {
        (content_height - self.size.height).max(0.0)
    }

    /// Scroll by `delta`, clamped to the content
    pub fn scroll_by(&mut self, delta: f64, content_height: f64) {
        self.scroll_y = (self.scroll_y + delta).clamp(0.0, self.max_scroll(content_height));
    }
}
