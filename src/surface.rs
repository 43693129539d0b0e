use egui::{Color32, ColorImage, Vec2};

use crate::brush::SIDE_PANEL_WIDTH;

/// The raster the stroke pipeline paints into.
///
/// Created at most once, when the app first measures its viewport, and never
/// resized afterwards. Pixels start fully transparent and are composited over
/// a white backdrop when displayed.
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl Surface {
    /// Create a surface with explicit dimensions.
    ///
    /// Returns `None` for an empty raster; callers treat a missing surface as
    /// a paint-and-export no-op rather than an error.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: vec![Color32::TRANSPARENT; width * height],
        })
    }

    /// Size a surface from the viewport measured at mount time: the tools
    /// panel is carved off the width, the full height is kept.
    pub fn from_viewport(viewport: Vec2) -> Option<Self> {
        let width = viewport.x - SIDE_PANEL_WIDTH;
        let height = viewport.y;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Self::new(width as usize, height as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Bounds-checked pixel write. Coordinates outside the raster are
    /// dropped, so shapes clip at the surface edge.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Read a single pixel; `None` outside the raster.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    /// Clone the buffer into an image egui can upload as a texture.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage {
            size: [self.width, self.height],
            pixels: self.pixels.clone(),
        }
    }
}
