use egui::{Color32, Pos2};

use crate::brush::{Brush, BrushShape};
use crate::surface::Surface;

/// Stamp one primitive of the brush's shape at the pointer position.
pub fn paint_brush(surface: &mut Surface, brush: &Brush, pos: Pos2, color: Color32) {
    match brush.shape {
        BrushShape::Disc => paint_disc(surface, pos, brush.width, color),
        BrushShape::Rectangle => paint_rectangle(surface, pos, brush.width, brush.height, color),
    }
}

/// Paint a filled disc of radius `width / 2` centered at
/// `(pos.x - width / 16, pos.y - width / 16)`.
///
/// The `width / 16` offset draws the disc slightly off-center from the
/// pointer. That is long-standing behavior; keep it.
pub fn paint_disc(surface: &mut Surface, pos: Pos2, width: f32, color: Color32) {
    let cx = pos.x - width / 16.0;
    let cy = pos.y - width / 16.0;
    let radius = width / 2.0;
    if radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;

    let x0 = (cx - radius).floor() as i32;
    let x1 = (cx + radius).ceil() as i32;
    let y0 = (cy - radius).floor() as i32;
    let y1 = (cy + radius).ceil() as i32;

    // Scan the bounding box; membership is a squared-distance test.
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy > r2 {
                continue;
            }
            surface.put_pixel(x, y, color);
        }
    }
}

/// Paint a filled `width x height` rectangle with its top-left corner at
/// exactly `(pos.x - width / 2, pos.y - height / 2)`, i.e. centered on the
/// pointer.
pub fn paint_rectangle(surface: &mut Surface, pos: Pos2, width: f32, height: f32, color: Color32) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let left = pos.x - width / 2.0;
    let top = pos.y - height / 2.0;

    // A pixel column x is covered when left <= x < left + width; same for
    // rows. Half-open, so an integer-sized rectangle covers exactly
    // width * height pixels.
    let x0 = left.ceil() as i32;
    let x1 = (left + width).ceil() as i32;
    let y0 = top.ceil() as i32;
    let y1 = (top + height).ceil() as i32;

    for y in y0..y1 {
        for x in x0..x1 {
            surface.put_pixel(x, y, color);
        }
    }
}
