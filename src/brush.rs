use egui::Color32;
use serde::{Deserialize, Serialize};

/// Width in points of the brush-settings side panel. The drawing surface is
/// sized to fill the rest of the viewport (see `Surface::from_viewport`).
pub const SIDE_PANEL_WIDTH: f32 = 220.0;

/// Which primitive a stroke stamps at each pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushShape {
    /// Filled disc of radius `width / 2`.
    Disc,
    /// Filled `width x height` rectangle centered on the pointer.
    Rectangle,
}

impl BrushShape {
    pub const ALL: [BrushShape; 2] = [BrushShape::Disc, BrushShape::Rectangle];

    /// Display name for the tools panel.
    pub fn label(self) -> &'static str {
        match self {
            BrushShape::Disc => "Disc",
            BrushShape::Rectangle => "Rectangle",
        }
    }
}

/// The active paint configuration.
///
/// Edited in the tools panel and persisted across sessions; the stroke
/// pipeline treats it as read-only for the duration of a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub shape: BrushShape,
    /// Paint color while exactly the primary button is held.
    pub primary_color: Color32,
    /// Paint color for every other button combination.
    pub secondary_color: Color32,
    /// Carried in the configuration; the shape renderers do not read it.
    pub opacity: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            shape: BrushShape::Disc,
            primary_color: Color32::BLACK,
            secondary_color: Color32::WHITE,
            opacity: 1.0,
            width: 16.0,
            height: 16.0,
        }
    }
}
