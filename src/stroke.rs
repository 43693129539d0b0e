use egui::{Color32, PointerButton, Pos2};

use crate::brush::Brush;
use crate::export;
use crate::input::InputEvent;
use crate::renderer;
use crate::surface::Surface;

/// Stroke lifecycle.
///
/// ```text
/// Idle ────pointer-down in canvas (any button)───▶ Stroking
/// Stroking ──pointer-up in canvas, surface present─▶ Idle (exports)
/// Stroking ──move outside canvas / pointer leave───▶ Idle (no export)
/// ```
///
/// At most one stroke is in flight at a time; a pointer-down while already
/// Stroking re-arms with a new anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// No stroke in progress.
    Idle,
    /// A stroke is armed; moves over the canvas paint.
    Stroking {
        /// The pointer-down position. Not used for painting, retained as
        /// the armed marker.
        anchor: Pos2,
    },
}

impl StrokeState {
    pub fn is_idle(&self) -> bool {
        matches!(self, StrokeState::Idle)
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self, StrokeState::Stroking { .. })
    }
}

/// Applies pointer events to the drawing surface.
///
/// Owns the stroke state machine and the most recent export. The surface is
/// borrowed per event; `None` (the raster was never created) degrades
/// painting and exporting to no-ops while the machine keeps running.
pub struct StrokeController {
    state: StrokeState,
    last_export: Option<String>,
}

impl Default for StrokeController {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeController {
    pub fn new() -> Self {
        Self {
            state: StrokeState::Idle,
            last_export: None,
        }
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    /// The down position of the stroke in flight, if any.
    pub fn stroke_anchor(&self) -> Option<Pos2> {
        match self.state {
            StrokeState::Stroking { anchor } => Some(anchor),
            StrokeState::Idle => None,
        }
    }

    /// The PNG data URL captured at the end of the most recent stroke.
    pub fn last_export(&self) -> Option<&str> {
        self.last_export.as_deref()
    }

    /// Route one pointer event through the state machine.
    ///
    /// Returns true when the event painted into the surface, so the caller
    /// knows to refresh its texture.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        surface: Option<&mut Surface>,
        brush: &Brush,
    ) -> bool {
        match event {
            InputEvent::PointerDown { location, .. } if location.is_in_canvas => {
                // Any button arms, surface or not; a down mid-stroke just
                // moves the anchor.
                self.state = StrokeState::Stroking {
                    anchor: location.position,
                };
                false
            }
            InputEvent::PointerMove {
                location,
                held_buttons,
            } => {
                if !location.is_in_canvas {
                    // Window-level move: force the stroke to end, without an
                    // export. Catches releases that happened off-canvas.
                    self.state = StrokeState::Idle;
                    false
                } else if self.state.is_stroking() {
                    match surface {
                        Some(surface) => {
                            let color = stroke_color(brush, held_buttons);
                            renderer::paint_brush(surface, brush, location.position, color);
                            true
                        }
                        None => false,
                    }
                } else {
                    false
                }
            }
            InputEvent::PointerUp { location, .. } if location.is_in_canvas => {
                if self.state.is_stroking() {
                    if let Some(surface) = surface {
                        match export::surface_to_png_data_url(surface) {
                            Ok(url) => self.last_export = Some(url),
                            Err(err) => log::error!("Failed to export canvas: {}", err),
                        }
                        self.state = StrokeState::Idle;
                    }
                    // Without a surface the up is ignored and the stroke
                    // stays armed (long-standing behavior).
                }
                false
            }
            InputEvent::PointerLeave { .. } => {
                // Same safety rule as the window-level move.
                self.state = StrokeState::Idle;
                false
            }
            // Ups and downs outside the canvas, and enters anywhere.
            _ => false,
        }
    }
}

/// Exactly the primary button selects the primary color; every other
/// combination, including no buttons at all, selects the secondary.
fn stroke_color(brush: &Brush, held_buttons: &[PointerButton]) -> Color32 {
    if matches!(held_buttons, [PointerButton::Primary]) {
        brush.primary_color
    } else {
        brush.secondary_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;

    fn in_canvas(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            is_in_canvas: true,
        }
    }

    fn outside(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            is_in_canvas: false,
        }
    }

    fn down_at(location: InputLocation) -> InputEvent {
        InputEvent::PointerDown {
            location,
            button: PointerButton::Primary,
        }
    }

    #[test]
    fn down_in_canvas_arms_and_records_the_anchor() {
        let mut controller = StrokeController::new();
        let mut surface = Surface::new(16, 16).unwrap();
        let brush = Brush::default();

        controller.handle_event(&down_at(in_canvas(3.0, 4.0)), Some(&mut surface), &brush);
        assert!(controller.state().is_stroking());
        assert_eq!(controller.stroke_anchor(), Some(Pos2::new(3.0, 4.0)));
    }

    #[test]
    fn down_outside_canvas_stays_idle() {
        let mut controller = StrokeController::new();
        let brush = Brush::default();

        controller.handle_event(&down_at(outside(3.0, 4.0)), None, &brush);
        assert!(controller.state().is_idle());
    }

    #[test]
    fn external_move_forces_idle_without_export() {
        let mut controller = StrokeController::new();
        let mut surface = Surface::new(16, 16).unwrap();
        let brush = Brush::default();

        controller.handle_event(&down_at(in_canvas(3.0, 4.0)), Some(&mut surface), &brush);
        controller.handle_event(
            &InputEvent::PointerMove {
                location: outside(200.0, 4.0),
                held_buttons: vec![PointerButton::Primary],
            },
            Some(&mut surface),
            &brush,
        );

        assert!(controller.state().is_idle());
        assert!(controller.last_export().is_none());
    }

    #[test]
    fn up_without_a_surface_stays_armed() {
        let mut controller = StrokeController::new();
        let brush = Brush::default();

        controller.handle_event(&down_at(in_canvas(3.0, 4.0)), None, &brush);
        controller.handle_event(
            &InputEvent::PointerUp {
                location: in_canvas(3.0, 4.0),
                button: PointerButton::Primary,
            },
            None,
            &brush,
        );

        assert!(controller.state().is_stroking());
        assert!(controller.last_export().is_none());
    }

    #[test]
    fn only_painting_moves_report_a_surface_change() {
        let mut controller = StrokeController::new();
        let mut surface = Surface::new(16, 16).unwrap();
        let brush = Brush::default();

        let idle_move = InputEvent::PointerMove {
            location: in_canvas(5.0, 5.0),
            held_buttons: vec![PointerButton::Primary],
        };
        assert!(!controller.handle_event(&idle_move, Some(&mut surface), &brush));

        controller.handle_event(&down_at(in_canvas(3.0, 4.0)), Some(&mut surface), &brush);
        assert!(controller.handle_event(&idle_move, Some(&mut surface), &brush));
    }

    #[test]
    fn re_down_mid_stroke_moves_the_anchor() {
        let mut controller = StrokeController::new();
        let mut surface = Surface::new(16, 16).unwrap();
        let brush = Brush::default();

        controller.handle_event(&down_at(in_canvas(3.0, 4.0)), Some(&mut surface), &brush);
        controller.handle_event(&down_at(in_canvas(9.0, 9.0)), Some(&mut surface), &brush);
        assert_eq!(controller.stroke_anchor(), Some(Pos2::new(9.0, 9.0)));
    }

    #[test]
    fn exactly_primary_selects_the_primary_color() {
        let brush = Brush::default();
        assert_eq!(
            stroke_color(&brush, &[PointerButton::Primary]),
            brush.primary_color
        );
        assert_eq!(stroke_color(&brush, &[]), brush.secondary_color);
        assert_eq!(
            stroke_color(&brush, &[PointerButton::Secondary]),
            brush.secondary_color
        );
        assert_eq!(
            stroke_color(&brush, &[PointerButton::Primary, PointerButton::Secondary]),
            brush.secondary_color
        );
    }
}
