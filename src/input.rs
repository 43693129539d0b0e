use egui::{Context, PointerButton, Pos2, Rect};

/// Where a pointer event landed, in the drawing surface's coordinate space.
#[derive(Debug, Clone, Copy)]
pub struct InputLocation {
    /// Position in surface-local coordinates (origin at the canvas top-left).
    pub position: Pos2,
    /// Whether the position is within the canvas bounds.
    pub is_in_canvas: bool,
}

/// Platform-agnostic pointer events driving the stroke controller.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons held while the pointer moved
        held_buttons: Vec<PointerButton>,
    },
    /// Mouse entered the application window
    PointerEnter { location: InputLocation },
    /// Mouse left the application window
    PointerLeave { last_known_location: InputLocation },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerUp { location, .. }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::PointerEnter { location } => location.is_in_canvas,
            InputEvent::PointerLeave { last_known_location } => last_known_location.is_in_canvas,
        }
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
pub struct InputHandler {
    /// Last hover position, in screen coordinates.
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect: None,
        }
    }

    /// Update the canvas rectangle (screen coordinates), fed back from the
    /// central panel every frame.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    /// Creates an InputLocation from a screen position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        match self.canvas_rect {
            Some(rect) => InputLocation {
                position: (pos - rect.min).to_pos2(),
                is_in_canvas: rect.contains(pos),
            },
            // No canvas yet: everything counts as outside.
            None => InputLocation {
                position: pos,
                is_in_canvas: false,
            },
        }
    }

    /// Process one frame of raw egui input into ordered InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            // Track pointer position
            if let Some(pos) = input.pointer.hover_pos() {
                // If we didn't have a position before, this is a pointer enter
                if self.last_pointer_pos.is_none() {
                    events.push(InputEvent::PointerEnter {
                        location: self.make_location(pos),
                    });
                }

                // If position changed, this is a move
                if Some(pos) != self.last_pointer_pos {
                    let mut held_buttons = Vec::new();
                    for button in [
                        PointerButton::Primary,
                        PointerButton::Secondary,
                        PointerButton::Middle,
                    ] {
                        // A button released this frame was still held while
                        // the pointer moved; count it so the final move of a
                        // drag keeps its color.
                        if input.pointer.button_down(button)
                            || input.pointer.button_released(button)
                        {
                            held_buttons.push(button);
                        }
                    }
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        held_buttons,
                    });
                }

                self.last_pointer_pos = Some(pos);
            } else if let Some(last) = self.last_pointer_pos.take() {
                // Pointer left the window
                events.push(InputEvent::PointerLeave {
                    last_known_location: self.make_location(last),
                });
            }

            // Handle button presses and releases
            for button in [
                PointerButton::Primary,
                PointerButton::Secondary,
                PointerButton::Middle,
            ] {
                if input.pointer.button_pressed(button) {
                    if let Some(pos) = input.pointer.hover_pos() {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
                if input.pointer.button_released(button) {
                    if let Some(pos) = input.pointer.hover_pos() {
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }
            }
        });

        events
    }
}
