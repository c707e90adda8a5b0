use egui::{PointerButton, Pos2, Rect, Response};

/// Pointer activity on the canvas, in canvas-local logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed inside the canvas
    Down { position: Pos2 },
    /// Pointer moved while inside the canvas (button state is not implied)
    Move { position: Pos2 },
    /// Primary button released anywhere
    Up,
    /// Pointer left the canvas or the window
    Leave,
}

/// Converts egui's raw per-frame event list into [`PointerEvent`]s, preserving
/// arrival order.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Whether the last known pointer position was inside the canvas
    inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates this frame's events for the canvas widget behind `response`.
    ///
    /// egui's hit test decides whether the canvas owns the pointer, so presses
    /// and drags on popups layered above it never reach the surface.
    pub fn process_input(
        &mut self,
        ctx: &egui::Context,
        response: &Response,
    ) -> Vec<PointerEvent> {
        let owns_pointer = response.contains_pointer() || response.is_pointer_button_down_on();
        ctx.input(|input| self.process_events(&input.events, response.rect, owns_pointer))
    }

    /// Translates `events` in order. Positions only count as on the canvas
    /// when they fall inside `canvas_rect` and `owns_pointer` is set.
    pub fn process_events(
        &mut self,
        events: &[egui::Event],
        canvas_rect: Rect,
        owns_pointer: bool,
    ) -> Vec<PointerEvent> {
        let on_canvas = |pos: Pos2| owns_pointer && canvas_rect.contains(pos);
        let mut out = Vec::new();

        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    if on_canvas(*pos) {
                        self.inside = true;
                        out.push(PointerEvent::Move {
                            position: to_local(*pos, canvas_rect),
                        });
                    } else if self.inside {
                        self.inside = false;
                        out.push(PointerEvent::Leave);
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    self.inside = on_canvas(*pos);
                    if !*pressed {
                        out.push(PointerEvent::Up);
                    } else if self.inside {
                        out.push(PointerEvent::Down {
                            position: to_local(*pos, canvas_rect),
                        });
                    }
                }
                egui::Event::PointerGone => {
                    if self.inside {
                        self.inside = false;
                        out.push(PointerEvent::Leave);
                    }
                }
                _ => {}
            }
        }

        out
    }
}

fn to_local(pos: Pos2, canvas_rect: Rect) -> Pos2 {
    (pos - canvas_rect.min).to_pos2()
}
