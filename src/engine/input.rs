//! Pointer dispatch methods for MenuEngine

use glam::Vec2;

use super::MenuEngine;
use crate::input::PointerEvent;

impl MenuEngine {
    /// Process a platform-agnostic pointer event.
    ///
    /// Button events act at the last reported cursor position, so hosts
    /// only need to forward events in the order the platform delivers
    /// them.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_pointer(PointerEvent::CursorMoved { x, y });
    /// engine.handle_pointer(PointerEvent::Button { pressed: true });
    /// ```
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                self.control.pointer_move(self.cursor);
            }
            PointerEvent::Button { pressed: true } => {
                self.control.pointer_down(self.cursor);
            }
            PointerEvent::Button { pressed: false } => {
                self.control.pointer_up();
            }
            PointerEvent::CursorLeft => {
                self.control.pointer_leave();
            }
        }
    }
}
