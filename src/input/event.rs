/// Platform-agnostic pointer events.
///
/// These are fed into
/// [`MenuEngine::handle_pointer`](crate::engine::MenuEngine::handle_pointer),
/// which forwards them to the arcball control.
///
/// # Example
///
/// ```ignore
/// engine.handle_pointer(PointerEvent::CursorMoved { x: 100.0, y: 200.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to an absolute window position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// A pointer button was pressed or released. The carousel grabs on any
    /// button, so the event does not say which one changed.
    Button {
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Pointer left the window.
    CursorLeft,
}
