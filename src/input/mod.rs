//! Input handling: platform-agnostic pointer events that drive the
//! arcball control.

/// Platform-agnostic pointer events.
pub mod event;

pub use event::PointerEvent;
