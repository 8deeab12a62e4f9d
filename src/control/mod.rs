//! Arcball interaction control.
//!
//! Converts pointer drags into an incremental rotation quaternion using
//! the Shoemake virtual-trackball projection, applies damping/inertia,
//! and while idle pulls the sphere so that a supplied target direction
//! settles onto the fixed snap direction. Every interpolation factor is
//! scaled by `delta_time / target_frame_duration`, keeping the feel
//! independent of refresh rate.

/// Virtual-trackball rotation controller.
pub mod arcball;

pub use arcball::ArcballControl;
