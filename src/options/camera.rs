use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera framing and dolly parameters.
pub struct CameraOptions {
    /// Resting eye distance from the sphere center.
    pub distance: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// Fraction of the sphere radius the projection frames vertically.
    pub frame_height_factor: f32,
    /// Dolly smoothing divisor while idle.
    pub idle_damping: f32,
    /// Dolly smoothing divisor while dragging.
    pub drag_damping: f32,
    /// How far rotation velocity pushes the camera back while dragging.
    pub velocity_zoom: f32,
    /// Constant extra pull-back while a drag is active.
    pub drag_offset: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 3.0,
            near: 0.1,
            far: 40.0,
            frame_height_factor: 0.35,
            idle_damping: 5.0,
            drag_damping: 7.0,
            velocity_zoom: 80.0,
            drag_offset: 2.5,
        }
    }
}
