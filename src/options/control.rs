use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Arcball rotation feel parameters.
///
/// Intensities are interpolation factors per 60 fps frame; the control
/// multiplies them by the frame's time scale before use.
pub struct ControlOptions {
    /// Pointer step intensity while dragging.
    pub drag_intensity: f32,
    /// Decay intensity applied to leftover rotation while idle.
    pub idle_intensity: f32,
    /// Multiplier on the drag rotation angle.
    pub angle_amplification: f32,
    /// Strength of the idle pull toward the snap direction.
    pub snap_intensity: f32,
    /// Smoothing factor for the rotation axis/velocity estimate.
    pub axis_smoothing: f32,
    /// Smoothing factor for the scalar velocity estimate.
    pub velocity_smoothing: f32,
    /// Squared pointer step below which a drag frame is ignored.
    pub drag_epsilon: f32,
    /// Virtual trackball sphere radius.
    pub trackball_radius: f32,
    /// Rotation velocity above which the carousel counts as moving.
    pub movement_threshold: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            drag_intensity: 0.3,
            idle_intensity: 0.1,
            angle_amplification: 5.0,
            snap_intensity: 0.2,
            axis_smoothing: 0.8,
            velocity_smoothing: 0.5,
            drag_epsilon: 0.1,
            trackball_radius: 2.0,
            movement_threshold: 0.01,
        }
    }
}
