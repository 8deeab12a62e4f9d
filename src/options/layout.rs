use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Sphere and disc layout parameters.
pub struct LayoutOptions {
    /// Radius of the carousel sphere.
    pub sphere_radius: f32,
    /// Icosahedron subdivision passes. One pass yields 42 anchors.
    pub subdivisions: u32,
    /// Rim segments of the disc fan.
    pub disc_steps: u32,
    /// Disc radius before instance scaling.
    pub disc_radius: f32,
    /// Base uniform scale applied to every disc.
    pub disc_scale: f32,
    /// How strongly front/back position modulates disc scale.
    pub scale_intensity: f32,
    /// Multiplier on the smoothed velocity fed to the stretch shader.
    pub stretch_velocity_boost: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            sphere_radius: 2.0,
            subdivisions: 1,
            disc_steps: 56,
            disc_radius: 1.0,
            disc_scale: 0.25,
            scale_intensity: 0.6,
            stretch_velocity_boost: 1.1,
        }
    }
}
