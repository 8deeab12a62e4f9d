use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Fixed-target perspective camera sitting on the +Z axis.
///
/// The sphere rotates instead of the camera, so the view only ever
/// changes through the dolly distance `position.z`. The projection is
/// framed so the sphere fills a constant fraction of the viewport and
/// is recomputed exclusively on resize; per-frame dolly motion does not
/// touch it.
pub struct MenuCamera {
    /// Eye position in world space. The scene animates `z`.
    pub position: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in radians, derived from the sphere
    /// framing on resize.
    pub fov: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,

    frame_height_factor: f32,
    projection: Mat4,
}

impl MenuCamera {
    /// Create a camera at `(0, 0, distance)` looking at the origin.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, options.distance),
            up: Vec3::Y,
            aspect: 1.0,
            fov: std::f32::consts::FRAC_PI_4,
            near: options.near,
            far: options.far,
            frame_height_factor: options.frame_height_factor,
            projection: Mat4::IDENTITY,
        };
        camera.projection = Mat4::perspective_rh(
            camera.fov,
            camera.aspect,
            camera.near,
            camera.far,
        );
        camera
    }

    /// View matrix for the current eye position.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, self.up)
    }

    /// The projection matrix computed by the last
    /// [`MenuCamera::update_projection`] call.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Recompute the field of view and projection for a new viewport.
    ///
    /// The fov is chosen so a sphere of `sphere_radius` spans a fixed
    /// fraction of the frame: on wide viewports the height alone
    /// drives it, on tall viewports the height is widened by the
    /// inverse aspect so the sphere still fits horizontally.
    pub fn update_projection(
        &mut self,
        width: f32,
        height: f32,
        sphere_radius: f32,
    ) {
        self.aspect = width / height;
        let frame_height = sphere_radius * self.frame_height_factor;
        let distance = self.position.z;

        self.fov = if self.aspect > 1.0 {
            2.0 * (frame_height / distance).atan()
        } else {
            2.0 * (frame_height / self.aspect / distance).atan()
        };

        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        self.projection = Mat4::perspective_rh(
            self.fov,
            self.aspect,
            self.near,
            self.far,
        );
    }
}
