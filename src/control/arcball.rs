use glam::{Quat, Vec2, Vec3};

use crate::options::ControlOptions;

/// Minimum `sin(angle/2)` before axis extraction is skipped.
const AXIS_EPSILON: f32 = 1e-6;

/// Pointer-driven rotation state for the sphere.
///
/// The orientation quaternion is exclusively owned and mutated here;
/// downstream consumers read it (plus the smoothed axis/velocity pair)
/// once per frame.
pub struct ArcballControl {
    /// True between pointer down and up/leave.
    pub is_pointer_down: bool,
    /// Running orientation of the sphere. Unit length after every
    /// [`ArcballControl::update`].
    pub orientation: Quat,
    /// Incremental rotation contributed by the pointer this frame.
    pub pointer_rotation: Quat,
    /// Smoothed scalar angular velocity, normalized by the time scale.
    pub rotation_velocity: f32,
    /// Smoothed unit rotation axis.
    pub rotation_axis: Vec3,
    /// Fixed direction the snapped vertex should settle onto.
    pub snap_direction: Vec3,
    /// Target direction supplied by the orchestrator while idle.
    pub snap_target_direction: Option<Vec3>,

    options: ControlOptions,
    viewport: Vec2,
    pointer_pos: Vec2,
    previous_pointer_pos: Vec2,
    velocity_state: f32,
    combined_smooth: Quat,
}

impl ArcballControl {
    /// Create a controller for a surface of the given logical size.
    #[must_use]
    pub fn new(viewport: Vec2, options: ControlOptions) -> Self {
        Self {
            is_pointer_down: false,
            orientation: Quat::IDENTITY,
            pointer_rotation: Quat::IDENTITY,
            rotation_velocity: 0.0,
            rotation_axis: Vec3::X,
            snap_direction: Vec3::new(0.0, 0.0, -1.0),
            snap_target_direction: None,
            options,
            viewport,
            pointer_pos: Vec2::ZERO,
            previous_pointer_pos: Vec2::ZERO,
            velocity_state: 0.0,
            combined_smooth: Quat::IDENTITY,
        }
    }

    /// Update the logical viewport size used by the trackball
    /// projection.
    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size;
    }

    /// Begin a drag at the given logical pointer position.
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer_pos = pos;
        self.previous_pointer_pos = pos;
        self.is_pointer_down = true;
    }

    /// Track the pointer while a drag is active; ignored otherwise.
    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.is_pointer_down {
            self.pointer_pos = pos;
        }
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.is_pointer_down = false;
    }

    /// Treat the pointer leaving the surface as a release.
    pub fn pointer_leave(&mut self) {
        self.is_pointer_down = false;
    }

    /// Advance the rotation state by `delta_time` milliseconds against a
    /// `target_frame_duration` of one 60 fps frame.
    pub fn update(&mut self, delta_time: f32, target_frame_duration: f32) {
        let time_scale = delta_time / target_frame_duration + 1e-5;
        let mut angle_factor = time_scale;
        let mut snap_rotation = Quat::IDENTITY;

        if self.is_pointer_down {
            let intensity = self.options.drag_intensity * time_scale;
            let amplification = self.options.angle_amplification / time_scale;
            let step = (self.pointer_pos - self.previous_pointer_pos) * intensity;

            if step.length_squared() > self.options.drag_epsilon {
                let mid = self.previous_pointer_pos + step;

                let a = self.project(mid).normalize();
                let b = self.project(self.previous_pointer_pos).normalize();

                self.previous_pointer_pos = mid;

                angle_factor *= amplification;
                self.pointer_rotation = quat_from_vectors(a, b, angle_factor);
            } else {
                self.pointer_rotation =
                    self.pointer_rotation.slerp(Quat::IDENTITY, intensity);
            }
        } else {
            let intensity = self.options.idle_intensity * time_scale;
            self.pointer_rotation =
                self.pointer_rotation.slerp(Quat::IDENTITY, intensity);

            if let Some(target) = self.snap_target_direction {
                let sqr_dist = (target - self.snap_direction).length_squared();
                let distance_factor = (1.0 - sqr_dist * 10.0).max(0.1);
                angle_factor *= self.options.snap_intensity * distance_factor;
                snap_rotation =
                    quat_from_vectors(target, self.snap_direction, angle_factor);
            }
        }

        let combined = snap_rotation * self.pointer_rotation;
        self.orientation = (combined * self.orientation).normalize();

        // Quaternions accumulate drift under repeated composition; the
        // renormalization above must run every step.

        let axis_intensity = self.options.axis_smoothing * time_scale;
        self.combined_smooth = self
            .combined_smooth
            .slerp(combined, axis_intensity)
            .normalize();

        let rad = self.combined_smooth.w.clamp(-1.0, 1.0).acos() * 2.0;
        let s = (rad / 2.0).sin();
        let mut raw_velocity = 0.0;
        if s > AXIS_EPSILON {
            raw_velocity = rad / (2.0 * std::f32::consts::PI);
            self.rotation_axis = Vec3::new(
                self.combined_smooth.x / s,
                self.combined_smooth.y / s,
                self.combined_smooth.z / s,
            );
        }

        let velocity_intensity = self.options.velocity_smoothing * time_scale;
        self.velocity_state +=
            (raw_velocity - self.velocity_state) * velocity_intensity;
        self.rotation_velocity = self.velocity_state / time_scale;
    }

    /// Shoemake trackball projection: points inside the hemisphere
    /// radius land on `sqrt(r^2 - x^2 - y^2)`, points outside on the
    /// hyperbolic sheet `r^2 / sqrt(x^2 + y^2)`, giving a smooth
    /// transition at the boundary.
    fn project(&self, pos: Vec2) -> Vec3 {
        let r = self.options.trackball_radius;
        let w = self.viewport.x;
        let h = self.viewport.y;
        let s = w.max(h) - 1.0;

        let x = (2.0 * pos.x - w - 1.0) / s;
        let y = (2.0 * pos.y - h - 1.0) / s;
        let xy_sq = x * x + y * y;
        let r_sq = r * r;

        let z = if xy_sq <= r_sq / 2.0 {
            (r_sq - xy_sq).sqrt()
        } else {
            r_sq / xy_sq.sqrt()
        };

        Vec3::new(-x, y, z)
    }
}

/// Rotation carrying `a` onto `b`, with the angle scaled by
/// `angle_factor`. Parallel inputs produce a zero axis and collapse to
/// a w-only quaternion, which the caller's normalization absorbs.
fn quat_from_vectors(a: Vec3, b: Vec3, angle_factor: f32) -> Quat {
    let axis = a.cross(b).normalize_or_zero();
    let d = a.dot(b).clamp(-1.0, 1.0);
    let angle = d.acos() * angle_factor;
    let half = angle * 0.5;
    Quat::from_xyzw(
        axis.x * half.sin(),
        axis.y * half.sin(),
        axis.z * half.sin(),
        half.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1000.0 / 60.0;

    fn control() -> ArcballControl {
        ArcballControl::new(Vec2::new(800.0, 600.0), ControlOptions::default())
    }

    #[test]
    fn orientation_stays_unit_under_repeated_updates() {
        let mut c = control();
        c.pointer_down(Vec2::new(400.0, 300.0));
        for i in 0..500 {
            c.pointer_move(Vec2::new(400.0 + (i as f32 * 0.7).sin() * 200.0, 300.0 + i as f32));
            c.update(FRAME, FRAME);
        }
        assert!((c.orientation.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn drag_rotates_the_sphere() {
        let mut c = control();
        c.pointer_down(Vec2::new(200.0, 300.0));
        for i in 0..10 {
            c.pointer_move(Vec2::new(200.0 + i as f32 * 30.0, 300.0));
            c.update(FRAME, FRAME);
        }
        let angle = c.orientation.angle_between(Quat::IDENTITY);
        assert!(angle > 0.01, "expected rotation, got {angle}");
    }

    #[test]
    fn sub_epsilon_drag_leaves_orientation_alone() {
        let mut c = control();
        c.pointer_down(Vec2::new(400.0, 300.0));
        for _ in 0..20 {
            c.pointer_move(Vec2::new(400.2, 300.1));
            c.update(FRAME, FRAME);
        }
        let angle = c.orientation.angle_between(Quat::IDENTITY);
        assert!(angle < 1e-3, "jitter leaked into orientation: {angle}");
    }

    #[test]
    fn pointer_rotation_decays_while_idle() {
        let mut c = control();
        c.pointer_down(Vec2::new(100.0, 300.0));
        c.pointer_move(Vec2::new(500.0, 300.0));
        c.update(FRAME, FRAME);
        c.pointer_up();

        for _ in 0..300 {
            c.update(FRAME, FRAME);
        }
        let residual = c.pointer_rotation.angle_between(Quat::IDENTITY);
        assert!(residual < 1e-3, "pointer rotation kept spinning: {residual}");
    }

    #[test]
    fn idle_snap_converges_within_200_ticks() {
        let mut c = control();
        // Give the sphere an arbitrary starting orientation.
        c.orientation =
            Quat::from_axis_angle(Vec3::new(0.3, 0.8, 0.52).normalize(), 1.2);

        // A fixed rest-space vertex the orchestrator wants facing the
        // snap direction.
        let rest = Vec3::new(0.0, 0.0, -1.0);
        let mut last_angle = f32::MAX;
        let mut converged = false;

        for _ in 0..200 {
            let world = (c.orientation * rest).normalize();
            c.snap_target_direction = Some(world);
            c.update(16.0, FRAME);

            let angle = (c.orientation * rest).dot(c.snap_direction).clamp(-1.0, 1.0).acos();
            assert!(angle <= last_angle + 1e-4, "snap diverged: {angle} > {last_angle}");
            last_angle = angle;
            if angle < 0.01 {
                converged = true;
                break;
            }
        }
        assert!(converged, "snap did not converge, residual {last_angle}");
    }

    #[test]
    fn projection_crosses_to_hyperbolic_sheet() {
        let c = control();
        // Screen center lands near the hemisphere apex.
        let center = c.project(Vec2::new(400.0, 300.0));
        assert!((center.z - c.options.trackball_radius).abs() < 0.05);
        // A far corner lands on the sheet, below the apex.
        let corner = c.project(Vec2::new(3000.0, 300.0));
        assert!(corner.z < center.z);
        assert!(corner.z > 0.0);
    }

    #[test]
    fn projection_mirrors_x() {
        let c = control();
        let right = c.project(Vec2::new(700.0, 300.0));
        assert!(right.x < 0.0);
        let left = c.project(Vec2::new(100.0, 300.0));
        assert!(left.x > 0.0);
    }

    #[test]
    fn quat_from_parallel_vectors_is_identity_like() {
        let q = quat_from_vectors(Vec3::Z, Vec3::Z, 5.0);
        assert!((q.w - 1.0).abs() < 1e-6);
        assert!(q.x.abs() < 1e-6 && q.y.abs() < 1e-6 && q.z.abs() < 1e-6);
    }

    #[test]
    fn velocity_tracks_spin_and_settles() {
        let mut c = control();
        c.pointer_down(Vec2::new(100.0, 300.0));
        for i in 0..30 {
            c.pointer_move(Vec2::new(100.0 + i as f32 * 40.0, 300.0));
            c.update(FRAME, FRAME);
        }
        assert!(c.rotation_velocity.abs() > 1e-3);

        c.pointer_up();
        for _ in 0..600 {
            c.update(FRAME, FRAME);
        }
        assert!(c.rotation_velocity.abs() < 1e-3);
    }
}
