//! Per-frame simulation methods for MenuEngine

use super::MenuEngine;
use crate::util::frame_timing::TARGET_FRAME_DURATION;

/// Additive guard keeping the damping divisors finite on a zero-delta
/// frame.
const TIME_SCALE_EPSILON: f32 = 1e-4;

/// Boolean state that reports only its transitions.
pub(super) struct EdgeLatch {
    active: bool,
}

impl EdgeLatch {
    pub(super) fn new() -> Self {
        Self {
            active: false,
        }
    }

    /// Latched value as of the last observation.
    pub(super) fn active(&self) -> bool {
        self.active
    }

    /// Record `state`, returning it only when it changed.
    pub(super) fn observe(&mut self, state: bool) -> Option<bool> {
        if state == self.active {
            None
        } else {
            self.active = state;
            Some(state)
        }
    }
}

impl MenuEngine {
    /// Advance rotation, snapping, the camera dolly, and the instance
    /// buffer by `delta_time` milliseconds.
    pub(super) fn animate(&mut self, delta_time: f32) {
        self.control.update(delta_time, TARGET_FRAME_DURATION);
        self.update_motion(delta_time);

        self.scene
            .write_instances(self.control.orientation, &mut self.instances);
        self.disc_renderer
            .write_instances(&self.context.queue, &self.instances);

        // Sampled after the rebuild so the stretch uniform trails the
        // control by one frame.
        self.smooth_rotation_velocity = self.control.rotation_velocity;
    }

    /// Movement detection, snap targeting, and the camera dolly.
    ///
    /// While dragging, rotation velocity pushes the camera back for an
    /// overview; while idle, the nearest anchor becomes both the snap
    /// target and the reported active item.
    fn update_motion(&mut self, delta_time: f32) {
        let time_scale =
            delta_time / TARGET_FRAME_DURATION + TIME_SCALE_EPSILON;
        let mut damping = self.options.camera.idle_damping / time_scale;
        let mut target_z = self.options.camera.distance;

        let moving = self.control.is_pointer_down
            || self.smooth_rotation_velocity.abs()
                > self.options.control.movement_threshold;
        if let Some(edge) = self.movement.observe(moving) {
            if let Some(callback) = &mut self.callbacks.on_movement_change {
                callback(edge);
            }
        }

        if self.control.is_pointer_down {
            target_z += self.control.rotation_velocity
                * self.options.camera.velocity_zoom
                + self.options.camera.drag_offset;
            damping = self.options.camera.drag_damping / time_scale;
        } else {
            let nearest = self.scene.nearest_anchor(
                self.control.orientation,
                self.control.snap_direction,
            );
            let item_index = nearest % self.items.len().max(1);
            if self.active_item != Some(item_index) {
                self.active_item = Some(item_index);
                if let Some(callback) =
                    &mut self.callbacks.on_active_item_change
                {
                    callback(item_index);
                }
            }
            self.control.snap_target_direction = Some(
                self.scene
                    .anchor_direction(nearest, self.control.orientation),
            );
        }

        self.camera.position.z +=
            (target_z - self.camera.position.z) / damping;
    }

    /// Upload a finished atlas build if the loader delivered one.
    pub(super) fn poll_atlas(&mut self) {
        if let Some(prepared) = self.atlas_loader.try_recv() {
            log::debug!(
                "atlas ready: grid edge {}, {} px",
                prepared.layout.grid_edge,
                prepared.layout.texture_size()
            );
            self.disc_renderer.set_atlases(&self.context, &prepared);
            self.atlas_grid_edge = prepared.layout.grid_edge;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeLatch;

    #[test]
    fn movement_edges_fire_once_per_crossing() {
        let threshold = 0.01_f32;
        let velocities =
            [0.0, 0.004, 0.02, 0.35, 0.12, 0.03, 0.007, 0.0, 0.002];

        let mut latch = EdgeLatch::new();
        let mut edges = Vec::new();
        for velocity in velocities {
            if let Some(state) = latch.observe(velocity > threshold) {
                edges.push(state);
            }
        }
        // One crossing up, one crossing down, nothing per-frame.
        assert_eq!(edges, vec![true, false]);
        assert!(!latch.active());
    }

    #[test]
    fn latch_starts_idle_without_an_edge() {
        let mut latch = EdgeLatch::new();
        assert_eq!(latch.observe(false), None);
        assert_eq!(latch.observe(true), Some(true));
        assert_eq!(latch.observe(true), None);
    }
}
