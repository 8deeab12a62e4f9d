//! Carousel scene: disc anchors distributed over a subdivided icosphere.
//!
//! Owns the anchor positions and derives the per-instance disc matrices
//! from the current arcball orientation every frame. Also answers the
//! nearest-anchor query that drives snapping and active-item tracking.

use glam::{Mat4, Quat, Vec3};

use crate::geometry::Mesh;
use crate::options::LayoutOptions;
use crate::renderer::disc::DiscInstance;
use crate::util::transform::target_to;

/// Disc anchor layout over the carousel sphere.
///
/// Anchors are icosphere vertices in unrotated sphere space; rotation is
/// applied per frame from the control orientation, so the anchor list
/// itself never changes after construction.
pub struct CarouselScene {
    anchors: Vec<Vec3>,
    sphere_radius: f32,
    disc_scale: f32,
    scale_intensity: f32,
}

impl CarouselScene {
    /// Build the anchor set from the layout options.
    #[must_use]
    pub fn new(options: &LayoutOptions) -> Self {
        let mut sphere = Mesh::icosahedron();
        sphere.subdivide(options.subdivisions);
        sphere.spherize(options.sphere_radius);

        Self {
            anchors: sphere.positions(),
            sphere_radius: options.sphere_radius,
            disc_scale: options.disc_scale,
            scale_intensity: options.scale_intensity,
        }
    }

    /// Number of disc instances the scene produces.
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Rebuild the per-instance model matrices for `orientation` into
    /// `out`, reusing its allocation.
    ///
    /// Discs grow toward the view axis and shrink toward the silhouette.
    /// The trailing translation pushes each disc a sphere radius along its
    /// anchor normal so the mesh hugs the shell instead of floating at the
    /// origin.
    pub fn write_instances(&self, orientation: Quat, out: &mut Vec<DiscInstance>) {
        out.clear();
        for &anchor in &self.anchors {
            let p = orientation * anchor;
            let s = (p.z.abs() / self.sphere_radius) * self.scale_intensity
                + (1.0 - self.scale_intensity);
            let final_scale = s * self.disc_scale;

            let matrix = Mat4::from_translation(-p)
                * target_to(Vec3::ZERO, p, Vec3::Y)
                * Mat4::from_scale(Vec3::splat(final_scale))
                * Mat4::from_translation(Vec3::new(0.0, 0.0, -self.sphere_radius));

            out.push(DiscInstance::from_matrix(matrix));
        }
    }

    /// Index of the anchor most aligned with `snap_direction` once the
    /// current orientation is undone.
    #[must_use]
    pub fn nearest_anchor(&self, orientation: Quat, snap_direction: Vec3) -> usize {
        let local = orientation.conjugate() * snap_direction;

        let mut max_d = -1.0;
        let mut nearest = 0;
        for (i, &anchor) in self.anchors.iter().enumerate() {
            let d = local.dot(anchor);
            if d > max_d {
                max_d = d;
                nearest = i;
            }
        }
        nearest
    }

    /// Unit world-space direction of an anchor under `orientation`.
    #[must_use]
    pub fn anchor_direction(&self, index: usize, orientation: Quat) -> Vec3 {
        (orientation * self.anchors[index]).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_scene() -> CarouselScene {
        CarouselScene::new(&LayoutOptions::default())
    }

    #[test]
    fn default_layout_yields_42_anchors() {
        assert_eq!(default_scene().anchor_count(), 42);
    }

    #[test]
    fn nearest_anchor_maximizes_alignment() {
        let scene = default_scene();
        let snap = Vec3::new(0.0, 0.0, -1.0);
        let nearest = scene.nearest_anchor(Quat::IDENTITY, snap);

        let best = scene.anchors[nearest].dot(snap);
        for anchor in &scene.anchors {
            assert!(anchor.dot(snap) <= best + 1e-6);
        }
    }

    #[test]
    fn quarter_turn_selects_a_side_anchor() {
        let scene = default_scene();
        let snap = Vec3::new(0.0, 0.0, -1.0);
        let quarter = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        // A quarter turn about y carries the +x side of the sphere to the
        // camera, so the winner has to come from that side.
        let nearest = scene.nearest_anchor(quarter, snap);
        assert!(scene.anchors[nearest].x > 0.0);

        let best = (quarter * scene.anchors[nearest]).dot(snap);
        for anchor in &scene.anchors {
            assert!((quarter * anchor).dot(snap) <= best + 1e-6);
        }
    }

    #[test]
    fn item_binding_cycles_over_every_anchor() {
        let scene = default_scene();
        let snap = Vec3::new(0.0, 0.0, -1.0);
        let item_count = 3_usize;

        // Turn each anchor toward the camera in turn; the query must
        // pick exactly that anchor, and the modulo binding walks the
        // short item list cyclically without leaving its range.
        let mut bound = Vec::new();
        for (i, &anchor) in scene.anchors.iter().enumerate() {
            let orientation = Quat::from_rotation_arc(anchor.normalize(), snap);
            let nearest = scene.nearest_anchor(orientation, snap);
            assert_eq!(nearest, i, "nearest anchor mismatch at {i}");
            bound.push(nearest % item_count);
        }

        assert_eq!(&bound[..7], &[0, 1, 2, 0, 1, 2, 0][..]);
        assert!(bound.iter().all(|&item| item < item_count));
    }

    #[test]
    fn disc_centers_follow_their_anchors() {
        let scene = default_scene();
        let options = LayoutOptions::default();
        let mut instances = Vec::new();
        scene.write_instances(Quat::IDENTITY, &mut instances);
        assert_eq!(instances.len(), scene.anchor_count());

        for (instance, &anchor) in instances.iter().zip(&scene.anchors) {
            let matrix = Mat4::from_cols_array_2d(&instance.model);
            let center = matrix.transform_point3(Vec3::ZERO);

            let s = (anchor.z.abs() / options.sphere_radius) * options.scale_intensity
                + (1.0 - options.scale_intensity);
            let expected =
                (s * options.disc_scale - 1.0) * options.sphere_radius * anchor.normalize();
            assert!(
                (center - expected).length() < 1e-4,
                "center {center:?} expected {expected:?}"
            );
        }
    }

    #[test]
    fn facing_anchors_scale_up() {
        let scene = default_scene();
        let mut instances = Vec::new();
        scene.write_instances(Quat::IDENTITY, &mut instances);

        let polar = scene
            .anchors
            .iter()
            .position(|a| a.z.abs() > 0.9 * scene.sphere_radius);
        let equatorial = scene
            .anchors
            .iter()
            .position(|a| a.z.abs() < 0.1 * scene.sphere_radius);
        let (Some(polar), Some(equatorial)) = (polar, equatorial) else {
            panic!("expected both near-axis and equatorial anchors");
        };

        let scale_of = |i: usize| {
            let m = Mat4::from_cols_array_2d(&instances[i].model);
            m.x_axis.truncate().length()
        };
        assert!(scale_of(polar) > scale_of(equatorial));
    }

    #[test]
    fn pole_anchor_matrices_stay_finite() {
        let scene = default_scene();
        let mut instances = Vec::new();
        scene.write_instances(Quat::IDENTITY, &mut instances);

        let pole = scene
            .anchors
            .iter()
            .position(|a| (a.y.abs() - scene.sphere_radius).abs() < 1e-3)
            .unwrap();
        let matrix = Mat4::from_cols_array_2d(&instances[pole].model);
        assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
