use glam::{Mat4, Vec3};

/// Matrix that positions `eye` and orients its local +Z toward the
/// direction from `target` to `eye` (so -Z faces the target).
///
/// Zero-length intermediates are left unnormalized rather than turned
/// into NaN: when `up` is parallel to the view direction the X and Y
/// columns collapse to zero and the caller gets a flattened basis.
/// The sphere layout relies on this at the two pole anchors.
#[must_use]
pub fn target_to(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let mut z = eye - target;
    let len_sq = z.length_squared();
    if len_sq > 0.0 {
        z /= len_sq.sqrt();
    }

    let mut x = up.cross(z);
    let len_sq = x.length_squared();
    if len_sq > 0.0 {
        x /= len_sq.sqrt();
    }

    let y = z.cross(x);

    Mat4::from_cols(
        x.extend(0.0),
        y.extend(0.0),
        z.extend(0.0),
        eye.extend(1.0),
    )
}
