use std::collections::HashMap;

use glam::{Vec2, Vec3};

/// A single mesh vertex. Normals are filled in by [`Mesh::spherize`];
/// the disc leaves them at zero (its shader never reads them).
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Object-space position.
    pub position: Vec3,
    /// Unit normal (valid after spherize).
    pub normal: Vec3,
    /// Texture coordinate.
    pub uv: Vec2,
}

impl Vertex {
    fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            normal: Vec3::ZERO,
            uv: Vec2::ZERO,
        }
    }
}

/// A triangle referencing three vertex indices.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// First corner.
    pub a: u32,
    /// Second corner.
    pub b: u32,
    /// Third corner.
    pub c: u32,
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex list. Subdivision only ever appends.
    pub vertices: Vec<Vertex>,
    /// Triangle list. Subdivision replaces this wholesale.
    pub faces: Vec<Face>,
}

impl Mesh {
    /// The canonical 12-vertex, 20-face icosahedron with circumradius
    /// `sqrt(t^2 + 1)` where `t` is the golden ratio. Call
    /// [`Mesh::spherize`] to project onto a sphere of chosen radius.
    #[must_use]
    pub fn icosahedron() -> Self {
        let t = 5.0_f32.sqrt() * 0.5 + 0.5;

        let vertices = vec![
            Vertex::at(-1.0, t, 0.0),
            Vertex::at(1.0, t, 0.0),
            Vertex::at(-1.0, -t, 0.0),
            Vertex::at(1.0, -t, 0.0),
            Vertex::at(0.0, -1.0, t),
            Vertex::at(0.0, 1.0, t),
            Vertex::at(0.0, -1.0, -t),
            Vertex::at(0.0, 1.0, -t),
            Vertex::at(t, 0.0, -1.0),
            Vertex::at(t, 0.0, 1.0),
            Vertex::at(-t, 0.0, -1.0),
            Vertex::at(-t, 0.0, 1.0),
        ];

        let faces = [
            (0, 11, 5),
            (0, 5, 1),
            (0, 1, 7),
            (0, 7, 10),
            (0, 10, 11),
            (1, 5, 9),
            (5, 11, 4),
            (11, 10, 2),
            (10, 7, 6),
            (7, 1, 8),
            (3, 9, 4),
            (3, 4, 2),
            (3, 2, 6),
            (3, 6, 8),
            (3, 8, 9),
            (4, 9, 5),
            (2, 4, 11),
            (6, 2, 10),
            (8, 6, 7),
            (9, 8, 1),
        ]
        .iter()
        .map(|&(a, b, c)| Face { a, b, c })
        .collect();

        Self { vertices, faces }
    }

    /// A fan-triangulated disc in the XY plane: one center vertex plus
    /// `steps` rim vertices with a full 0..1 UV mapping. `steps` is
    /// clamped to a minimum of 4.
    #[must_use]
    pub fn disc(steps: u32, radius: f32) -> Self {
        let steps = steps.max(4);
        let alpha = 2.0 * std::f32::consts::PI / steps as f32;

        let mut mesh = Self::default();
        let mut center = Vertex::at(0.0, 0.0, 0.0);
        center.uv = Vec2::new(0.5, 0.5);
        mesh.vertices.push(center);

        for i in 0..steps {
            let x = (alpha * i as f32).cos();
            let y = (alpha * i as f32).sin();
            let mut v = Vertex::at(radius * x, radius * y, 0.0);
            v.uv = Vec2::new(x * 0.5 + 0.5, y * 0.5 + 0.5);
            mesh.vertices.push(v);

            if i > 0 {
                mesh.faces.push(Face { a: 0, b: i, c: i + 1 });
            }
        }
        mesh.faces.push(Face { a: 0, b: steps, c: 1 });

        mesh
    }

    /// Perform `levels` passes of 4-way face subdivision. Each edge's
    /// midpoint vertex is created exactly once, keyed by the unordered
    /// endpoint pair; midpoints are plain averages (projection onto the
    /// sphere happens separately in [`Mesh::spherize`]).
    pub fn subdivide(&mut self, levels: u32) {
        let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();

        for _ in 0..levels {
            let mut next = Vec::with_capacity(self.faces.len() * 4);

            for i in 0..self.faces.len() {
                let Face { a, b, c } = self.faces[i];
                let ab = self.midpoint(&mut midpoint_cache, a, b);
                let bc = self.midpoint(&mut midpoint_cache, b, c);
                let ca = self.midpoint(&mut midpoint_cache, c, a);

                next.push(Face { a, b: ab, c: ca });
                next.push(Face { a: b, b: bc, c: ab });
                next.push(Face { a: c, b: ca, c: bc });
                next.push(Face { a: ab, b: bc, c: ca });
            }

            self.faces = next;
        }
    }

    /// Project every vertex onto a sphere: normal becomes the
    /// normalized position, position becomes `radius * normal`.
    /// Idempotent for a fixed radius.
    pub fn spherize(&mut self, radius: f32) {
        for v in &mut self.vertices {
            v.normal = v.position.normalize();
            v.position = v.normal * radius;
        }
    }

    /// Vertex positions in index order.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Flattened triangle index list.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.faces.iter().flat_map(|f| [f.a, f.b, f.c]).collect()
    }

    fn midpoint(
        &mut self,
        cache: &mut HashMap<(u32, u32), u32>,
        a: u32,
        b: u32,
    ) -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&idx) = cache.get(&key) {
            return idx;
        }

        let pa = self.vertices[a as usize].position;
        let pb = self.vertices[b as usize].position;
        let idx = self.vertices.len() as u32;
        let mut v = Vertex::at(0.0, 0.0, 0.0);
        v.position = (pa + pb) * 0.5;
        self.vertices.push(v);
        let _ = cache.insert(key, idx);
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icosahedron_has_canonical_counts() {
        let mesh = Mesh::icosahedron();
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.faces.len(), 20);
    }

    #[test]
    fn one_subdivision_yields_42_vertices_80_faces() {
        let mut mesh = Mesh::icosahedron();
        mesh.subdivide(1);
        // 12 base vertices + 30 edge midpoints
        assert_eq!(mesh.vertices.len(), 42);
        assert_eq!(mesh.faces.len(), 80);
    }

    #[test]
    fn second_subdivision_adds_one_vertex_per_edge() {
        let mut mesh = Mesh::icosahedron();
        mesh.subdivide(2);
        // Level 1 has 42 vertices, 80 faces, 120 edges (3F/2)
        assert_eq!(mesh.vertices.len(), 162);
        assert_eq!(mesh.faces.len(), 320);
    }

    #[test]
    fn face_indices_stay_in_bounds() {
        let mut mesh = Mesh::icosahedron();
        mesh.subdivide(2);
        let n = mesh.vertices.len() as u32;
        for f in &mesh.faces {
            assert!(f.a < n && f.b < n && f.c < n);
        }
    }

    #[test]
    fn spherize_is_idempotent() {
        let mut once = Mesh::icosahedron();
        once.subdivide(1);
        once.spherize(2.0);

        let mut twice = once.clone();
        twice.spherize(2.0);

        for (a, b) in once.vertices.iter().zip(twice.vertices.iter()) {
            assert!((a.position - b.position).length() < 1e-6);
        }
    }

    #[test]
    fn spherize_puts_vertices_on_radius() {
        let mut mesh = Mesh::icosahedron();
        mesh.subdivide(1);
        mesh.spherize(2.0);
        for v in &mesh.vertices {
            assert!((v.position.length() - 2.0).abs() < 1e-5);
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn disc_clamps_steps_to_four() {
        let mesh = Mesh::disc(1, 1.0);
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.faces.len(), 4);
    }

    #[test]
    fn disc_fan_counts_and_uvs() {
        let mesh = Mesh::disc(56, 1.0);
        assert_eq!(mesh.vertices.len(), 57);
        assert_eq!(mesh.faces.len(), 56);
        assert_eq!(mesh.vertices[0].uv, Vec2::new(0.5, 0.5));
        // Rim vertex 0 sits at angle 0: position (1, 0, 0), uv (1, 0.5)
        assert!((mesh.vertices[1].position - Vec3::X).length() < 1e-6);
        assert!((mesh.vertices[1].uv - Vec2::new(1.0, 0.5)).length() < 1e-6);
        // Closing face wraps the fan back to the first rim vertex
        let last = mesh.faces[mesh.faces.len() - 1];
        assert_eq!((last.a, last.b, last.c), (0, 56, 1));
    }

    #[test]
    fn shared_edges_reuse_midpoints() {
        let mut mesh = Mesh::icosahedron();
        mesh.subdivide(1);
        // Every midpoint is shared by two faces; if the cache key were
        // directional the count would be 12 + 60 instead.
        assert_eq!(mesh.vertices.len(), 42);
    }
}
