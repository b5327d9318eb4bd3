//! Walking on a walk mesh
//!
//! A [`WalkPoint`] pins a position to one triangle by barycentric weights.
//! [`WalkNavigator::walk`] moves it by a world-space step, carrying it over
//! shared edges onto neighbouring triangles and stopping it at boundary edges,
//! so the point never leaves the surface.
//!
//! ```
//! use glam::Vec3;
//! use walkblob::formats::WalkMesh;
//! use walkblob::navigation::WalkNavigator;
//!
//! let mesh = WalkMesh::new(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::Y],
//!     vec![Vec3::Z; 3],
//!     vec![[0, 1, 2]],
//! )?;
//! let nav = WalkNavigator::new(&mesh);
//!
//! let mut at = nav.start(Vec3::new(0.2, 0.2, 1.0)).expect("mesh has triangles");
//! nav.walk(&mut at, Vec3::new(0.1, 0.0, 0.0));
//! assert!(nav.world_point(&at).abs_diff_eq(Vec3::new(0.3, 0.2, 0.0), 1e-5));
//! # Ok::<(), walkblob::Error>(())
//! ```

mod geometry;

use crate::formats::walkmesh::WalkMesh;
use geometry::{barycentric, closest_point_on_triangle, face_normal};
use glam::{Quat, Vec3};
use std::collections::HashMap;

/// Most edge crossings a single [`WalkNavigator::walk`] call will follow.
pub const MAX_WALK_STEPS: usize = 10;

/// A point on the walk mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkPoint {
    /// Vertex indices of the current triangle (a rotation of the mesh's own order).
    pub triangle: [u32; 3],
    /// Barycentric weights within `triangle`.
    pub weights: Vec3,
}

/// Read-only walking queries over a [`WalkMesh`].
#[derive(Debug, Clone)]
pub struct WalkNavigator<'a> {
    mesh: &'a WalkMesh,
    /// `(a, b) -> c` for every triangle `abc` and its rotations, so the
    /// triangle across directed edge `(b, a)` can be found.
    next_vertex: HashMap<(u32, u32), u32>,
}

impl<'a> WalkNavigator<'a> {
    pub fn new(mesh: &'a WalkMesh) -> Self {
        let mut next_vertex = HashMap::with_capacity(mesh.triangles.len() * 3);
        for &[a, b, c] in &mesh.triangles {
            next_vertex.insert((a, b), c);
            next_vertex.insert((b, c), a);
            next_vertex.insert((c, a), b);
        }
        Self { mesh, next_vertex }
    }

    pub fn mesh(&self) -> &'a WalkMesh {
        self.mesh
    }

    /// The third vertex of the triangle containing directed edge `(a, b)`.
    pub fn next_vertex(&self, a: u32, b: u32) -> Option<u32> {
        self.next_vertex.get(&(a, b)).copied()
    }

    /// The walk point closest to `world_point`, or `None` if the mesh has no triangles.
    pub fn start(&self, world_point: Vec3) -> Option<WalkPoint> {
        let mut closest: Option<(f32, WalkPoint)> = None;

        for &triangle in &self.mesh.triangles {
            let [a, b, c] = self.mesh.triangle_positions(triangle);
            let (point, weights) = closest_point_on_triangle(world_point, a, b, c);
            let dist = point.distance_squared(world_point);

            if closest.is_none_or(|(best, _)| dist < best) {
                closest = Some((dist, WalkPoint { triangle, weights }));
            }
        }

        closest.map(|(_, wp)| wp)
    }

    /// Move `wp` by `step`, staying on the surface.
    ///
    /// Crossing into a neighbouring triangle rotates the rest of the step by
    /// the change in face normal. At a boundary edge the point stops on the edge.
    pub fn walk(&self, wp: &mut WalkPoint, step: Vec3) {
        let mut step = step;

        for crossings in 0..=MAX_WALK_STEPS {
            let [a, b, c] = self.mesh.triangle_positions(wp.triangle);
            let target = self.world_point(wp) + step;
            let projected = barycentric(target, a, b, c);
            if !projected.is_finite() {
                tracing::debug!("Degenerate triangle {:?}; stopping walk", wp.triangle);
                return;
            }

            if projected.min_element() >= 0.0 {
                wp.weights = projected;
                return;
            }

            // Edge reached first along the step
            let delta = projected - wp.weights;
            let mut crossing: Option<(usize, f32)> = None;
            for i in 0..3 {
                if projected[i] < 0.0 && delta[i] < 0.0 {
                    let t = wp.weights[i] / -delta[i];
                    if crossing.is_none_or(|(_, best)| t < best) {
                        crossing = Some((i, t));
                    }
                }
            }
            let Some((opposite, t)) = crossing else {
                return;
            };

            let mut edge_weights = wp.weights + delta * t.clamp(0.0, 1.0);
            edge_weights[opposite] = 0.0;
            let sum = edge_weights.x + edge_weights.y + edge_weights.z;
            if sum > 0.0 {
                edge_weights /= sum;
            }
            wp.weights = edge_weights;

            if crossings == MAX_WALK_STEPS {
                tracing::debug!("Walk stopped after {} edge crossings", MAX_WALK_STEPS);
                return;
            }

            let e0 = (opposite + 1) % 3;
            let e1 = (opposite + 2) % 3;
            let (v0, v1) = (wp.triangle[e0], wp.triangle[e1]);

            let Some(third) = self.next_vertex(v1, v0) else {
                // Boundary edge
                return;
            };

            let remaining = target - self.world_point(wp);
            let old_normal = face_normal(a, b, c);

            wp.triangle = [v1, v0, third];
            wp.weights = Vec3::new(edge_weights[e1], edge_weights[e0], 0.0);

            let [na, nb, nc] = self.mesh.triangle_positions(wp.triangle);
            let new_normal = face_normal(na, nb, nc);
            step = if old_normal == Vec3::ZERO || new_normal == Vec3::ZERO {
                remaining
            } else {
                Quat::from_rotation_arc(old_normal, new_normal) * remaining
            };
        }
    }

    /// World-space position of a walk point.
    pub fn world_point(&self, wp: &WalkPoint) -> Vec3 {
        let [a, b, c] = self.mesh.triangle_positions(wp.triangle);
        a * wp.weights.x + b * wp.weights.y + c * wp.weights.z
    }

    /// Interpolated vertex normal at a walk point.
    pub fn world_normal(&self, wp: &WalkPoint) -> Vec3 {
        let [a, b, c] = wp.triangle.map(|i| self.mesh.normals[i as usize]);
        (a * wp.weights.x + b * wp.weights.y + c * wp.weights.z).normalize_or_zero()
    }
}
