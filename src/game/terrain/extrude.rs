//! Contour Extrusion
//!
//! Sweeps a closed 2D outline along +Z into a capped, beveled slab:
//!
//! ```text
//!   z = -thickness      front cap (outline inset by nothing)
//!   z in (-thickness,0) front bevel rings, quarter-circle profile
//!   z = 0 .. depth      body, outline pushed out by the bevel size
//!   z in (depth, ..)    back bevel rings
//!   z = depth+thickness back cap
//! ```
//!
//! The result is flat-shaded; every face winds counter-clockwise seen from
//! outside.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::game::types::Mesh;

/// Miter scale cap so sharp corners do not spike outward.
const MITER_LIMIT: f32 = 2.0;

/// Rounded edge profile of an extruded slab.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BevelProfile {
    /// How far the body bulges past the outline
    pub size: f32,
    /// How far each cap sits past the body along the extrusion axis
    pub thickness: f32,
    /// Rings per bevel; zero gives straight walls and no bevel
    pub segments: u32,
}

impl BevelProfile {
    pub const NONE: Self = Self {
        size: 0.0,
        thickness: 0.0,
        segments: 0,
    };
}

/// Extrude a counter-clockwise outline from `z = 0` to `z = depth` with bevels.
pub fn extrude_contour(outline: &[Vec2], depth: f32, bevel: BevelProfile, color: [f32; 4]) -> Mesh {
    let mut mesh = Mesh::new();
    let n = outline.len();
    if n < 3 {
        return mesh;
    }

    let directions = offset_directions(outline);
    let rings: Vec<Vec<Vec3>> = profile(depth, bevel)
        .into_iter()
        .map(|(z, push)| {
            outline
                .iter()
                .zip(&directions)
                .map(|(&p, &dir)| (p + dir * push).extend(z))
                .collect()
        })
        .collect();

    // Walls between consecutive rings
    for pair in rings.windows(2) {
        let (near, far) = (&pair[0], &pair[1]);
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.push_quad(near[i], near[j], far[j], far[i], color);
        }
    }

    // Caps
    let center = outline.iter().copied().sum::<Vec2>() / n as f32;
    if let (Some(front), Some(back)) = (rings.first(), rings.last()) {
        let front_center = center.extend(front[0].z);
        let back_center = center.extend(back[0].z);
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.push_triangle(front_center, front[j], front[i], color);
            mesh.push_triangle(back_center, back[i], back[j], color);
        }
    }

    mesh
}

/// `(z, outward push)` per ring, front to back.
fn profile(depth: f32, bevel: BevelProfile) -> Vec<(f32, f32)> {
    if bevel.segments == 0 {
        return vec![(0.0, 0.0), (depth, 0.0)];
    }

    let segments = bevel.segments;
    let step = |b: u32| (b as f32 / segments as f32) * FRAC_PI_2;
    let front = (0..=segments).map(|b| (-bevel.thickness * step(b).cos(), bevel.size * step(b).sin()));
    let back = (0..=segments)
        .rev()
        .map(|b| (depth + bevel.thickness * step(b).cos(), bevel.size * step(b).sin()));
    front.chain(back).collect()
}

/// Per-vertex outward offset, mitered so walls stay parallel to the outline.
fn offset_directions(outline: &[Vec2]) -> Vec<Vec2> {
    let n = outline.len();
    let edge_normal = |a: Vec2, b: Vec2| {
        let d = b - a;
        Vec2::new(d.y, -d.x).normalize_or_zero()
    };

    (0..n)
        .map(|i| {
            let prev = outline[(i + n - 1) % n];
            let here = outline[i];
            let next = outline[(i + 1) % n];
            let incoming = edge_normal(prev, here);
            let outgoing = edge_normal(here, next);
            let bisector = (incoming + outgoing).normalize_or_zero();
            if bisector == Vec2::ZERO {
                return outgoing;
            }
            let cos = bisector.dot(outgoing).max(1.0 / MITER_LIMIT);
            bisector / cos
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::WHITE;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]
    }

    fn faces_outward(mesh: &Mesh, center: Vec3) -> bool {
        mesh.indices.chunks(3).all(|tri| {
            let centroid = tri
                .iter()
                .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
                .sum::<Vec3>()
                / 3.0;
            Vec3::from(mesh.vertices[tri[0] as usize].normal).dot(centroid - center) > 0.0
        })
    }

    #[test]
    fn test_plain_extrusion() {
        let mesh = extrude_contour(&square(), 2.0, BevelProfile::NONE, WHITE);
        // 4 walls x 2 + 2 caps x 4 fan triangles
        assert_eq!(mesh.triangle_count(), 8 + 8);
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(hi, Vec3::new(1.0, 1.0, 2.0));
        assert!(faces_outward(&mesh, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_bevel_extends_bounds() {
        let bevel = BevelProfile {
            size: 0.5,
            thickness: 0.25,
            segments: 3,
        };
        let mesh = extrude_contour(&square(), 2.0, bevel, WHITE);
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((lo.z + 0.25).abs() < 1e-5);
        assert!((hi.z - 2.25).abs() < 1e-5);
        // Square corners miter out by size * sqrt(2) along the diagonal
        assert!((hi.x - 1.5).abs() < 1e-4);
        assert!(faces_outward(&mesh, Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_ring_count_follows_segments() {
        let bevel = BevelProfile {
            size: 0.1,
            thickness: 0.1,
            segments: 4,
        };
        assert_eq!(profile(1.0, bevel).len(), 10);
        assert_eq!(profile(1.0, BevelProfile::NONE).len(), 2);
    }

    #[test]
    fn test_degenerate_outline_is_empty() {
        let mesh = extrude_contour(&square()[..2], 1.0, BevelProfile::NONE, WHITE);
        assert!(mesh.is_empty());
    }
}
