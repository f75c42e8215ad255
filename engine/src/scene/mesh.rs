//! Mesh and Material Types
//!
//! CPU-side geometry (flat-shaded triangle lists) and the standard material
//! attached to every mesh node.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

// ============================================================================
// GPU VERTEX TYPES
// ============================================================================

/// Vertex for terrain and blocks
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<Vertex>(), 40);

// ============================================================================
// MESH STRUCTURE
// ============================================================================

/// A mesh with vertices and indices
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a triangle with its own flat face normal.
    ///
    /// Zero-area triangles get a zero normal instead of NaNs.
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
        let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
        let base = self.vertices.len() as u32;
        for p in [a, b, c] {
            self.vertices.push(Vertex {
                position: p.to_array(),
                normal,
                color,
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Append a planar quad `a b c d` (counter-clockwise from the front).
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, color: [f32; 4]) {
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    /// Apply an affine transform to positions and normals in place.
    pub fn transform(&mut self, matrix: Mat4) {
        let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();
        for v in &mut self.vertices {
            v.position = matrix.transform_point3(Vec3::from(v.position)).to_array();
            v.normal = (normal_matrix * Vec3::from(v.normal))
                .normalize_or_zero()
                .to_array();
        }
    }

    /// Axis-aligned bounds, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(self.vertices.first()?.position);
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let p = Vec3::from(v.position);
            (lo.min(p), hi.max(p))
        }))
    }
}

// ============================================================================
// MATERIAL
// ============================================================================

/// Physically-flavored standard material, colors in linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    /// Matte material without emission.
    pub fn standard(color: [f32; 3]) -> Self {
        Self {
            color,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            roughness: 1.0,
            metalness: 0.0,
        }
    }

    /// Material that glows in its own color.
    pub fn self_lit(color: [f32; 3], emissive_intensity: f32, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            emissive: color,
            emissive_intensity,
            roughness,
            metalness,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard([1.0; 3])
    }
}
