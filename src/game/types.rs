//! Shared Types Module
//!
//! Hex colors and the primitive mesh generators shared by the terrain and
//! structure modules.

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use crate::scene::{Material, Mesh, Vertex};

/// Vertex tint for generated primitives; materials carry the real color.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ============================================================================
// HEX COLOR
// ============================================================================

/// An sRGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Rejected `#rrggbb` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color {0:?}, expected #rrggbb")]
pub struct ParseHexColorError(pub String);

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as sRGB floats in `[0, 1]`.
    pub fn to_srgb(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| c as f32 / 255.0)
    }

    /// Channels converted to linear RGB for shading.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ParseHexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseHexColorError(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(err)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// MESH GENERATION PRIMITIVES
// ============================================================================

/// Generate an axis-aligned box mesh
pub fn generate_box(center: Vec3, half_extents: Vec3, color: [f32; 4]) -> Mesh {
    let mut mesh = Mesh::new();
    let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);

    let corners = [
        Vec3::new(-hx, -hy, -hz),
        Vec3::new(hx, -hy, -hz),
        Vec3::new(hx, hy, -hz),
        Vec3::new(-hx, hy, -hz),
        Vec3::new(-hx, -hy, hz),
        Vec3::new(hx, -hy, hz),
        Vec3::new(hx, hy, hz),
        Vec3::new(-hx, hy, hz),
    ];

    // Counter-clockwise seen from outside
    let faces = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
        [3, 7, 6, 2],
        [0, 1, 5, 4],
    ];

    for [a, b, c, d] in faces {
        mesh.push_quad(
            center + corners[a],
            center + corners[b],
            center + corners[c],
            center + corners[d],
            color,
        );
    }

    mesh
}

/// Generate a capped, flat-shaded frustum along +Y, centered on the origin.
///
/// Covers cones (`radius_top == 0`), pyramids (few segments) and cylinders
/// (equal radii). Ring vertex `i` sits at angle `theta_start + i * TAU / segments`
/// measured from +Z toward +X.
pub fn generate_frustum(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    theta_start: f32,
    color: [f32; 4],
) -> Mesh {
    let mut mesh = Mesh::new();
    if segments < 3 {
        return mesh;
    }

    let half = height / 2.0;
    let ring = |radius: f32, y: f32| -> Vec<Vec3> {
        (0..segments)
            .map(|i| {
                let theta = theta_start + i as f32 * std::f32::consts::TAU / segments as f32;
                Vec3::new(radius * theta.sin(), y, radius * theta.cos())
            })
            .collect()
    };
    let top = ring(radius_top, half);
    let bottom = ring(radius_bottom, -half);
    let n = segments as usize;

    for i in 0..n {
        let j = (i + 1) % n;
        if radius_top > 0.0 {
            mesh.push_quad(bottom[i], bottom[j], top[j], top[i], color);
        } else {
            mesh.push_triangle(bottom[i], bottom[j], top[i], color);
        }
    }

    let top_center = Vec3::new(0.0, half, 0.0);
    let bottom_center = Vec3::new(0.0, -half, 0.0);
    for i in 0..n {
        let j = (i + 1) % n;
        if radius_top > 0.0 {
            mesh.push_triangle(top_center, top[i], top[j], color);
        }
        if radius_bottom > 0.0 {
            mesh.push_triangle(bottom_center, bottom[j], bottom[i], color);
        }
    }

    mesh
}

/// Extrude a counter-clockwise polygon from `z = 0` to `z = depth`, with caps.
pub fn generate_prism(outline: &[Vec2], depth: f32, color: [f32; 4]) -> Mesh {
    let mut mesh = Mesh::new();
    let n = outline.len();
    if n < 3 {
        return mesh;
    }

    let front = |p: Vec2| p.extend(0.0);
    let back = |p: Vec2| p.extend(depth);

    for i in 0..n {
        let j = (i + 1) % n;
        mesh.push_quad(
            front(outline[i]),
            front(outline[j]),
            back(outline[j]),
            back(outline[i]),
            color,
        );
    }
    for i in 1..n - 1 {
        mesh.push_triangle(back(outline[0]), back(outline[i]), back(outline[i + 1]), color);
        mesh.push_triangle(front(outline[0]), front(outline[i + 1]), front(outline[i]), color);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outward(mesh: &Mesh) -> bool {
        // Every face normal points away from the shape center
        mesh.indices.chunks(3).all(|tri| {
            let centroid = tri
                .iter()
                .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
                .sum::<Vec3>()
                / 3.0;
            let normal = Vec3::from(mesh.vertices[tri[0] as usize].normal);
            normal.dot(centroid) > -1e-4
        })
    }

    #[test]
    fn test_hex_color_display_pads() {
        assert_eq!(HexColor::new(0x0a, 0x00, 0xff).to_string(), "#0a00ff");
    }

    #[test]
    fn test_hex_color_parse() {
        let c: HexColor = "#20cc25".parse().unwrap();
        assert_eq!(c, HexColor::new(0x20, 0xcc, 0x25));
        assert!("20cc25".parse::<HexColor>().is_err());
        assert!("#20cc2".parse::<HexColor>().is_err());
        assert!("#zzzzzz".parse::<HexColor>().is_err());
        assert!("#+fffff".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_hex_color_serde() {
        let json = serde_json::to_string(&HexColor::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HexColor::new(1, 2, 3));
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(HexColor::new(0, 0, 0).to_linear(), [0.0; 3]);
        let white = HexColor::new(255, 255, 255).to_linear();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_box_faces_outward() {
        let mesh = generate_box(Vec3::ZERO, Vec3::splat(0.5), WHITE);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(outward(&mesh));
    }

    #[test]
    fn test_pyramid_faces_outward() {
        let mesh = generate_frustum(0.0, 0.707106, 1.0, 4, std::f32::consts::FRAC_PI_4, WHITE);
        assert_eq!(mesh.triangle_count(), 4 + 4);
        assert!(outward(&mesh));
    }

    #[test]
    fn test_cylinder_faces_outward() {
        let mesh = generate_frustum(0.5, 0.5, 1.0, 8, 0.0, WHITE);
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8 * 2);
        assert!(outward(&mesh));
    }

    #[test]
    fn test_prism_faces_outward() {
        let outline = [
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(-0.5, 0.5),
        ];
        let mut mesh = generate_prism(&outline, 1.0, WHITE);
        mesh.transform(glam::Mat4::from_translation(Vec3::new(0.0, 0.0, -0.5)));
        assert_eq!(mesh.triangle_count(), 6 + 2);
        assert!(outward(&mesh));
    }
}
