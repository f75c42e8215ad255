//! Block Palette
//!
//! Fixed set of primitive block shapes addressed by integer type codes, plus
//! the six quarter-turn orientations addressed by rotation codes. Every code
//! resolves: unknown type codes become an empty placeholder and unknown
//! rotation codes fall back to a quarter turn about -Z.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::game::types::{Mesh, WHITE, generate_box, generate_frustum, generate_prism};

/// Circumradius of a unit square, so four-sided cones cover a unit footprint
const SQUARE_RADIUS: f32 = 0.707106;
const HALF_SQUARE_RADIUS: f32 = 0.353553;

/// Number of type codes with a real shape (`0..PALETTE_SIZE`).
pub const PALETTE_SIZE: i32 = 7;

/// Number of rotation codes (`0..ROTATION_COUNT`).
pub const ROTATION_COUNT: i32 = 6;

/// Shape of a structure block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    /// Unit cube
    Cube,
    /// Four-sided pyramid over a unit square
    Pyramid,
    /// Four-sided frustum, wide face on top
    Frustum,
    /// Half-width, half-height bar
    HalfBlock,
    /// Eight-sided cylinder of unit diameter
    Cylinder,
    /// Pyramid over a half-size square
    HalfPyramid,
    /// Right-triangle wedge
    TrianglePrism,
    /// Zero-volume stand-in for unknown codes
    Placeholder,
}

/// Map a type code to its shape.
pub fn resolve_shape(type_code: i32) -> BlockShape {
    match type_code {
        0 => BlockShape::Cube,
        1 => BlockShape::Pyramid,
        2 => BlockShape::Frustum,
        3 => BlockShape::HalfBlock,
        4 => BlockShape::Cylinder,
        5 => BlockShape::HalfPyramid,
        6 => BlockShape::TrianglePrism,
        _ => BlockShape::Placeholder,
    }
}

impl BlockShape {
    /// Geometry centered on the origin, in the block's unrotated frame.
    pub fn mesh(self) -> Mesh {
        match self {
            BlockShape::Cube => generate_box(Vec3::ZERO, Vec3::splat(0.5), WHITE),
            BlockShape::Pyramid => generate_frustum(0.0, SQUARE_RADIUS, 1.0, 4, FRAC_PI_4, WHITE),
            BlockShape::Frustum => {
                generate_frustum(SQUARE_RADIUS, HALF_SQUARE_RADIUS, 1.0, 4, FRAC_PI_4, WHITE)
            }
            BlockShape::HalfBlock => generate_box(Vec3::ZERO, Vec3::new(0.25, 0.25, 0.5), WHITE),
            BlockShape::Cylinder => generate_frustum(0.5, 0.5, 1.0, 8, 0.0, WHITE),
            BlockShape::HalfPyramid => {
                generate_frustum(0.0, HALF_SQUARE_RADIUS, 1.0, 4, FRAC_PI_4, WHITE)
            }
            BlockShape::TrianglePrism => {
                let outline = [
                    Vec2::new(-0.5, -0.5),
                    Vec2::new(0.5, -0.5),
                    Vec2::new(-0.5, 0.5),
                ];
                let mut mesh = generate_prism(&outline, 1.0, WHITE);
                mesh.transform(Mat4::from_translation(Vec3::new(0.0, 0.0, -0.5)));
                mesh
            }
            BlockShape::Placeholder => Mesh::new(),
        }
    }

    pub fn is_placeholder(self) -> bool {
        self == BlockShape::Placeholder
    }
}

/// Quarter-turn orientation of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRotation {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

/// Map a rotation code to its orientation.
pub fn resolve_rotation(rotation_code: i32) -> BlockRotation {
    match rotation_code {
        0 => BlockRotation::PosX,
        1 => BlockRotation::NegX,
        2 => BlockRotation::PosY,
        3 => BlockRotation::NegY,
        4 => BlockRotation::PosZ,
        _ => BlockRotation::NegZ,
    }
}

impl BlockRotation {
    /// Axis and signed angle of the quarter turn.
    pub fn axis_angle(self) -> (Vec3, f32) {
        match self {
            BlockRotation::PosX => (Vec3::X, FRAC_PI_2),
            BlockRotation::NegX => (Vec3::X, -FRAC_PI_2),
            BlockRotation::PosY => (Vec3::Y, FRAC_PI_2),
            BlockRotation::NegY => (Vec3::Y, -FRAC_PI_2),
            BlockRotation::PosZ => (Vec3::Z, FRAC_PI_2),
            BlockRotation::NegZ => (Vec3::Z, -FRAC_PI_2),
        }
    }

    pub fn quat(self) -> Quat {
        let (axis, angle) = self.axis_angle();
        Quat::from_axis_angle(axis, angle)
    }
}

/// Block geometry with the orientation baked into the vertices.
pub fn oriented_mesh(shape: BlockShape, rotation: BlockRotation) -> Mesh {
    let mut mesh = shape.mesh();
    mesh.transform(Mat4::from_quat(rotation.quat()));
    mesh
}
