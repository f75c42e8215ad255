//! Island Terrain Generation
//!
//! Builds the terraced island as three nested layers:
//! - Grass: thin slab with a rounded rim
//! - Dirt: thick shell just outside the grass outline
//! - Stone: tall foundation outside the dirt outline
//!
//! Each layer's ring follows the realized outline of the layer inside it, so
//! the terraces never cross. Layers are extruded along +Z and then laid flat
//! with the extrusion axis pointing down.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use super::extrude::{BevelProfile, extrude_contour};
use super::params::IslandParams;
use super::ring::{RingContour, build_ring};
use crate::game::error::GenerationError;
use crate::game::types::{HexColor, Mesh, WHITE};
use crate::random::RandomField;

/// Which terrace a layer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Grass,
    Dirt,
    Stone,
}

impl LayerKind {
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Grass => "grass",
            LayerKind::Dirt => "dirt",
            LayerKind::Stone => "stone",
        }
    }
}

/// Declarative description of one terrace, ready to be realized as a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainLayer {
    pub kind: LayerKind,
    pub contour: RingContour,
    pub depth: f32,
    pub bevel: BevelProfile,
    pub color: HexColor,
    pub vertical_offset: f32,
}

impl TerrainLayer {
    /// Extrude the contour, lay it flat and drop it to its vertical offset.
    pub fn mesh(&self) -> Mesh {
        let mut mesh = extrude_contour(&self.contour.counter_clockwise(), self.depth, self.bevel, WHITE);
        mesh.transform(
            Mat4::from_translation(Vec3::new(0.0, self.vertical_offset, 0.0))
                * Mat4::from_rotation_x(FRAC_PI_2),
        );
        mesh
    }

    /// Y of the highest point of the laid-flat slab.
    pub fn top(&self) -> f32 {
        self.vertical_offset + self.bevel_thickness()
    }

    /// Y of the lowest point of the laid-flat slab.
    pub fn bottom(&self) -> f32 {
        self.vertical_offset - self.depth - self.bevel_thickness()
    }

    fn bevel_thickness(&self) -> f32 {
        if self.bevel.segments == 0 {
            0.0
        } else {
            self.bevel.thickness
        }
    }
}

/// Sample the grass, dirt and stone rings, each seeded by the realized
/// radii of the ring inside it.
pub fn build_nested_rings(
    params: &IslandParams,
    rng: &mut RandomField,
) -> Result<[RingContour; 3], GenerationError> {
    let step = params.step_deg;
    let sample = |angle: u32| (angle / step) as usize;

    let grass = build_ring(|_| params.grass.radius, params.grass.variance, step, rng)?;
    let dirt = build_ring(
        |angle| grass.radii()[sample(angle)] + params.dirt.offset,
        params.dirt.variance,
        step,
        rng,
    )?;
    let stone = build_ring(
        |angle| dirt.radii()[sample(angle)] + params.stone.offset,
        params.stone.variance,
        step,
        rng,
    )?;

    Ok([grass, dirt, stone])
}

/// Generate the three terrain layers, grass first.
pub fn generate_terrain(
    params: &IslandParams,
    rng: &mut RandomField,
) -> Result<Vec<TerrainLayer>, GenerationError> {
    params.validate()?;
    let [grass_ring, dirt_ring, stone_ring] = build_nested_rings(params, rng)?;

    let grass = &params.grass;
    let dirt = &params.dirt;
    let stone = &params.stone;

    let layers = vec![
        TerrainLayer {
            kind: LayerKind::Grass,
            contour: grass_ring,
            depth: grass.depth,
            bevel: BevelProfile {
                size: grass.height * grass.bevel_size_ratio,
                thickness: grass.height,
                segments: grass.bevel_segments,
            },
            color: grass.color,
            vertical_offset: params.height_adjust,
        },
        TerrainLayer {
            kind: LayerKind::Dirt,
            contour: dirt_ring,
            depth: dirt.depth,
            bevel: BevelProfile {
                size: dirt.height * dirt.bevel_size_ratio,
                thickness: dirt.height,
                segments: dirt.bevel_segments,
            },
            color: dirt.color,
            vertical_offset: params.height_adjust - dirt.height + params.clip_epsilon,
        },
        TerrainLayer {
            kind: LayerKind::Stone,
            contour: stone_ring,
            depth: stone.depth,
            bevel: BevelProfile {
                size: stone.height * stone.bevel_size_ratio,
                thickness: stone.height,
                segments: stone.bevel_segments,
            },
            color: stone.color,
            vertical_offset: params.height_adjust - stone.height,
        },
    ];

    tracing::debug!(
        seed = rng.seed(),
        samples = layers[0].contour.len(),
        outer_radius = layers[2].contour.max_radius(),
        "Generated island terrain"
    );

    Ok(layers)
}
