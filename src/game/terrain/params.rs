//! Terrain Parameters
//!
//! Configurable parameters for the three island layers. Defaults are the
//! production island: a thin grass cap over a dirt shell over a tall stone
//! foundation.

use serde::{Deserialize, Serialize};

use super::ring::{DEFAULT_STEP_DEG, validate_step};
use crate::game::error::GenerationError;
use crate::game::types::HexColor;

/// Top layer, sized by an absolute radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassParams {
    pub radius: f32,
    pub variance: f32,
    /// Bevel thickness above and below the slab
    pub height: f32,
    /// Slab thickness along the extrusion axis
    pub depth: f32,
    pub bevel_segments: u32,
    /// Bevel size as a fraction of `height`
    pub bevel_size_ratio: f32,
    pub color: HexColor,
}

impl Default for GrassParams {
    fn default() -> Self {
        Self {
            radius: 12.0,
            variance: 1.5,
            height: 0.1,
            depth: 1.0,
            bevel_segments: 1,
            bevel_size_ratio: 1.0,
            color: HexColor::new(0x20, 0xcc, 0x25),
        }
    }
}

/// Lower layer, sized relative to the realized outline of the layer above.
///
/// Overrides must spell out every field; there is no single default shell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellParams {
    /// Added to the inner layer's realized radius at each sample
    pub offset: f32,
    pub variance: f32,
    pub height: f32,
    pub depth: f32,
    pub bevel_segments: u32,
    pub bevel_size_ratio: f32,
    pub color: HexColor,
}

impl ShellParams {
    /// Dirt shell defaults
    pub fn dirt() -> Self {
        Self {
            offset: 1.5,
            variance: 1.0,
            height: 0.5,
            depth: 10.0,
            bevel_segments: 4,
            bevel_size_ratio: 0.5,
            color: HexColor::new(0xcc, 0xaa, 0x44),
        }
    }

    /// Stone foundation defaults
    pub fn stone() -> Self {
        Self {
            offset: 0.0,
            variance: 2.0,
            height: 10.0,
            depth: 100.0,
            bevel_segments: 3,
            bevel_size_ratio: 0.25,
            color: HexColor::new(0xbb, 0xbb, 0xbb),
        }
    }
}

/// Adjustable island generation parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandParams {
    /// Angular step between ring samples, in degrees
    pub step_deg: u32,
    pub grass: GrassParams,
    pub dirt: ShellParams,
    pub stone: ShellParams,
    /// Vertical offset of the grass layer
    pub height_adjust: f32,
    /// Lift applied to the dirt layer so it does not z-fight the grass
    pub clip_epsilon: f32,
}

impl Default for IslandParams {
    fn default() -> Self {
        Self {
            step_deg: DEFAULT_STEP_DEG,
            grass: GrassParams::default(),
            dirt: ShellParams::dirt(),
            stone: ShellParams::stone(),
            height_adjust: -0.5,
            clip_epsilon: 0.01,
        }
    }
}

impl IslandParams {
    /// Reject parameters that cannot produce a well-formed island.
    pub fn validate(&self) -> Result<(), GenerationError> {
        validate_step(self.step_deg)?;

        let grass = &self.grass;
        if grass.radius.is_nan() || grass.radius < 0.0 {
            return Err(GenerationError::NegativeRadius {
                layer: "grass",
                value: grass.radius,
            });
        }
        check_variance("grass", grass.variance)?;
        check_extents("grass", grass.height, grass.depth)?;

        for (layer, shell) in [("dirt", &self.dirt), ("stone", &self.stone)] {
            if shell.offset.is_nan() || shell.offset < 0.0 {
                return Err(GenerationError::NegativeOffset {
                    layer,
                    value: shell.offset,
                });
            }
            check_variance(layer, shell.variance)?;
            check_extents(layer, shell.height, shell.depth)?;
        }
        Ok(())
    }
}

fn check_variance(layer: &'static str, value: f32) -> Result<(), GenerationError> {
    if value.is_nan() || value < 0.0 {
        return Err(GenerationError::NegativeVariance { layer, value });
    }
    Ok(())
}

fn check_extents(layer: &'static str, height: f32, depth: f32) -> Result<(), GenerationError> {
    for (field, value) in [("height", height), ("depth", depth)] {
        if value.is_nan() || value <= 0.0 {
            return Err(GenerationError::NonPositiveExtent {
                layer,
                field,
                value,
            });
        }
    }
    Ok(())
}
