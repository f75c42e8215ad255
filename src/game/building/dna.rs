//! Structure DNA
//!
//! A structure is fully described by an ordered list of block records. The
//! list serializes to JSON, so a structure can be saved and rebuilt later
//! without replaying the random stream that produced it.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::palette::{BlockRotation, BlockShape, resolve_rotation, resolve_shape};
use crate::game::types::HexColor;

#[derive(Debug, Error)]
pub enum DnaError {
    #[error("failed to read or write DNA file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed DNA JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One block of a structure. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDnaRecord")]
pub struct DnaRecord {
    position: Vec3,
    type_code: i32,
    rotation_code: i32,
    color: HexColor,
    emissive_intensity: f32,
    roughness: f32,
    metalness: f32,
}

/// Wire form of a record; loading goes through [`DnaRecord::new`].
#[derive(Deserialize)]
struct RawDnaRecord {
    position: Vec3,
    type_code: i32,
    rotation_code: i32,
    color: HexColor,
    emissive_intensity: f32,
    roughness: f32,
    metalness: f32,
}

impl From<RawDnaRecord> for DnaRecord {
    fn from(raw: RawDnaRecord) -> Self {
        DnaRecord::new(
            raw.position,
            raw.type_code,
            raw.rotation_code,
            raw.color,
            raw.emissive_intensity,
            raw.roughness,
            raw.metalness,
        )
    }
}

fn unit_interval(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl DnaRecord {
    /// Material parameters are clamped into `[0, 1]`; NaN becomes 0.
    pub fn new(
        position: Vec3,
        type_code: i32,
        rotation_code: i32,
        color: HexColor,
        emissive_intensity: f32,
        roughness: f32,
        metalness: f32,
    ) -> Self {
        Self {
            position,
            type_code,
            rotation_code,
            color,
            emissive_intensity: unit_interval(emissive_intensity),
            roughness: unit_interval(roughness),
            metalness: unit_interval(metalness),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn type_code(&self) -> i32 {
        self.type_code
    }

    pub fn rotation_code(&self) -> i32 {
        self.rotation_code
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn emissive_intensity(&self) -> f32 {
        self.emissive_intensity
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    pub fn metalness(&self) -> f32 {
        self.metalness
    }

    pub fn shape(&self) -> BlockShape {
        resolve_shape(self.type_code)
    }

    pub fn rotation(&self) -> BlockRotation {
        resolve_rotation(self.rotation_code)
    }
}

/// Serializable structure: its records in generation order plus the offset
/// applied to every block when the structure is placed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnaSequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub offset: Vec3,
    pub blocks: Vec<DnaRecord>,
}

impl DnaSequence {
    pub fn new(blocks: Vec<DnaRecord>) -> Self {
        Self {
            seed: None,
            offset: Vec3::ZERO,
            blocks,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn to_json(&self) -> Result<String, DnaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DnaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DnaError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DnaError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
