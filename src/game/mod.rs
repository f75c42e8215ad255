//! Game Module
//!
//! Island and structure generation built on top of the engine's scene,
//! camera and input layers.

pub mod building;
pub mod config;
pub mod error;
pub mod scenes;
pub mod terrain;
pub mod types;

pub use building::{DnaRecord, DnaSequence, StructureLayout, StructureParams, generate_structure};
pub use config::{ConfigError, SceneConfig, ViewParams};
pub use error::GenerationError;
pub use scenes::{GenerationContext, IslandScene, SceneAssembler};
pub use terrain::{IslandParams, TerrainLayer, build_nested_rings, generate_terrain};
pub use types::HexColor;
