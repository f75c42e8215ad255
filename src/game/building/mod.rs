//! Building Module
//!
//! Procedural block structures:
//! - A fixed palette of primitive shapes and quarter-turn orientations
//! - DNA records describing every block of a structure
//! - Lattice and random-walk placement

pub mod dna;
pub mod palette;
pub mod structure;

pub use dna::{DnaError, DnaRecord, DnaSequence};
pub use palette::{
    BlockRotation, BlockShape, PALETTE_SIZE, ROTATION_COUNT, oriented_mesh, resolve_rotation,
    resolve_shape,
};
pub use structure::{
    GeneratedStructure, MAX_LATTICE_CELLS, StructureLayout, StructureParams, generate_structure,
};
