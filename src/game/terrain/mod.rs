//! Terrain Module
//!
//! Procedural island terrain: jittered ring contours, nested into grass,
//! dirt and stone terraces and extruded into beveled slabs.

pub mod extrude;
pub mod island;
pub mod params;
pub mod ring;

pub use extrude::{BevelProfile, extrude_contour};
pub use island::{LayerKind, TerrainLayer, build_nested_rings, generate_terrain};
pub use params::{GrassParams, IslandParams, ShellParams};
pub use ring::{DEFAULT_STEP_DEG, RingContour, build_ring};
