//! Scene Module
//!
//! Realizes generated content into the scene graph and drives it per frame.

pub mod assembler;
pub mod island_scene;

pub use assembler::{
    RealizedBlock, SceneAssembler, place_camera, realize_block,
};
pub use island_scene::{GenerationContext, IslandScene};
