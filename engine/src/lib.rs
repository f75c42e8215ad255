//! Island Forge Engine Library
//!
//! Procedural floating islands and block structures with a small real-time
//! viewer on top.
//!
//! # Modules
//!
//! - [`random`] - Seedable random source shared by every generator
//! - [`scene`] - Scene graph, meshes and materials
//! - [`camera`] - Perspective camera and velocity-based locomotion
//! - [`input`] - Platform-agnostic movement keys
//! - [`clock`] - Frame clock
//! - [`render`] - wgpu renderer for the scene graph
//! - [`game`] - Island terrain, structures, configuration and the tick driver
//!
//! # Example
//!
//! ```rust
//! use island_forge_engine::game::{IslandScene, SceneConfig};
//!
//! let mut scene = IslandScene::new(SceneConfig {
//!     seed: Some(7),
//!     ..Default::default()
//! });
//! scene.tick(0.0);
//! assert!(scene.context().island_ready());
//! let dna = scene.context().structure_dna().unwrap();
//! assert_eq!(dna.len(), 12);
//! ```

pub mod camera;
pub mod clock;
pub mod input;
pub mod random;
pub mod render;
pub mod scene;

// Generation and scene logic (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types for convenience
pub use camera::{LocomotionController, LocomotionTuning, ViewCamera};
pub use clock::FrameClock;
pub use input::{KeyCode, MovementKeys};
pub use random::RandomField;
pub use scene::{Material, Mesh, SceneGraph};
