//! Scene Module
//!
//! The scene-graph boundary between generation and rendering: generators
//! describe geometry, the assembler inserts it here, the renderer walks it.

pub mod graph;
pub mod mesh;

pub use graph::{MeshId, Node, NodeId, NodeKind, PointLight, SceneGraph, Transform};
pub use mesh::{Material, Mesh, Vertex};
