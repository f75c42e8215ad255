//! Render Module
//!
//! wgpu rendering for the viewer: device setup, the scene shader and a
//! forward renderer that walks the scene graph.

pub mod gpu_context;
pub mod scene_renderer;
pub mod shader;
pub mod uniforms;

pub use gpu_context::{DEPTH_FORMAT, GpuContext, GpuContextConfig, RenderError};
pub use scene_renderer::{FrameStyle, SceneRenderer};
pub use shader::SCENE_SHADER;
pub use uniforms::{GpuLight, MAX_LIGHTS, MODEL_UNIFORM_STRIDE, ModelUniforms, SceneGlobals};
