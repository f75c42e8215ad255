//! Uniform Structs for GPU Shaders
//!
//! GPU-compatible uniform buffer structures. They must match the WGSL
//! structs in `SCENE_SHADER` (see `shader.rs`) exactly.

use glam::Mat4;

/// Maximum point lights uploaded per frame; extra lights are dropped.
pub const MAX_LIGHTS: usize = 8;

/// Stride between per-draw model uniforms in the dynamic buffer.
///
/// 256 is the largest `min_uniform_buffer_offset_alignment` wgpu allows.
pub const MODEL_UNIFORM_STRIDE: u64 = 256;

/// One point light.
///
/// WGSL layout (32 bytes):
///   offset  0: position (vec3<f32>)
///   offset 12: intensity (f32)
///   offset 16: color (vec3<f32>)
///   offset 28: _pad (f32)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

/// Per-frame values shared by every draw.
///
/// WGSL layout (368 bytes):
///   offset   0: view_proj (mat4x4<f32>)
///   offset  64: camera_pos (vec3<f32>)
///   offset  76: ambient (f32)
///   offset  80: fog_color (vec3<f32>)
///   offset  92: fog_near (f32)
///   offset  96: fog_far (f32)
///   offset 100: light_count (u32)
///   offset 104: _pad (vec2<f32>)
///   offset 112: lights (array<Light, 8>)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneGlobals {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub ambient: f32,
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub light_count: u32,
    pub _pad: [f32; 2],
    pub lights: [GpuLight; MAX_LIGHTS],
}

static_assertions::const_assert_eq!(std::mem::size_of::<GpuLight>(), 32);
static_assertions::const_assert_eq!(std::mem::size_of::<SceneGlobals>(), 368);

impl Default for SceneGlobals {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 3],
            ambient: 0.35,
            fog_color: [0.4; 3],
            fog_near: 8.0,
            fog_far: 80.0,
            light_count: 0,
            _pad: [0.0; 2],
            lights: [GpuLight::default(); MAX_LIGHTS],
        }
    }
}

impl SceneGlobals {
    /// Append a light; returns `false` once all slots are taken.
    pub fn push_light(&mut self, light: GpuLight) -> bool {
        let index = self.light_count as usize;
        if index >= MAX_LIGHTS {
            return false;
        }
        self.lights[index] = light;
        self.light_count += 1;
        true
    }
}

/// Per-draw model transform and material.
///
/// WGSL layout (112 bytes, padded to [`MODEL_UNIFORM_STRIDE`] in the buffer):
///   offset  0: model (mat4x4<f32>)
///   offset 64: color (vec4<f32>)
///   offset 80: emissive (vec3<f32>)
///   offset 92: emissive_intensity (f32)
///   offset 96: roughness (f32)
///   offset 100: metalness (f32)
///   offset 104: _pad (vec2<f32>)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub _pad: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<ModelUniforms>(), 112);
static_assertions::const_assert!(std::mem::size_of::<ModelUniforms>() as u64 <= MODEL_UNIFORM_STRIDE);

impl ModelUniforms {
    pub fn new(model: Mat4, material: &crate::scene::Material) -> Self {
        let [r, g, b] = material.color;
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, 1.0],
            emissive: material.emissive,
            emissive_intensity: material.emissive_intensity,
            roughness: material.roughness,
            metalness: material.metalness,
            _pad: [0.0; 2],
        }
    }
}
