//! Scene Renderer
//!
//! Draws a [`SceneGraph`] with one forward pipeline. Per frame it walks the
//! attached nodes, collects point lights into the globals uniform and
//! writes one model uniform per mesh node into a dynamic-offset buffer.
//! Mesh geometry is uploaded the first time a `MeshId` is drawn and dropped
//! when the scene is cleared.

use std::collections::HashMap;

use glam::Vec3;

use super::gpu_context::{DEPTH_FORMAT, GpuContext};
use super::shader::SCENE_SHADER;
use super::uniforms::{GpuLight, MODEL_UNIFORM_STRIDE, ModelUniforms, SceneGlobals};
use crate::camera::ViewCamera;
use crate::scene::{MeshId, NodeKind, SceneGraph, Vertex};

const MIN_MODEL_CAPACITY: u64 = 64;

/// Background, fog and ambient for a frame, colors in linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    pub clear_color: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
    pub ambient: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            clear_color: [1.0; 3],
            fog_color: [0.4; 3],
            fog_near: 8.0,
            fog_far: 80.0,
            ambient: 0.35,
        }
    }
}

/// Uploaded geometry for one mesh
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Forward renderer for the scene graph
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    /// Draws the model buffer can hold
    model_capacity: u64,
    meshes: HashMap<MeshId, GpuMesh>,
    /// Scene epoch the cached meshes belong to
    epoch: u64,
}

impl SceneRenderer {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_SHADER.into()),
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Globals Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Model Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ModelUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let globals_buffer = gpu.create_empty_uniform_buffer(
            "Scene Globals Buffer",
            std::mem::size_of::<SceneGlobals>() as u64,
        );
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let (model_buffer, model_bind_group) =
            Self::create_model_storage(gpu, &model_layout, MIN_MODEL_CAPACITY);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x4,
                            offset: 24,
                            shader_location: 2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Double-sided, the fragment shader flips back-facing normals
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            model_layout,
            model_buffer,
            model_bind_group,
            model_capacity: MIN_MODEL_CAPACITY,
            meshes: HashMap::new(),
            epoch: 0,
        }
    }

    fn create_model_storage(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        capacity: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer =
            gpu.create_empty_uniform_buffer("Scene Model Buffer", capacity * MODEL_UNIFORM_STRIDE);
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Model Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    /// Render one frame of `scene` seen through `camera`.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        scene: &SceneGraph,
        camera: &ViewCamera,
        style: &FrameStyle,
    ) -> Result<(), wgpu::SurfaceError> {
        if scene.epoch() != self.epoch {
            self.meshes.clear();
            self.epoch = scene.epoch();
        }

        let mut globals = SceneGlobals {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            ambient: style.ambient,
            fog_color: style.fog_color,
            fog_near: style.fog_near,
            fog_far: style.fog_far,
            ..Default::default()
        };

        let mut draws: Vec<(MeshId, ModelUniforms)> = Vec::new();
        let mut dropped_lights = 0;
        scene.visit(|_, node, world| match &node.kind {
            NodeKind::Mesh { mesh, material } => {
                if !scene.mesh(*mesh).is_empty() {
                    draws.push((*mesh, ModelUniforms::new(world, material)));
                }
            }
            NodeKind::PointLight(light) => {
                let pushed = globals.push_light(GpuLight {
                    position: world.transform_point3(Vec3::ZERO).to_array(),
                    intensity: light.intensity,
                    color: light.color,
                    _pad: 0.0,
                });
                if !pushed {
                    dropped_lights += 1;
                }
            }
            NodeKind::Group | NodeKind::Camera => {}
        });
        if dropped_lights > 0 {
            tracing::trace!("{} point lights over the limit were skipped", dropped_lights);
        }

        for (mesh_id, _) in &draws {
            if !self.meshes.contains_key(mesh_id) {
                let mesh = scene.mesh(*mesh_id);
                let label = format!("Mesh {}", mesh_id.index());
                self.meshes.insert(
                    *mesh_id,
                    GpuMesh {
                        vertex_buffer: gpu.create_vertex_buffer(&label, &mesh.vertices),
                        index_buffer: gpu.create_index_buffer(&label, &mesh.indices),
                        index_count: mesh.indices.len() as u32,
                    },
                );
            }
        }

        self.ensure_model_capacity(gpu, draws.len() as u64);
        let stride = MODEL_UNIFORM_STRIDE as usize;
        let mut model_bytes = vec![0u8; draws.len() * stride];
        for (i, (_, uniforms)) in draws.iter().enumerate() {
            let bytes = bytemuck::bytes_of(uniforms);
            model_bytes[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        gpu.queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        if !model_bytes.is_empty() {
            gpu.queue.write_buffer(&self.model_buffer, 0, &model_bytes);
        }

        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let [r, g, b] = style.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (i, (mesh_id, _)) in draws.iter().enumerate() {
                let Some(mesh) = self.meshes.get(mesh_id) else {
                    continue;
                };
                let offset = (i as u64 * MODEL_UNIFORM_STRIDE) as u32;
                pass.set_bind_group(1, &self.model_bind_group, &[offset]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn ensure_model_capacity(&mut self, gpu: &GpuContext, draws: u64) {
        if draws <= self.model_capacity {
            return;
        }
        let capacity = draws.next_power_of_two().max(MIN_MODEL_CAPACITY);
        let (buffer, bind_group) = Self::create_model_storage(gpu, &self.model_layout, capacity);
        self.model_buffer = buffer;
        self.model_bind_group = bind_group;
        self.model_capacity = capacity;
        tracing::debug!("Model uniform buffer grown to {} draws", capacity);
    }
}
