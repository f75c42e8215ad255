//! Shader Source
//!
//! WGSL source for the scene pipeline: flat-shaded standard materials lit by
//! point lights plus ambient, with self-illumination and linear distance fog.

/// Scene shader. Struct layouts mirror `uniforms.rs`.
pub const SCENE_SHADER: &str = r#"
const MAX_LIGHTS: u32 = 8u;

struct Light {
    position: vec3<f32>,
    intensity: f32,
    color: vec3<f32>,
    _pad: f32,
}

struct Globals {
    view_proj: mat4x4<f32>,
    camera_pos: vec3<f32>,
    ambient: f32,
    fog_color: vec3<f32>,
    fog_near: f32,
    fog_far: f32,
    light_count: u32,
    _pad: vec2<f32>,
    lights: array<Light, 8>,
}

struct Model {
    model: mat4x4<f32>,
    color: vec4<f32>,
    emissive: vec3<f32>,
    emissive_intensity: f32,
    roughness: f32,
    metalness: f32,
    _pad: vec2<f32>,
}

@group(0) @binding(0) var<uniform> globals: Globals;
@group(1) @binding(0) var<uniform> model: Model;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = model.model * vec4<f32>(input.position, 1.0);
    out.clip_position = globals.view_proj * world;
    out.world_pos = world.xyz;
    // Models carry rotation and translation only
    out.normal = (model.model * vec4<f32>(input.normal, 0.0)).xyz;
    out.color = input.color * model.color;
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let view_dir = normalize(globals.camera_pos - input.world_pos);

    var n = vec3<f32>(0.0, 1.0, 0.0);
    if (length(input.normal) > 1e-6) {
        n = normalize(input.normal);
    }
    // Geometry is drawn double-sided
    if (dot(n, view_dir) < 0.0) {
        n = -n;
    }

    let base = input.color.rgb;
    let diffuse_color = base * (1.0 - model.metalness);
    let f0 = mix(vec3<f32>(0.04), base, model.metalness);
    let shininess = mix(128.0, 2.0, model.roughness);

    var lit = diffuse_color * globals.ambient;
    let count = min(globals.light_count, MAX_LIGHTS);
    for (var i = 0u; i < count; i++) {
        let light = globals.lights[i];
        let to_light = light.position - input.world_pos;
        let dist = length(to_light);
        let l = to_light / max(dist, 1e-4);
        let attenuation = light.intensity / (1.0 + 0.01 * dist * dist);
        let n_dot_l = max(dot(n, l), 0.0);
        let h = normalize(l + view_dir + vec3<f32>(0.0, 1e-5, 0.0));
        let specular = f0 * pow(max(dot(n, h), 0.0), shininess) * n_dot_l;
        lit += (diffuse_color * n_dot_l + specular) * light.color * attenuation;
    }

    lit += model.emissive * model.emissive_intensity;

    let eye_dist = length(globals.camera_pos - input.world_pos);
    let fog_span = max(globals.fog_far - globals.fog_near, 1e-4);
    let fog = clamp((eye_dist - globals.fog_near) / fog_span, 0.0, 1.0);
    return vec4<f32>(mix(lit, globals.fog_color, fog), 1.0);
}
"#;
