//! IslandScene - generation state plus the per-tick driver.
//!
//! Generation is lazy: each tick checks the readiness flags and builds
//! whatever is missing, so a failed or reset generation is simply retried on
//! the next tick. After generation the tick applies locomotion: the camera
//! climbs along its local up axis and the island and structure spin about
//! world +Y. **No wgpu imports** - this module is GPU-agnostic.

use glam::Vec3;
use tracing::{debug, error, info, trace};

use super::assembler::{SceneAssembler, place_camera};
use crate::camera::{LocomotionController, ViewCamera};
use crate::game::building::{DnaSequence, generate_structure};
use crate::game::config::SceneConfig;
use crate::game::error::GenerationError;
use crate::game::terrain::{TerrainLayer, generate_terrain};
use crate::game::types::HexColor;
use crate::input::{KeyCode, MovementKeys};
use crate::random::RandomField;
use crate::scene::{NodeId, SceneGraph};

/// Light rig sits slightly outside the nominal grass radius
const LIGHT_RADIUS_FACTOR: f32 = 1.2;
const LIGHT_HEIGHT: f32 = 2.0;
/// Camera backs off further than the lights
const CAMERA_RADIUS_FACTOR: f32 = 1.5;
const CAMERA_HEIGHT: f32 = 24.0;

/// Everything generation produces, owned by one tick driver.
#[derive(Debug)]
pub struct GenerationContext {
    scene: SceneGraph,
    camera: ViewCamera,
    camera_node: Option<NodeId>,
    island_root: Option<NodeId>,
    structure_root: Option<NodeId>,
    terrain_layers: Vec<TerrainLayer>,
    structure_dna: Option<DnaSequence>,
    island_ready: bool,
    structure_ready: bool,
    rng: RandomField,
}

impl GenerationContext {
    fn new(camera: ViewCamera, rng: RandomField) -> Self {
        Self {
            scene: SceneGraph::new(),
            camera,
            camera_node: None,
            island_root: None,
            structure_root: None,
            terrain_layers: Vec::new(),
            structure_dna: None,
            island_ready: false,
            structure_ready: false,
            rng,
        }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    /// DNA of the current structure, once generated.
    pub fn structure_dna(&self) -> Option<&DnaSequence> {
        self.structure_dna.as_ref()
    }

    pub fn terrain_layers(&self) -> &[TerrainLayer] {
        &self.terrain_layers
    }

    pub fn island_root(&self) -> Option<NodeId> {
        self.island_root
    }

    pub fn structure_root(&self) -> Option<NodeId> {
        self.structure_root
    }

    pub fn island_ready(&self) -> bool {
        self.island_ready
    }

    pub fn structure_ready(&self) -> bool {
        self.structure_ready
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

/// The viewer's scene: config, generation state, input and velocities.
///
/// Call [`tick`](IslandScene::tick) once per frame with the total elapsed
/// time, forward key events to [`handle_key`](IslandScene::handle_key) and
/// read [`context`](IslandScene::context) for rendering.
#[derive(Debug)]
pub struct IslandScene {
    config: SceneConfig,
    context: GenerationContext,
    keys: MovementKeys,
    locomotion: LocomotionController,
    /// Structure to rebuild instead of generating a new one
    preset_dna: Option<DnaSequence>,
    failed_attempts: u32,
}

impl IslandScene {
    pub fn new(config: SceneConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => RandomField::seeded(seed),
            None => RandomField::from_entropy(),
        };
        info!("Scene seed: {}", rng.seed());

        let camera = ViewCamera::new(config.view.projection, 16.0 / 9.0);
        let locomotion = LocomotionController::new(config.locomotion);
        Self {
            config,
            context: GenerationContext::new(camera, rng),
            keys: MovementKeys::new(),
            locomotion,
            preset_dna: None,
            failed_attempts: 0,
        }
    }

    /// Show `dna` instead of generating a structure.
    pub fn with_dna(mut self, dna: DnaSequence) -> Self {
        self.preset_dna = Some(dna);
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Island and structure changes take effect on the next generation;
    /// locomotion tuning and projection are picked up by [`reset`](Self::reset).
    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    pub fn keys(&self) -> &MovementKeys {
        &self.keys
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    /// Route a key event. `R` press resets the scene; movement keys update
    /// held state. Returns `false` for keys the scene does not use.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::R {
            if pressed {
                self.reset();
            }
            return true;
        }
        self.keys.handle_key(key, pressed)
    }

    /// Recompute the camera aspect for a new viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.camera.set_viewport(width, height);
        debug!("Viewport resized to {}x{}", width, height);
    }

    /// Drop all generated content so the next tick generates afresh, and
    /// reapply the locomotion tuning and projection from the config.
    ///
    /// The random stream continues, so a reset shows a new island even
    /// with a fixed seed.
    pub fn reset(&mut self) {
        let ctx = &mut self.context;
        ctx.scene.clear();
        ctx.camera_node = None;
        ctx.island_root = None;
        ctx.structure_root = None;
        ctx.terrain_layers.clear();
        ctx.structure_dna = None;
        ctx.island_ready = false;
        ctx.structure_ready = false;
        ctx.camera.projection = self.config.view.projection;
        self.preset_dna = None;
        self.locomotion = LocomotionController::new(self.config.locomotion);
        self.failed_attempts = 0;
        info!("Scene reset");
    }

    fn wants_structure(&self) -> bool {
        self.preset_dna.is_some() || self.config.structure.enabled
    }

    /// Run one frame: generate what is missing, then apply locomotion.
    ///
    /// `elapsed` is the total time since the clock started, in seconds.
    pub fn tick(&mut self, elapsed: f32) {
        if !self.context.island_ready {
            let result = self.generate_island();
            self.report(result);
        }
        if self.context.island_ready && !self.context.structure_ready && self.wants_structure() {
            let result = self.generate_structure();
            self.report(result);
        }

        self.locomotion.update(&self.keys, elapsed);
        self.apply_velocities();
    }

    fn report(&mut self, result: Result<(), GenerationError>) {
        match result {
            Ok(()) => self.failed_attempts = 0,
            Err(err) => {
                if self.failed_attempts == 0 {
                    error!("Generation failed: {}", err);
                } else {
                    trace!("Generation still failing: {}", err);
                }
                self.failed_attempts += 1;
            }
        }
    }

    fn generate_island(&mut self) -> Result<(), GenerationError> {
        let ctx = &mut self.context;
        let layers = generate_terrain(&self.config.island, &mut ctx.rng)?;
        let grass_radius = self.config.island.grass.radius;

        let mut assembler = SceneAssembler::new(&mut ctx.scene);
        let island = assembler.assemble_island(&layers);
        assembler.add_lights(
            HexColor::new(0xff, 0xff, 0xff),
            grass_radius * LIGHT_RADIUS_FACTOR,
            LIGHT_HEIGHT,
        );
        place_camera(&mut ctx.camera, grass_radius * CAMERA_RADIUS_FACTOR, CAMERA_HEIGHT);
        ctx.camera_node = Some(assembler.add_camera(&ctx.camera));

        info!(
            "Island ready: {} layers, outer radius {:.2}",
            layers.len(),
            layers.last().map_or(0.0, |l| l.contour.max_radius())
        );
        ctx.island_root = Some(island);
        ctx.terrain_layers = layers;
        ctx.island_ready = true;
        Ok(())
    }

    fn generate_structure(&mut self) -> Result<(), GenerationError> {
        let ctx = &mut self.context;
        let dna = match &self.preset_dna {
            Some(dna) => dna.clone(),
            None => generate_structure(&self.config.structure, &mut ctx.rng)?
                .into_sequence(Some(ctx.rng.seed())),
        };

        let root = SceneAssembler::new(&mut ctx.scene).build_structure(&dna.blocks, dna.offset);
        info!("Structure ready: {} blocks", dna.len());
        ctx.structure_root = Some(root);
        ctx.structure_dna = Some(dna);
        ctx.structure_ready = true;
        Ok(())
    }

    fn apply_velocities(&mut self) {
        let ctx = &mut self.context;
        ctx.camera.translate_local_y(self.locomotion.vertical_velocity);

        let spin = self.locomotion.rotation_velocity;
        if spin != 0.0 {
            for root in [ctx.island_root, ctx.structure_root].into_iter().flatten() {
                ctx.scene.rotate_on_world_axis(root, Vec3::Y, spin);
            }
        }

        if let Some(node) = ctx.camera_node {
            let transform = &mut ctx.scene.node_mut(node).transform;
            transform.translation = ctx.camera.position;
            transform.rotation = ctx.camera.rotation;
        }
    }
}
