//! Island Viewer
//!
//! Opens a window, generates an island (and a block structure next to it)
//! and lets the viewer fly up and down and spin the scene.
//!
//! Controls:
//!   W / Up      - climb
//!   S / Down    - descend
//!   A / Left    - spin one way
//!   D / Right   - spin the other way
//!   R           - generate a new island
//!   Esc         - exit
//!
//! Usage:
//!   island_viewer [--config <file>] [--seed <u64>] [--dna <file>] [--dna-out <file>]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use island_forge_engine::clock::FrameClock;
use island_forge_engine::game::{DnaSequence, IslandScene, SceneConfig};
use island_forge_engine::input::KeyCode;
use island_forge_engine::render::{FrameStyle, GpuContext, GpuContextConfig, SceneRenderer};

// ============================================================================
// COMMAND LINE
// ============================================================================

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    dna: Option<PathBuf>,
    dna_out: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("{flag} expects a value"))
        };
        match flag.as_str() {
            "--config" => parsed.config = Some(value()?.into()),
            "--seed" => {
                let raw = value()?;
                parsed.seed = Some(raw.parse().with_context(|| format!("invalid seed {raw:?}"))?);
            }
            "--dna" => parsed.dna = Some(value()?.into()),
            "--dna-out" => parsed.dna_out = Some(value()?.into()),
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(parsed)
}

/// Translate winit key codes into engine key codes
fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct AppState {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SceneRenderer,
    scene: IslandScene,
    clock: FrameClock,
    style: FrameStyle,
    dna_out: Option<PathBuf>,
    dna_saved: bool,
}

impl AppState {
    fn new(window: Arc<Window>, scene: IslandScene, dna_out: Option<PathBuf>) -> Result<Self> {
        let gpu = GpuContext::new(Arc::clone(&window), GpuContextConfig::default())
            .context("failed to initialize GPU")?;
        let renderer = SceneRenderer::new(&gpu);
        let style = scene.config().view.frame_style();

        let mut state = Self {
            window,
            gpu,
            renderer,
            scene,
            clock: FrameClock::new(),
            style,
            dna_out,
            dna_saved: false,
        };
        let size = state.window.inner_size();
        state.scene.resize(size.width, size.height);
        Ok(state)
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size.width, size.height);
        self.scene.resize(size.width, size.height);
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.scene.handle_key(key, pressed);
        if key == KeyCode::R && pressed {
            self.dna_saved = false;
            self.style = self.scene.config().view.frame_style();
        }
    }

    fn update(&mut self) {
        self.scene.tick(self.clock.elapsed());
        self.save_dna();
    }

    /// Write the structure DNA once per generated structure
    fn save_dna(&mut self) {
        if self.dna_saved {
            return;
        }
        let (Some(path), Some(dna)) = (&self.dna_out, self.scene.context().structure_dna()) else {
            return;
        };
        match dna.save(path) {
            Ok(()) => info!("Saved {} blocks to {}", dna.len(), path.display()),
            Err(err) => error!("Could not save DNA to {}: {}", path.display(), err),
        }
        self.dna_saved = true;
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let ctx = self.scene.context();
        self.renderer
            .render(&self.gpu, ctx.scene(), ctx.camera(), &self.style)
    }
}

struct App {
    /// Scene waiting for a window
    pending: Option<(IslandScene, Option<PathBuf>)>,
    state: Option<AppState>,
    error: Option<anyhow::Error>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some((scene, dna_out)) = self.pending.take() else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title("Island Forge - W/S climb, A/D spin, R regenerate")
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, anyhow::Error::new(err).context("failed to create window")),
        };

        match AppState::new(window, scene, dna_out) {
            Ok(state) => {
                info!("Viewer ready");
                self.state = Some(state);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                state.resize(new_size);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                let key = map_key(key);
                if key == KeyCode::Escape && pressed {
                    event_loop.exit();
                    return;
                }
                state.handle_key(key, pressed);
            }
            WindowEvent::RedrawRequested => {
                state.update();

                match state.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.gpu.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory");
                        event_loop.exit();
                    }
                    Err(err) => warn!("Render error: {:?}", err),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.config {
        Some(path) => SceneConfig::load_or_default(path),
        None => SceneConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut scene = IslandScene::new(config);
    if let Some(path) = &args.dna {
        let dna = DnaSequence::load(path)
            .with_context(|| format!("failed to load DNA from {}", path.display()))?;
        info!("Loaded {} blocks from {}", dna.len(), path.display());
        scene = scene.with_dna(dna);
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        pending: Some((scene, args.dna_out)),
        state: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_all_flags() {
        let parsed = args(&["--seed", "42", "--config", "a.json", "--dna", "in.json", "--dna-out", "out.json"]).unwrap();
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.config, Some(PathBuf::from("a.json")));
        assert_eq!(parsed.dna, Some(PathBuf::from("in.json")));
        assert_eq!(parsed.dna_out, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(args(&["--seed"]).is_err());
        assert!(args(&["--seed", "abc"]).is_err());
        assert!(args(&["--fullscreen"]).is_err());
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(WinitKey::ArrowUp), KeyCode::ArrowUp);
        assert_eq!(map_key(WinitKey::KeyQ), KeyCode::Unknown);
    }
}
