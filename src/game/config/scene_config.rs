//! Scene Configuration
//!
//! Everything that shapes a generated scene: the island layers, the
//! structure layout, locomotion tuning and the view. `Default` carries the
//! production values; a JSON file may override any subset of them.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::camera::{LocomotionTuning, Projection};
use crate::game::building::StructureParams;
use crate::game::error::GenerationError;
use crate::game::terrain::IslandParams;
use crate::game::types::HexColor;
use crate::render::FrameStyle;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] GenerationError),
}

/// Camera projection, fog and background.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    pub projection: Projection,
    pub fog_color: HexColor,
    /// Distance where fog starts
    pub fog_near: f32,
    /// Distance where fog fully hides geometry
    pub fog_far: f32,
    pub clear_color: HexColor,
    /// Flat light added to every surface (0.0 = lights only)
    pub ambient: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            fog_color: HexColor::new(0xaa, 0xaa, 0xaa),
            fog_near: 8.0,
            fog_far: 80.0,
            clear_color: HexColor::new(0xff, 0xff, 0xff),
            ambient: 0.35,
        }
    }
}

impl ViewParams {
    /// Linear-space colors and fog range for the renderer.
    pub fn frame_style(&self) -> FrameStyle {
        FrameStyle {
            clear_color: self.clear_color.to_linear(),
            fog_color: self.fog_color.to_linear(),
            fog_near: self.fog_near,
            fog_far: self.fog_far,
            ambient: self.ambient,
        }
    }
}

/// Top-level scene configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed seed for reproducible scenes; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub island: IslandParams,
    pub structure: StructureParams,
    pub locomotion: LocomotionTuning,
    pub view: ViewParams,
}

impl SceneConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: SceneConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`SceneConfig::load`], but logs the problem and falls back to
    /// defaults instead of failing.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("{} not found, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                error!("{}: {}, using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Run every generation-entry check up front.
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.island.validate()?;
        if self.structure.enabled {
            self.structure.layout.validate()?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::building::StructureLayout;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("island_forge_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SceneConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: SceneConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_defaults_survive_json() {
        let config = SceneConfig {
            seed: Some(5),
            ..Default::default()
        };
        let back: SceneConfig = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = temp_path("invalid");
        fs::write(&path, r#"{"island": {"step_deg": 7}}"#).unwrap();
        let result = SceneConfig::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(GenerationError::InvalidAngleStep(7)))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let missing = temp_path("missing");
        assert_eq!(SceneConfig::load_or_default(&missing), SceneConfig::default());

        let broken = temp_path("broken");
        fs::write(&broken, "{ not json").unwrap();
        let config = SceneConfig::load_or_default(&broken);
        let _ = fs::remove_file(&broken);
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_load_overrides() {
        let path = temp_path("overrides");
        fs::write(
            &path,
            r#"{"seed": 9, "structure": {"layout": {"kind": "lattice", "size": [2, 2, 2]}}}"#,
        )
        .unwrap();
        let config = SceneConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(config.seed, Some(9));
        assert!(config.structure.enabled);
        assert_eq!(config.structure.layout, StructureLayout::Lattice { size: [2, 2, 2] });
    }

    #[test]
    fn test_frame_style_is_linear() {
        let style = ViewParams::default().frame_style();
        assert!(style.clear_color.iter().all(|c| (c - 1.0).abs() < 1e-5));
        // #aaaaaa is about 0.40 in linear light
        assert!((style.fog_color[0] - 0.402).abs() < 1e-3);
        assert_eq!(style.fog_near, 8.0);
        assert_eq!(style.fog_far, 80.0);
    }

    #[test]
    fn test_disabled_structure_skips_layout_check() {
        let mut config = SceneConfig::default();
        config.structure.enabled = false;
        config.structure.layout = StructureLayout::RandomWalk { count: 0 };
        assert_eq!(config.validate(), Ok(()));
    }
}
