//! Config Module
//!
//! Centralized configuration for scene generation and viewing.

pub mod scene_config;

pub use scene_config::{ConfigError, SceneConfig, ViewParams};
