//! Camera Module
//!
//! Perspective view camera and the velocity-based locomotion controller.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod locomotion;
pub mod view_camera;

pub use locomotion::{ChannelTuning, LocomotionController, LocomotionTuning};
pub use view_camera::{Projection, ViewCamera};
