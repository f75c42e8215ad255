//! Locomotion Controller
//!
//! Turns held movement keys into two smoothed velocities:
//! - vertical velocity, applied to the camera along its local up axis
//! - rotation velocity, applied to the generated roots about world +Y
//!
//! Each channel accelerates by `increment * elapsed_time` while its key is
//! held and its magnitude is within the clamp, and decays by the damping
//! factor otherwise. Opposing keys do not sum: forward is checked before
//! backward and left before right.

use serde::{Deserialize, Serialize};

use crate::input::MovementKeys;

/// Tuning for one velocity channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelTuning {
    /// Acceleration is only applied while `|velocity| <= clamp`
    pub clamp: f32,
    /// Velocity gained per unit of elapsed time per tick
    pub increment: f32,
    /// Multiplicative decay applied when idle or over the clamp
    pub damping: f32,
}

/// Tuning for both channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionTuning {
    pub vertical: ChannelTuning,
    pub rotation: ChannelTuning,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            vertical: ChannelTuning {
                clamp: 0.5,
                increment: 0.0005,
                damping: 0.8,
            },
            rotation: ChannelTuning {
                clamp: 0.05,
                increment: 0.00005,
                damping: 0.8,
            },
        }
    }
}

/// Velocity state persisting across ticks.
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    pub tuning: LocomotionTuning,
    /// Camera travel along its local up axis per tick
    pub vertical_velocity: f32,
    /// Root rotation about world +Y per tick (radians)
    pub rotation_velocity: f32,
}

impl LocomotionController {
    pub fn new(tuning: LocomotionTuning) -> Self {
        Self {
            tuning,
            vertical_velocity: 0.0,
            rotation_velocity: 0.0,
        }
    }

    /// Advance both channels by one tick.
    pub fn update(&mut self, keys: &MovementKeys, elapsed_time: f32) {
        self.vertical_velocity = step_channel(
            self.vertical_velocity,
            &self.tuning.vertical,
            keys.forward,
            keys.backward,
            elapsed_time,
        );
        self.rotation_velocity = step_channel(
            self.rotation_velocity,
            &self.tuning.rotation,
            keys.left,
            keys.right,
            elapsed_time,
        );
    }

    /// Zero both velocities.
    pub fn stop(&mut self) {
        self.vertical_velocity = 0.0;
        self.rotation_velocity = 0.0;
    }
}

fn step_channel(
    velocity: f32,
    tuning: &ChannelTuning,
    positive: bool,
    negative: bool,
    elapsed_time: f32,
) -> f32 {
    if velocity.abs() <= tuning.clamp {
        if positive {
            velocity + tuning.increment * elapsed_time
        } else if negative {
            velocity - tuning.increment * elapsed_time
        } else {
            velocity * tuning.damping
        }
    } else {
        velocity * tuning.damping
    }
}
