//! Keyboard Input Module
//!
//! Tracks the four logical movement signals the viewer understands.
//! Decoupled from winit to use generic key codes.

/// Generic key codes, independent of windowing system.
///
/// These map to standard keyboard keys but are not tied to winit::keyboard::KeyCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Scene control
    R,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks the current state of movement keys.
///
/// Held keys stay set until released, so the controller sees continuous
/// input between key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// W / ArrowUp - climb
    pub forward: bool,
    /// S / ArrowDown - descend
    pub backward: bool,
    /// A / ArrowLeft - spin counter-clockwise
    pub left: bool,
    /// D / ArrowRight - spin clockwise
    pub right: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W | KeyCode::ArrowUp => {
                self.forward = pressed;
                true
            }
            KeyCode::S | KeyCode::ArrowDown => {
                self.backward = pressed;
                true
            }
            KeyCode::A | KeyCode::ArrowLeft => {
                self.left = pressed;
                true
            }
            KeyCode::D | KeyCode::ArrowRight => {
                self.right = pressed;
                true
            }
            _ => false,
        }
    }

    /// Check if any movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Reset all movement keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_default() {
        let keys = MovementKeys::new();
        assert!(!keys.any_pressed());
    }

    #[test]
    fn test_wasd_and_arrows_share_signals() {
        let mut keys = MovementKeys::new();
        assert!(keys.handle_key(KeyCode::W, true));
        assert!(keys.forward);
        keys.handle_key(KeyCode::W, false);
        assert!(keys.handle_key(KeyCode::ArrowUp, true));
        assert!(keys.forward);

        assert!(keys.handle_key(KeyCode::ArrowLeft, true));
        assert!(keys.left);
        assert!(keys.handle_key(KeyCode::D, true));
        assert!(keys.right);
        assert!(keys.handle_key(KeyCode::ArrowDown, true));
        assert!(keys.backward);
    }

    #[test]
    fn test_release_clears_signal() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::S, true);
        keys.handle_key(KeyCode::S, false);
        assert!(!keys.any_pressed());
    }

    #[test]
    fn test_non_movement_key() {
        let mut keys = MovementKeys::new();
        assert!(!keys.handle_key(KeyCode::Escape, true));
        assert!(!keys.handle_key(KeyCode::R, true));
        assert!(!keys.handle_key(KeyCode::Unknown, true));
        assert!(!keys.any_pressed());
    }

    #[test]
    fn test_reset() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::A, true);
        keys.handle_key(KeyCode::W, true);
        keys.reset();
        assert_eq!(keys, MovementKeys::default());
    }
}
