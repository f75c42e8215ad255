//! Input Module
//!
//! Platform-agnostic keyboard handling. The host translates its own key
//! events into [`KeyCode`] and feeds them to [`MovementKeys`].
//!
//! # Example
//!
//! ```rust
//! use island_forge_engine::input::{KeyCode, MovementKeys};
//!
//! let mut keys = MovementKeys::new();
//! keys.handle_key(KeyCode::W, true);
//! assert!(keys.forward);
//! ```

pub mod keyboard;

pub use keyboard::{KeyCode, MovementKeys};
