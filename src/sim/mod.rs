//! Particle simulation module
//!
//! Frame-driven and single-threaded: the host calls one step and one render
//! per animation frame.
//! - Seeded RNG only (pluggable via `rand::Rng`)
//! - No inter-particle interaction, so update order does not matter
//! - No platform dependencies; time comes in as host milliseconds

pub mod debounce;
pub mod field;
pub mod game;
pub mod particle;

pub use debounce::{ResizeDebounce, Viewport};
pub use field::ParticleField;
pub use game::{CanvasGame, FrameEvents, FrameInput, GameStatus};
pub use particle::{Particle, ParticleUpdate};
