//! Particle Field - pointer-attracted particle canvas game
//!
//! Core modules:
//! - `sim`: Frame-driven particle simulation, resize debounce, collection game
//! - `render`: Drawing surface abstraction and its back ends
//! - `config`: Game configuration (defaults + JSON overrides)
//! - `leaderboard`: Leaderboard record contract and validation
//! - `error`: Crate-wide error type

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod render;
pub mod sim;

pub use config::{GameConfig, ParticleConfig};
pub use error::{Error, Result};
pub use leaderboard::{LeaderboardRecord, NewLeaderboardRecord};

/// Simulation constants
pub mod consts {
    /// Per-frame velocity damping factor
    pub const VELOCITY_DAMPING: f32 = 0.98;
    /// Distances below this are floored to avoid division by zero
    pub const MIN_POINTER_DISTANCE: f32 = 1.0;
    /// Scale of the initial velocity draw (before the velocity modifier)
    pub const INITIAL_VELOCITY_SCALE: f32 = 0.03;

    /// Particle radius range (px)
    pub const RADIUS_MIN: f32 = 12.0;
    pub const RADIUS_MAX: f32 = 36.0;

    /// Particle hue range (degrees)
    pub const HUE_MIN: f32 = 190.0;
    pub const HUE_MAX: f32 = 310.0;

    /// Idle drift ranges
    pub const DRIFT_AMPLITUDE_MIN: f32 = 0.004;
    pub const DRIFT_AMPLITUDE_MAX: f32 = 0.008;
    pub const DRIFT_SPEED_MIN: f32 = 0.002;
    pub const DRIFT_SPEED_MAX: f32 = 0.006;

    /// Default fill alpha for particle discs
    pub const DEFAULT_ALPHA: f32 = 0.3;
    /// Fill saturation / lightness (percent)
    pub const FILL_SATURATION: f32 = 80.0;
    pub const FILL_LIGHTNESS: f32 = 60.0;
    /// Glow is `max(GLOW_MIN, radius * GLOW_FACTOR)`
    pub const GLOW_MIN: f32 = 2.0;
    pub const GLOW_FACTOR: f32 = 0.6;
}
