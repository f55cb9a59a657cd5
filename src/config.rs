//! Game configuration
//!
//! Fixed at startup. Defaults match the site's canvas game; a JSON blob
//! (LocalStorage on web) may override any subset of keys.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Physical parameters shared by every particle in the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Pointer attraction radius (px)
    pub influence_radius: f32,
    /// Global speed scale
    pub velocity_modifier: f32,
    /// Attraction force scale
    pub strength_factor: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            influence_radius: 160.0,
            velocity_modifier: 100.0,
            strength_factor: 0.0018,
        }
    }
}

/// Canvas game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// DOM id of the game canvas
    pub canvas_id: String,
    /// Number of particles in a freshly populated field
    pub particles_count: usize,
    /// Game is only offered on viewports at least this wide (px)
    pub min_screen_width: f32,
    /// How close to the cursor a particle must be to be collected (px)
    pub cursor_collect_radius_px: f32,
    /// Particle physics
    pub particle: ParticleConfig,
    /// Remaining-particle count at which the small counter is shown
    pub show_counter_threshold: usize,
    /// Delay before repopulating after a resize (ms)
    pub resize_debounce_ms: f64,
    /// Outward speed given to nearby particles when one is collected
    pub burst_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas-game".to_string(),
            particles_count: 20,
            min_screen_width: 800.0,
            cursor_collect_radius_px: 24.0,
            particle: ParticleConfig::default(),
            show_counter_threshold: 5,
            resize_debounce_ms: 150.0,
            burst_speed: 6.0,
        }
    }
}

impl GameConfig {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_game_config";

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.particles_count == 0 {
            return Err(Error::InvalidConfig("particles_count must be > 0".into()));
        }
        let p = &self.particle;
        if !(p.influence_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "particle.influence_radius must be > 0 (got {})",
                p.influence_radius
            )));
        }
        if !p.velocity_modifier.is_finite() || !p.strength_factor.is_finite() {
            return Err(Error::InvalidConfig(
                "particle velocity_modifier/strength_factor must be finite".into(),
            ));
        }
        if !(self.cursor_collect_radius_px >= 0.0) {
            return Err(Error::InvalidConfig(
                "cursor_collect_radius_px must be >= 0".into(),
            ));
        }
        if !(self.resize_debounce_ms >= 0.0) {
            return Err(Error::InvalidConfig("resize_debounce_ms must be >= 0".into()));
        }
        Ok(())
    }

    /// Load config overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded canvas game config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {e}"),
                }
            }
        }

        log::info!("Using default canvas game config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
