//! Collection game session
//!
//! Wraps the particle field with the canvas game's state machine:
//! Idle -> Started -> AllCollected -> Completed. While started, touching a
//! particle with the cursor collects it; collecting the last one stops the
//! clock.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::debounce::{ResizeDebounce, Viewport};
use super::field::ParticleField;
use super::particle::ParticleUpdate;
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::leaderboard::NewLeaderboardRecord;
use crate::render::Surface;

/// Per-frame host input
pub type FrameInput = ParticleUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Particles float around, nothing is collected
    #[default]
    Idle,
    /// Clock running, cursor collects particles
    Started,
    /// Last particle collected, waiting for leaderboard submission
    AllCollected,
    /// Leaderboard closed
    Completed,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// A debounced resize repopulated the field
    pub repopulated: bool,
    /// Particles collected this frame
    pub collected: usize,
    /// The field emptied and the clock stopped this frame
    pub all_collected: bool,
}

#[derive(Debug)]
pub struct CanvasGame<R = Pcg32> {
    config: GameConfig,
    field: ParticleField<R>,
    debounce: ResizeDebounce,
    viewport: Option<Viewport>,
    status: GameStatus,
    start_ms: Option<f64>,
    end_ms: Option<f64>,
}

impl CanvasGame<Pcg32> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let field = ParticleField::with_seed(&config, seed);
        Self::from_field(config, field)
    }
}

impl<R: Rng> CanvasGame<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        let field = ParticleField::new(&config, rng);
        Self::from_field(config, field)
    }

    fn from_field(config: GameConfig, field: ParticleField<R>) -> Self {
        let debounce = ResizeDebounce::new(config.resize_debounce_ms);
        Self {
            config,
            field,
            debounce,
            viewport: None,
            status: GameStatus::Idle,
            start_ms: None,
            end_ms: None,
        }
    }

    /// Viewport measured or resized. The first measurement populates at once;
    /// later ones are debounced.
    pub fn resize(&mut self, now_ms: f64, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if self.viewport.is_none() {
            self.apply_viewport(viewport);
        } else {
            self.debounce.signal(now_ms, viewport);
        }
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        // Keep progress: only the uncollected particles come back
        let count = match self.status {
            GameStatus::Started | GameStatus::AllCollected => self.field.len(),
            GameStatus::Idle | GameStatus::Completed => self.config.particles_count,
        };
        self.field.populate_count(viewport.width, viewport.height, count);
    }

    /// Begin a run (from Idle, or again after Completed)
    pub fn start(&mut self, now_ms: f64) -> Result<()> {
        match self.status {
            GameStatus::Idle | GameStatus::Completed => {}
            status => {
                return Err(Error::InvalidTransition {
                    action: "start",
                    status,
                });
            }
        }

        // A finished run leaves the field empty
        if self.field.len() < self.config.particles_count {
            if let Some(v) = self.viewport {
                self.field.populate(v.width, v.height);
            }
        }

        self.status = GameStatus::Started;
        self.start_ms = Some(now_ms);
        self.end_ms = None;
        log::info!("Canvas game started with {} particles", self.field.len());
        Ok(())
    }

    /// Close the leaderboard after all particles were collected
    pub fn complete(&mut self) -> Result<()> {
        if self.status != GameStatus::AllCollected {
            return Err(Error::InvalidTransition {
                action: "complete",
                status: self.status,
            });
        }
        self.status = GameStatus::Completed;
        log::info!("Canvas game completed");
        Ok(())
    }

    /// One animation frame: due repopulation, simulation step, collection
    pub fn frame(&mut self, now_ms: f64, input: &FrameInput) -> FrameEvents {
        let mut events = FrameEvents::default();

        if let Some(viewport) = self.debounce.poll(now_ms) {
            self.apply_viewport(viewport);
            events.repopulated = true;
        }

        self.field.step_with(input);

        if self.status == GameStatus::Started {
            events.collected = self.collect_at(input.mouse());
            // Any empty field ends the run, including one emptied via `field_mut`
            if self.field.is_empty() && self.viewport.is_some() {
                self.status = GameStatus::AllCollected;
                self.end_ms = Some(now_ms);
                events.all_collected = true;
                log::info!(
                    "All particles collected in {:.0}ms",
                    self.elapsed_ms(now_ms).unwrap_or_default()
                );
            }
        }

        events
    }

    /// Remove every particle within the collect radius of `cursor`
    fn collect_at(&mut self, cursor: Vec2) -> usize {
        let radius = self.config.cursor_collect_radius_px;
        let mut count = 0;
        while let Some(index) = self.field.nearest_within(cursor, radius) {
            self.field.remove_particle(index);
            count += 1;
        }
        if count > 0 {
            self.burst(cursor);
            log::debug!(
                "Collected {} particle(s), {} remaining",
                count,
                self.field.len()
            );
        }
        count
    }

    /// Push particles near `origin` outward
    fn burst(&mut self, origin: Vec2) {
        let reach = self.config.particle.influence_radius;
        let speed = self.config.burst_speed;
        for particle in self.field.iter_mut() {
            let offset = particle.pos - origin;
            if offset.length() < reach {
                particle.set_velocity(offset.normalize_or_zero() * speed);
            }
        }
    }

    /// Build the leaderboard submission for a finished run
    ///
    /// `date` is an ISO-8601 timestamp, see [`crate::leaderboard::now_iso`].
    pub fn leaderboard_record(&self, username: &str, date: &str) -> Result<NewLeaderboardRecord> {
        let (Some(start), Some(end)) = (self.start_ms, self.end_ms) else {
            return Err(Error::InvalidTransition {
                action: "submit a record",
                status: self.status,
            });
        };
        let timems = (end - start).max(0.0).round() as u64;
        NewLeaderboardRecord::new(username, timems, date)
    }
}

impl<R> CanvasGame<R> {
    /// Draw the field
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.field.render(surface);
    }

    /// Cancel any pending resize; call on component teardown
    pub fn teardown(&mut self) {
        if self.debounce.cancel() {
            log::debug!("Cancelled pending resize on teardown");
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField<R> {
        &mut self.field
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn resize_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Particles taken out of the field during the current run
    pub fn collected(&self) -> usize {
        self.config.particles_count.saturating_sub(self.remaining())
    }

    /// Particles left to collect. During a run this is the field size.
    pub fn remaining(&self) -> usize {
        match self.status {
            GameStatus::Idle => self.config.particles_count,
            GameStatus::Started | GameStatus::AllCollected => self.field.len(),
            GameStatus::Completed => 0,
        }
    }

    /// Time since start (running) or total run time (finished)
    pub fn elapsed_ms(&self, now_ms: f64) -> Option<f64> {
        let start = self.start_ms?;
        match self.status {
            GameStatus::Started => Some(now_ms - start),
            GameStatus::AllCollected | GameStatus::Completed => self.end_ms.map(|end| end - start),
            GameStatus::Idle => None,
        }
    }

    /// Whether the small remaining-count badge should be visible
    pub fn show_counter(&self) -> bool {
        self.status == GameStatus::Started && self.remaining() <= self.config.show_counter_threshold
    }

    /// Whether the game is offered at this viewport width
    pub fn is_supported(&self, width: f32) -> bool {
        width >= self.config.min_screen_width
    }
}

impl<R> Drop for CanvasGame<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
