//! Fixed-size particle collection
//!
//! Owns every particle and the random source used to spawn them.
//! Repopulation replaces the whole set; removal and reset touch a single
//! index and leave the rest alone.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::{Particle, ParticleUpdate};
use crate::config::{GameConfig, ParticleConfig};
use crate::render::Surface;

#[derive(Debug, Clone)]
pub struct ParticleField<R = Pcg32> {
    particles: Vec<Particle>,
    particles_count: usize,
    config: ParticleConfig,
    /// Most recent viewport size (from populate or step)
    viewport: Vec2,
    rng: R,
}

impl ParticleField<Pcg32> {
    /// Field with a seeded PCG source
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::new(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleField<R> {
    /// Empty field; call `populate` once the viewport is known
    pub fn new(config: &GameConfig, rng: R) -> Self {
        Self {
            particles: Vec::with_capacity(config.particles_count),
            particles_count: config.particles_count,
            config: config.particle,
            viewport: Vec2::ZERO,
            rng,
        }
    }

    /// Discard all particles and spawn `particles_count` fresh ones
    pub fn populate(&mut self, client_width: f32, client_height: f32) {
        self.populate_count(client_width, client_height, self.particles_count);
    }

    /// Like `populate`, but spawn only `count` particles (capped at `particles_count`)
    pub fn populate_count(&mut self, client_width: f32, client_height: f32, count: usize) {
        self.viewport = Vec2::new(client_width, client_height);
        self.particles.clear();
        for _ in 0..count.min(self.particles_count) {
            let particle = Particle::new(&mut self.rng, client_width, client_height, &self.config);
            self.particles.push(particle);
        }
        log::info!(
            "Populated {} particles for {}x{} viewport",
            self.particles.len(),
            client_width,
            client_height
        );
    }

    /// Advance every particle one frame with the same input
    pub fn step(&mut self, mouse_x: f32, mouse_y: f32, client_width: f32, client_height: f32) {
        self.step_with(&ParticleUpdate::new(
            client_width,
            client_height,
            mouse_x,
            mouse_y,
        ));
    }

    pub fn step_with(&mut self, props: &ParticleUpdate) {
        self.viewport = Vec2::new(props.client_width, props.client_height);
        for particle in &mut self.particles {
            particle.update(props);
        }
    }

    /// Remove the particle at `index`; later particles shift down by one
    pub fn remove_particle(&mut self, index: usize) -> Option<Particle> {
        if index < self.particles.len() {
            Some(self.particles.remove(index))
        } else {
            None
        }
    }

    /// Replace the particle at `index` with a freshly spawned one
    pub fn reset_particle(&mut self, index: usize) -> Option<&Particle> {
        if index >= self.particles.len() {
            return None;
        }
        let particle = Particle::new(&mut self.rng, self.viewport.x, self.viewport.y, &self.config);
        self.particles[index] = particle;
        self.particles.get(index)
    }

    /// Position of the particle at `index`, for hit-testing
    pub fn get_particle(&self, index: usize) -> Option<Vec2> {
        self.particles.get(index).map(|p| p.pos)
    }

    /// Index of the closest particle whose centre is strictly closer than
    /// `radius` to `point`
    pub fn nearest_within(&self, point: Vec2, radius: f32) -> Option<usize> {
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.pos.distance(point)))
            .filter(|&(_, d)| d < radius)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
    }
}

impl<R> ParticleField<R> {
    /// Draw every particle in collection order
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Size of a freshly populated field
    pub fn particles_count(&self) -> usize {
        self.particles_count
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}
