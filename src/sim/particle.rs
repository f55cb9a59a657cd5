//! A single pointer-attracted particle
//!
//! Plain data plus per-frame integration. Particles never look at each
//! other, so a field can update them in any order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::config::ParticleConfig;
use crate::consts::*;
use crate::render::{Hsla, Surface, SurfaceGuard};

/// Per-frame input, shared by every particle in the field
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleUpdate {
    pub client_width: f32,
    pub client_height: f32,
    pub mouse_x: f32,
    pub mouse_y: f32,
}

impl ParticleUpdate {
    pub fn new(client_width: f32, client_height: f32, mouse_x: f32, mouse_y: f32) -> Self {
        Self {
            client_width,
            client_height,
            mouse_x,
            mouse_y,
        }
    }

    #[inline]
    pub fn mouse(&self) -> Vec2 {
        Vec2::new(self.mouse_x, self.mouse_y)
    }
}

/// Uniform draw in `[lo, hi)`; tolerates empty ranges (returns `lo`)
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Shared-scalar initial velocity: both axes get the same draw
fn initial_velocity<R: Rng + ?Sized>(rng: &mut R, velocity_modifier: f32) -> Vec2 {
    let base = (rng.random::<f32>() - 0.5) * INITIAL_VELOCITY_SCALE * velocity_modifier;
    Vec2::splat(base)
}

/// Clamp one axis into `[0, max]`, flipping its velocity on contact
#[inline]
fn reflect_axis(pos: &mut f32, vel: &mut f32, max: f32) {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = -*vel;
    } else if *pos > max {
        *pos = max;
        *vel = -*vel;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Fill hue in degrees (visual only)
    pub hue: f32,
    pub velocity_modifier: f32,
    pub influence_radius: f32,
    pub strength_factor: f32,
    /// Idle drift direction (radians), advances while un-influenced
    pub drift_phase: f32,
    pub drift_amplitude: f32,
    pub drift_speed: f32,
}

impl Particle {
    /// Spawn at a random point of a `client_width` x `client_height` viewport
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        client_width: f32,
        client_height: f32,
        config: &ParticleConfig,
    ) -> Self {
        let mut particle = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            drift_phase: rng.random::<f32>() * TAU,
            drift_amplitude: uniform(rng, DRIFT_AMPLITUDE_MIN, DRIFT_AMPLITUDE_MAX),
            drift_speed: uniform(rng, DRIFT_SPEED_MIN, DRIFT_SPEED_MAX),
            radius: uniform(rng, RADIUS_MIN, RADIUS_MAX),
            hue: uniform(rng, HUE_MIN, HUE_MAX),
            velocity_modifier: config.velocity_modifier,
            influence_radius: config.influence_radius,
            strength_factor: config.strength_factor,
        };
        particle.reset(rng, client_width, client_height);
        particle
    }

    /// Non-random particle (smallest radius, no drift) for scripted setups
    pub fn from_parts(pos: Vec2, vel: Vec2, config: &ParticleConfig) -> Self {
        Self {
            pos,
            vel,
            radius: RADIUS_MIN,
            hue: HUE_MIN,
            velocity_modifier: config.velocity_modifier,
            influence_radius: config.influence_radius,
            strength_factor: config.strength_factor,
            drift_phase: 0.0,
            drift_amplitude: 0.0,
            drift_speed: 0.0,
        }
    }

    /// Re-draw position and velocity, keeping size, hue and drift
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, client_width: f32, client_height: f32) {
        self.pos = Vec2::new(
            rng.random::<f32>() * client_width,
            rng.random::<f32>() * client_height,
        );
        self.vel = initial_velocity(rng, self.velocity_modifier);
    }

    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
    }

    /// Whether the pointer at (floored) distance `dist` attracts this particle
    #[inline]
    pub fn is_influenced_at(&self, dist: f32) -> bool {
        dist < self.influence_radius
    }

    /// Linear falloff: `strength_factor * velocity_modifier` at the centre,
    /// zero at (and beyond) the influence radius
    pub fn attraction_strength(&self, dist: f32) -> f32 {
        if !self.is_influenced_at(dist) {
            return 0.0;
        }
        (1.0 - dist / self.influence_radius) * self.strength_factor * self.velocity_modifier
    }

    /// Advance one frame
    pub fn update(&mut self, props: &ParticleUpdate) {
        self.vel *= VELOCITY_DAMPING;

        let delta = props.mouse() - self.pos;
        let dist = delta.length().max(MIN_POINTER_DISTANCE);

        // Drift and attraction are mutually exclusive
        if self.is_influenced_at(dist) {
            let strength = self.attraction_strength(dist);
            self.vel += delta / dist * strength;
        } else {
            let drift = Vec2::new(self.drift_phase.cos(), self.drift_phase.sin());
            self.vel += drift * self.drift_amplitude;
            self.drift_phase += self.drift_speed;
            if self.drift_phase >= TAU {
                self.drift_phase -= TAU;
            }
        }

        self.pos += self.vel;

        reflect_axis(&mut self.pos.x, &mut self.vel.x, props.client_width);
        reflect_axis(&mut self.pos.y, &mut self.vel.y, props.client_height);
    }

    pub fn color(&self, alpha: f32) -> Hsla {
        Hsla::new(self.hue, FILL_SATURATION, FILL_LIGHTNESS, alpha)
    }

    /// Glow blur radius
    pub fn glow(&self) -> f32 {
        (self.radius * GLOW_FACTOR).max(GLOW_MIN)
    }

    /// Draw with the default alpha
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.draw_with_alpha(surface, DEFAULT_ALPHA);
    }

    pub fn draw_with_alpha<S: Surface + ?Sized>(&self, surface: &mut S, alpha: f32) {
        let color = self.color(alpha);
        let mut surface = SurfaceGuard::new(surface);
        surface.set_fill_color(color);
        surface.set_shadow(self.glow(), color);
        surface.fill_circle(self.pos, self.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn config() -> ParticleConfig {
        ParticleConfig::default()
    }

    /// Pointer parked far outside any influence radius
    fn far_pointer() -> ParticleUpdate {
        ParticleUpdate::new(W, H, -10_000.0, -10_000.0)
    }

    #[test]
    fn test_construction_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::new(&mut rng, W, H, &config());
            assert!((0.0..=W).contains(&p.pos.x));
            assert!((0.0..=H).contains(&p.pos.y));
            assert!((RADIUS_MIN..=RADIUS_MAX).contains(&p.radius));
            assert!((HUE_MIN..=HUE_MAX).contains(&p.hue));
            assert!((0.0..=TAU).contains(&p.drift_phase));
            assert!((DRIFT_AMPLITUDE_MIN..=DRIFT_AMPLITUDE_MAX).contains(&p.drift_amplitude));
            assert!((DRIFT_SPEED_MIN..=DRIFT_SPEED_MAX).contains(&p.drift_speed));

            // One scalar draw shared by both axes
            assert_eq!(p.vel.x, p.vel.y);
            assert!(p.vel.x.abs() <= 0.5 * INITIAL_VELOCITY_SCALE * 100.0);
        }
    }

    #[test]
    fn test_same_seed_same_particle() {
        let a = Particle::new(&mut Pcg32::seed_from_u64(42), W, H, &config());
        let b = Particle::new(&mut Pcg32::seed_from_u64(42), W, H, &config());
        assert_eq!(a, b);
    }

    #[test]
    fn test_reset_keeps_appearance() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = Particle::new(&mut rng, W, H, &config());
        let (radius, hue, amp) = (p.radius, p.hue, p.drift_amplitude);
        p.reset(&mut rng, 100.0, 50.0);
        assert!(p.pos.x <= 100.0 && p.pos.y <= 50.0);
        assert_eq!(p.vel.x, p.vel.y);
        assert_eq!((p.radius, p.hue, p.drift_amplitude), (radius, hue, amp));
    }

    #[test]
    fn test_spawn_places_via_reset() {
        let p = Particle::new(&mut Pcg32::seed_from_u64(21), W, H, &config());

        // Same stream: five appearance draws, then placement
        let mut rng = Pcg32::seed_from_u64(21);
        for _ in 0..5 {
            let _ = rng.random::<f32>();
        }
        let mut q = p.clone();
        q.pos = Vec2::ZERO;
        q.vel = Vec2::ZERO;
        q.reset(&mut rng, W, H);
        assert_eq!(p, q);
    }

    #[test]
    fn test_reflection_at_right_edge() {
        let mut p = Particle::from_parts(Vec2::new(W - 0.5, 300.0), Vec2::new(5.0, 0.0), &config());
        p.update(&far_pointer());
        assert_eq!(p.pos.x, W);
        assert!(p.vel.x < 0.0);
    }

    #[test]
    fn test_reflection_in_corner_flips_both_axes() {
        let mut p = Particle::from_parts(Vec2::new(0.5, 0.5), Vec2::new(-3.0, -3.0), &config());
        p.update(&far_pointer());
        assert_eq!(p.pos, Vec2::ZERO);
        assert!(p.vel.x > 0.0 && p.vel.y > 0.0);
    }

    #[test]
    fn test_influenced_particle_does_not_drift() {
        let mut p = Particle::new(&mut Pcg32::seed_from_u64(11), W, H, &config());
        p.pos = Vec2::new(400.0, 300.0);
        let phase = p.drift_phase;
        p.update(&ParticleUpdate::new(W, H, 450.0, 300.0));
        assert_eq!(p.drift_phase, phase);
    }

    #[test]
    fn test_uninfluenced_particle_gets_only_drift() {
        let mut p = Particle::new(&mut Pcg32::seed_from_u64(12), W, H, &config());
        p.pos = Vec2::new(400.0, 300.0);
        p.vel = Vec2::new(1.0, -1.0);
        let phase = p.drift_phase;
        let expected = Vec2::new(1.0, -1.0) * VELOCITY_DAMPING
            + Vec2::new(phase.cos(), phase.sin()) * p.drift_amplitude;

        // Exactly on the boundary counts as outside
        p.update(&ParticleUpdate::new(W, H, 400.0 + p.influence_radius, 300.0));

        assert!((p.vel - expected).length() < 1e-6);
        assert!(p.drift_phase != phase);
    }

    #[test]
    fn test_strength_falloff() {
        let p = Particle::from_parts(Vec2::ZERO, Vec2::ZERO, &config());
        assert_eq!(p.attraction_strength(p.influence_radius), 0.0);
        assert_eq!(p.attraction_strength(p.influence_radius + 10.0), 0.0);

        // Strongest at the floored distance, approaching factor * modifier
        let peak = p.strength_factor * p.velocity_modifier;
        let at_floor = p.attraction_strength(MIN_POINTER_DISTANCE);
        assert!((at_floor - peak * (1.0 - 1.0 / p.influence_radius)).abs() < 1e-6);
        for d in [2.0, 20.0, 80.0, 159.0] {
            assert!(p.attraction_strength(d) < at_floor);
        }
    }

    #[test]
    fn test_pointer_on_particle_is_finite() {
        let mut p = Particle::from_parts(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), &config());
        p.update(&ParticleUpdate::new(W, H, 100.0, 100.0));
        // Zero offset: no direction to pull in, only damping applies
        assert!(p.vel.is_finite());
        assert!((p.vel.x - VELOCITY_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn test_damping_law() {
        let mut p = Particle::from_parts(Vec2::new(400.0, 300.0), Vec2::new(2.5, -1.5), &config());
        p.update(&far_pointer());
        assert_eq!(p.vel.x, 2.5 * VELOCITY_DAMPING);
        assert_eq!(p.vel.y, -1.5 * VELOCITY_DAMPING);
    }

    #[test]
    fn test_attraction_scenario() {
        let mut p = Particle::from_parts(Vec2::new(100.0, 100.0), Vec2::ZERO, &config());
        p.update(&ParticleUpdate::new(W, H, 120.0, 100.0));

        // (1 - 20/160) * 0.0018 * 100
        assert!((p.vel.x - 0.1575).abs() < 1e-6);
        assert_eq!(p.vel.y, 0.0);
        assert!((p.pos.x - 100.1575).abs() < 1e-4);
    }

    #[test]
    fn test_draw_scopes_state() {
        let mut surface = RecordingSurface::new();
        let p = Particle::from_parts(Vec2::new(10.0, 20.0), Vec2::ZERO, &config());
        p.draw(&mut surface);

        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.fill(), None);
        assert_eq!(surface.shadow(), None);

        let cmd = surface.commands()[0];
        let color = Hsla::new(HUE_MIN, 80.0, 60.0, DEFAULT_ALPHA);
        assert_eq!(cmd.center, Vec2::new(10.0, 20.0));
        assert_eq!(cmd.radius, RADIUS_MIN);
        assert_eq!(cmd.fill, Some(color));
        assert_eq!(cmd.shadow, Some((RADIUS_MIN * GLOW_FACTOR, color)));
    }

    #[test]
    fn test_glow_floor() {
        let mut p = Particle::from_parts(Vec2::ZERO, Vec2::ZERO, &config());
        p.radius = 1.0;
        assert_eq!(p.glow(), GLOW_MIN);
    }

    proptest! {
        #[test]
        fn prop_stays_inside_viewport(
            seed in any::<u64>(),
            w in 1.0f32..2000.0,
            h in 1.0f32..2000.0,
            pointers in prop::collection::vec((-500.0f32..2500.0, -500.0f32..2500.0), 1..200),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut p = Particle::new(&mut rng, w, h, &ParticleConfig::default());
            for (mx, my) in pointers {
                p.update(&ParticleUpdate::new(w, h, mx, my));
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= w);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y <= h);
            }
        }
    }
}
