//! Drawing surface abstraction
//!
//! Particles draw through the `Surface` trait. Any fill/shadow mutation is
//! wrapped in a `SurfaceGuard`, which saves state on creation and restores it
//! on drop, so unwinding out of a draw call cannot leak state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod mesh;
pub mod recording;
pub mod vertex;

pub use mesh::MeshSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use vertex::Vertex;

use std::fmt;
use std::ops::{Deref, DerefMut};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// HSL colour with alpha. Hue in degrees, saturation/lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub const TRANSPARENT: Hsla = Hsla::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Convert to linear-space-agnostic RGBA in 0..1
    pub fn to_rgba(&self) -> [f32; 4] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m, self.alpha.clamp(0.0, 1.0)]
    }
}

/// CSS form, e.g. `hsla(250, 80%, 60%, 0.3)`
impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Minimal 2D drawing capability needed by the particle field
pub trait Surface {
    /// Push the current fill/shadow state
    fn save(&mut self);
    /// Pop the last saved fill/shadow state
    fn restore(&mut self);
    fn set_fill_color(&mut self, color: Hsla);
    /// Soft glow around subsequent fills
    fn set_shadow(&mut self, blur: f32, color: Hsla);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
}

/// Scoped surface state: `save` on creation, `restore` on drop
pub struct SurfaceGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> SurfaceGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
