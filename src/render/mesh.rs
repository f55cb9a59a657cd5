//! Surface that tessellates particle discs into triangle lists
//!
//! Output is a flat `Vec<Vertex>` (3 vertices per triangle) ready to be cast
//! with `bytemuck` and uploaded as a vertex buffer.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use super::{Hsla, Surface};

/// Segments used to approximate a circle
const CIRCLE_SEGMENTS: usize = 24;

#[derive(Debug, Clone, Copy)]
struct State {
    fill: Hsla,
    shadow_blur: f32,
    shadow: Hsla,
}

impl Default for State {
    fn default() -> Self {
        Self {
            fill: Hsla::new(0.0, 0.0, 0.0, 1.0),
            shadow_blur: 0.0,
            shadow: Hsla::TRANSPARENT,
        }
    }
}

#[derive(Debug, Default)]
pub struct MeshSurface {
    current: State,
    stack: Vec<State>,
    vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Drop geometry from the previous frame (keeps allocation)
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Glow ring: opaque-ish at the disc edge, fading out over `blur` px
    fn push_glow(&mut self, center: Vec2, radius: f32) {
        let blur = self.current.shadow_blur;
        if blur <= 0.0 || self.current.shadow.alpha <= 0.0 {
            return;
        }
        let inner_color = self.current.shadow.to_rgba();
        let mut outer_color = inner_color;
        outer_color[3] = 0.0;
        let outer = radius + blur;

        for i in 0..CIRCLE_SEGMENTS {
            let a1 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            let a2 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            let d1 = Vec2::new(a1.cos(), a1.sin());
            let d2 = Vec2::new(a2.cos(), a2.sin());

            let i1 = center + d1 * radius;
            let i2 = center + d2 * radius;
            let o1 = center + d1 * outer;
            let o2 = center + d2 * outer;

            self.vertices.push(Vertex::new(i1.x, i1.y, inner_color));
            self.vertices.push(Vertex::new(o1.x, o1.y, outer_color));
            self.vertices.push(Vertex::new(o2.x, o2.y, outer_color));

            self.vertices.push(Vertex::new(i1.x, i1.y, inner_color));
            self.vertices.push(Vertex::new(o2.x, o2.y, outer_color));
            self.vertices.push(Vertex::new(i2.x, i2.y, inner_color));
        }
    }

    fn push_disc(&mut self, center: Vec2, radius: f32) {
        let color = self.current.fill.to_rgba();
        for i in 0..CIRCLE_SEGMENTS {
            let a1 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            let a2 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;
            let p2 = center + Vec2::new(a2.cos(), a2.sin()) * radius;

            self.vertices.push(Vertex::new(center.x, center.y, color));
            self.vertices.push(Vertex::new(p1.x, p1.y, color));
            self.vertices.push(Vertex::new(p2.x, p2.y, color));
        }
    }
}

impl Surface for MeshSurface {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.current = state;
        }
    }

    fn set_fill_color(&mut self, color: Hsla) {
        self.current.fill = color;
    }

    fn set_shadow(&mut self, blur: f32, color: Hsla) {
        self.current.shadow_blur = blur.max(0.0);
        self.current.shadow = color;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        // Glow first so the disc sits on top of it
        self.push_glow(center, radius);
        self.push_disc(center, radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_without_shadow() {
        let mut mesh = MeshSurface::new();
        mesh.fill_circle(Vec2::new(10.0, 10.0), 5.0);
        assert_eq!(mesh.vertices().len(), CIRCLE_SEGMENTS * 3);

        // Every rim vertex lies on the circle
        for v in mesh.vertices() {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            assert!(d < 1e-3 || (d - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_glow_adds_fading_ring() {
        let mut mesh = MeshSurface::new();
        let c = Hsla::new(250.0, 80.0, 60.0, 0.3);
        mesh.set_fill_color(c);
        mesh.set_shadow(6.0, c);
        mesh.fill_circle(Vec2::ZERO, 10.0);

        assert_eq!(mesh.vertices().len(), CIRCLE_SEGMENTS * 9);
        let max_r = mesh
            .vertices()
            .iter()
            .map(|v| Vec2::from(v.position).length())
            .fold(0.0f32, f32::max);
        assert!((max_r - 16.0).abs() < 1e-3);

        // Outermost vertices are fully transparent
        for v in mesh.vertices() {
            if (Vec2::from(v.position).length() - 16.0).abs() < 1e-3 {
                assert_eq!(v.color[3], 0.0);
            }
        }
    }

    #[test]
    fn test_restore_drops_shadow() {
        let mut mesh = MeshSurface::new();
        mesh.save();
        mesh.set_shadow(6.0, Hsla::new(250.0, 80.0, 60.0, 0.3));
        mesh.restore();
        mesh.fill_circle(Vec2::ZERO, 10.0);
        assert_eq!(mesh.vertices().len(), CIRCLE_SEGMENTS * 3);
        assert_eq!(mesh.as_bytes().len(), CIRCLE_SEGMENTS * 3 * Vertex::STRIDE);
    }
}
