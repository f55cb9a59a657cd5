//! Headless surface that records draw calls
//!
//! Used by tests and the native demo to inspect what a frame would draw.

use glam::Vec2;

use super::{Hsla, Surface};

/// A circle as it would be rasterized, with the state active at the time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Option<Hsla>,
    /// (blur, colour)
    pub shadow: Option<(f32, Hsla)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct State {
    fill: Option<Hsla>,
    shadow: Option<(f32, Hsla)>,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    current: State,
    stack: Vec<State>,
    commands: Vec<DrawCommand>,
    /// Restores without a matching save
    unbalanced_restores: u32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of outstanding saves
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn fill(&self) -> Option<Hsla> {
        self.current.fill
    }

    pub fn shadow(&self) -> Option<(f32, Hsla)> {
        self.current.shadow
    }

    pub fn unbalanced_restores(&self) -> u32 {
        self.unbalanced_restores
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        // Canvas semantics: restore on an empty stack is a no-op
        match self.stack.pop() {
            Some(state) => self.current = state,
            None => self.unbalanced_restores += 1,
        }
    }

    fn set_fill_color(&mut self, color: Hsla) {
        self.current.fill = Some(color);
    }

    fn set_shadow(&mut self, blur: f32, color: Hsla) {
        self.current.shadow = Some((blur, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand {
            center,
            radius,
            fill: self.current.fill,
            shadow: self.current.shadow,
        });
    }
}
