//! Browser canvas 2D back end (wasm32 only)

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{Hsla, Surface};

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_fill_color(&mut self, color: Hsla) {
        self.set_fill_style_str(&color.to_string());
    }

    fn set_shadow(&mut self, blur: f32, color: Hsla) {
        self.set_shadow_blur(blur as f64);
        self.set_shadow_color(&color.to_string());
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.begin_path();
        if let Err(e) = self.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.fill();
    }
}
