//! `CanvasRenderingContext2d` surface

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    /// Current canvas size in pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }
}

impl Surface for CanvasSurface {
    fn fill_vertical_gradient(&mut self, top: Color, bottom: Color) {
        let size = self.size();
        let gradient = self
            .ctx
            .create_linear_gradient(0.0, 0.0, 0.0, size.y as f64);
        // Color stops only fail on malformed colors, which are all constants
        let _ = gradient.add_color_stop(0.0, top);
        let _ = gradient.add_color_stop(1.0, bottom);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}
