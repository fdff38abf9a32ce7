//! 2D rendering
//!
//! The renderer only reads the `GameState`. Drawing goes through [`Surface`]
//! so the browser can paint onto a canvas and tests can record calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::sim::GameState;

/// A CSS color string
pub type Color = &'static str;

/// Palette
pub mod colors {
    use super::Color;

    pub const SKY_TOP: Color = "#0f1f3a";
    pub const SKY_BOTTOM: Color = "#040910";
    pub const SPECK: Color = "rgba(255, 255, 255, 0.1)";
    pub const STAR: Color = "#ffd166";
    pub const OBSTACLE: Color = "#7289da";
    pub const CRAFT: Color = "#ff6f91";
    pub const COCKPIT: Color = "#ffe8f0";
}

/// A fill-only 2D drawing sink
pub trait Surface {
    /// Fill the whole surface with a top-to-bottom gradient
    fn fill_vertical_gradient(&mut self, top: Color, bottom: Color);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    /// Fill a closed polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Paint one frame: background, stars, obstacles, craft
pub fn draw_frame(state: &GameState, surface: &mut impl Surface) {
    draw_background(state, surface);
    draw_stars(state, surface);
    draw_obstacles(state, surface);
    draw_craft(state, surface);
}

fn draw_background(state: &GameState, surface: &mut impl Surface) {
    surface.fill_vertical_gradient(colors::SKY_TOP, colors::SKY_BOTTOM);
    for speck in shapes::background_specks(state.field, state.score()) {
        surface.fill_rect(speck, Vec2::splat(shapes::SPECK_SIZE), colors::SPECK);
    }
}

fn draw_stars(state: &GameState, surface: &mut impl Surface) {
    for star in &state.stars {
        surface.fill_polygon(&shapes::star_outline(star.pos, star.size), colors::STAR);
    }
}

fn draw_obstacles(state: &GameState, surface: &mut impl Surface) {
    for obstacle in &state.obstacles {
        let radius = obstacle.size / 2.0;
        surface.fill_circle(obstacle.pos + Vec2::splat(radius), radius, colors::OBSTACLE);
    }
}

fn draw_craft(state: &GameState, surface: &mut impl Surface) {
    let craft = &state.craft;
    surface.fill_polygon(&shapes::craft_hull(craft.pos, craft.size), colors::CRAFT);
    let (pos, size) = shapes::craft_cockpit(craft.pos, craft.size);
    surface.fill_rect(pos, size, colors::COCKPIT);
}
