//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

/// Number of background specks
pub const SPECK_COUNT: usize = 80;
/// Speck side length (pixels)
pub const SPECK_SIZE: f32 = 2.0;

/// Background speck positions. They drift with the score so the field
/// appears to scroll as the run goes on.
pub fn background_specks(field: Vec2, score: u32) -> impl Iterator<Item = Vec2> {
    let score = score as f32;
    (0..SPECK_COUNT).map(move |i| {
        let i = i as f32;
        Vec2::new(
            (i * 53.0 + score) % field.x,
            (i * 97.0 + score * 0.4) % field.y,
        )
    })
}

/// Five-point star outline inside the `size` box at `pos`
pub fn star_outline(pos: Vec2, size: f32) -> Vec<Vec2> {
    let center = pos + Vec2::splat(size / 2.0);
    let mut points = Vec::with_capacity(5);
    points.push(Vec2::new(center.x, pos.y));
    for i in 1..5 {
        let angle = i as f32 * TAU / 5.0;
        let radius = if i % 2 == 0 { size / 2.0 } else { size / 4.0 };
        points.push(Vec2::new(
            center.x + angle.sin() * radius,
            center.y - angle.cos() * radius,
        ));
    }
    points
}

/// Craft triangle: nose at top center, base along the bottom edge
pub fn craft_hull(pos: Vec2, size: Vec2) -> [Vec2; 3] {
    [
        Vec2::new(pos.x + size.x / 2.0, pos.y),
        Vec2::new(pos.x + size.x, pos.y + size.y),
        Vec2::new(pos.x, pos.y + size.y),
    ]
}

/// Cockpit rectangle (top-left, size), centered below the nose
pub fn craft_cockpit(pos: Vec2, size: Vec2) -> (Vec2, Vec2) {
    (
        Vec2::new(pos.x + size.x / 2.0 - 6.0, pos.y + size.y / 2.0),
        Vec2::new(12.0, 16.0),
    )
}
