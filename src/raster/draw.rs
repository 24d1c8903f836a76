//! Drawing primitives
//!
//! Stateless operations against a [`Pixmap`]. Geometry outside the pixmap is
//! clipped, never wrapped, and malformed requests (negative sizes, radius
//! <= 0) draw nothing.

use super::{Pixmap, Rgba};
use crate::math::Vec2;

/// Fill a rectangle with an opaque color, clipped to the pixmap
pub fn fill_rect(pixmap: &mut Pixmap, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
    if w <= 0 || h <= 0 {
        return;
    }
    let width = pixmap.width() as i64;
    let height = pixmap.height() as i64;

    // i64 so x + w cannot overflow
    let x0 = (x as i64).clamp(0, width);
    let x1 = (x as i64 + w as i64).clamp(0, width);
    let y0 = (y as i64).clamp(0, height);
    let y1 = (y as i64 + h as i64).clamp(0, height);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let color = color.with_alpha(255);
    for row in y0..y1 {
        pixmap.fill_span(x0 as u32, x1 as u32, row as u32, color);
    }
}

/// Fill a circle with an opaque color.
///
/// A pixel is covered when its distance to `center` is strictly less than
/// `radius`; no anti-aliasing.
pub fn fill_circle(pixmap: &mut Pixmap, center: Vec2, radius: f32, color: Rgba) {
    if !(radius > 0.0) {
        return;
    }
    let x_start = ((center.x - radius).floor() as i32).max(0);
    let x_end = ((center.x + radius).ceil() as i32).min(pixmap.width() as i32 - 1);
    let y_start = ((center.y - radius).floor() as i32).max(0);
    let y_end = ((center.y + radius).ceil() as i32).min(pixmap.height() as i32 - 1);

    let color = color.with_alpha(255);
    let r_sq = radius * radius;
    for y in y_start..=y_end {
        let dy = y as f32 - center.y;
        let dy_sq = dy * dy;
        for x in x_start..=x_end {
            let dx = x as f32 - center.x;
            if dx * dx + dy_sq < r_sq {
                pixmap.set_pixel(x, y, color);
            }
        }
    }
}

/// Alpha-blend a line from `a` toward `b`.
///
/// `color` must already be premultiplied (see [`Rgba::premultiplied`]).
/// Walks `floor(|b - a|)` unit steps starting at `a`; each visited pixel gets
/// `dst * (1 - alpha) + color`. Off-pixmap steps are skipped.
pub fn draw_line(pixmap: &mut Pixmap, a: Vec2, b: Vec2, color: Rgba) {
    let delta = b - a;
    let distance = delta.length();
    if !distance.is_finite() {
        return;
    }
    let steps = distance.floor() as i32;
    if steps <= 0 {
        return;
    }
    let dir = delta.normalize();
    for i in 0..steps {
        let p = a + dir * i as f32;
        pixmap.blend_premultiplied(p.x.floor() as i32, p.y.floor() as i32, color);
    }
}
