//! Software rasterizer
//!
//! All drawing goes through a [`Pixmap`], a bounds-checked view over a
//! strided RGBA8888 byte buffer. Pixels are stored in ABGR byte order
//! (RGBA8888 little-endian) so the buffer can be streamed to an SDL texture
//! without conversion.

mod draw;
mod pixel_buffer;

pub use draw::{draw_line, fill_circle, fill_rect};
pub use pixel_buffer::{PixelBuffer, Pixmap, PixmapError, BYTES_PER_PIXEL};

/// Straight (non-premultiplied) RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Scale the color channels by alpha, the form [`draw_line`] takes
    #[inline]
    pub fn premultiplied(self) -> Self {
        let scale = |c: u8| ((c as u16 * self.a as u16 + 127) / 255) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// Linear interpolation between two colors (t clamped to [0, 1])
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premultiplied_scales_channels() {
        let c = Rgba::rgba(200, 100, 0, 128).premultiplied();
        assert_eq!(c, Rgba::rgba(100, 50, 0, 128));
        assert_eq!(Rgba::WHITE.premultiplied(), Rgba::WHITE);
    }

    #[test]
    fn test_lerp_clamps() {
        let a = Rgba::rgb(0, 0, 0);
        let b = Rgba::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgba::rgb(100, 50, 25));
    }
}
