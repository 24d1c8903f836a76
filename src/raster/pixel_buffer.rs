use super::Rgba;
use thiserror::Error;

/// Bytes per packed pixel
pub const BYTES_PER_PIXEL: usize = 4;

// ============================================================================
// Utility Functions
// ============================================================================

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], c: Rgba) {
    dest[0] = c.a; // A
    dest[1] = c.b; // B
    dest[2] = c.g; // G
    dest[3] = c.r; // R
}

#[inline]
fn read_pixel(src: &[u8]) -> Rgba {
    Rgba::rgba(src[3], src[2], src[1], src[0])
}

/// dst' = dst * (1 - a) + src, per channel; `src` is already premultiplied
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let kept = (dst as u16 * (255 - alpha as u16) + 127) / 255;
    (kept as u8).saturating_add(src)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixmapError {
    #[error("row stride {stride} is smaller than {min} bytes ({width} pixels)")]
    StrideTooSmall { stride: usize, min: usize, width: u32 },

    #[error("buffer holds {len} bytes, {needed} needed for {height} rows")]
    BufferTooSmall { len: usize, needed: usize, height: u32 },
}

// ============================================================================
// Pixmap
// ============================================================================

/// Borrowed, bounds-checked view over a strided pixel buffer.
///
/// Holds `stride >= width * 4` and enough bytes for `height` rows. Every write
/// goes through a coordinate check, so nothing outside the visible
/// `width x height` area (including row padding) is ever touched.
pub struct Pixmap<'a> {
    bytes: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> Pixmap<'a> {
    pub fn new(
        bytes: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, PixmapError> {
        let min = width as usize * BYTES_PER_PIXEL;
        if stride < min {
            return Err(PixmapError::StrideTooSmall { stride, min, width });
        }
        // Last row only needs its visible part. Overflow can never fit.
        let needed = match height {
            0 => 0,
            h => stride
                .checked_mul(h as usize - 1)
                .and_then(|n| n.checked_add(min))
                .unwrap_or(usize::MAX),
        };
        if bytes.len() < needed {
            return Err(PixmapError::BufferTooSmall {
                len: bytes.len(),
                needed,
                height,
            });
        }
        Ok(Self {
            bytes,
            width,
            height,
            stride,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + x as usize * BYTES_PER_PIXEL
    }

    /// Mutable visible bytes of row `y` (padding excluded)
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        let end = start + self.width as usize * BYTES_PER_PIXEL;
        Some(&mut self.bytes[start..end])
    }

    /// Overwrite pixels `[x0, x1)` of row `y`. Caller has clipped the span.
    #[inline]
    pub(super) fn fill_span(&mut self, x0: u32, x1: u32, y: u32, c: Rgba) {
        if let Some(row) = self.row_mut(y) {
            let span = &mut row[x0 as usize * BYTES_PER_PIXEL..x1 as usize * BYTES_PER_PIXEL];
            for px in span.chunks_exact_mut(BYTES_PER_PIXEL) {
                write_pixel(px, c);
            }
        }
    }

    /// Fill the whole visible area with an opaque color
    pub fn clear(&mut self, c: Rgba) {
        let c = c.with_alpha(255);
        for y in 0..self.height {
            self.fill_span(0, self.width, y, c);
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, c: Rgba) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.bytes[idx..idx + BYTES_PER_PIXEL], c);
        }
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some(read_pixel(&self.bytes[idx..idx + BYTES_PER_PIXEL]))
        } else {
            None
        }
    }

    /// Blend a premultiplied color over the pixel (bounds checked)
    #[inline]
    pub fn blend_premultiplied(&mut self, x: i32, y: i32, src: Rgba) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.pixel_index(x as u32, y as u32);
        let px = &mut self.bytes[idx..idx + BYTES_PER_PIXEL];
        let a = src.a;
        px[0] = blend_channel(src.a, px[0], a);
        px[1] = blend_channel(src.b, px[1], a);
        px[2] = blend_channel(src.g, px[2], a);
        px[3] = blend_channel(src.r, px[3], a);
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Owned RGBA8888 storage the platform layer hands out one frame at a time
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl PixelBuffer {
    /// Tightly packed buffer (stride == width * 4)
    pub fn with_size(width: u32, height: u32) -> Self {
        let stride = width as usize * BYTES_PER_PIXEL;
        Self {
            pixels: vec![0; stride * height as usize],
            width,
            height,
            stride,
        }
    }

    /// Buffer with padded rows, like a surface whose pitch exceeds its width
    pub fn with_stride(width: u32, height: u32, stride: usize) -> Result<Self, PixmapError> {
        let min = width as usize * BYTES_PER_PIXEL;
        if stride < min {
            return Err(PixmapError::StrideTooSmall { stride, min, width });
        }
        Ok(Self {
            pixels: vec![0; stride * height as usize],
            width,
            height,
            stride,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Borrow the buffer as a drawing surface for one frame
    pub fn pixmap(&mut self) -> Pixmap<'_> {
        Pixmap {
            bytes: &mut self.pixels,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_stride() {
        let mut bytes = vec![0u8; 64];
        let err = Pixmap::new(&mut bytes, 4, 4, 12).err();
        assert_eq!(
            err,
            Some(PixmapError::StrideTooSmall {
                stride: 12,
                min: 16,
                width: 4
            })
        );
    }

    #[test]
    fn test_rejects_short_buffer() {
        let mut bytes = vec![0u8; 40];
        let err = Pixmap::new(&mut bytes, 4, 3, 16).err();
        assert!(matches!(err, Some(PixmapError::BufferTooSmall { needed: 48, .. })));
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let mut bytes = vec![0u8; 64];
        let err = Pixmap::new(&mut bytes, 4, u32::MAX, usize::MAX / 2).err();
        assert!(matches!(
            err,
            Some(PixmapError::BufferTooSmall {
                len: 64,
                needed: usize::MAX,
                ..
            })
        ));
    }

    #[test]
    fn test_last_row_may_omit_padding() {
        // 2 rows, stride 24, width 4: 24 + 16 bytes suffices
        let mut bytes = vec![0u8; 40];
        assert!(Pixmap::new(&mut bytes, 4, 2, 24).is_ok());
    }

    #[test]
    fn test_pixel_layout_is_abgr() {
        let mut buf = PixelBuffer::with_size(2, 1);
        buf.pixmap().set_pixel(1, 0, Rgba::rgb(10, 20, 30));
        assert_eq!(&buf.as_bytes()[4..8], &[255, 30, 20, 10]);
        assert_eq!(buf.pixmap().get_pixel(1, 0), Some(Rgba::rgb(10, 20, 30)));
    }

    #[test]
    fn test_out_of_bounds_access_is_ignored() {
        let mut buf = PixelBuffer::with_size(2, 2);
        let mut pix = buf.pixmap();
        pix.set_pixel(-1, 0, Rgba::WHITE);
        pix.set_pixel(2, 0, Rgba::WHITE);
        pix.set_pixel(0, 2, Rgba::WHITE);
        pix.blend_premultiplied(5, 5, Rgba::WHITE);
        assert_eq!(pix.get_pixel(-1, 0), None);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_padding_untouched_by_clear() {
        let mut buf = PixelBuffer::with_stride(2, 2, 12).unwrap();
        buf.pixmap().clear(Rgba::WHITE);
        let bytes = buf.as_bytes();
        assert!(bytes[0..8].iter().all(|&b| b == 255));
        assert!(bytes[8..12].iter().all(|&b| b == 0));
        assert!(bytes[12..20].iter().all(|&b| b == 255));
        assert!(bytes[20..24].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_blend_formula() {
        let mut buf = PixelBuffer::with_size(1, 1);
        let mut pix = buf.pixmap();
        pix.set_pixel(0, 0, Rgba::rgb(200, 100, 0));
        // Half-transparent white, premultiplied
        pix.blend_premultiplied(0, 0, Rgba::rgba(255, 255, 255, 128).premultiplied());
        // 200 * 127/255 + 128 = 100 + 128
        assert_eq!(pix.get_pixel(0, 0), Some(Rgba::rgb(228, 178, 128)));
    }
}
