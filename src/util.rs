//! Shared utilities

use std::time::{SystemTime, UNIX_EPOCH};

/// Simple deterministic RNG using xorshift64
/// Seeded runs reproduce the same food placement
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::new(nanos)
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Get a random i32 in [min, max]
    ///
    /// # Panics
    /// Panics in debug builds if `min > max`
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "range_i32: min ({}) must be <= max ({})", min, max);
        if min >= max {
            return min;
        }
        let range = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u64() % range) as i64) as i32
    }
}

// ============================================================================
// Frame Clock
// ============================================================================

use std::time::Instant;

/// Monotonic frame clock
pub struct FrameClock {
    last_frame: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frames: 0,
        }
    }

    /// Call at the start of each frame.
    /// Returns seconds since the previous call.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;
        dt
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
