//! Keyboard edge latch
//!
//! The platform layer feeds raw key-down/key-up transitions; the game asks
//! "is this key held" and "was it pressed this frame". Held depth persists
//! across frames, the per-frame flags are cleared by [`InputLatch::begin_frame`].

/// Keys the game cares about. Platform keycodes are mapped onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pause,
}

impl Key {
    const COUNT: usize = 5;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A single key transition as delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub is_down: bool,
    pub is_repeat: bool,
}

impl KeyEvent {
    pub const fn down(key: Key) -> Self {
        Self {
            key,
            is_down: true,
            is_repeat: false,
        }
    }

    pub const fn up(key: Key) -> Self {
        Self {
            key,
            is_down: false,
            is_repeat: false,
        }
    }
}

/// Edge state for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Any transition this frame
    pub changed: bool,
    /// +1 per down, -1 per up. Unmatched ups can drive it negative.
    pub depth: i32,
    /// Down edges seen this frame
    pub downs: u32,
}

#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    keys: [KeyState; Key::COUNT],
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame flags. Held depth is kept.
    pub fn begin_frame(&mut self) {
        for state in &mut self.keys {
            state.changed = false;
            state.downs = 0;
        }
    }

    /// Record one transition. Auto-repeat events are ignored.
    pub fn on_key_transition(&mut self, key: Key, is_down: bool, is_repeat: bool) {
        if is_repeat {
            return;
        }
        let state = &mut self.keys[key.index()];
        if is_down {
            state.depth += 1;
            state.downs += 1;
        } else {
            state.depth -= 1;
            if state.depth < 0 {
                tracing::trace!(?key, depth = state.depth, "unmatched key-up");
            }
        }
        state.changed = true;
    }

    /// Start a new frame and latch its events
    pub fn latch(&mut self, events: &[KeyEvent]) {
        self.begin_frame();
        for ev in events {
            self.on_key_transition(ev.key, ev.is_down, ev.is_repeat);
        }
    }

    pub fn state(&self, key: Key) -> KeyState {
        self.keys[key.index()]
    }

    /// Exactly one down outstanding
    pub fn is_held(&self, key: Key) -> bool {
        self.keys[key.index()].depth == 1
    }

    /// At least one non-repeat down edge arrived this frame
    pub fn is_just_pressed(&self, key: Key) -> bool {
        let state = &self.keys[key.index()];
        state.changed && state.downs > 0
    }
}
