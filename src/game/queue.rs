use crate::grid::Direction;
use std::collections::VecDeque;

/// Pending turns the head has not taken yet
pub const DIRECTION_QUEUE_CAPACITY: usize = 3;

/// Bounded FIFO of requested directions.
///
/// Repeating the tail entry is a no-op. Pushes past capacity are dropped.
#[derive(Debug, Clone, Default)]
pub struct DirectionQueue {
    items: VecDeque<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(DIRECTION_QUEUE_CAPACITY),
        }
    }

    /// Returns true if the direction was queued
    pub fn push(&mut self, dir: Direction) -> bool {
        if self.items.back() == Some(&dir) {
            return false;
        }
        if self.items.len() >= DIRECTION_QUEUE_CAPACITY {
            tracing::trace!(?dir, "direction queue full, dropping input");
            return false;
        }
        self.items.push_back(dir);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<Direction> {
        self.items.front().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.items.iter().copied()
    }
}
