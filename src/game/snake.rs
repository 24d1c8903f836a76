use crate::grid::GridPos;

/// One body segment moving from one cell to the next.
///
/// The chain holds `parts[i].to == parts[i - 1].from`: every segment heads
/// for the cell its predecessor is leaving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnakePart {
    pub from: GridPos,
    pub to: GridPos,
    /// 0 at `from`, 1 at `to`
    pub progress: f32,
    /// Bulge from food passing through this segment, 0..=1
    pub belly: f32,
}

impl SnakePart {
    pub fn new(from: GridPos, to: GridPos) -> Self {
        Self {
            from,
            to,
            progress: 0.0,
            belly: 0.0,
        }
    }

    /// Unit step from `from` toward `to`, seen through the wrap seam
    pub fn step(&self) -> GridPos {
        let unit = |d: i32| match d {
            d if d > 1 => -1,
            d if d < -1 => 1,
            d => d,
        };
        GridPos::new(unit(self.to.x - self.from.x), unit(self.to.y - self.from.y))
    }

    /// The interval jumps across the grid edge
    pub fn is_wrapping(&self) -> bool {
        (self.to.x - self.from.x).abs() > 1 || (self.to.y - self.from.y).abs() > 1
    }

    /// Belly fullness for food sitting at `cell`: rises while approaching
    /// it, falls while leaving it.
    pub fn fullness_for(&self, cell: GridPos) -> f32 {
        let t = self.progress.clamp(0.0, 1.0);
        if self.to == cell {
            t
        } else if self.from == cell {
            1.0 - t
        } else {
            0.0
        }
    }
}
