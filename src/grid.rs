//! Grid coordinates and grid <-> pixel conversion
//!
//! The playfield is a square of cells `[-half_extent, half_extent]` on both
//! axes, centered on `center` in pixel space. Positions off the grid are
//! legal values; wrapping happens when the snake moves.

use crate::math::Vec2;
use crate::util::Rng;
use std::ops::Add;

/// Signed cell coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for GridPos {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Travel direction. Screen space: +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub const fn delta(self) -> GridPos {
        match self {
            Self::Up => GridPos::new(0, -1),
            Self::Down => GridPos::new(0, 1),
            Self::Left => GridPos::new(-1, 0),
            Self::Right => GridPos::new(1, 0),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// A 90 degree change relative to `self`
    #[inline]
    pub fn is_turn_from(self, heading: Self) -> bool {
        self != heading && self != heading.opposite()
    }
}

/// Grid geometry in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Pixel center of cell (0, 0)
    pub center: Vec2,
    pub cell_size: f32,
    pub half_extent: i32,
}

impl Grid {
    pub fn new(center: Vec2, cell_size: f32, half_extent: i32) -> Self {
        Self {
            center,
            cell_size,
            half_extent,
        }
    }

    /// Cells per side
    #[inline]
    pub fn cells_per_side(&self) -> i32 {
        self.half_extent * 2 + 1
    }

    /// Pixel center of a cell
    #[inline]
    pub fn cell_to_pixel(&self, pos: GridPos) -> Vec2 {
        Vec2::new(
            self.center.x + self.cell_size * pos.x as f32,
            self.center.y + self.cell_size * pos.y as f32,
        )
    }

    /// Nearest cell to a pixel position
    #[inline]
    pub fn pixel_to_cell(&self, pixel: Vec2) -> GridPos {
        GridPos::new(
            ((pixel.x - self.center.x) / self.cell_size).round() as i32,
            ((pixel.y - self.center.y) / self.cell_size).round() as i32,
        )
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        let h = self.half_extent;
        pos.x >= -h && pos.x <= h && pos.y >= -h && pos.y <= h
    }

    /// Re-enter at the opposite edge when a step leaves the grid.
    ///
    /// Only single-cell overshoots happen during play; anything past an edge
    /// lands on the opposite edge, keeping the transverse coordinate.
    pub fn wrap(&self, pos: GridPos) -> GridPos {
        let h = self.half_extent;
        let mirror = |v: i32| {
            if v > h {
                -h
            } else if v < -h {
                h
            } else {
                v
            }
        };
        GridPos::new(mirror(pos.x), mirror(pos.y))
    }

    /// Uniformly random cell inside the grid
    pub fn random_cell(&self, rng: &mut Rng) -> GridPos {
        let h = self.half_extent;
        GridPos::new(rng.range_i32(-h, h), rng.range_i32(-h, h))
    }

    /// Pixel bounds of the playfield: (left, top, right, bottom) along cell edges
    pub fn pixel_bounds(&self) -> (f32, f32, f32, f32) {
        let half = (self.half_extent as f32 + 0.5) * self.cell_size;
        (
            self.center.x - half,
            self.center.y - half,
            self.center.x + half,
            self.center.y + half,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(Vec2::new(360.0, 360.0), 24.0, 14)
    }

    #[test]
    fn test_cell_pixel_round_trip() {
        let g = grid();
        for y in -20..=20 {
            for x in -20..=20 {
                let p = GridPos::new(x, y);
                assert_eq!(g.pixel_to_cell(g.cell_to_pixel(p)), p);
            }
        }
    }

    #[test]
    fn test_round_trip_with_odd_geometry() {
        let g = Grid::new(Vec2::new(13.5, -7.25), 17.0, 5);
        for y in -6..=6 {
            for x in -6..=6 {
                let p = GridPos::new(x, y);
                assert_eq!(g.pixel_to_cell(g.cell_to_pixel(p)), p);
            }
        }
    }

    #[test]
    fn test_pixel_to_cell_rounds_to_nearest() {
        let g = grid();
        assert_eq!(g.pixel_to_cell(Vec2::new(371.0, 349.0)), GridPos::new(0, 0));
        assert_eq!(g.pixel_to_cell(Vec2::new(373.0, 347.0)), GridPos::new(1, -1));
    }

    #[test]
    fn test_wrap_mirrors_edges() {
        let g = grid();
        assert_eq!(g.wrap(GridPos::new(15, 3)), GridPos::new(-14, 3));
        assert_eq!(g.wrap(GridPos::new(-15, 3)), GridPos::new(14, 3));
        assert_eq!(g.wrap(GridPos::new(2, 15)), GridPos::new(2, -14));
        assert_eq!(g.wrap(GridPos::new(2, -15)), GridPos::new(2, 14));
        assert_eq!(g.wrap(GridPos::new(15, -15)), GridPos::new(-14, 14));
        assert_eq!(g.wrap(GridPos::new(14, -14)), GridPos::new(14, -14));
    }

    #[test]
    fn test_random_cell_stays_inside() {
        let g = grid();
        let mut rng = Rng::new(99);
        for _ in 0..500 {
            assert!(g.contains(g.random_cell(&mut rng)));
        }
    }

    #[test]
    fn test_direction_turns() {
        assert!(Direction::Up.is_turn_from(Direction::Left));
        assert!(!Direction::Up.is_turn_from(Direction::Up));
        assert!(!Direction::Up.is_turn_from(Direction::Down));
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }
}
