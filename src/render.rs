//! Draws one frame of the game
//!
//! Fixed order: background, grid lines, food, snake (tail first so the head
//! ends up on top).

use crate::config::Palette;
use crate::game::{Game, SnakePart};
use crate::grid::{Grid, GridPos};
use crate::math::{lerp, Vec2};
use crate::raster::{draw_line, fill_circle, fill_rect, Pixmap, Rgba};
use std::f32::consts::PI;

/// Food pulse, radians per second
const FOOD_PULSE_SPEED: f32 = 6.0;
const FOOD_RADIUS: f32 = 0.3;
const FOOD_PULSE_AMOUNT: f32 = 0.15;
/// Food shrinks during this many final seconds of its lifespan
const FOOD_FADE_TIME: f32 = 1.0;

const BODY_RADIUS: f32 = 0.42;
const HEAD_RADIUS: f32 = 0.47;
const BELLY_BULGE: f32 = 0.35;
/// Color flips per second during the restart countdown
const DEAD_FLASH_RATE: f32 = 6.0;

/// Palette converted once per frame
struct Colors {
    background: Rgba,
    grid_line: Rgba,
    food_a: Rgba,
    food_b: Rgba,
    head: Rgba,
    body: Rgba,
    tail: Rgba,
    dead: Rgba,
}

impl From<&Palette> for Colors {
    fn from(p: &Palette) -> Self {
        Self {
            background: p.background.into(),
            grid_line: Rgba::from(p.grid_line)
                .with_alpha(p.grid_alpha)
                .premultiplied(),
            food_a: p.food_a.into(),
            food_b: p.food_b.into(),
            head: p.head.into(),
            body: p.body.into(),
            tail: p.tail.into(),
            dead: p.dead.into(),
        }
    }
}

pub fn draw_frame(pixmap: &mut Pixmap, game: &Game) {
    let colors = Colors::from(&game.config().palette);
    let grid = game.grid();

    fill_rect(
        pixmap,
        0,
        0,
        pixmap.width() as i32,
        pixmap.height() as i32,
        colors.background,
    );
    draw_grid_lines(pixmap, grid, colors.grid_line);
    draw_food(pixmap, game, &colors);
    draw_snake(pixmap, game, &colors);
}

/// Lines along every cell edge of the playfield
fn draw_grid_lines(pixmap: &mut Pixmap, grid: &Grid, color: Rgba) {
    let (left, top, right, bottom) = grid.pixel_bounds();
    let cells = grid.cells_per_side();
    for i in 0..=cells {
        let offset = i as f32 * grid.cell_size;
        draw_line(
            pixmap,
            Vec2::new(left + offset, top),
            Vec2::new(left + offset, bottom),
            color,
        );
        draw_line(
            pixmap,
            Vec2::new(left, top + offset),
            Vec2::new(right, top + offset),
            color,
        );
    }
}

fn draw_food(pixmap: &mut Pixmap, game: &Game, colors: &Colors) {
    let grid = game.grid();
    let t = game.elapsed();
    for (slot, food) in game.foods().iter().enumerate() {
        if !food.is_visible() {
            continue;
        }
        // Offset per slot so items do not pulse in lockstep
        let pulse = (t * FOOD_PULSE_SPEED + slot as f32).sin();
        let fade = (food.timer / FOOD_FADE_TIME).clamp(0.0, 1.0);
        let radius = grid.cell_size * FOOD_RADIUS * (1.0 + FOOD_PULSE_AMOUNT * pulse) * fade;
        let color = colors.food_a.lerp(colors.food_b, pulse * 0.5 + 0.5);
        fill_circle(pixmap, grid.cell_to_pixel(food.pos), radius, color);
    }
}

fn draw_snake(pixmap: &mut Pixmap, game: &Game, colors: &Colors) {
    let grid = game.grid();
    let parts = game.parts();
    let flash_dead = game
        .restart_countdown()
        .is_some_and(|c| (c * DEAD_FLASH_RATE) as i32 % 2 == 0);

    let last = parts.len().saturating_sub(1).max(1) as f32;
    for (i, part) in parts.iter().enumerate().rev() {
        let (color, base) = if i == 0 {
            (colors.head, HEAD_RADIUS)
        } else {
            (colors.body.lerp(colors.tail, i as f32 / last), BODY_RADIUS)
        };
        let color = if flash_dead { colors.dead } else { color };
        let bulge = 1.0 + BELLY_BULGE * (part.belly * PI).sin();
        let radius = grid.cell_size * base * bulge;

        for center in part_centers(grid, part) {
            fill_circle(pixmap, center, radius, color);
        }
    }
}

/// Where to draw a segment. A segment crossing the wrap seam is drawn twice:
/// once leaving through one edge and once entering through the other.
fn part_centers(grid: &Grid, part: &SnakePart) -> impl Iterator<Item = Vec2> {
    let step = part.step();
    let leaving = lerp(
        grid.cell_to_pixel(part.from),
        grid.cell_to_pixel(part.from + step),
        part.progress,
    );
    let entering = part.is_wrapping().then(|| {
        let before = GridPos::new(part.to.x - step.x, part.to.y - step.y);
        lerp(
            grid.cell_to_pixel(before),
            grid.cell_to_pixel(part.to),
            part.progress,
        )
    });
    std::iter::once(leaving).chain(entering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
    use crate::raster::PixelBuffer;

    fn game() -> Game {
        let mut game = Game::new(GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        });
        game.restart();
        game
    }

    fn pixel_at(buf: &mut PixelBuffer, p: Vec2) -> Rgba {
        buf.pixmap()
            .get_pixel(p.x as i32, p.y as i32)
            .unwrap_or_default()
    }

    #[test]
    fn test_part_centers_regular() {
        let grid = Grid::new(Vec2::new(100.0, 100.0), 10.0, 3);
        let mut part = SnakePart::new(GridPos::new(0, 0), GridPos::new(1, 0));
        part.progress = 0.5;
        let centers: Vec<_> = part_centers(&grid, &part).collect();
        assert_eq!(centers, vec![Vec2::new(105.0, 100.0)]);
    }

    #[test]
    fn test_part_centers_mirrored_at_seam() {
        let grid = Grid::new(Vec2::new(100.0, 100.0), 10.0, 3);
        let mut part = SnakePart::new(GridPos::new(3, 1), GridPos::new(-3, 1));
        part.progress = 0.25;
        let centers: Vec<_> = part_centers(&grid, &part).collect();
        // Leaving toward virtual column 4, entering from virtual column -4
        assert_eq!(centers.len(), 2);
        assert!(centers[0].approx_eq(&Vec2::new(132.5, 110.0), 1e-4));
        assert!(centers[1].approx_eq(&Vec2::new(62.5, 110.0), 1e-4));
    }

    #[test]
    fn test_frame_draws_background_snake_and_food() {
        let mut game = game();
        let food_cell = GridPos::new(-5, -5);
        game.spawn_food_at(food_cell);
        let mut buf = PixelBuffer::with_size(WINDOW_WIDTH, WINDOW_HEIGHT);
        draw_frame(&mut buf.pixmap(), &game);

        let palette = game.config().palette.clone();
        // Corner is outside the grid: plain background
        assert_eq!(
            pixel_at(&mut buf, Vec2::new(1.0, 1.0)),
            Rgba::from(palette.background)
        );

        // Head sits at its source cell at progress 0
        let head = game.grid().cell_to_pixel(GridPos::new(0, 0));
        assert_eq!(pixel_at(&mut buf, head), Rgba::from(palette.head));

        let tail = game.grid().cell_to_pixel(GridPos::new(-1, 0));
        let tail_color = Rgba::from(palette.body).lerp(Rgba::from(palette.tail), 1.0);
        assert_eq!(pixel_at(&mut buf, tail), tail_color);

        let food = pixel_at(&mut buf, game.grid().cell_to_pixel(food_cell));
        assert_ne!(food, Rgba::from(palette.background));
    }

    #[test]
    fn test_grid_lines_blend_over_background() {
        let game = game();
        let mut buf = PixelBuffer::with_size(WINDOW_WIDTH, WINDOW_HEIGHT);
        draw_frame(&mut buf.pixmap(), &game);
        let (left, top, _, _) = game.grid().pixel_bounds();
        let on_line = pixel_at(&mut buf, Vec2::new(left, top + 5.0));
        let background: Rgba = game.config().palette.background.into();
        assert_ne!(on_line, background);
        assert_eq!(on_line.a, 255);
    }

    /// Food at a fixed cell, drawn after `elapsed` seconds of play
    fn food_frame(config: GameConfig, elapsed: f32) -> (Game, PixelBuffer, Vec2) {
        let mut game = Game::new(config);
        game.restart();
        let cell = GridPos::new(-5, -5);
        game.spawn_food_at(cell);
        game.step(elapsed);
        let mut buf = PixelBuffer::with_size(WINDOW_WIDTH, WINDOW_HEIGHT);
        draw_frame(&mut buf.pixmap(), &game);
        let center = game.grid().cell_to_pixel(cell);
        (game, buf, center)
    }

    #[test]
    fn test_food_pulses_with_elapsed_time() {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        };
        let palette = config.palette.clone();
        let edge = Vec2::new(7.0, 0.0);

        // sin(6t) = 1: largest radius, second color
        let (_, mut buf, center) = food_frame(config.clone(), PI / 12.0);
        assert_eq!(pixel_at(&mut buf, center), Rgba::from(palette.food_b));
        assert_eq!(pixel_at(&mut buf, center + edge), Rgba::from(palette.food_b));

        // sin(6t) = -1: smallest radius, first color
        let (_, mut buf, center) = food_frame(config, PI / 4.0);
        assert_eq!(pixel_at(&mut buf, center), Rgba::from(palette.food_a));
        assert_eq!(
            pixel_at(&mut buf, center + edge),
            Rgba::from(palette.background)
        );
    }

    #[test]
    fn test_food_shrinks_before_expiring() {
        let fresh = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        };
        let expiring = GameConfig {
            food_lifespan: 1.0,
            ..fresh.clone()
        };
        let background = Rgba::from(fresh.palette.background);
        let edge = Vec2::new(5.0, 0.0);

        let (_, mut buf, center) = food_frame(fresh, 0.5);
        assert_ne!(pixel_at(&mut buf, center + edge), background);

        // Half a second left: half the radius
        let (game, mut buf, center) = food_frame(expiring, 0.5);
        assert!(game.foods().iter().any(|f| f.is_visible()));
        assert_ne!(pixel_at(&mut buf, center), background);
        assert_eq!(pixel_at(&mut buf, center + edge), background);
    }

    #[test]
    fn test_snake_flashes_during_restart_countdown() {
        let mut game = game();
        let palette = game.config().palette.clone();
        let head = game.grid().cell_to_pixel(GridPos::new(0, 0));
        let tail = game.grid().cell_to_pixel(GridPos::new(-1, 0));
        let mut buf = PixelBuffer::with_size(WINDOW_WIDTH, WINDOW_HEIGHT);

        game.game_over();
        // 2.0 s left: 12 half-periods, dead color
        draw_frame(&mut buf.pixmap(), &game);
        assert_eq!(pixel_at(&mut buf, head), Rgba::from(palette.dead));
        assert_eq!(pixel_at(&mut buf, tail), Rgba::from(palette.dead));

        // 1.9 s left: 11 half-periods, regular colors
        game.step(0.1);
        assert!(game.is_game_over());
        draw_frame(&mut buf.pixmap(), &game);
        assert_eq!(pixel_at(&mut buf, head), Rgba::from(palette.head));
        assert_eq!(pixel_at(&mut buf, tail), Rgba::from(palette.tail));

        // 1.75 s left: 10 half-periods, dead again
        game.step(0.15);
        draw_frame(&mut buf.pixmap(), &game);
        assert_eq!(pixel_at(&mut buf, head), Rgba::from(palette.dead));
    }

    #[test]
    fn test_eaten_food_not_drawn() {
        let mut game = game();
        // Food on the head's next cell is swallowed on the next step
        let cell = game.parts()[0].to;
        game.spawn_food_at(cell);
        game.step(0.001);
        assert!(game.foods().iter().any(|f| f.eaten));
        let mut buf = PixelBuffer::with_size(WINDOW_WIDTH, WINDOW_HEIGHT);
        draw_frame(&mut buf.pixmap(), &game);
        let background: Rgba = game.config().palette.background.into();
        assert_eq!(
            pixel_at(&mut buf, game.grid().cell_to_pixel(cell)),
            background
        );
    }
}
