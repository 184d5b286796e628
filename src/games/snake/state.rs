//! Grid game world

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::SnakeTuning;
use crate::platform::Swipe;
use crate::sim::{RandomSource, Rect};

/// Grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

impl From<Swipe> for Heading {
    fn from(swipe: Swipe) -> Self {
        match swipe {
            Swipe::Up => Heading::Up,
            Swipe::Down => Heading::Down,
            Swipe::Left => Heading::Left,
            Swipe::Right => Heading::Right,
        }
    }
}

/// Placement of the cell grid on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Pixel bounds of the grid (cols * cell by rows * cell)
    pub bounds: Rect,
    pub cols: i32,
    pub rows: i32,
    /// Cell edge in canvas pixels
    pub cell: f32,
}

impl Grid {
    /// Fit a grid inside a margin-inset field half as tall as the free area
    pub fn fit(width: f32, height: f32, tuning: &SnakeTuning) -> Self {
        let margin_x = (width * tuning.margin_x_frac).floor();
        let margin_y = (height * tuning.margin_y_frac).floor();
        let field_w = (width - 2.0 * margin_x).max(0.0);
        let field_h = ((height - 2.0 * margin_y) / 2.0).floor().max(0.0);
        let field_x = ((width - field_w) / 2.0).floor();
        let field_y = ((height - field_h) / 2.0).floor();

        let base = (field_w / 22.0).min(field_h / 14.0).floor();
        // A cell narrower than one pixel would make the column count unbounded
        let cell = crate::clamp(
            (base * tuning.cell_boost).floor(),
            tuning.min_cell.max(1.0),
            tuning.max_cell,
        );

        let cols = ((field_w / cell).floor() as i32).max(tuning.min_cells);
        let rows = ((field_h / cell).floor() as i32).max(tuning.min_cells);
        let grid_w = cols as f32 * cell;
        let grid_h = rows as f32 * cell;

        Self {
            bounds: Rect::new(
                (field_x + (field_w - grid_w) / 2.0).floor(),
                (field_y + (field_h - grid_h) / 2.0).floor(),
                grid_w,
                grid_h,
            ),
            cols,
            rows,
            cell,
        }
    }

    /// Step one cell from `from`, wrapping at the edges
    pub fn wrap_step(&self, from: Cell, heading: Heading) -> Cell {
        let (dx, dy) = heading.delta();
        Cell::new(
            (from.x + dx).rem_euclid(self.cols),
            (from.y + dy).rem_euclid(self.rows),
        )
    }

    /// Pixel box of a cell shrunk by `inset` on every side
    pub fn cell_rect(&self, cell: Cell, inset: f32) -> Rect {
        Rect::new(
            self.bounds.x + cell.x as f32 * self.cell + inset,
            self.bounds.y + cell.y as f32 * self.cell + inset,
            self.cell - 2.0 * inset,
            self.cell - 2.0 * inset,
        )
    }

    pub fn cell_count(&self) -> usize {
        (self.cols.max(0) * self.rows.max(0)) as usize
    }
}

/// Complete grid game world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    pub grid: Grid,
    /// Body cells, tail first, head last
    pub body: VecDeque<Cell>,
    pub heading: Heading,
    /// Heading to apply on the next step unless it reverses
    pub queued: Heading,
    pub food: Cell,
    pub score: u64,
    /// Time not yet consumed by whole steps (s)
    pub accumulator: f32,
    pub tuning: SnakeTuning,
}

impl Snake {
    pub fn build(width: u32, height: u32, tuning: &SnakeTuning, rng: &mut dyn RandomSource) -> Self {
        let grid = Grid::fit(width as f32, height as f32, tuning);
        let cx = grid.cols / 2;
        let cy = grid.rows / 2;
        let body: VecDeque<Cell> = [Cell::new(cx - 1, cy), Cell::new(cx, cy), Cell::new(cx + 1, cy)]
            .into_iter()
            .collect();

        let mut world = Self {
            grid,
            body,
            heading: Heading::Right,
            queued: Heading::Right,
            food: Cell::new(0, 0),
            score: 0,
            accumulator: 0.0,
            tuning: tuning.clone(),
        };
        if let Some(food) = world.free_cell(rng) {
            world.food = food;
        }
        world
    }

    pub fn head(&self) -> Cell {
        self.body.back().copied().unwrap_or(Cell::new(0, 0))
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Uniform pick among cells the body does not cover
    pub fn free_cell(&self, rng: &mut dyn RandomSource) -> Option<Cell> {
        let free: Vec<Cell> = (0..self.grid.rows)
            .flat_map(|y| (0..self.grid.cols).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.occupies(*c))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[rng.index(free.len())])
    }

    /// Seconds per grid step
    pub fn step_interval(&self) -> f32 {
        1.0 / self.tuning.moves_per_second.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SequenceRng;

    #[test]
    fn test_grid_fit_landscape() {
        let grid = Grid::fit(1280.0, 720.0, &SnakeTuning::default());
        // field 1024 x 260 -> base 18 -> cell 24
        assert_eq!(grid.cell, 24.0);
        assert_eq!(grid.cols, 42);
        assert_eq!(grid.rows, 10);
        assert_eq!(grid.cell_count(), 420);
        assert_eq!(grid.bounds.w, 1008.0);
        assert_eq!(grid.bounds.x, 136.0);
    }

    #[test]
    fn test_grid_never_below_minimum() {
        let grid = Grid::fit(20.0, 20.0, &SnakeTuning::default());
        assert_eq!(grid.cell, 22.0);
        assert_eq!(grid.cols, 5);
        assert_eq!(grid.rows, 5);
    }

    #[test]
    fn test_zero_min_cell_stays_finite() {
        let tuning = SnakeTuning {
            min_cell: 0.0,
            max_cell: 0.0,
            ..SnakeTuning::default()
        };
        let grid = Grid::fit(20.0, 20.0, &tuning);
        assert_eq!(grid.cell, 1.0);
        assert_eq!((grid.cols, grid.rows), (16, 8));
        assert_eq!(grid.cell_count(), 128);

        let grid = Grid::fit(0.0, 0.0, &tuning);
        assert_eq!(grid.cell, 1.0);
        assert_eq!(grid.cell_count(), 25);
    }

    #[test]
    fn test_start_layout() {
        let mut rng = SequenceRng::constant(0.0);
        let world = Snake::build(1280, 720, &SnakeTuning::default(), &mut rng);
        let body: Vec<Cell> = world.body.iter().copied().collect();
        assert_eq!(body, vec![Cell::new(20, 5), Cell::new(21, 5), Cell::new(22, 5)]);
        assert_eq!(world.heading, Heading::Right);
        assert_eq!(world.food, Cell::new(0, 0));
        assert!(!world.occupies(world.food));
    }

    #[test]
    fn test_wrap_step() {
        let grid = Grid::fit(1280.0, 720.0, &SnakeTuning::default());
        assert_eq!(grid.wrap_step(Cell::new(0, 3), Heading::Left), Cell::new(grid.cols - 1, 3));
        assert_eq!(grid.wrap_step(Cell::new(grid.cols - 1, 3), Heading::Right), Cell::new(0, 3));
        assert_eq!(grid.wrap_step(Cell::new(4, 0), Heading::Up), Cell::new(4, grid.rows - 1));
    }

    #[test]
    fn test_free_cell_skips_body() {
        let mut rng = SequenceRng::constant(0.0);
        let mut world = Snake::build(20, 20, &SnakeTuning::default(), &mut rng);
        world.body = (0..5).map(|x| Cell::new(x, 0)).collect();
        assert_eq!(world.free_cell(&mut rng), Some(Cell::new(0, 1)));

        world.body = (0..5)
            .flat_map(|y| (0..5).map(move |x| Cell::new(x, y)))
            .collect();
        assert_eq!(world.free_cell(&mut rng), None);
    }
}
