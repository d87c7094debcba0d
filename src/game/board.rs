use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::Position;

/// Classification of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Part of the arena shape (border, ellipse, maze segment, blob)
    Wall,
    /// Secondary obstacle scattered after shaping
    Obstacle,
}

impl Cell {
    fn glyph(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Obstacle => 'o',
        }
    }
}

/// Arena layout family, chosen once per board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardStyle {
    GappedBorder,
    Circular,
    Maze,
    Blob,
}

impl BoardStyle {
    pub const ALL: [BoardStyle; 4] = [
        BoardStyle::GappedBorder,
        BoardStyle::Circular,
        BoardStyle::Maze,
        BoardStyle::Blob,
    ];

    /// Stable index, also the base of the obstacle seed
    pub fn index(&self) -> usize {
        match self {
            BoardStyle::GappedBorder => 0,
            BoardStyle::Circular => 1,
            BoardStyle::Maze => 2,
            BoardStyle::Blob => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display name, also the key used for high scores
    pub fn name(&self) -> &'static str {
        match self {
            BoardStyle::GappedBorder => "Gapped Border",
            BoardStyle::Circular => "Circular",
            BoardStyle::Maze => "Maze",
            BoardStyle::Blob => "Blob",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BoardStyle::GappedBorder => "Classic border with random gaps",
            BoardStyle::Circular => "A round arena with curved walls",
            BoardStyle::Maze => "Challenging maze-like pattern",
            BoardStyle::Blob => "Random blob-shaped obstacles",
        }
    }

    /// Fraction of the board area targeted for secondary obstacles
    pub fn obstacle_density(&self) -> f64 {
        match self {
            BoardStyle::GappedBorder => 0.025,
            BoardStyle::Circular => 0.03,
            BoardStyle::Maze => 0.015,
            BoardStyle::Blob => 0.035,
        }
    }
}

impl fmt::Display for BoardStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size grid of cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y); out-of-range coordinates read as `None`
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Cell under a position, treating anything off-board as a wall
    pub fn cell_at(&self, pos: Position) -> Cell {
        if pos.x < 0 || pos.y < 0 {
            return Cell::Wall;
        }
        self.get(pos.x as usize, pos.y as usize)
            .unwrap_or(Cell::Wall)
    }

    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(Cell::Empty)
    }

    /// Overwrite a cell; out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn empty_cell_count(&self) -> usize {
        self.count(Cell::Empty)
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn column(&self, x: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).map(move |y| self.cells[y * self.width + x])
    }

    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// True for cells on the outer ring of the board
    pub fn is_perimeter(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Whether each edge (top, bottom, left, right) has at least one empty cell
    pub fn edge_openings(&self) -> [bool; 4] {
        if self.width == 0 || self.height == 0 {
            return [false; 4];
        }
        let top = self.row(0).contains(&Cell::Empty);
        let bottom = self.row(self.height - 1).contains(&Cell::Empty);
        let left = self.column(0).any(|c| c == Cell::Empty);
        let right = self.column(self.width - 1).any(|c| c == Cell::Empty);
        [top, bottom, left, right]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let line: String = self.row(y).iter().map(Cell::glyph).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(6, 4);
        assert_eq!(board.empty_cell_count(), 24);
        assert_eq!(board.count(Cell::Wall), 0);
        assert_eq!(board.edge_openings(), [true; 4]);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(6, 4);
        board.set(2, 3, Cell::Obstacle);
        board.set(10, 10, Cell::Wall); // ignored

        assert_eq!(board.get(2, 3), Some(Cell::Obstacle));
        assert_eq!(board.get(6, 0), None);
        assert_eq!(board.count(Cell::Wall), 0);
        assert_eq!(board.cell_at(Position::new(2, 3)), Cell::Obstacle);
        assert_eq!(board.cell_at(Position::new(-1, 0)), Cell::Wall);
    }

    #[test]
    fn test_edge_openings_detect_sealed_edge() {
        let mut board = Board::new(5, 3);
        for x in 0..5 {
            board.set(x, 0, Cell::Wall);
        }
        assert_eq!(board.edge_openings(), [false, true, true, true]);
    }

    #[test]
    fn test_perimeter() {
        let board = Board::new(5, 4);
        assert!(board.is_perimeter(0, 2));
        assert!(board.is_perimeter(4, 1));
        assert!(board.is_perimeter(2, 3));
        assert!(!board.is_perimeter(2, 2));
    }

    #[test]
    fn test_style_indices_round_trip() {
        for (i, style) in BoardStyle::ALL.iter().enumerate() {
            assert_eq!(style.index(), i);
            assert_eq!(BoardStyle::from_index(i), Some(*style));
        }
        assert_eq!(BoardStyle::from_index(4), None);
        assert_eq!(BoardStyle::GappedBorder.to_string(), "Gapped Border");
    }

    #[test]
    fn test_display_glyphs() {
        let mut board = Board::new(3, 2);
        board.set(0, 0, Cell::Wall);
        board.set(2, 1, Cell::Obstacle);
        assert_eq!(board.to_string(), "#..\n..o\n");
    }
}
