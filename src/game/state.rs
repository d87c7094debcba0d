use super::action::Direction;
use super::board::{Board, BoardStyle};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Move one cell in a direction, wrapping around both axes
    pub fn stepped_wrapping(&self, direction: Direction, width: usize, height: usize) -> Self {
        let moved = self.moved_in_direction(direction);
        Self {
            x: moved.x.rem_euclid(width as i32),
            y: moved.y.rem_euclid(height as i32),
        }
    }
}

/// The snake in the game
///
/// Segments are stored head first. The snake never loses its tail: every
/// successful move prepends a new head.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Create a snake from explicit segments, head first
    #[cfg(test)]
    pub(crate) fn from_segments(body: Vec<Position>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, keeping every existing segment
    pub fn grow_to(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit an arena wall
    Wall,
    /// Snake hit a scattered obstacle
    Obstacle,
    /// Snake hit itself
    SelfCollision,
}

/// Final record of a round, produced once when the snake collides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundOutcome {
    pub score: u32,
    /// Share of the board's empty cells covered by the snake, rounded to 2 decimals
    pub filled_percentage: f64,
    pub board_style: BoardStyle,
    pub collision: CollisionType,
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    pub board_style: BoardStyle,
    pub snake: Snake,
    pub direction: Direction,
    pub score: u32,
    pub is_alive: bool,
    pub paused: bool,
    empty_cells: usize,
}

impl GameState {
    /// Create a new game state
    pub fn new(board: Board, board_style: BoardStyle, snake: Snake, direction: Direction) -> Self {
        let empty_cells = board.empty_cell_count();
        Self {
            board,
            board_style,
            snake,
            direction,
            score: 0,
            is_alive: true,
            paused: false,
            empty_cells,
        }
    }

    /// The round's board; fixed until the next reset
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid_width(&self) -> usize {
        self.board.width()
    }

    pub fn grid_height(&self) -> usize {
        self.board.height()
    }

    /// Number of empty cells on the board, fixed for the round
    pub fn empty_cells(&self) -> usize {
        self.empty_cells
    }

    /// Snake length as a percentage of the empty cells, rounded to 2 decimals
    pub fn filled_percentage(&self) -> f64 {
        if self.empty_cells == 0 {
            return 0.0;
        }
        let raw = 100.0 * self.snake.len() as f64 / self.empty_cells as f64;
        (raw * 100.0).round() / 100.0
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn toggle_pause(&mut self) {
        if self.is_alive {
            self.paused = !self.paused;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Cell;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_wrapping_on_every_edge() {
        let (w, h) = (10, 6);
        assert_eq!(
            Position::new(9, 3).stepped_wrapping(Direction::Right, w, h),
            Position::new(0, 3)
        );
        assert_eq!(
            Position::new(0, 3).stepped_wrapping(Direction::Left, w, h),
            Position::new(9, 3)
        );
        assert_eq!(
            Position::new(4, 0).stepped_wrapping(Direction::Up, w, h),
            Position::new(4, 5)
        );
        assert_eq!(
            Position::new(4, 5).stepped_wrapping(Direction::Down, w, h),
            Position::new(4, 0)
        );
        assert_eq!(
            Position::new(4, 2).stepped_wrapping(Direction::Down, w, h),
            Position::new(4, 3)
        );
    }

    #[test]
    fn test_snake_growth_keeps_tail() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.grow_to(Position::new(6, 5));
        snake.grow_to(Position::new(7, 5));

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.body[2], Position::new(5, 5));
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(!snake.occupies(Position::new(8, 5)));
    }

    #[test]
    fn test_filled_percentage() {
        let mut board = Board::new(10, 10);
        for x in 0..10 {
            board.set(x, 0, Cell::Wall);
        }
        // 90 empty cells, 3 segments -> 3.333...%
        let snake = Snake::from_segments(vec![
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(1, 3),
        ]);
        let state = GameState::new(board, BoardStyle::Maze, snake, Direction::Right);

        assert_eq!(state.empty_cells(), 90);
        assert_eq!(state.filled_percentage(), 3.33);
    }

    #[test]
    fn test_filled_percentage_on_sealed_board() {
        let mut board = Board::new(2, 2);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            board.set(x, y, Cell::Wall);
        }
        let state = GameState::new(
            board,
            BoardStyle::Blob,
            Snake::new(Position::new(0, 0)),
            Direction::Up,
        );
        assert_eq!(state.filled_percentage(), 0.0);
    }

    #[test]
    fn test_board_matches_cached_empty_count() {
        let mut board = Board::new(6, 4);
        board.set(1, 1, Cell::Obstacle);
        board.set(2, 1, Cell::Wall);
        let state = GameState::new(
            board.clone(),
            BoardStyle::Blob,
            Snake::new(Position::new(0, 0)),
            Direction::Right,
        );

        assert_eq!(state.board(), &board);
        assert_eq!(state.board().empty_cell_count(), state.empty_cells());
        assert_eq!(state.empty_cells(), 22);
    }

    #[test]
    fn test_pause_only_while_alive() {
        let mut state = GameState::new(
            Board::new(5, 5),
            BoardStyle::Circular,
            Snake::new(Position::new(2, 2)),
            Direction::Right,
        );
        state.toggle_pause();
        assert!(state.paused);
        state.toggle_pause();
        assert!(!state.paused);

        state.is_alive = false;
        state.toggle_pause();
        assert!(!state.paused);
    }
}
