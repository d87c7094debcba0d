use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    board::{Board, BoardStyle, Cell},
    config::GameConfig,
    generator,
    state::{CollisionType, GameState, Position, RoundOutcome, Snake},
};

/// Failure to set up a round on a generated board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no empty spawn cell found after {attempts} attempts")]
    NoSpawnCell { attempts: usize },
}

/// Result of evaluating one move against the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// The snake can grow onto this cell
    Grow(Position),
    /// The move ends the round
    Collide(CollisionType),
}

/// Evaluate moving the snake one cell in `direction`.
///
/// The new head wraps around both axes. Board cells are checked before the
/// snake's own segments, and every segment counts because the tail never
/// moves away.
pub fn advance(snake: &Snake, direction: Direction, board: &Board) -> Move {
    let head = snake
        .head()
        .stepped_wrapping(direction, board.width(), board.height());

    match board.cell_at(head) {
        Cell::Wall => return Move::Collide(CollisionType::Wall),
        Cell::Obstacle => return Move::Collide(CollisionType::Obstacle),
        Cell::Empty => {}
    }

    if snake.occupies(head) {
        return Move::Collide(CollisionType::SelfCollision);
    }

    Move::Grow(head)
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// The snake moved and grew by one segment
    Grew { head: Position, length: usize },
    /// The snake collided; the round is over
    Terminated(RoundOutcome),
    /// The round had already ended before this step
    AlreadyOver,
}

impl StepResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepResult::Grew { .. })
    }
}

/// The game engine: sets up rounds and advances them tick by tick
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<rand::rngs::ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generate a fresh board and place a one-segment snake on it.
    ///
    /// `style` takes precedence over the configured style; with neither set
    /// the generator picks one at random.
    pub fn reset(&mut self, style: Option<BoardStyle>) -> Result<GameState, GenerationError> {
        let style = style.or(self.config.forced_style);
        let (board, board_style) = generator::generate_with_rng(
            &mut self.rng,
            self.config.grid_width,
            self.config.grid_height,
            style,
        );

        let spawn = self.spawn_position(&board)?;
        info!(
            board = %board_style,
            empty_cells = board.empty_cell_count(),
            x = spawn.x,
            y = spawn.y,
            "round started"
        );

        Ok(GameState::new(
            board,
            board_style,
            Snake::new(spawn),
            Direction::Right,
        ))
    }

    /// Pick the board center, or a random empty cell when the center is blocked
    pub fn spawn_position(&mut self, board: &Board) -> Result<Position, GenerationError> {
        let (center_x, center_y) = board.center();
        if board.is_empty_at(center_x, center_y) {
            return Ok(Position::new(center_x as i32, center_y as i32));
        }

        let attempts = self.config.max_spawn_attempts;
        if board.width() > 0 && board.height() > 0 {
            for _ in 0..attempts {
                let x = self.rng.gen_range(0..board.width());
                let y = self.rng.gen_range(0..board.height());
                if board.is_empty_at(x, y) {
                    debug!(x, y, "center blocked, spawning elsewhere");
                    return Ok(Position::new(x as i32, y as i32));
                }
            }
        }

        warn!(attempts, "no spawn cell found");
        Err(GenerationError::NoSpawnCell { attempts })
    }

    /// Execute one step of the game
    pub fn step(&self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult::AlreadyOver;
        }

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(requested) = action {
            state.direction = state.direction.turn(requested);
        }

        match advance(&state.snake, state.direction, state.board()) {
            Move::Grow(head) => {
                state.snake.grow_to(head);
                state.score += 1;
                StepResult::Grew {
                    head,
                    length: state.snake.len(),
                }
            }
            Move::Collide(collision) => {
                state.is_alive = false;
                let outcome = RoundOutcome {
                    score: state.score,
                    filled_percentage: state.filled_percentage(),
                    board_style: state.board_style,
                    collision,
                };
                info!(
                    score = outcome.score,
                    filled = outcome.filled_percentage,
                    board = %outcome.board_style,
                    ?collision,
                    "round over"
                );
                StepResult::Terminated(outcome)
            }
        }
    }
}
