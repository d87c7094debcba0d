//! Interactive play in the terminal
//!
//! The driver owns all round state. Key presses only record intent: a
//! direction key sets `pending_direction`, which the next tick consumes. The
//! tick source exists only while a round is running and is dropped together
//! with the pending input whenever the round ends or restarts.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, RoundOutcome, StepResult};
use crate::input::{BoardChoice, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::{AudioSettings, GameOverSummary, HighScores, KeyValueStore};
use crate::render::Renderer;

/// Which screen the player is looking at
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Title,
    Playing(GameState),
    GameOver(GameOverSummary),
}

pub struct HumanMode<S: KeyValueStore> {
    engine: GameEngine,
    store: S,
    high_scores: HighScores,
    audio: AudioSettings,
    screen: Screen,
    selection: BoardChoice,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_timer: Option<Interval>,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl<S: KeyValueStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        let high_scores = HighScores::load(&store);
        let audio = AudioSettings::load(&store);
        let selection = config
            .forced_style
            .map(BoardChoice::Style)
            .unwrap_or(BoardChoice::Random);

        Self {
            engine: GameEngine::new(config),
            store,
            high_scores,
            audio,
            screen: Screen::Title,
            selection,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_timer: None,
            should_quit: false,
            pending_direction: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, only while a round is running
                _ = next_tick(&mut self.tick_timer) => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| self.draw(frame)).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.stop_round();
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let muted = self.audio.muted;
        match &self.screen {
            Screen::Title => self.renderer.render_title(frame, &self.high_scores, muted),
            Screen::Playing(state) => {
                self.renderer
                    .render_round(frame, state, &self.metrics, muted)
            }
            Screen::GameOver(summary) => {
                self.renderer
                    .render_game_over(frame, summary, &self.high_scores, muted)
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_key_action(action)?;
        }

        Ok(())
    }

    fn handle_key_action(&mut self, action: KeyAction) -> Result<()> {
        let playing = matches!(self.screen, Screen::Playing(_));

        match action {
            KeyAction::GameAction(Action::Move(dir)) => {
                if playing {
                    self.pending_direction = Some(dir);
                }
            }
            KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
            KeyAction::TogglePause => {
                if let Screen::Playing(state) = &mut self.screen {
                    state.toggle_pause();
                    self.metrics.set_paused(state.paused);
                }
            }
            KeyAction::SelectBoard(choice) => {
                if !playing {
                    self.start_round(choice)?;
                }
            }
            KeyAction::Restart => {
                if !matches!(self.screen, Screen::Title) {
                    self.start_round(self.selection)?;
                }
            }
            KeyAction::ToggleMute => self.toggle_mute(),
            KeyAction::Back => {
                if matches!(self.screen, Screen::Title) {
                    self.should_quit = true;
                } else {
                    self.back_to_title();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let Screen::Playing(state) = &mut self.screen else {
            return Ok(());
        };
        if state.paused {
            return Ok(());
        }

        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(state, action);

        if let StepResult::Terminated(outcome) = result {
            self.finish_round(outcome);
        }

        Ok(())
    }

    /// Tear down any running round and start a new one
    fn start_round(&mut self, choice: BoardChoice) -> Result<()> {
        self.stop_round();
        self.selection = choice;

        let state = self
            .engine
            .reset(choice.style())
            .context("Failed to set up a new round")?;
        self.screen = Screen::Playing(state);
        self.metrics.on_game_start();

        let period = self.engine.config().tick_interval();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.tick_timer = Some(timer);

        Ok(())
    }

    /// Cancel the tick source and drop input aimed at the old round
    fn stop_round(&mut self) {
        self.tick_timer = None;
        self.pending_direction = None;
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        self.stop_round();
        self.metrics.on_game_over(outcome.score);

        let summary = match self.high_scores.record_outcome(&mut self.store, &outcome) {
            Ok(summary) => summary,
            Err(err) => {
                error!(?err, "failed to save high scores");
                GameOverSummary {
                    outcome,
                    new_record: false,
                }
            }
        };

        if let Err(err) = self.audio.play_cue(&mut stderr()) {
            warn!(?err, "failed to play game over cue");
        }

        info!(
            score = outcome.score,
            filled = outcome.filled_percentage,
            new_record = summary.new_record,
            games_played = self.metrics.games_played,
            "game over"
        );
        self.screen = Screen::GameOver(summary);
    }

    fn back_to_title(&mut self) {
        self.stop_round();
        self.screen = Screen::Title;
    }

    fn toggle_mute(&mut self) {
        if let Err(err) = self.audio.toggle_mute(&mut self.store) {
            error!(?err, "failed to save mute setting");
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Wait for the next tick, or forever when no round is running
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardStyle, Position};
    use crate::persistence::MemoryStore;

    fn mode() -> HumanMode<MemoryStore> {
        HumanMode::new(GameConfig::default(), MemoryStore::new())
    }

    fn playing(mode: &HumanMode<MemoryStore>) -> &GameState {
        match mode.screen() {
            Screen::Playing(state) => state,
            other => panic!("expected a running round, got {:?}", other),
        }
    }

    #[test]
    fn test_starts_on_title() {
        let mode = mode();
        assert_eq!(mode.screen(), &Screen::Title);
        assert!(mode.tick_timer.is_none());
    }

    #[tokio::test]
    async fn test_select_board_starts_round() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::SelectBoard(BoardChoice::Style(
            BoardStyle::Circular,
        )))
        .unwrap();

        let state = playing(&mode);
        assert_eq!(state.board_style, BoardStyle::Circular);
        assert_eq!(state.snake.head(), Position::new(20, 12));
        assert!(mode.tick_timer.is_some());
    }

    #[tokio::test]
    async fn test_pending_direction_is_consumed_by_tick() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::SelectBoard(BoardChoice::Style(
            BoardStyle::Circular,
        )))
        .unwrap();

        mode.handle_key_action(KeyAction::GameAction(Action::Move(Direction::Up)))
            .unwrap();
        // The last key before a tick wins
        mode.handle_key_action(KeyAction::GameAction(Action::Move(Direction::Down)))
            .unwrap();
        mode.update_game().unwrap();

        assert_eq!(playing(&mode).snake.head(), Position::new(20, 13));
        assert_eq!(mode.pending_direction, None);
    }

    #[tokio::test]
    async fn test_reversal_request_is_ignored() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::SelectBoard(BoardChoice::Style(
            BoardStyle::Circular,
        )))
        .unwrap();

        mode.handle_key_action(KeyAction::GameAction(Action::Move(Direction::Left)))
            .unwrap();
        mode.update_game().unwrap();

        let state = playing(&mode);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(21, 12));
    }

    #[tokio::test]
    async fn test_pause_skips_ticks() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::SelectBoard(BoardChoice::Style(
            BoardStyle::Circular,
        )))
        .unwrap();

        mode.handle_key_action(KeyAction::TogglePause).unwrap();
        mode.update_game().unwrap();
        mode.update_game().unwrap();
        assert_eq!(playing(&mode).score, 0);

        mode.handle_key_action(KeyAction::TogglePause).unwrap();
        mode.update_game().unwrap();
        assert_eq!(playing(&mode).score, 1);
    }

    #[tokio::test]
    async fn test_round_ends_and_records_high_score() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::SelectBoard(BoardChoice::Style(
            BoardStyle::Circular,
        )))
        .unwrap();
        mode.audio.muted = true;

        // Row 12 is open end to end; heading right the snake wraps around
        // and runs into its own first segment on the 40th tick.
        for _ in 0..40 {
            mode.update_game().unwrap();
        }

        match mode.screen() {
            Screen::GameOver(summary) => {
                assert_eq!(summary.outcome.score, 39);
                assert_eq!(summary.outcome.board_style, BoardStyle::Circular);
                assert!(summary.new_record);
            }
            other => panic!("expected game over, got {:?}", other),
        }
        assert!(mode.tick_timer.is_none());
        assert_eq!(mode.high_scores().for_style(BoardStyle::Circular).score, 39);
        assert_eq!(HighScores::load(mode.store()).get("Circular").score, 39);
    }

    #[tokio::test]
    async fn test_restart_discards_round_state() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::SelectBoard(BoardChoice::Style(BoardStyle::Maze)))
            .unwrap();
        mode.update_game().unwrap();
        mode.handle_key_action(KeyAction::GameAction(Action::Move(Direction::Up)))
            .unwrap();

        mode.handle_key_action(KeyAction::Restart).unwrap();

        let state = playing(&mode);
        assert_eq!(state.board_style, BoardStyle::Maze);
        assert_eq!(state.score, 0);
        assert_eq!(mode.pending_direction, None);
    }

    #[tokio::test]
    async fn test_back_goes_to_title_then_quits() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::SelectBoard(BoardChoice::Random))
            .unwrap();

        mode.handle_key_action(KeyAction::Back).unwrap();
        assert_eq!(mode.screen(), &Screen::Title);
        assert!(mode.tick_timer.is_none());
        assert!(!mode.should_quit);

        mode.handle_key_action(KeyAction::Back).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_mute_toggle_persists() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::ToggleMute).unwrap();
        assert!(AudioSettings::load(mode.store()).muted);
    }

    #[test]
    fn test_direction_keys_ignored_off_round() {
        let mut mode = mode();
        mode.handle_key_action(KeyAction::GameAction(Action::Move(Direction::Up)))
            .unwrap();
        assert_eq!(mode.pending_direction, None);
    }
}
