use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{BoardStyle, Cell, GameState, Position};
use crate::metrics::GameMetrics;
use crate::persistence::{GameOverSummary, HighScores};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Split the screen into header, body and footer
    fn frame_layout(area: Rect) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }

    pub fn render_title(&self, frame: &mut Frame, high_scores: &HighScores, muted: bool) {
        let [header, body, footer] = Self::frame_layout(frame.area());

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "S N A K E   A R E N A",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(self.mute_span(muted)),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, header);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select Board Style",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
        ];
        lines.extend(self.board_options(high_scores, None));

        let menu = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Green)),
            );
        frame.render_widget(menu, body);

        frame.render_widget(
            self.render_controls(&[
                ("1-4", "board"),
                ("0", "random"),
                ("M", "mute"),
                ("Q", "quit"),
            ]),
            footer,
        );
    }

    pub fn render_round(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        muted: bool,
    ) {
        let [header, body, footer] = Self::frame_layout(frame.area());

        frame.render_widget(self.render_stats(state, metrics, muted), header);

        let grid_area = Self::centered(
            body,
            (state.grid_width() * 2 + 2) as u16,
            (state.grid_height() + 2) as u16,
        );
        frame.render_widget(self.render_grid(state), grid_area);

        if state.paused {
            let overlay = Self::centered(grid_area, 30, 5);
            frame.render_widget(Clear, overlay);
            frame.render_widget(self.render_pause(), overlay);
        }

        frame.render_widget(
            self.render_controls(&[
                ("↑↓←→/WASD", "move"),
                ("Space", "pause"),
                ("R", "reset"),
                ("Esc", "title"),
                ("M", "mute"),
            ]),
            footer,
        );
    }

    pub fn render_game_over(
        &self,
        frame: &mut Frame,
        summary: &GameOverSummary,
        high_scores: &HighScores,
        muted: bool,
    ) {
        let [header, body, footer] = Self::frame_layout(frame.area());

        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(self.mute_span(muted)),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(heading, header);

        let outcome = &summary.outcome;
        let mut lines = vec![Line::from("")];
        if summary.new_record {
            lines.push(Line::from(Span::styled(
                "New High Score!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("Your Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                outcome.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Board Filled: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.2}%", outcome.filled_percentage),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Board Type: ", Style::default().fg(Color::Yellow)),
            Span::styled(outcome.board_style.name(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Select Board to Play Again",
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
        lines.extend(self.board_options(high_scores, Some(outcome.board_style)));

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(panel, body);

        frame.render_widget(
            self.render_controls(&[
                ("1-4/0", "play"),
                ("R", "same again"),
                ("Esc", "title"),
                ("Q", "quit"),
            ]),
            footer,
        );
    }

    fn board_options(
        &self,
        high_scores: &HighScores,
        current: Option<BoardStyle>,
    ) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = BoardStyle::ALL
            .iter()
            .map(|style| {
                let best = high_scores.for_style(*style);
                let name_style = if current == Some(*style) {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", style.index() + 1),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(format!("{:<14}", style.name()), name_style),
                    Span::styled(
                        format!("{:<34}", style.description()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("Best: {:>4}  Fill: {:>6.2}%", best.score, best.filled),
                        Style::default().fg(Color::Yellow),
                    ),
                ])
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[0] ", Style::default().fg(Color::Green)),
            Span::styled("Random Board", Style::default().fg(Color::White)),
            Span::styled(
                "  Surprise me with any board type!",
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_height());

        for y in 0..state.grid_height() {
            let mut spans = Vec::with_capacity(state.grid_width());

            for x in 0..state.grid_width() {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else {
                    match state.board().cell_at(pos) {
                        Cell::Wall => Span::styled("██", Style::default().fg(Color::Gray)),
                        Cell::Obstacle => Span::styled(
                            "▲ ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    }
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", state.board_style.name())),
        )
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        muted: bool,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Filled: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.2}%", state.filled_percentage()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Board: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.board_style.name(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            self.mute_span(muted),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_pause(&self) -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press SPACE to resume",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn mute_span(&self, muted: bool) -> Span<'static> {
        if muted {
            Span::styled("[muted]", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled("[sound on]", Style::default().fg(Color::Green))
        }
    }

    fn render_controls(&self, bindings: &[(&'static str, &'static str)]) -> Paragraph<'static> {
        let mut spans = Vec::new();
        for (i, (key, label)) in bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(" {}", label)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    /// Rectangle of at most `width` x `height` centered in `area`
    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
            .flex(Flex::Center)
            .areas(row);
        cell
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, CollisionType, Direction, RoundOutcome, Snake};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_title_lists_every_style() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let renderer = Renderer::new();
        let scores = HighScores::new();

        terminal
            .draw(|frame| renderer.render_title(frame, &scores, false))
            .unwrap();

        let text = screen_text(&terminal);
        for style in BoardStyle::ALL {
            assert!(text.contains(style.name()), "missing {}", style.name());
        }
        assert!(text.contains("Random Board"));
    }

    #[test]
    fn test_round_shows_pause_overlay() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let renderer = Renderer::new();
        let mut state = GameState::new(
            Board::new(20, 15),
            BoardStyle::Maze,
            Snake::new(Position::new(10, 7)),
            Direction::Right,
        );
        state.paused = true;
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| renderer.render_round(frame, &state, &metrics, true))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("PAUSED"));
        assert!(text.contains("[muted]"));
        assert!(text.contains("Score:"));
    }

    #[test]
    fn test_game_over_announces_record() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let renderer = Renderer::new();
        let summary = GameOverSummary {
            outcome: RoundOutcome {
                score: 57,
                filled_percentage: 9.6,
                board_style: BoardStyle::Blob,
                collision: CollisionType::Wall,
            },
            new_record: true,
        };

        terminal
            .draw(|frame| renderer.render_game_over(frame, &summary, &HighScores::new(), false))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("New High Score!"));
        assert!(text.contains("9.60%"));
    }
}
