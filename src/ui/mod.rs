// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the quiz.
//!
//! `TerminalPresenter` is the engine's presenter: it turns engine calls into
//! a `QuizView` and owns the advance timer. `App` owns the terminal, draws
//! the view and feeds key presses and timer expiries back to the engine.

pub mod keys;

pub use keys::{KeyBinding, KeyBindings, QuizAction, Shortcut, SLOT_LETTERS};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use crate::catalog::{Artwork, SampleCatalog};
use crate::media::AnyPlayer;
use crate::quiz::{
    AdvanceTimer, EngineState, Presenter, QuestionSource, QuizEngine, Scores, OPTION_SLOTS,
};
use crate::score::ScoreStore;

/// How a slot is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStyle {
    /// Waiting for an answer
    Neutral,
    /// The correct answer after reveal
    Positive,
    /// Any other option after reveal
    Negative,
}

/// One answer button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub label: String,
    pub enabled: bool,
    pub style: SlotStyle,
    /// The option the user picked
    pub picked: bool,
}

impl Default for SlotView {
    fn default() -> Self {
        Self {
            label: String::new(),
            enabled: false,
            style: SlotStyle::Neutral,
            picked: false,
        }
    }
}

/// Artwork panel contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkView {
    /// Question mark placeholder
    Neutral,
    /// Composer artwork after reveal
    Composer(Artwork),
}

/// Everything the screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub slots: [SlotView; OPTION_SLOTS],
    pub artwork: ArtworkView,
    pub scores: Scores,
    /// Final scores once the game is over
    pub game_over: Option<Scores>,
    /// Last user-visible error
    pub error: Option<String>,
    pub show_help: bool,
}

impl Default for QuizView {
    fn default() -> Self {
        Self {
            slots: Default::default(),
            artwork: ArtworkView::Neutral,
            scores: Scores::default(),
            game_over: None,
            error: None,
            show_help: false,
        }
    }
}

impl QuizView {
    /// Check if the screen is waiting for a dismiss key
    pub fn is_finished(&self) -> bool {
        self.game_over.is_some() || self.error.is_some()
    }
}

/// Presenter that renders into a `QuizView`
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    view: QuizView,
    timer: AdvanceTimer,
}

impl TerminalPresenter {
    /// Create a presenter with an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view
    pub fn view(&self) -> &QuizView {
        &self.view
    }

    /// Toggle the help overlay
    pub fn toggle_help(&mut self) {
        self.view.show_help = !self.view.show_help;
    }

    /// Check if an advance is pending
    pub fn advance_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Returns true once when the advance timer has expired
    pub fn poll_advance(&mut self, now: Instant) -> bool {
        self.timer.poll(now)
    }
}

impl Presenter for TerminalPresenter {
    fn show_question(&mut self, labels: &[String; OPTION_SLOTS], enabled: [bool; OPTION_SLOTS]) {
        for (slot, (label, enabled)) in self.view.slots.iter_mut().zip(labels.iter().zip(enabled)) {
            *slot = SlotView {
                label: label.clone(),
                enabled,
                style: SlotStyle::Neutral,
                picked: false,
            };
        }
    }

    fn set_neutral_artwork(&mut self) {
        self.view.artwork = ArtworkView::Neutral;
    }

    fn set_artwork(&mut self, artwork: &Artwork) {
        self.view.artwork = ArtworkView::Composer(artwork.clone());
    }

    fn reveal(&mut self, correct_index: usize, picked_index: usize) {
        for (i, slot) in self.view.slots.iter_mut().enumerate() {
            // Unused slots stay neutral
            if slot.enabled {
                slot.style = if i == correct_index {
                    SlotStyle::Positive
                } else {
                    SlotStyle::Negative
                };
            }
            slot.enabled = false;
            slot.picked = i == picked_index;
        }
    }

    fn schedule_advance(&mut self, delay: Duration) {
        self.timer.schedule(delay);
    }

    fn cancel_scheduled(&mut self) {
        self.timer.cancel();
    }

    fn end_game(&mut self, scores: Scores) {
        self.view.game_over = Some(scores);
    }

    fn show_error(&mut self, message: &str) {
        self.view.error = Some(message.to_string());
    }

    fn update_scores(&mut self, scores: Scores) {
        self.view.scores = scores;
    }
}

/// How an interactive session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Game over (or aborted by an error) and the user wants another game
    PlayAgain,
    /// The user quit. The engine may still be mid-game.
    Quit,
}

/// Terminal handle
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    frame_rate: u32,
}

impl App {
    /// Enter raw mode and the alternate screen
    pub fn new(frame_rate: u32) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            frame_rate: frame_rate.clamp(1, 120),
        })
    }

    /// Poll for events with timeout
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw a view
    pub fn draw(&mut self, view: &QuizView, keys: &KeyBindings) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame, view, keys))?;
        Ok(())
    }

    /// Run one game until it is over or the user quits
    pub fn run<C, S, Q>(
        &mut self,
        engine: &mut QuizEngine<C, S, Q, TerminalPresenter, AnyPlayer>,
        keys: &KeyBindings,
    ) -> io::Result<SessionOutcome>
    where
        C: SampleCatalog,
        S: ScoreStore,
        Q: QuestionSource,
    {
        loop {
            self.draw(engine.presenter().view(), keys)?;

            if let Some(Event::Key(key)) = self.poll_event()? {
                if key.kind == KeyEventKind::Press {
                    match keys.action(key.code, key.modifiers) {
                        Some(QuizAction::Pick(slot)) => {
                            engine.pick(slot);
                        }
                        Some(QuizAction::ToggleHelp) => engine.presenter_mut().toggle_help(),
                        Some(QuizAction::PlayAgain) if engine.presenter().view().is_finished() => {
                            return Ok(SessionOutcome::PlayAgain);
                        }
                        Some(QuizAction::Quit) => return Ok(SessionOutcome::Quit),
                        _ => {}
                    }
                }
            }

            if engine.presenter_mut().poll_advance(Instant::now()) {
                debug!("advance timer fired");
                engine.advance();
            }

            while let Some((play_when_ready, state)) =
                engine.player_mut().and_then(|p| p.poll_state())
            {
                engine.on_playback_state(play_when_ready, state);
            }

            if engine.state() == EngineState::Ended && !engine.presenter().view().is_finished() {
                return Ok(SessionOutcome::Quit);
            }
        }
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the whole screen
pub fn render(frame: &mut Frame, view: &QuizView, keys: &KeyBindings) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scores
            Constraint::Min(5),    // Artwork
            Constraint::Length(6), // Answers
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_scores(frame, chunks[0], view.scores);
    render_artwork(frame, chunks[1], &view.artwork);
    render_slots(frame, chunks[2], &view.slots);
    render_status_bar(frame, chunks[3], view);

    if let Some(scores) = view.game_over {
        render_game_over(frame, area, scores);
    }
    if view.show_help {
        render_help_overlay(frame, area, keys);
    }
}

fn render_scores(frame: &mut Frame, area: Rect, scores: Scores) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Composer Quiz ");

    let text = Line::from(vec![
        Span::styled("Score ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            scores.current.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Best ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            scores.best.to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_artwork(frame: &mut Frame, area: Rect, artwork: &ArtworkView) {
    let block = Block::default().borders(Borders::ALL).title(" Now Playing ");

    let lines = match artwork {
        ArtworkView::Neutral => vec![
            Line::from(""),
            Line::from(Span::styled(
                "?",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Who wrote this piece?",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        ArtworkView::Composer(artwork) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("[ {} ]", artwork),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ],
    };

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_slots(frame: &mut Frame, area: Rect, slots: &[SlotView; OPTION_SLOTS]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    for (row_index, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (col_index, col) in cols.iter().enumerate() {
            let slot = row_index * 2 + col_index;
            render_slot(frame, *col, slot, &slots[slot]);
        }
    }
}

fn render_slot(frame: &mut Frame, area: Rect, index: usize, slot: &SlotView) {
    let style = match slot.style {
        SlotStyle::Positive => Style::default().fg(Color::White).bg(Color::Green),
        SlotStyle::Negative => Style::default().fg(Color::White).bg(Color::Red),
        SlotStyle::Neutral if slot.enabled => Style::default().fg(Color::White),
        SlotStyle::Neutral => Style::default().fg(Color::DarkGray),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", SLOT_LETTERS[index]));
    if slot.picked {
        block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }

    let label = if slot.label.is_empty() { "-" } else { slot.label.as_str() };
    frame.render_widget(
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, view: &QuizView) {
    let text = if let Some(ref msg) = view.error {
        Span::styled(
            format!(" {} | Enter: New game | q: Quit", msg),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(
            " 1-4/A-D: Answer | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_game_over(frame: &mut Frame, area: Rect, scores: Scores) {
    let popup = centered(area, 36, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Game Over ")
        .style(Style::default().bg(Color::Black));

    let lines = vec![
        Line::from(format!("Your score: {}", scores.current)),
        Line::from(format!("Best score: {}", scores.best)),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: New game   q: Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        popup,
    );
}

fn render_help_overlay(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
    let lines: Vec<Line> = keys
        .help_lines()
        .into_iter()
        .map(|(shortcut, description)| Line::from(format!("  {:<14}{}", shortcut, description)))
        .collect();

    let popup = centered(area, 40, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
