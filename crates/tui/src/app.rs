use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamedex_core::{
    normalize::{display_name, PlatformFamily, RatingTier, NO_CONTENT_RATING},
    GameSummary, QueryController, SearchState,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc};
use tracing::{debug, error, info};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_QUERY_LEN: usize = 96;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
    on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            on_accent: Color::Black,
        }
    }
}

fn tier_color(tier: RatingTier, theme: &Theme) -> Color {
    match tier {
        RatingTier::Low => theme.danger,
        RatingTier::Medium => theme.warning,
        RatingTier::High => theme.success,
    }
}

fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn contrast_color(color: &Color, fallback: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let luminance = 0.2126 * (*r as f32) + 0.7152 * (*g as f32) + 0.0722 * (*b as f32);
            if luminance > 140.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => fallback,
    }
}

fn platform_style(family: PlatformFamily) -> Style {
    let bg = parse_hex_color(family.brand_color()).unwrap_or(Color::DarkGray);
    Style::default()
        .bg(bg)
        .fg(contrast_color(&bg, Color::White))
        .add_modifier(Modifier::BOLD)
}

/// Single-line text input with a byte cursor.
#[derive(Debug, Default, Clone)]
struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    fn insert(&mut self, ch: char) {
        if self.text.chars().count() >= MAX_QUERY_LEN || ch.is_control() {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn as_str(&self) -> &str {
        &self.text
    }

    /// Display column of the cursor.
    fn column(&self) -> u16 {
        self.text[..self.cursor].chars().count() as u16
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    SearchSettled { generation: u64, applied: bool },
}

/// Terminal front-end around a [`QueryController`].
pub struct GamedexApp {
    controller: QueryController,
    input: QueryInput,
    status: String,
    theme: Theme,
    ticks: usize,
    should_quit: bool,
    event_tx: Option<mpsc::Sender<AppEvent>>,
}

impl GamedexApp {
    pub fn new(controller: QueryController, has_api_key: bool) -> Self {
        let status = if has_api_key {
            "Type a game name and press Enter".to_string()
        } else {
            "No API key configured; set GAMEDEX_API_KEY or RAWG_API_KEY".to_string()
        };
        Self {
            controller,
            input: QueryInput::default(),
            status,
            theme: Theme::default(),
            ticks: 0,
            should_quit: false,
            event_tx: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) => {
                if let Err(err) = self.handle_key(key) {
                    self.status = format!("Error: {err}");
                }
                true
            }
            Some(AppEvent::Input(_)) => true,
            Some(AppEvent::Tick) => {
                self.ticks = self.ticks.wrapping_add(1);
                true
            }
            Some(AppEvent::SearchSettled {
                generation,
                applied,
            }) => {
                if applied {
                    let at = Local::now().format("%H:%M:%S").to_string();
                    if let Some(status) = settled_status(&self.controller.state(), &at) {
                        self.status = status;
                    }
                } else {
                    debug!(generation, "Ignoring superseded search");
                }
                true
            }
            None => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('u') => self.input.clear(),
                _ => {}
            }
            return Ok(());
        }
        match key.code {
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                }
            }
            KeyCode::Enter => self.start_search(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(ch) => self.input.insert(ch),
            _ => {}
        }
        Ok(())
    }

    fn start_search(&mut self) {
        let Some(sender) = self.event_tx.clone() else {
            self.status = "Internal error: event channel unavailable".to_string();
            error!("event_channel_missing");
            return;
        };
        let Some(pending) = self.controller.begin(self.input.as_str()) else {
            self.status = "Enter a game name first".to_string();
            return;
        };

        let generation = pending.generation();
        info!(query = %pending.query(), generation, "Submitting search");
        self.status = format!("Searching for {}…", pending.query());
        spawn(async move {
            let applied = pending.resolve().await;
            let _ = sender
                .send(AppEvent::SearchSettled {
                    generation,
                    applied,
                })
                .await;
        });
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(size);

        self.render_input(frame, chunks[0]);
        match self.controller.state() {
            SearchState::Idle => self.render_idle(frame, chunks[1]),
            SearchState::Loading => self.render_loading(frame, chunks[1]),
            SearchState::Failure(err) => self.render_message(
                frame,
                chunks[1],
                err.message(),
                Style::default().fg(self.theme.danger),
            ),
            SearchState::Success(record) => {
                let summary = GameSummary::from_record(&record);
                self.render_summary(frame, chunks[1], &summary);
            }
        }
        self.render_status(frame, chunks[2]);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search game")
            .border_style(Style::default().fg(self.theme.accent));
        let paragraph = Paragraph::new(self.input.as_str()).block(block);
        frame.render_widget(paragraph, area);
        let max_x = area.x + area.width.saturating_sub(2);
        frame.set_cursor((area.x + 1 + self.input.column()).min(max_x), area.y + 1);
    }

    fn render_idle(&self, frame: &mut Frame, area: Rect) {
        self.render_message(
            frame,
            area,
            "Enter a title to look it up in the catalog.",
            Style::default().fg(self.theme.muted),
        );
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.ticks % SPINNER.len()];
        self.render_message(
            frame,
            area,
            &format!("{spinner} Loading…"),
            Style::default().fg(self.theme.accent),
        );
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, message: &str, style: Style) {
        let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, summary: &GameSummary) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        self.render_overview(frame, columns[0], summary);
        self.render_availability(frame, columns[1], summary);
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect, summary: &GameSummary) {
        let mut lines = vec![
            Line::from(Span::styled(
                summary.title.clone(),
                Style::default()
                    .fg(self.theme.primary_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Released: {}", summary.release),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
        ];

        if !summary.genres.is_empty() {
            lines.push(Line::from(format!("Genres: {}", summary.genres.join(", "))));
        }

        let rating_badge = Span::styled(
            format!(" ★ {:.2} ", summary.rating),
            Style::default()
                .bg(tier_color(summary.rating_tier, &self.theme))
                .fg(self.theme.on_accent),
        );
        let metacritic_badge = match (summary.metacritic, summary.metacritic_tier) {
            (Some(score), Some(tier)) => Span::styled(
                format!(" MC {score} "),
                Style::default()
                    .bg(tier_color(tier, &self.theme))
                    .fg(self.theme.on_accent),
            ),
            _ => Span::styled(" MC N/A ", Style::default().fg(self.theme.muted)),
        };
        lines.push(Line::from(vec![rating_badge, Span::raw("  "), metacritic_badge]));

        let esrb = match summary.content_rating {
            Some(icon) => Span::styled(
                format!("[{}] {}", icon.mark(), icon.label()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(NO_CONTENT_RATING, Style::default().fg(self.theme.muted)),
        };
        lines.push(Line::from(vec![Span::raw("ESRB: "), esrb]));

        if let Some(hours) = summary.playtime.filter(|hours| *hours > 0) {
            lines.push(Line::from(format!("Average playtime: {hours}h")));
        }
        lines.push(Line::from(""));
        if let Some(image) = &summary.hero_image {
            lines.push(Line::from(Span::styled(
                format!("Cover: {image}"),
                Style::default().fg(self.theme.muted),
            )));
        }
        if !summary.screenshots.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Screenshots: {}", summary.screenshots.len()),
                Style::default().fg(self.theme.muted),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Game"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_availability(&self, frame: &mut Frame, area: Rect, summary: &GameSummary) {
        let heading = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(Span::styled("Platforms", heading))];
        if summary.platforms.is_empty() {
            lines.push(Line::from(Span::styled(
                "No known platforms",
                Style::default().fg(self.theme.muted),
            )));
        }
        for (family, names) in summary.platforms.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", family.label()), platform_style(family)),
                Span::raw(" "),
                Span::styled(names.join(", "), Style::default().fg(self.theme.muted)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Available on", heading)));
        for store in &summary.stores {
            lines.push(Line::from(format!("• {store}")));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Tags", heading)));
        lines.push(Line::from(summary.tags.join(" · ")));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Availability"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let hint = Span::styled(
            "  Enter search · Esc clear/quit · Ctrl-C quit",
            Style::default().fg(self.theme.muted),
        );
        let paragraph = Paragraph::new(Line::from(vec![Span::raw(self.status.clone()), hint]))
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if sender.blocking_send(AppEvent::Input(event)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    error!(?err, "Failed to read terminal event");
                    break;
                }
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(err) => {
                error!(?err, "Failed to poll terminal events");
                break;
            }
        }
    });
}

/// Status line for a search that settled at `at`; `None` while not terminal.
fn settled_status(state: &SearchState, at: &str) -> Option<String> {
    match state {
        SearchState::Success(record) => Some(format!("Found {} at {at}", display_name(record))),
        SearchState::Failure(err) => Some(err.message().to_string()),
        SearchState::Idle | SearchState::Loading => None,
    }
}
