//! Main application structure and event loop

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::Widget;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::BoardSettings;
use crate::market::{Clock, SystemClock};
use crate::themes::Theme;
use crate::ui::animation::{fade_area, FadeState};
use crate::ui::{HelpOverlay, StatusBar};
use crate::views::{Board, View};

const VIEW_FADE: Duration = Duration::from_millis(150);

/// Main application state
pub struct App<C: Clock = SystemClock> {
    /// Mounted view and its widgets
    board: Board<C>,
    theme: Theme,
    help_overlay: HelpOverlay,
    /// View transition fade animation
    view_fade: Option<FadeState>,
    frame_interval: Duration,
    should_quit: bool,
}

impl App<SystemClock> {
    pub fn new(settings: &BoardSettings) -> Self {
        info!("Initializing Capital Flow Master Board");
        Self::with_clock(SystemClock::new(), settings)
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(clock: C, settings: &BoardSettings) -> Self {
        let board = Board::new(clock, settings.simulation.seed, settings.display.default_view);
        // Initial fade-in
        let view_fade = Some(FadeState::fade_in(board.now(), VIEW_FADE * 2));
        Self {
            board,
            theme: Theme::default(),
            help_overlay: HelpOverlay::new(),
            view_fade,
            frame_interval: settings.frame_interval(),
            should_quit: false,
        }
    }

    pub fn view(&self) -> View {
        self.board.view()
    }

    #[cfg(test)]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Switch to a new view with fade-in animation
    fn switch_view(&mut self, view: View) {
        if self.board.view() != view {
            debug!("Switched to view: {:?}", view);
            self.board.switch(view);
            self.view_fade = Some(FadeState::fade_in(self.board.now(), VIEW_FADE));
        }
    }

    /// Advance timers and animations by one frame
    pub fn update(&mut self) {
        self.board.update();
        let now = self.board.now();
        if self.view_fade.as_ref().is_some_and(|fade| fade.is_done(now)) {
            self.view_fade = None;
        }
    }

    /// Run the main event loop until the user quits
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventStream::new();
        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !self.should_quit {
            tokio::select! {
                _ = frames.tick() => {
                    self.update();
                    terminal
                        .draw(|f| {
                            let area = f.area();
                            self.render(area, f.buffer_mut());
                        })
                        .context("Failed to draw frame")?;
                }
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code, key.modifiers);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => {
                        debug!("Terminal event stream closed");
                        break;
                    }
                },
            }
        }

        info!("Board stopped after {} ticks", self.board.ticks());
        Ok(())
    }

    /// Handle key press; returns true when the app should exit
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.should_quit = true;
            return true;
        }

        // Any key closes the help overlay
        if self.help_overlay.visible {
            self.help_overlay.hide();
            return false;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.help_overlay.toggle();
            }
            KeyCode::Char('1') => self.switch_view(View::Command),
            KeyCode::Char('2') => self.switch_view(View::Markets),
            KeyCode::Tab => self.switch_view(self.board.view().next()),
            other => {
                self.board.handle_key(other);
            }
        }
        self.should_quit
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        buf.set_style(area, Style::default().bg(self.theme.background));
        self.board.render(rows[0], buf, &self.theme);

        if let Some(fade) = &self.view_fade {
            fade_area(buf, rows[0], fade.alpha(self.board.now()));
        }

        let seed = self
            .board
            .seed()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string());
        StatusBar::new(&self.theme)
            .metric("View", self.board.view().label())
            .metric("Seed", seed)
            .metric("Ticks", self.board.ticks().to_string())
            .render(rows[1], buf);

        // Help overlay (centered, above everything)
        self.help_overlay.render(area, buf, &self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::clock::ManualClock;
    use crate::ui::buffer_text;

    fn app(view: View) -> (ManualClock, App<ManualClock>) {
        let mut settings = BoardSettings::default();
        settings.simulation.seed = Some(7);
        settings.display.default_view = view;
        let clock = ManualClock::new();
        (clock.clone(), App::with_clock(clock, &settings))
    }

    #[test]
    fn test_starts_on_configured_view() {
        let (_clock, app) = app(View::Markets);
        assert_eq!(app.view(), View::Markets);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_view_keys() {
        let (_clock, mut app) = app(View::Command);
        app.handle_key(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.view(), View::Markets);
        app.handle_key(KeyCode::Char('1'), KeyModifiers::NONE);
        assert_eq!(app.view(), View::Command);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.view(), View::Markets);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.view(), View::Command);
    }

    #[test]
    fn test_quit_keys() {
        for (key, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let (_clock, mut app) = app(View::Command);
            assert!(app.handle_key(key, modifiers), "{:?}", key);
            assert!(app.should_quit());
        }
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (_clock, mut app) = app(View::Command);
        app.handle_key(KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.help_overlay.visible);

        // Esc closes help instead of quitting
        assert!(!app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!app.help_overlay.visible);
        assert!(!app.should_quit());

        // Ctrl+C still quits with help open
        app.handle_key(KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_switch_starts_fade_that_expires() {
        let (clock, mut app) = app(View::Command);
        clock.advance(Duration::from_secs(1));
        app.update();
        assert!(app.view_fade.is_none());

        app.handle_key(KeyCode::Char('2'), KeyModifiers::NONE);
        assert!(app.view_fade.is_some());
        clock.advance(VIEW_FADE);
        app.update();
        assert!(app.view_fade.is_none());
    }

    #[test]
    fn test_other_keys_reach_widgets() {
        let (_clock, mut app) = app(View::Markets);
        // Left/Right belong to the Korea monitor; they never quit or switch
        assert!(!app.handle_key(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(app.view(), View::Markets);
    }

    #[test]
    fn test_render_shows_status_bar() {
        let (clock, mut app) = app(View::Command);
        clock.advance(Duration::from_millis(1000));
        app.update();
        let area = Rect::new(0, 0, 180, 50);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("CAPITAL FLOW MASTER BOARD"));
        assert!(text.contains("LIVE"));
        assert!(text.contains("View: Command Center"));
        assert!(text.contains("Seed: 7"));
        assert!(text.contains("Ticks: 2"));
    }

    #[test]
    fn test_help_overlay_renders_on_top() {
        let (_clock, mut app) = app(View::Command);
        app.handle_key(KeyCode::Char('?'), KeyModifiers::NONE);
        let area = Rect::new(0, 0, 180, 50);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Keyboard Shortcuts"));
    }
}
