//! Board views
//!
//! A view is a fixed arrangement of widgets. The board mounts the widgets of
//! one view at a time: mounting builds them and subscribes their timers,
//! unmounting cancels the timers so no tick reaches discarded state.

use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::market::{Clock, Scheduler};
use crate::themes::Theme;
use crate::widgets::{BoardWidget, WidgetKind};

pub mod command_center;
pub mod markets;

/// Available views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    #[serde(alias = "command_center")]
    Command,
    Markets,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Command => "Command Center",
            Self::Markets => "Markets",
        }
    }

    /// Next view in Tab order
    pub fn next(&self) -> Self {
        match self {
            Self::Command => Self::Markets,
            Self::Markets => Self::Command,
        }
    }

    /// Widgets mounted by this view, in mount order
    pub fn widgets(&self) -> &'static [WidgetKind] {
        match self {
            Self::Command => &command_center::WIDGETS,
            Self::Markets => &markets::WIDGETS,
        }
    }

    /// Where each widget goes inside `area`
    pub fn layout(&self, area: Rect) -> Vec<(WidgetKind, Rect)> {
        match self {
            Self::Command => command_center::layout(area),
            Self::Markets => markets::layout(area),
        }
    }
}

/// The mounted view and the scheduler that drives it
pub struct Board<C: Clock> {
    scheduler: Scheduler<WidgetKind, C>,
    view: View,
    widgets: Vec<Box<dyn BoardWidget>>,
}

impl<C: Clock> Board<C> {
    /// Create a board and mount `view`
    pub fn new(clock: C, seed: Option<u64>, view: View) -> Self {
        let mut board = Self {
            scheduler: Scheduler::new(clock, seed),
            view,
            widgets: Vec::new(),
        };
        board.mount(view);
        board
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn seed(&self) -> Option<u64> {
        self.scheduler.seed()
    }

    /// Ticks delivered since startup
    pub fn ticks(&self) -> u64 {
        self.scheduler.fired()
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    #[cfg(test)]
    pub fn widgets(&self) -> impl Iterator<Item = WidgetKind> + '_ {
        self.widgets.iter().map(|w| w.kind())
    }

    #[cfg(test)]
    pub fn is_subscribed(&self, kind: WidgetKind) -> bool {
        self.scheduler.is_subscribed(kind)
    }

    /// Replace the mounted widgets with those of `view`
    pub fn switch(&mut self, view: View) {
        if view == self.view {
            return;
        }
        self.unmount();
        self.mount(view);
    }

    fn mount(&mut self, view: View) {
        let now = self.scheduler.now();
        for &kind in view.widgets() {
            let widget = kind.build(self.scheduler.rng(), now);
            if let Some(period) = kind.interval() {
                self.scheduler.subscribe(kind, period);
            }
            self.widgets.push(widget);
        }
        self.view = view;
        info!("Mounted {} ({} widgets)", view.label(), self.widgets.len());
    }

    fn unmount(&mut self) {
        for widget in self.widgets.drain(..) {
            self.scheduler.cancel(widget.kind());
        }
        debug!("Unmounted {}", self.view.label());
    }

    /// Deliver due ticks, then advance per-frame animation.
    ///
    /// Returns the number of ticks delivered.
    pub fn update(&mut self) -> usize {
        let due = self.scheduler.poll();
        let now = self.scheduler.now();
        for kind in &due {
            if let Some(widget) = self.widgets.iter_mut().find(|w| w.kind() == *kind) {
                widget.tick(self.scheduler.rng(), now);
            }
        }
        for widget in &mut self.widgets {
            widget.animate(now);
        }
        due.len()
    }

    /// Offer a key to the mounted widgets; returns true once one consumes it
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let now = self.scheduler.now();
        for widget in &mut self.widgets {
            if widget.handle_key(key, self.scheduler.rng(), now) {
                return true;
            }
        }
        false
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        for (kind, rect) in self.view.layout(area) {
            if let Some(widget) = self.widgets.iter_mut().find(|w| w.kind() == kind) {
                widget.render(rect, buf, theme);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::clock::ManualClock;
    use crate::ui::buffer_text;

    fn board(view: View) -> (ManualClock, Board<ManualClock>) {
        let clock = ManualClock::new();
        let board = Board::new(clock.clone(), Some(42), view);
        (clock, board)
    }

    #[test]
    fn test_mount_subscribes_ticking_widgets() {
        let (_clock, board) = board(View::Command);
        assert_eq!(board.widgets().count(), View::Command.widgets().len());
        assert!(board.is_subscribed(WidgetKind::KoreanCore));
        assert!(board.is_subscribed(WidgetKind::GravityMap));
        // Static widgets never get a timer
        assert!(!board.is_subscribed(WidgetKind::KeywordCloud));
    }

    #[test]
    fn test_switch_cancels_old_timers() {
        let (_clock, mut board) = board(View::Command);
        board.switch(View::Markets);
        assert_eq!(board.view(), View::Markets);
        assert!(!board.is_subscribed(WidgetKind::KoreanCore));
        assert!(!board.is_subscribed(WidgetKind::GravityMap));
        assert!(board.is_subscribed(WidgetKind::CryptoTracker));
        assert!(board.is_subscribed(WidgetKind::KoreaMonitor));
        // The header lives in both views and is remounted
        assert!(board.is_subscribed(WidgetKind::Header));
        assert!(board.widgets().all(|k| View::Markets.widgets().contains(&k)));
    }

    #[test]
    fn test_switch_to_same_view_is_noop() {
        let (clock, mut board) = board(View::Command);
        clock.advance(Duration::from_millis(1500));
        board.switch(View::Command);
        // The header timer was not reset, so it is still due at 1s
        assert!(board.update() >= 1);
    }

    #[test]
    fn test_update_fires_on_schedule() {
        let (clock, mut board) = board(View::Command);
        assert_eq!(board.update(), 0);

        // 50ms: gravity map only
        clock.advance(Duration::from_millis(50));
        assert_eq!(board.update(), 1);

        // 1s: gravity map and header
        clock.set(Duration::from_millis(1000));
        assert_eq!(board.update(), 2);
        assert_eq!(board.ticks(), 3);
    }

    #[test]
    fn test_missed_periods_are_skipped() {
        let (clock, mut board) = board(View::Command);
        // A long stall delivers each due widget once
        clock.set(Duration::from_secs(20));
        let fired = board.update();
        let ticking = View::Command
            .widgets()
            .iter()
            .filter(|k| k.interval().is_some())
            .count();
        assert_eq!(fired, ticking);
    }

    #[test]
    fn test_seeded_boards_render_identically() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 160, 48);
        let mut frames = Vec::new();
        for _ in 0..2 {
            let (clock, mut board) = board(View::Markets);
            for _ in 0..40 {
                clock.advance(Duration::from_millis(250));
                board.update();
            }
            let mut buf = Buffer::empty(area);
            board.render(area, &mut buf, &theme);
            frames.push(buffer_text(&buf));
        }
        // The header clock reads wall time, so compare below it
        let body = |frame: &str| frame.lines().skip(4).collect::<Vec<_>>().join("\n");
        assert_eq!(body(&frames[0]), body(&frames[1]));
    }

    #[test]
    fn test_keys_reach_mounted_widgets() {
        let (_clock, mut board) = board(View::Markets);
        assert!(board.handle_key(KeyCode::Right));
        assert!(!board.handle_key(KeyCode::Char('r')));

        board.switch(View::Command);
        assert!(!board.handle_key(KeyCode::Right));
    }

    #[test]
    fn test_render_fills_both_views() {
        let theme = Theme::default();
        for view in [View::Command, View::Markets] {
            let (_clock, mut board) = board(view);
            let area = Rect::new(0, 0, 180, 50);
            let mut buf = Buffer::empty(area);
            board.render(area, &mut buf, &theme);
            let text = buffer_text(&buf);
            assert!(text.contains("CAPITAL FLOW MASTER BOARD"), "{:?}", view);
        }
    }

    #[test]
    fn test_view_cycle_and_names() {
        assert_eq!(View::Command.next(), View::Markets);
        assert_eq!(View::Markets.next(), View::Command);
        assert_eq!(View::default(), View::Command);
        assert_eq!(View::Markets.label(), "Markets");
    }
}
