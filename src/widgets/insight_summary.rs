//! AI Market Analyst: rotating insight with a typewriter reveal

use std::time::Duration;

use crossterm::event::KeyCode;
use rand::RngCore;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};
use tracing::debug;

use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::insight::{random_insight, Typewriter};
use crate::themes::Theme;
use crate::ui::borders::Separators;
use crate::ui::Panel;

pub struct InsightSummary {
    typewriter: Typewriter,
}

impl InsightSummary {
    pub fn new(rng: &mut dyn RngCore, now: Duration) -> Self {
        Self {
            typewriter: Typewriter::start(random_insight(rng), now),
        }
    }

    #[cfg(test)]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Start typing a fresh insight; ignored while one is still being typed
    pub fn refresh(&mut self, rng: &mut dyn RngCore, now: Duration) -> bool {
        if self.typewriter.is_typing() {
            return false;
        }
        self.typewriter = Typewriter::start(random_insight(rng), now);
        debug!("New insight: {}", self.typewriter.text());
        true
    }
}

impl BoardWidget for InsightSummary {
    fn kind(&self) -> WidgetKind {
        WidgetKind::InsightSummary
    }

    fn tick(&mut self, rng: &mut dyn RngCore, now: Duration) {
        // The timer always restarts the reveal
        self.typewriter = Typewriter::start(random_insight(rng), now);
    }

    fn animate(&mut self, now: Duration) {
        self.typewriter.update(now);
    }

    fn handle_key(&mut self, key: KeyCode, rng: &mut dyn RngCore, now: Duration) -> bool {
        match key {
            KeyCode::Char('r') => self.refresh(rng, now),
            _ => false,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("AI Market Analyst")
            .subtitle("Real-time market intelligence")
            .render(area, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let typing = self.typewriter.is_typing();
        let hint_style = if typing {
            Style::default().fg(theme.text_muted).dim()
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spread_at(
            buf,
            inner,
            0,
            Line::from(vec![
                Span::styled("✦ ", Style::default().fg(theme.neon_gold)),
                Span::styled("MARKET INSIGHT", Style::default().fg(theme.neon_gold).bold()),
            ]),
            Line::from(Span::styled("[r] ⟳", hint_style)),
        );

        let mut spans = vec![Span::styled(
            self.typewriter.visible(),
            Style::default().fg(theme.text_primary),
        )];
        if typing {
            spans.push(Span::styled(Separators::CURSOR, Style::default().fg(theme.accent)));
        }
        if inner.height > 1 {
            let body = Rect {
                y: inner.y + 1,
                height: inner.height - 1,
                ..inner
            };
            Paragraph::new(Line::from(spans))
                .wrap(Wrap { trim: true })
                .render(body, buf);
        } else {
            line_at(buf, inner, 0, Line::from(spans));
        }
    }
}
