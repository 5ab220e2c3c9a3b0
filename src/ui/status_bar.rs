//! Status bar component
//!
//! Bottom status bar showing the live indicator, board metrics and the
//! help hint.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::themes::Theme;
use crate::ui::borders::Separators;

/// Status bar widget
pub struct StatusBar<'a> {
    theme: &'a Theme,
    key_metrics: Vec<(String, String)>,
    clock: Option<String>,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            key_metrics: Vec::new(),
            clock: None,
        }
    }

    /// Add a key metric
    pub fn metric(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_metrics.push((label.into(), value.into()));
        self
    }

    /// Fixed clock text instead of local wall time
    #[cfg(test)]
    pub fn clock(mut self, clock: impl Into<String>) -> Self {
        self.clock = Some(clock.into());
        self
    }

    fn separator(&self) -> Span<'a> {
        Span::styled(" │ ", Style::default().fg(self.theme.border))
    }

    /// Build the status bar content as a Line
    fn build_content(&self) -> Line<'a> {
        let mut spans = Vec::new();

        // Logo
        spans.push(Span::styled(
            format!("{} CAPITAL FLOW", Separators::DIAMOND),
            Style::default().fg(self.theme.accent).bold(),
        ));
        spans.push(self.separator());

        // Live indicator
        let color = self.theme.neon_green;
        spans.push(Span::styled(Separators::CIRCLE_FILLED, Style::default().fg(color)));
        spans.push(Span::styled(" LIVE", Style::default().fg(color).bold()));

        // Key metrics
        for (label, value) in &self.key_metrics {
            spans.push(self.separator());
            spans.push(Span::styled(
                format!("{}: ", label),
                Style::default().fg(self.theme.text_secondary),
            ));
            spans.push(Span::styled(
                value.clone(),
                Style::default().fg(self.theme.text_primary),
            ));
        }

        // Time
        let time_str = self
            .clock
            .clone()
            .unwrap_or_else(|| Local::now().format("%H:%M:%S").to_string());
        spans.push(self.separator());
        spans.push(Span::styled(
            time_str,
            Style::default().fg(self.theme.text_muted),
        ));

        spans.push(self.separator());
        spans.push(Span::styled(
            "[?] Help",
            Style::default().fg(self.theme.text_muted),
        ));

        Line::from(spans)
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Background
        let bg_style = Style::default().bg(self.theme.surface);
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_style(bg_style);
            }
        }

        let content = self.build_content();
        Paragraph::new(content).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn test_status_bar_shows_metrics_and_clock() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme)
            .metric("View", "Command Center")
            .metric("Seed", "42")
            .clock("09:30:00")
            .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("LIVE"));
        assert!(text.contains("View: Command Center"));
        assert!(text.contains("Seed: 42"));
        assert!(text.contains("09:30:00"));
        assert!(text.contains("[?] Help"));
    }

    #[test]
    fn test_status_bar_wall_clock() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.starts_with("◆ CAPITAL FLOW │ ● LIVE │ "));
        // HH:MM:SS from local time
        assert_eq!(text.matches(':').count(), 2);
    }
}
