//! Reusable panel components
//!
//! Every widget on the board sits in a `Panel`: a rounded, themed card with
//! a title, an optional subtitle and a LIVE marker.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Widget};

use crate::themes::Theme;
use crate::ui::borders::Separators;

/// Panel style variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStyle {
    /// Default panel style
    #[default]
    Default,
    /// Green glow - risk-on widgets
    GlowGreen,
    /// Gold glow - safe-haven widgets
    GlowGold,
    /// Blue glow - crypto widgets
    GlowBlue,
}

/// A styled panel component
#[derive(Clone)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    subtitle: Option<&'a str>,
    live: bool,
    style: PanelStyle,
    theme: &'a Theme,
}

impl<'a> Panel<'a> {
    /// Create a new panel with the given theme
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            title: None,
            subtitle: None,
            live: false,
            style: PanelStyle::Default,
            theme,
        }
    }

    /// Set the panel title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the subtitle shown next to the title
    pub fn subtitle(mut self, subtitle: &'a str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    /// Mark the panel as carrying live data
    pub fn live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    /// Set the panel style
    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    fn border_color(&self) -> Color {
        match self.style {
            PanelStyle::Default => self.theme.border,
            PanelStyle::GlowGreen => Theme::dim(self.theme.neon_green, 0.6),
            PanelStyle::GlowGold => Theme::dim(self.theme.neon_gold, 0.6),
            PanelStyle::GlowBlue => Theme::dim(self.theme.neon_blue, 0.6),
        }
    }

    /// Build the Block widget
    pub fn block(&self) -> Block<'a> {
        let title_color = self.theme.text_primary;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(self.border_color()))
            .style(Style::default().bg(self.theme.surface))
            .padding(Padding::horizontal(1));

        if let Some(title) = self.title {
            let mut spans = vec![Span::styled(
                format!(" {} ", title.to_uppercase()),
                Style::default().fg(title_color).bold(),
            )];
            if let Some(subtitle) = self.subtitle {
                spans.push(Span::styled(
                    format!("{} ", subtitle),
                    Style::default().fg(self.theme.text_muted),
                ));
            }
            block = block.title(Line::from(spans));
        }

        if self.live {
            block = block.title(
                Line::from(Span::styled(
                    format!(" {} LIVE ", Separators::CIRCLE_FILLED),
                    Style::default().fg(self.theme.neon_green),
                ))
                .right_aligned(),
            );
        }

        block
    }

    /// Render the block and return the inner area
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);
        inner
    }
}

/// Horizontal fill meter
pub struct Meter<'a> {
    percent: f64,
    color: Color,
    theme: &'a Theme,
    show_percentage: bool,
}

impl<'a> Meter<'a> {
    /// Create a meter filled to `percent` (0-100)
    pub fn new(theme: &'a Theme, percent: f64, color: Color) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
            color,
            theme,
            show_percentage: true,
        }
    }

    /// Hide the trailing percentage
    pub fn hide_percentage(mut self) -> Self {
        self.show_percentage = false;
        self
    }

    /// Filled cells for a bar of `width`
    pub fn filled_cells(percent: f64, width: u16) -> u16 {
        ((width as f64) * percent.clamp(0.0, 100.0) / 100.0).round() as u16
    }

    /// Render the meter on the first row of `area`
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width == 0 {
            return;
        }

        let bar_width = if self.show_percentage {
            area.width.saturating_sub(5) // Leave room for " XX%"
        } else {
            area.width
        };

        let filled = Self::filled_cells(self.percent, bar_width);
        let empty = bar_width.saturating_sub(filled);

        let line = Line::from(vec![
            Span::styled("█".repeat(filled as usize), Style::default().fg(self.color)),
            Span::styled("░".repeat(empty as usize), Style::default().fg(self.theme.border)),
        ]);
        Paragraph::new(line).render(Rect { height: 1, ..area }, buf);

        if self.show_percentage && area.width > bar_width {
            let pct = format!(" {:>3.0}%", self.percent);
            let pct_area = Rect {
                x: area.x + bar_width,
                y: area.y,
                width: area.width - bar_width,
                height: 1,
            };
            Paragraph::new(pct)
                .style(Style::default().fg(self.theme.text_primary))
                .render(pct_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn test_meter_fill() {
        assert_eq!(Meter::filled_cells(0.0, 20), 0);
        assert_eq!(Meter::filled_cells(50.0, 20), 10);
        assert_eq!(Meter::filled_cells(100.0, 20), 20);
        assert_eq!(Meter::filled_cells(250.0, 20), 20);
    }

    #[test]
    fn test_panel_renders_title_and_live_marker() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        let inner = Panel::new(&theme)
            .title("Korean Core")
            .subtitle("KOSPI • KOSDAQ • KRW")
            .live(true)
            .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("KOREAN CORE"));
        assert!(text.contains("LIVE"));
        assert_eq!(inner.y, 1);
        assert!(inner.width < area.width);
    }
}
