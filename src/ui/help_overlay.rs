//! Help overlay
//!
//! Keyboard shortcuts reference overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::themes::Theme;

/// A keyboard shortcut entry
struct ShortcutEntry {
    key: &'static str,
    description: &'static str,
}

/// Help overlay showing keyboard shortcuts
#[derive(Debug, Default)]
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    /// Create a new help overlay
    pub fn new() -> Self {
        Self { visible: false }
    }

    /// Hide the overlay
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Toggle visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn navigation_shortcuts() -> Vec<ShortcutEntry> {
        vec![
            ShortcutEntry { key: "1", description: "Command Center" },
            ShortcutEntry { key: "2", description: "Markets" },
            ShortcutEntry { key: "Tab", description: "Cycle Views" },
        ]
    }

    fn general_shortcuts() -> Vec<ShortcutEntry> {
        vec![
            ShortcutEntry { key: "?", description: "This Help" },
            ShortcutEntry { key: "q/Esc", description: "Quit" },
            ShortcutEntry { key: "Ctrl+C", description: "Quit" },
        ]
    }

    fn widget_shortcuts() -> Vec<ShortcutEntry> {
        vec![
            ShortcutEntry { key: "r", description: "New Insight (Command Center)" },
            ShortcutEntry { key: "←/→", description: "KOSPI/KOSDAQ Tab (Markets)" },
        ]
    }

    /// Render a section of shortcuts
    fn render_section(
        &self,
        title: &str,
        shortcuts: &[ShortcutEntry],
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
    ) {
        if area.height == 0 {
            return;
        }

        Paragraph::new(title)
            .style(Style::default().fg(theme.text_secondary).underlined())
            .render(Rect { height: 1, ..area }, buf);

        for (i, entry) in shortcuts.iter().enumerate() {
            if i as u16 + 1 >= area.height {
                break;
            }

            let row = Rect {
                x: area.x,
                y: area.y + i as u16 + 1,
                width: area.width,
                height: 1,
            };
            let key_width = 8.min(row.width);

            Paragraph::new(format!("{:>8}", entry.key))
                .style(Style::default().fg(theme.accent).bold())
                .render(Rect { width: key_width, ..row }, buf);

            Paragraph::new(format!("  {}", entry.description))
                .style(Style::default().fg(theme.text_primary))
                .render(
                    Rect {
                        x: row.x + key_width,
                        width: row.width.saturating_sub(key_width),
                        ..row
                    },
                    buf,
                );
        }
    }

    /// Render the help overlay
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.visible {
            return;
        }

        // Centered, 60% width, 60% height
        let width = ((area.width as f32 * 0.6) as u16).min(area.width.saturating_sub(4));
        let height = ((area.height as f32 * 0.6) as u16)
            .max(16)
            .min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let overlay_area = Rect { x, y, width, height };

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_focused))
            .style(Style::default().bg(theme.surface_elevated));

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Navigation
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // General
                Constraint::Length(1), // Spacer
                Constraint::Min(0),    // Widgets
            ])
            .split(inner);

        self.render_section("Views", &Self::navigation_shortcuts(), sections[0], buf, theme);
        self.render_section("General", &Self::general_shortcuts(), sections[2], buf, theme);
        self.render_section("Widgets", &Self::widget_shortcuts(), sections[4], buf, theme);

        if inner.height >= 2 {
            let footer_area = Rect {
                x: inner.x,
                y: inner.y + inner.height - 1,
                width: inner.width,
                height: 1,
            };
            Paragraph::new("[Press ? to close]")
                .style(Style::default().fg(theme.text_muted))
                .alignment(Alignment::Center)
                .render(footer_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn test_hidden_overlay_draws_nothing() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        HelpOverlay::new().render(area, &mut buf, &theme);
        assert!(buffer_text(&buf).trim().is_empty());
    }

    #[test]
    fn test_visible_overlay_lists_shortcuts() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let mut help = HelpOverlay::new();
        help.toggle();
        help.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Command Center"));
        assert!(text.contains("Quit"));
        help.hide();
        assert!(!help.visible);
    }
}
