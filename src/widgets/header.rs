//! Board header: title, world clocks and connection status

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rand::RngCore;
use ratatui::prelude::*;

use super::{spread_at, BoardWidget, WidgetKind};
use crate::themes::Theme;
use crate::ui::borders::Separators;
use crate::ui::Panel;

/// Markets shown in the clock strip
pub const WORLD_CLOCKS: [(&str, Tz); 3] = [
    ("SEOUL", chrono_tz::Asia::Seoul),
    ("NYC", chrono_tz::America::New_York),
    ("LONDON", chrono_tz::Europe::London),
];

/// 24h "HH:MM" in each market's local time
pub fn world_clocks(at: DateTime<Utc>) -> Vec<(&'static str, String)> {
    WORLD_CLOCKS
        .iter()
        .map(|(label, tz)| (*label, at.with_timezone(tz).format("%H:%M").to_string()))
        .collect()
}

pub struct Header {
    now: DateTime<Utc>,
}

impl Header {
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Pin the displayed time
    #[cfg(test)]
    pub fn set_time(&mut self, at: DateTime<Utc>) {
        self.now = at;
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardWidget for Header {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Header
    }

    fn tick(&mut self, _rng: &mut dyn RngCore, _now: Duration) {
        self.now = Utc::now();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme).render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let title = Line::from(vec![
            Span::styled(
                format!("{} ", Separators::DIAMOND),
                Style::default().fg(theme.accent_secondary),
            ),
            Span::styled("CAPITAL FLOW ", Style::default().fg(theme.text_primary).bold()),
            Span::styled("MASTER BOARD", Style::default().fg(theme.accent).bold()),
        ]);

        let mut status = Vec::new();
        for (label, time) in world_clocks(self.now) {
            status.push(Span::styled(format!("{} ", label), Style::default().fg(theme.text_muted)));
            status.push(Span::styled(format!("{}  ", time), Style::default().fg(theme.text_primary).bold()));
        }
        status.push(Span::styled("│ ", Style::default().fg(theme.border)));
        status.push(Span::styled(
            format!("{} CONNECTED", Separators::CIRCLE_FILLED),
            Style::default().fg(theme.neon_green),
        ));
        status.push(Span::styled(
            format!("  Last update: {}", self.now.format("%H:%M:%S")),
            Style::default().fg(theme.text_muted),
        ));

        spread_at(buf, inner, 0, title, Line::from(status));
        spread_at(
            buf,
            inner,
            1,
            Line::from(Span::styled(
                "Global Liquidity Movement Dashboard v2.0",
                Style::default().fg(theme.text_muted),
            )),
            Line::default(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;
    use chrono::TimeZone;

    #[test]
    fn test_world_clocks_winter() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 0, 30, 0).unwrap();
        let clocks = world_clocks(at);
        assert_eq!(clocks[0], ("SEOUL", "09:30".to_string()));
        assert_eq!(clocks[1], ("NYC", "19:30".to_string()));
        assert_eq!(clocks[2], ("LONDON", "00:30".to_string()));
    }

    #[test]
    fn test_world_clocks_follow_daylight_saving() {
        let at = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
        let clocks = world_clocks(at);
        assert_eq!(clocks[0].1, "21:00");
        assert_eq!(clocks[1].1, "08:00");
        assert_eq!(clocks[2].1, "13:00");
    }

    #[test]
    fn test_header_render() {
        let theme = Theme::default();
        let mut header = Header::new();
        header.set_time(Utc.with_ymd_and_hms(2026, 1, 15, 0, 30, 5).unwrap());
        let area = Rect::new(0, 0, 140, 4);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("CAPITAL FLOW MASTER BOARD"));
        assert!(text.contains("SEOUL 09:30"));
        assert!(text.contains("CONNECTED"));
        assert!(text.contains("Last update: 00:30:05"));
    }
}
