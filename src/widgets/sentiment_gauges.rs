//! Fear & Greed meters

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::{line_at, BoardWidget, WidgetKind};
use crate::market::gauge::{seed_gauges, Gauge, SentimentBand};
use crate::themes::Theme;
use crate::ui::borders::Separators;
use crate::ui::Panel;

pub struct SentimentGauges {
    gauges: Vec<Gauge>,
}

impl SentimentGauges {
    pub fn new() -> Self {
        Self {
            gauges: seed_gauges(),
        }
    }

    #[cfg(test)]
    pub fn gauges(&self) -> &[Gauge] {
        &self.gauges
    }
}

impl Default for SentimentGauges {
    fn default() -> Self {
        Self::new()
    }
}

pub fn band_color(band: SentimentBand, theme: &Theme) -> Color {
    match band {
        SentimentBand::ExtremeFear => theme.neon_red,
        SentimentBand::Fear => theme.neon_amber,
        SentimentBand::Neutral => theme.neon_gold,
        SentimentBand::Greed => theme.neon_green,
        SentimentBand::ExtremeGreed => Theme::blend(theme.neon_green, Color::Rgb(255, 255, 255), 0.8),
    }
}

/// Needle column for `value` (0-100) on a dial `width` cells wide
pub fn needle_position(value: f64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    ((value.clamp(0.0, 100.0) / 100.0) * (width - 1) as f64).round() as u16
}

fn dial(value: f64, width: u16, color: Color, theme: &Theme) -> Line<'static> {
    let needle = needle_position(value, width);
    let spans: Vec<Span<'static>> = (0..width)
        .map(|i| {
            if i == needle {
                Span::styled(Separators::CURSOR, Style::default().fg(theme.text_primary).bold())
            } else if i < needle {
                Span::styled("━", Style::default().fg(color))
            } else {
                Span::styled("─", Style::default().fg(theme.border))
            }
        })
        .collect();
    Line::from(spans)
}

impl BoardWidget for SentimentGauges {
    fn kind(&self) -> WidgetKind {
        WidgetKind::SentimentGauges
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.gauges = self.gauges.iter().map(|g| g.ticked(rng)).collect();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Fear & Greed Meters")
            .subtitle("Market sentiment indicators")
            .live(true)
            .render(area, buf);
        if inner.width < 9 || inner.height == 0 {
            return;
        }

        let constraints = vec![Constraint::Ratio(1, self.gauges.len().max(1) as u32); self.gauges.len()];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        for (gauge, column) in self.gauges.iter().zip(columns.iter()) {
            let col = Rect {
                width: column.width.saturating_sub(1),
                ..*column
            };
            let band = gauge.band();
            let color = band_color(band, theme);
            // Gauges are shown at integer resolution
            let shown = gauge.display_value() as f64;

            line_at(
                buf,
                col,
                0,
                Line::from(Span::styled(
                    gauge.label.to_uppercase(),
                    Style::default().fg(theme.text_primary),
                ))
                .centered(),
            );
            line_at(buf, col, 1, dial(shown, col.width, color, theme));
            line_at(
                buf,
                col,
                2,
                Line::from(vec![
                    Span::styled(format!("{}", gauge.display_value()), Style::default().fg(color).bold()),
                    Span::raw(" "),
                    Span::styled(band.label().to_uppercase(), Style::default().fg(theme.text_muted)),
                ])
                .centered(),
            );
            line_at(
                buf,
                col,
                3,
                Line::from(Span::styled(gauge.sublabel, Style::default().fg(theme.text_muted))).centered(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::gauge::{GAUGE_MAX, GAUGE_MIN};
    use crate::ui::buffer_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_needle_position() {
        assert_eq!(needle_position(0.0, 21), 0);
        assert_eq!(needle_position(50.0, 21), 10);
        assert_eq!(needle_position(100.0, 21), 20);
        assert_eq!(needle_position(150.0, 21), 20);
        assert_eq!(needle_position(40.0, 0), 0);
    }

    #[test]
    fn test_band_colors() {
        let theme = Theme::default();
        assert_eq!(band_color(SentimentBand::classify(10.0), &theme), theme.neon_red);
        assert_eq!(band_color(SentimentBand::classify(38.0), &theme), theme.neon_amber);
        assert_eq!(band_color(SentimentBand::classify(50.0), &theme), theme.neon_gold);
        assert_eq!(band_color(SentimentBand::classify(62.0), &theme), theme.neon_green);
    }

    #[test]
    fn test_seed_render() {
        let theme = Theme::default();
        let mut widget = SentimentGauges::new();
        let area = Rect::new(0, 0, 96, 7);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("GLOBAL SENTIMENT"));
        assert!(text.contains("62 GREED"));
        assert!(text.contains("71 GREED"));
        assert!(text.contains("38 FEAR"));
        assert!(text.contains("Kimchi Premium: +2.3%"));
    }

    #[test]
    fn test_ticks_stay_clamped() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut widget = SentimentGauges::new();
        for i in 0..3000 {
            widget.tick(&mut rng, Duration::from_secs(4 * i));
        }
        for g in widget.gauges() {
            assert!(g.value >= GAUGE_MIN && g.value <= GAUGE_MAX);
        }
    }
}
