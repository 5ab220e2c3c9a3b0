//! Real Assets & Housing: REITs and Seoul apartments against commodities

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use super::chart::Sparkline;
use super::price_display::format_decimal;
use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::bands::sign_prefix;
use crate::market::flows::{real_assets, RealAsset};
use crate::market::generator::{generate_series, series_values};
use crate::themes::Theme;
use crate::ui::{Meter, Panel};

const CHART_POINTS: usize = 24;

/// Fixed split shown in the paper vs physical bar
const PAPER_SHARE: f64 = 45.0;

pub struct RealAssets {
    assets: Vec<RealAsset>,
    reits_chart: Vec<f64>,
    seoul_chart: Vec<f64>,
}

impl RealAssets {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        Self {
            assets: real_assets(),
            reits_chart: series_values(&generate_series(rng, 890.0, CHART_POINTS, 0.015)),
            seoul_chart: series_values(&generate_series(rng, 112.0, CHART_POINTS, 0.005)),
        }
    }

    #[cfg(test)]
    pub fn assets(&self) -> &[RealAsset] {
        &self.assets
    }

    fn asset(&self, id: &str) -> Option<&RealAsset> {
        self.assets.iter().find(|a| a.id == id)
    }
}

fn change_label(change: f64) -> String {
    format!("{}{:.1}%", sign_prefix(change), change)
}

/// Value with its unit: dollars get a `$` prefix, anything else trails
fn value_label(asset: &RealAsset) -> String {
    match asset.unit {
        "USD" => format!("${}", format_decimal(asset.value, 2)),
        "" => format_decimal(asset.value, 2),
        unit => format!("{} {}", format_decimal(asset.value, 2), unit),
    }
}

fn render_chart_card(
    label: &str,
    asset: &RealAsset,
    decimals: usize,
    chart: &[f64],
    color: Color,
    area: Rect,
    buf: &mut Buffer,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    block.render(area, buf);

    let move_color = theme.change_color(asset.change);
    let arrow = if asset.change >= 0.0 { "▲" } else { "▼" };
    spread_at(
        buf,
        inner,
        0,
        Line::from(Span::styled(label.to_uppercase(), Style::default().fg(color))),
        Line::from(Span::styled(
            format!("{} {}", arrow, change_label(asset.change)),
            Style::default().fg(move_color).bold(),
        )),
    );
    line_at(
        buf,
        inner,
        1,
        Line::from(Span::styled(
            format_decimal(asset.value, decimals),
            Style::default().fg(theme.text_primary).bold(),
        )),
    );
    if inner.height > 2 {
        let spark = Rect {
            y: inner.bottom() - 1,
            height: 1,
            ..inner
        };
        Sparkline::new(chart, color).render(spark, buf);
    }
}

impl BoardWidget for RealAssets {
    fn kind(&self) -> WidgetKind {
        WidgetKind::RealAssets
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.assets = self.assets.iter().map(|a| a.ticked(rng)).collect();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Real Assets & Housing")
            .subtitle("Physical assets vs paper assets")
            .live(true)
            .render(area, buf);
        if inner.width < 12 || inner.height == 0 {
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(inner);
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);

        if let Some(reits) = self.asset("kr-reits") {
            render_chart_card("Korean REITs", reits, 2, &self.reits_chart, theme.neon_blue, cards[0], buf, theme);
        }
        if let Some(seoul) = self.asset("seoul-apt") {
            render_chart_card("Seoul Apt Index", seoul, 1, &self.seoul_chart, theme.neon_amber, cards[1], buf, theme);
        }

        // Commodities column
        let side = Rect {
            x: columns[1].x + 1,
            width: columns[1].width.saturating_sub(1),
            ..columns[1]
        };
        line_at(
            buf,
            side,
            0,
            Line::from(Span::styled("COMMODITIES", Style::default().fg(theme.neon_gold).bold())),
        );
        let mut row = 1;
        for asset in self.assets.iter().filter(|a| a.id != "kr-reits" && a.id != "seoul-apt") {
            line_at(
                buf,
                side,
                row,
                Line::from(Span::styled(asset.name, Style::default().fg(theme.text_muted))),
            );
            spread_at(
                buf,
                side,
                row + 1,
                Line::from(Span::styled(value_label(asset), Style::default().fg(theme.text_primary).bold())),
                Line::from(Span::styled(
                    change_label(asset.change),
                    Style::default().fg(theme.change_color(asset.change)),
                )),
            );
            row += 2;
        }

        // Paper vs physical share bar
        if side.height > row + 1 {
            spread_at(
                buf,
                side,
                row,
                Line::from(Span::styled("REITs", Style::default().fg(theme.neon_blue))),
                Line::from(Span::styled("Physical", Style::default().fg(theme.neon_amber))),
            );
            let bar = Rect {
                y: side.y + row + 1,
                height: 1,
                ..side
            };
            // The amber track shows through where the blue fill stops
            Meter::new(theme, 100.0, theme.neon_amber).hide_percentage().render(bar, buf);
            Meter::new(theme, PAPER_SHARE, theme.neon_blue)
                .hide_percentage()
                .render(
                    Rect {
                        width: Meter::filled_cells(PAPER_SHARE, bar.width),
                        ..bar
                    },
                    buf,
                );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_value_labels() {
        let assets = real_assets();
        assert_eq!(value_label(&assets[0]), "892.45 pts");
        assert_eq!(value_label(&assets[1]), "112.30");
        assert_eq!(value_label(&assets[2]), "$78.42");
        assert_eq!(value_label(&assets[3]), "4.12 USD/lb");
    }

    #[test]
    fn test_change_label() {
        assert_eq!(change_label(-1.8), "-1.8%");
        assert_eq!(change_label(0.0), "+0.0%");
        assert_eq!(change_label(1.24), "+1.2%");
    }

    #[test]
    fn test_seed_render() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut widget = RealAssets::new(&mut rng);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 110, 10);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("KOREAN REITS"));
        assert!(text.contains("892.45"));
        assert!(text.contains("112.3"));
        assert!(text.contains("▼ -1.8%"));
        assert!(text.contains("WTI Crude Oil"));
        assert!(text.contains("$78.42"));
        assert!(text.contains("COMMODITIES"));
    }

    #[test]
    fn test_tick_keeps_identity_and_bounds() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut widget = RealAssets::new(&mut rng);
        let before = widget.assets().to_vec();
        widget.tick(&mut rng, Duration::from_secs(3));
        for (a, b) in before.iter().zip(widget.assets()) {
            assert_eq!(a.id, b.id);
            assert!((a.change - b.change).abs() <= 0.05);
            assert!((a.value - b.value).abs() <= a.value * 0.001 + 0.01);
        }
    }
}
