//! Safe Havens: flight-to-safety quotes and the demand bar

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::price_display::{format_decimal, format_percent, percent_color};
use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::quote::safe_haven_quotes;
use crate::market::AssetQuote;
use crate::themes::Theme;
use crate::ui::{Meter, Panel, PanelStyle};

const YIELD_VOLATILITY: f64 = 0.0005;
const DEFAULT_VOLATILITY: f64 = 0.001;
/// Fixed reading shown on the demand bar
const SAFE_HAVEN_DEMAND: f64 = 68.0;

pub struct SafeHavens {
    assets: Vec<AssetQuote>,
}

impl SafeHavens {
    pub fn new() -> Self {
        Self {
            assets: safe_haven_quotes(),
        }
    }

    #[cfg(test)]
    pub fn assets(&self) -> &[AssetQuote] {
        &self.assets
    }
}

impl Default for SafeHavens {
    fn default() -> Self {
        Self::new()
    }
}

/// Yields move less than prices
pub fn volatility_for(symbol: &str) -> f64 {
    if symbol == "US10Y" {
        YIELD_VOLATILITY
    } else {
        DEFAULT_VOLATILITY
    }
}

/// Yields read as a percentage, everything else as a two-decimal price
pub fn price_label(quote: &AssetQuote) -> String {
    if quote.symbol == "US10Y" {
        format!("{:.2}%", quote.price)
    } else {
        format_decimal(quote.price, 2)
    }
}

fn icon(symbol: &str) -> &'static str {
    match symbol {
        "XAU/USD" => "◉",
        "US10Y" => "%",
        _ => "$",
    }
}

impl BoardWidget for SafeHavens {
    fn kind(&self) -> WidgetKind {
        WidgetKind::SafeHavens
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.assets = self
            .assets
            .iter()
            .map(|a| a.rebased(rng, volatility_for(&a.symbol)))
            .collect();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Safe Havens")
            .subtitle("Flight-to-safety indicators")
            .style(PanelStyle::GlowGold)
            .live(true)
            .render(area, buf);
        if inner.width < 10 || inner.height == 0 {
            return;
        }

        let mut row = 0;
        for asset in &self.assets {
            let icon_color = if asset.symbol == "XAU/USD" { theme.neon_gold } else { theme.accent };
            spread_at(
                buf,
                inner,
                row,
                Line::from(vec![
                    Span::styled(format!("{} ", icon(&asset.symbol)), Style::default().fg(icon_color)),
                    Span::styled(asset.symbol.clone(), Style::default().fg(theme.text_primary).bold()),
                ]),
                Line::from(Span::styled(price_label(asset), Style::default().fg(theme.text_primary).bold())),
            );
            spread_at(
                buf,
                inner,
                row + 1,
                Line::from(Span::styled(format!("  {}", asset.name), Style::default().fg(theme.text_muted))),
                Line::from(Span::styled(
                    format_percent(asset.change_percent),
                    Style::default().fg(percent_color(asset.change_percent, theme)),
                )),
            );
            row += 2;
        }

        if inner.height < row + 3 {
            return;
        }
        let demand = Rect {
            y: inner.y + row + 1,
            height: inner.height - row - 1,
            ..inner
        };
        line_at(
            buf,
            demand,
            0,
            Line::from(vec![
                Span::styled("◈ ", Style::default().fg(theme.neon_gold)),
                Span::styled("SAFE HAVEN DEMAND", Style::default().fg(theme.text_secondary)),
            ]),
        );
        Meter::new(theme, SAFE_HAVEN_DEMAND, theme.neon_gold).render(
            Rect {
                y: demand.y + 1,
                height: 1,
                ..demand
            },
            buf,
        );
        line_at(
            buf,
            demand,
            2,
            Line::from(Span::styled(
                "Elevated demand for defensive assets",
                Style::default().fg(theme.text_muted),
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_price_labels() {
        let assets = safe_haven_quotes();
        assert_eq!(price_label(&assets[0]), "2,634.50");
        assert_eq!(price_label(&assets[1]), "4.32%");
        assert_eq!(price_label(&assets[2]), "1,398.50");
    }

    #[test]
    fn test_yield_moves_at_half_volatility() {
        assert_eq!(volatility_for("US10Y"), 0.0005);
        assert_eq!(volatility_for("DXY"), 0.001);
        assert_eq!(volatility_for("XAU/USD"), 0.001);
    }

    #[test]
    fn test_seed_render() {
        let theme = Theme::default();
        let mut widget = SafeHavens::new();
        let area = Rect::new(0, 0, 50, 16);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("XAU/USD"));
        assert!(text.contains("4.32%"));
        assert!(text.contains("-0.16%"));
        assert!(text.contains("SAFE HAVEN DEMAND"));
        assert!(text.contains("68%"));
    }

    #[test]
    fn test_tick_rebases_each_asset() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut widget = SafeHavens::new();
        let references: Vec<f64> = widget.assets().iter().map(|a| a.reference_price()).collect();
        widget.tick(&mut rng, Duration::from_secs(4));
        for (asset, reference) in widget.assets().iter().zip(references) {
            assert!((asset.reference_price() - reference).abs() < 1e-6);
        }
    }
}
