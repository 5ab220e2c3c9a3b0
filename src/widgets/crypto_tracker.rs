//! Crypto Assets: BTC and ETH with 24h stats

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::chart::Sparkline;
use super::price_display::{format_percent, format_price, format_signed, percent_color};
use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::generator::{generate_series, series_values};
use crate::market::quote::crypto_quotes;
use crate::market::AssetQuote;
use crate::themes::Theme;
use crate::ui::borders::dotted;
use crate::ui::{Panel, PanelStyle};

const CRYPTO_VOLATILITY: f64 = 0.002;
const CHART_POINTS: usize = 24;

pub struct CryptoTracker {
    quotes: Vec<AssetQuote>,
    charts: Vec<Vec<f64>>,
}

impl CryptoTracker {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let charts = vec![
            series_values(&generate_series(rng, 97842.0, CHART_POINTS, 0.015)),
            series_values(&generate_series(rng, 3456.0, CHART_POINTS, 0.02)),
        ];
        Self {
            quotes: crypto_quotes(),
            charts,
        }
    }

    #[cfg(test)]
    pub fn quotes(&self) -> &[AssetQuote] {
        &self.quotes
    }
}

fn dollars(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", format_price(v)),
        None => "—".to_string(),
    }
}

fn render_asset(quote: &AssetQuote, chart: &[f64], area: Rect, buf: &mut Buffer, theme: &Theme) {
    let pct_color = percent_color(quote.change_percent, theme);
    spread_at(
        buf,
        area,
        0,
        Line::from(vec![
            Span::styled(quote.symbol.clone(), Style::default().fg(theme.neon_blue).bold()),
            Span::raw(" "),
            Span::styled(quote.name.clone(), Style::default().fg(theme.text_muted)),
        ]),
        Line::from(Span::styled(
            format!("${}", format_price(quote.price)),
            Style::default().fg(theme.text_primary).bold(),
        )),
    );
    spread_at(
        buf,
        area,
        1,
        Line::from(Span::styled(
            format_signed(quote.change, 2),
            Style::default().fg(theme.change_color(quote.change)),
        )),
        Line::from(Span::styled(format_percent(quote.change_percent), Style::default().fg(pct_color).bold())),
    );

    if area.height < 4 {
        return;
    }
    let trend = if quote.is_up() { theme.neon_green } else { theme.neon_red };
    let spark = Rect {
        y: area.y + area.height - 2,
        height: 1,
        ..area
    };
    Sparkline::new(chart, trend).render(spark, buf);

    let stats = Line::from(vec![
        Span::styled("24h High ", Style::default().fg(theme.text_muted)),
        Span::styled(dollars(quote.high_24h), Style::default().fg(theme.neon_green)),
        Span::styled("  24h Low ", Style::default().fg(theme.text_muted)),
        Span::styled(dollars(quote.low_24h), Style::default().fg(theme.neon_red)),
        Span::styled("  Vol ", Style::default().fg(theme.text_muted)),
        Span::styled(
            quote.volume.clone().unwrap_or_default(),
            Style::default().fg(theme.text_primary),
        ),
    ]);
    line_at(buf, area, area.height - 1, stats);
}

impl BoardWidget for CryptoTracker {
    fn kind(&self) -> WidgetKind {
        WidgetKind::CryptoTracker
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.quotes = self
            .quotes
            .iter()
            .map(|q| q.rebased(rng, CRYPTO_VOLATILITY))
            .collect();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Crypto Assets")
            .subtitle("Digital currency markets")
            .style(PanelStyle::GlowBlue)
            .live(true)
            .render(area, buf);
        if inner.width < 10 || inner.height < 2 {
            return;
        }

        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 2), Constraint::Length(1), Constraint::Ratio(1, 2)])
            .split(inner);

        for (i, (quote, chart)) in self.quotes.iter().zip(self.charts.iter()).enumerate() {
            let slot = if i == 0 { halves[0] } else { halves[2] };
            render_asset(quote, chart, slot, buf, theme);
        }
        line_at(
            buf,
            halves[1],
            0,
            Line::from(Span::styled(dotted(halves[1].width as usize), Style::default().fg(theme.border))),
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
    fn test_seed_render() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut widget = CryptoTracker::new(&mut rng);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 14);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("BTC Bitcoin"));
        assert!(text.contains("$97,84"));
        assert!(text.contains("+2.45%"));
        assert!(text.contains("24h High $98,500"));
        assert!(text.contains("24h Low $3,410"));
        assert!(text.contains("Vol 18.7B"));
        assert!(text.contains("-45.32"));
    }

    #[test]
    fn test_tick_keeps_reference_price() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut widget = CryptoTracker::new(&mut rng);
        let references: Vec<f64> = widget.quotes().iter().map(|q| q.reference_price()).collect();
        for i in 0..20u64 {
            widget.tick(&mut rng, Duration::from_secs(3 * i));
        }
        for (quote, reference) in widget.quotes().iter().zip(references) {
            assert!((quote.reference_price() - reference).abs() < 1e-6);
            let expected = quote.change / reference * 100.0;
            assert!((quote.change_percent - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_dollars() {
        assert_eq!(dollars(Some(98500.0)), "$98,500");
        assert_eq!(dollars(Some(3520.0)), "$3,520");
        assert_eq!(dollars(None), "—");
    }
}
