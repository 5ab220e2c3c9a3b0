//! Korean Core: KOSPI and KOSDAQ cards plus the USD/KRW stress panel

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use super::chart::Sparkline;
use super::price_display::{format_decimal, format_percent};
use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::bands::{krw_weakness_percent, move_arrow, CurrencyStress};
use crate::market::generator::{generate_series, series_values};
use crate::market::quote::{find_quote, korea_quotes, safe_haven_quotes};
use crate::market::AssetQuote;
use crate::themes::Theme;
use crate::ui::{Meter, Panel};

const KOSPI_VOLATILITY: f64 = 0.0003;
const KOSPI_CHANGE_STEP: f64 = 2.0;
const KOSDAQ_VOLATILITY: f64 = 0.0004;
const KOSDAQ_CHANGE_STEP: f64 = 1.0;
const KRW_VOLATILITY: f64 = 0.0002;
const SPARK_POINTS: usize = 30;

pub struct KoreanCore {
    kospi: AssetQuote,
    kosdaq: AssetQuote,
    usd_krw: AssetQuote,
    kospi_chart: Vec<f64>,
    kosdaq_chart: Vec<f64>,
}

impl KoreanCore {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let korea = korea_quotes();
        let havens = safe_haven_quotes();
        Self {
            kospi: korea[0].clone(),
            kosdaq: korea[1].clone(),
            usd_krw: find_quote(&havens, "USD/KRW").unwrap_or_else(|| havens[2].clone()),
            kospi_chart: series_values(&generate_series(rng, 2456.0, SPARK_POINTS, 0.008)),
            kosdaq_chart: series_values(&generate_series(rng, 712.0, SPARK_POINTS, 0.012)),
        }
    }

    #[cfg(test)]
    pub fn usd_krw(&self) -> &AssetQuote {
        &self.usd_krw
    }

    fn stress_color(stress: CurrencyStress, theme: &Theme) -> Color {
        match stress {
            CurrencyStress::Critical => theme.neon_red,
            CurrencyStress::Warning => theme.neon_amber,
            CurrencyStress::Stable => theme.neon_green,
        }
    }

    fn render_index_card(
        quote: &AssetQuote,
        chart: &[f64],
        chart_color: Color,
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

        let move_color = theme.change_color(quote.change_percent);
        spread_at(
            buf,
            inner,
            0,
            Line::from(Span::styled(quote.symbol.clone(), Style::default().fg(theme.text_muted))),
            Line::from(Span::styled(move_arrow(quote.change_percent), Style::default().fg(move_color))),
        );
        spread_at(
            buf,
            inner,
            1,
            Line::from(Span::styled(
                format_decimal(quote.price, 2),
                Style::default().fg(theme.text_primary).bold(),
            )),
            Line::from(Span::styled(
                format_percent(quote.change_percent),
                Style::default().fg(move_color).bold(),
            )),
        );
        if inner.height > 2 {
            let spark_area = Rect {
                y: inner.y + 2,
                height: 1,
                ..inner
            };
            Sparkline::new(chart, chart_color).render(spark_area, buf);
        }
    }

    fn render_krw(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let stress = CurrencyStress::classify(self.usd_krw.price);
        let color = Self::stress_color(stress, theme);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::dim(color, 0.5)));
        let inner = block.inner(area);
        block.render(area, buf);

        let badge = match stress {
            CurrencyStress::Stable => "◆",
            _ => "⚠",
        };
        spread_at(
            buf,
            inner,
            0,
            Line::from(vec![
                Span::styled("USD/KRW ", Style::default().fg(theme.text_muted)),
                Span::styled(badge, Style::default().fg(color)),
            ]),
            Line::from(Span::styled(stress.label(), Style::default().fg(color).bold())),
        );

        // A rising won rate is bad news, so the move is colored inversely
        let pct = self.usd_krw.change_percent;
        let (arrow, move_color) = if pct >= 0.0 {
            ("▲", theme.neon_red)
        } else {
            ("▼", theme.neon_green)
        };
        spread_at(
            buf,
            inner,
            1,
            Line::from(vec![
                Span::styled(
                    format!("₩{}", format_decimal(self.usd_krw.price, 2)),
                    Style::default().fg(color).bold(),
                ),
                Span::styled(" /USD", Style::default().fg(theme.text_muted)),
            ]),
            Line::from(Span::styled(
                format!("{} {:.2}%", arrow, pct.abs()),
                Style::default().fg(move_color).bold(),
            )),
        );

        spread_at(
            buf,
            inner,
            2,
            Line::from(Span::styled("Strong ₩", Style::default().fg(theme.text_muted))),
            Line::from(Span::styled("Weak ₩", Style::default().fg(theme.text_muted))),
        );
        if inner.height > 3 {
            let meter_area = Rect {
                y: inner.y + 3,
                height: 1,
                ..inner
            };
            Meter::new(theme, krw_weakness_percent(self.usd_krw.price), color)
                .hide_percentage()
                .render(meter_area, buf);
        }
        line_at(buf, inner, 4, scale_labels(inner.width, theme));
    }
}

/// "1,300 ... 1,500" tick labels spread across `width`
fn scale_labels(width: u16, theme: &Theme) -> Line<'static> {
    const TICKS: [&str; 5] = ["1,300", "1,350", "1,400", "1,450", "1,500"];
    let width = width as usize;
    let used: usize = TICKS.iter().map(|t| t.len()).sum();
    let gap = width.saturating_sub(used) / (TICKS.len() - 1);
    let text = TICKS.join(&" ".repeat(gap.max(1)));
    Line::from(Span::styled(text, Style::default().fg(theme.text_muted)))
}

impl BoardWidget for KoreanCore {
    fn kind(&self) -> WidgetKind {
        WidgetKind::KoreanCore
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.kospi = self.kospi.drifted(rng, KOSPI_VOLATILITY, KOSPI_CHANGE_STEP);
        self.kosdaq = self.kosdaq.drifted(rng, KOSDAQ_VOLATILITY, KOSDAQ_CHANGE_STEP);
        self.usd_krw = self.usd_krw.repriced(rng, KRW_VOLATILITY);
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Korean Core")
            .subtitle("KOSPI • KOSDAQ • KRW")
            .live(true)
            .render(area, buf);
        if inner.width < 10 || inner.height < 4 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(inner);
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        Self::render_index_card(&self.kospi, &self.kospi_chart, theme.neon_green, cards[0], buf, theme);
        Self::render_index_card(&self.kosdaq, &self.kosdaq_chart, theme.neon_red, cards[1], buf, theme);
        self.render_krw(rows[1], buf, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::quote::signs_agree;
    use crate::ui::buffer_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_render_shows_warning_band() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut core = KoreanCore::new(&mut rng);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 70, 16);
        let mut buf = Buffer::empty(area);
        core.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("KOSPI"));
        assert!(text.contains("2,456.78"));
        assert!(text.contains("+0.96%"));
        assert!(text.contains("₩1,398.50"));
        assert!(text.contains("WARNING"));
        assert!(text.contains("▼ 0.16%"));
        assert!(text.contains("Strong ₩"));
    }

    #[test]
    fn test_ticks_keep_signs_and_krw_change() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut core = KoreanCore::new(&mut rng);
        let krw_change = core.usd_krw().change_percent;
        for i in 0..500 {
            core.tick(&mut rng, Duration::from_secs(2 * i));
            assert!(signs_agree(&core.kospi));
            assert!(signs_agree(&core.kosdaq));
        }
        assert_eq!(core.usd_krw().change_percent, krw_change);
        assert_eq!(core.kospi_chart.len(), SPARK_POINTS);
    }

    #[test]
    fn test_scale_labels_fit() {
        let theme = Theme::default();
        let line = scale_labels(40, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("1,300"));
        assert!(text.ends_with("1,500"));
        assert!(text.len() <= 40);
    }
}
