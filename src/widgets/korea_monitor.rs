//! Korea Market monitor: KOSPI/KOSDAQ tabs over an intraday chart

use std::time::Duration;

use crossterm::event::KeyCode;
use rand::RngCore;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Widget};
use tracing::debug;

use super::chart::{LineChart, Series};
use super::price_display::{format_decimal, format_percent, format_signed};
use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::generator::generate_series;
use crate::market::quote::korea_quotes;
use crate::market::{AssetQuote, ChartPoint};
use crate::themes::Theme;
use crate::ui::Panel;

const INDEX_VOLATILITY: f64 = 0.001;
const CHART_POINTS: usize = 48;

/// Which index the chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTab {
    Kospi,
    Kosdaq,
}

impl IndexTab {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Kospi => "KOSPI",
            Self::Kosdaq => "KOSDAQ",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Kospi => Self::Kosdaq,
            Self::Kosdaq => Self::Kospi,
        }
    }
}

pub struct KoreaMonitor {
    markets: Vec<AssetQuote>,
    kospi_chart: Vec<ChartPoint>,
    kosdaq_chart: Vec<ChartPoint>,
    selected: IndexTab,
}

impl KoreaMonitor {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        Self {
            markets: korea_quotes(),
            kospi_chart: generate_series(rng, 2456.0, CHART_POINTS, 0.008),
            kosdaq_chart: generate_series(rng, 712.0, CHART_POINTS, 0.012),
            selected: IndexTab::Kospi,
        }
    }

    #[cfg(test)]
    pub fn selected(&self) -> IndexTab {
        self.selected
    }

    pub fn select(&mut self, tab: IndexTab) {
        if self.selected != tab {
            debug!("Korea monitor switched to {}", tab.symbol());
        }
        self.selected = tab;
    }

    pub fn selected_quote(&self) -> Option<&AssetQuote> {
        self.markets.iter().find(|m| m.symbol == self.selected.symbol())
    }

    fn selected_chart(&self) -> &[ChartPoint] {
        match self.selected {
            IndexTab::Kospi => &self.kospi_chart,
            IndexTab::Kosdaq => &self.kosdaq_chart,
        }
    }

    fn render_tab(&self, quote: &AssetQuote, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let selected = quote.symbol == self.selected.symbol();
        let border = if selected { theme.border_focused } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        let color = theme.change_color(quote.change_percent);
        let arrow = if quote.is_up() { "▲" } else { "▼" };
        let symbol_style = if selected {
            Style::default().fg(theme.accent).bold()
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spread_at(
            buf,
            inner,
            0,
            Line::from(Span::styled(quote.symbol.clone(), symbol_style)),
            Line::from(Span::styled(arrow, Style::default().fg(color))),
        );
        spread_at(
            buf,
            inner,
            1,
            Line::from(Span::styled(
                format_decimal(quote.price, 2),
                Style::default().fg(theme.text_primary).bold(),
            )),
            Line::from(Span::styled(format_percent(quote.change_percent), Style::default().fg(color))),
        );
    }
}

impl BoardWidget for KoreaMonitor {
    fn kind(&self) -> WidgetKind {
        WidgetKind::KoreaMonitor
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.markets = self
            .markets
            .iter()
            .map(|m| m.rebased(rng, INDEX_VOLATILITY))
            .collect();
    }

    fn handle_key(&mut self, key: KeyCode, _rng: &mut dyn RngCore, _now: Duration) -> bool {
        match key {
            KeyCode::Left | KeyCode::Right => {
                self.select(self.selected.toggled());
                true
            }
            _ => false,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Korea Market")
            .subtitle("KOSPI & KOSDAQ Indices")
            .live(true)
            .render(area, buf);
        if inner.width < 10 || inner.height == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(2)])
            .split(inner);
        let tabs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        for (quote, tab) in self.markets.iter().zip(tabs.iter()) {
            self.render_tab(quote, *tab, buf, theme);
        }

        let Some(quote) = self.selected_quote() else {
            return;
        };
        let color = theme.change_color(quote.change_percent);

        let chart = self.selected_chart();
        let labels = match (chart.first(), chart.last()) {
            (Some(first), Some(last)) => vec![first.time.clone(), last.time.clone()],
            _ => Vec::new(),
        };
        LineChart::new()
            .series(Series::from_points(self.selected.symbol(), color, chart))
            .x_labels(labels)
            .render(rows[1], buf, theme);

        // Stats: change, volume, session status
        let stats = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
            .split(rows[2]);
        let cells = [
            ("Change", format_signed(quote.change, 2), color),
            (
                "Volume",
                quote.volume.clone().unwrap_or_default(),
                theme.text_primary,
            ),
            ("Status", "OPEN".to_string(), theme.neon_green),
        ];
        for ((label, value, value_color), cell) in cells.into_iter().zip(stats.iter()) {
            line_at(
                buf,
                *cell,
                0,
                Line::from(Span::styled(label, Style::default().fg(theme.text_muted))).centered(),
            );
            line_at(
                buf,
                *cell,
                1,
                Line::from(Span::styled(value, Style::default().fg(value_color).bold())).centered(),
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
    fn test_arrows_toggle_tab() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut widget = KoreaMonitor::new(&mut rng);
        assert_eq!(widget.selected(), IndexTab::Kospi);
        assert!(widget.handle_key(KeyCode::Right, &mut rng, Duration::ZERO));
        assert_eq!(widget.selected(), IndexTab::Kosdaq);
        assert_eq!(widget.selected_quote().map(|q| q.symbol.as_str()), Some("KOSDAQ"));
        assert!(widget.handle_key(KeyCode::Left, &mut rng, Duration::ZERO));
        assert_eq!(widget.selected(), IndexTab::Kospi);
        assert!(!widget.handle_key(KeyCode::Up, &mut rng, Duration::ZERO));
    }

    #[test]
    fn test_chart_has_48_points() {
        let mut rng = StdRng::seed_from_u64(2);
        let widget = KoreaMonitor::new(&mut rng);
        assert_eq!(widget.selected_chart().len(), 48);
    }

    #[test]
    fn test_seed_render() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut widget = KoreaMonitor::new(&mut rng);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 70, 20);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("2,456.78"));
        assert!(text.contains("-0.79%"));
        assert!(text.contains("+23.45"));
        assert!(text.contains("8.2T KRW"));
        assert!(text.contains("OPEN"));
    }

    #[test]
    fn test_tick_rebases_both_indices() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut widget = KoreaMonitor::new(&mut rng);
        for i in 0..10u64 {
            widget.tick(&mut rng, Duration::from_millis(2500 * i));
        }
        let reference = widget.selected_quote().map(|q| q.reference_price());
        assert!(reference.is_some_and(|r| (r - (2456.78 - 23.45)).abs() < 1e-6));
    }
}
