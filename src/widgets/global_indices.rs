//! Global Indices: major benchmarks at whole-point resolution

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::price_display::{format_integer, format_percent};
use super::{spread_at, BoardWidget, WidgetKind};
use crate::market::quote::global_index_quotes;
use crate::market::AssetQuote;
use crate::themes::Theme;
use crate::ui::Panel;

const INDEX_VOLATILITY: f64 = 0.0008;

pub struct GlobalIndices {
    indices: Vec<AssetQuote>,
}

impl GlobalIndices {
    pub fn new() -> Self {
        Self {
            indices: global_index_quotes(),
        }
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[AssetQuote] {
        &self.indices
    }
}

impl Default for GlobalIndices {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardWidget for GlobalIndices {
    fn kind(&self) -> WidgetKind {
        WidgetKind::GlobalIndices
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.indices = self
            .indices
            .iter()
            .map(|i| i.rebased(rng, INDEX_VOLATILITY))
            .collect();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Global Indices")
            .subtitle("Major market benchmarks")
            .live(true)
            .render(area, buf);
        if inner.width < 10 || inner.height == 0 {
            return;
        }

        // Two rows per index when there is room
        let per_index: u16 = if inner.height >= self.indices.len() as u16 * 2 { 2 } else { 1 };
        for (i, index) in self.indices.iter().enumerate() {
            let row = i as u16 * per_index;
            let color = theme.change_color(index.change_percent);
            let arrow = if index.is_up() { "▲" } else { "▼" };
            spread_at(
                buf,
                inner,
                row,
                Line::from(vec![
                    Span::styled("◍ ", Style::default().fg(theme.text_muted)),
                    Span::styled(index.symbol.clone(), Style::default().fg(theme.text_primary).bold()),
                    Span::styled(format!("  {}", format_integer(index.price)), Style::default().fg(theme.text_primary)),
                ]),
                Line::from(Span::styled(
                    format!("{} {}", arrow, format_percent(index.change_percent)),
                    Style::default().fg(color).bg(Theme::dim(color, 0.15)).bold(),
                )),
            );
            if per_index == 2 {
                spread_at(
                    buf,
                    inner,
                    row + 1,
                    Line::from(Span::styled(format!("  {}", index.name), Style::default().fg(theme.text_muted))),
                    Line::default(),
                );
            }
        }
    }
}
