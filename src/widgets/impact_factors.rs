//! Global Impact Factors: overseas drivers and how their moves land in Korea

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::price_display::{format_decimal, format_percent};
use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::bands::{move_arrow, Correlation, Impact};
use crate::market::flows::{impact_factors, ImpactFactor};
use crate::themes::Theme;
use crate::ui::borders::Separators;
use crate::ui::{Meter, Panel};

pub struct ImpactFactors {
    factors: Vec<ImpactFactor>,
}

impl ImpactFactors {
    pub fn new() -> Self {
        Self {
            factors: impact_factors(),
        }
    }

    #[cfg(test)]
    pub fn factors(&self) -> &[ImpactFactor] {
        &self.factors
    }
}

impl Default for ImpactFactors {
    fn default() -> Self {
        Self::new()
    }
}

fn correlation_color(correlation: Correlation, theme: &Theme) -> Color {
    match correlation {
        Correlation::High => theme.neon_amber,
        Correlation::Medium => theme.neon_blue,
        Correlation::Low => theme.text_muted,
    }
}

fn impact_color(impact: Impact, theme: &Theme) -> Color {
    match impact {
        Impact::Supportive => theme.neon_green,
        Impact::Adverse => theme.neon_red,
        Impact::Flat => theme.text_muted,
    }
}

impl BoardWidget for ImpactFactors {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ImpactFactors
    }

    fn tick(&mut self, rng: &mut dyn RngCore, _now: Duration) {
        self.factors = self.factors.iter().map(|f| f.ticked(rng)).collect();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let inner = Panel::new(theme)
            .title("Global Impact Factors")
            .subtitle("Correlations with Korean market")
            .live(true)
            .render(area, buf);
        if inner.width < 10 || inner.height == 0 {
            return;
        }

        // Three rows per factor when there is room, otherwise two
        let per_factor: u16 = if inner.height >= self.factors.len() as u16 * 3 { 3 } else { 2 };

        for (i, factor) in self.factors.iter().enumerate() {
            let top = i as u16 * per_factor;
            if top + 1 >= inner.height {
                break;
            }
            let corr_color = correlation_color(factor.correlation, theme);
            let impact = Impact::of(factor.direction, factor.change);

            spread_at(
                buf,
                inner,
                top,
                Line::from(vec![
                    Span::styled(factor.name, Style::default().fg(theme.text_primary)),
                    Span::raw(" "),
                    Span::styled(Separators::CIRCLE_FILLED, Style::default().fg(corr_color)),
                ]),
                Line::from(Span::styled(
                    format!("{}{}", impact.arrow(), factor.korean_impact),
                    Style::default().fg(impact_color(impact, theme)),
                )),
            );

            let move_color = theme.change_color(factor.change);
            line_at(
                buf,
                inner,
                top + 1,
                Line::from(vec![
                    Span::styled(
                        format_decimal(factor.value, 2),
                        Style::default().fg(theme.text_primary).bold(),
                    ),
                    Span::raw(" "),
                    Span::styled(move_arrow(factor.change), Style::default().fg(move_color)),
                    Span::raw(" "),
                    Span::styled(format_percent(factor.change), Style::default().fg(move_color)),
                ]),
            );

            if per_factor == 3 && top + 2 < inner.height {
                let row = Rect {
                    y: inner.y + top + 2,
                    height: 1,
                    ..inner
                };
                let label = "CORRELATION ";
                let tag = format!(" {}", factor.correlation.label());
                line_at(
                    buf,
                    row,
                    0,
                    Line::from(Span::styled(label, Style::default().fg(theme.text_muted))),
                );
                let bar_width = row
                    .width
                    .saturating_sub(label.len() as u16 + tag.len() as u16);
                let bar = Rect {
                    x: row.x + label.len() as u16,
                    width: bar_width,
                    ..row
                };
                Meter::new(theme, factor.correlation.strength_percent() as f64, corr_color)
                    .hide_percentage()
                    .render(bar, buf);
                let tag_area = Rect {
                    x: bar.right(),
                    width: row.right().saturating_sub(bar.right()),
                    ..row
                };
                line_at(
                    buf,
                    tag_area,
                    0,
                    Line::from(Span::styled(tag, Style::default().fg(theme.text_muted))),
                );
            }
        }
    }
}
