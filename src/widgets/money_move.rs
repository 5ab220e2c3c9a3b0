//! Capital Flow Visualizer: risk-on vs safe allocation tiles

use std::time::Duration;

use rand::RngCore;
use ratatui::prelude::*;

use super::{line_at, spread_at, BoardWidget, WidgetKind};
use crate::market::bands::sign_prefix;
use crate::market::flows::{allocation_slices, money_flow, AllocationCategory, AllocationSlice, FlowDirection, MoneyFlow};
use crate::themes::Theme;
use crate::ui::{Meter, Panel, PanelStyle};

/// Weight at which a tile reaches full width
const FULL_TILE_WEIGHT: f64 = 40.0;
/// Smallest tile as a share of the full width
const MIN_TILE_SHARE: f64 = 60.0 / 140.0;

pub struct MoneyMove {
    slices: Vec<AllocationSlice>,
    flow: MoneyFlow,
}

impl MoneyMove {
    pub fn new() -> Self {
        let slices = allocation_slices();
        let flow = money_flow(&slices);
        Self { slices, flow }
    }

    #[cfg(test)]
    pub fn flow(&self) -> &MoneyFlow {
        &self.flow
    }
}

impl Default for MoneyMove {
    fn default() -> Self {
        Self::new()
    }
}

/// Tile width for a slice weight within `room` cells
pub fn tile_width(weight: f64, room: u16) -> u16 {
    let share = MIN_TILE_SHARE + (weight / FULL_TILE_WEIGHT) * (1.0 - MIN_TILE_SHARE);
    ((share * room as f64).round() as u16).min(room)
}

fn direction_color(direction: FlowDirection, theme: &Theme) -> Color {
    match direction {
        FlowDirection::RiskOn => theme.neon_green,
        FlowDirection::RiskOff => theme.neon_gold,
        FlowDirection::Neutral => theme.accent,
    }
}

fn slice_color(slice: &AllocationSlice, theme: &Theme) -> Color {
    match slice.category {
        AllocationCategory::Safe if slice.change >= 0.0 => theme.neon_gold,
        AllocationCategory::Safe => Theme::dim(theme.neon_gold, 0.5),
        AllocationCategory::RiskOn if slice.change >= 0.0 => theme.neon_green,
        AllocationCategory::RiskOn => Theme::dim(theme.neon_red, 0.75),
    }
}

/// Arrow pointing to where capital is heading; risk assets sit on the left
fn flow_arrow(direction: FlowDirection) -> &'static str {
    match direction {
        FlowDirection::RiskOn => "◀━━",
        FlowDirection::RiskOff => "━━▶",
        FlowDirection::Neutral => "━━━",
    }
}

fn render_tiles(
    slices: &[AllocationSlice],
    category: AllocationCategory,
    title: &str,
    title_color: Color,
    area: Rect,
    buf: &mut Buffer,
    theme: &Theme,
) {
    line_at(
        buf,
        area,
        0,
        Line::from(Span::styled(title.to_uppercase(), Style::default().fg(title_color).bold())),
    );
    for (i, slice) in slices.iter().filter(|s| s.category == category).enumerate() {
        let row = i as u16 + 1;
        if row >= area.height {
            break;
        }
        let color = slice_color(slice, theme);
        let tile = Rect {
            y: area.y + row,
            width: tile_width(slice.weight, area.width),
            height: 1,
            ..area
        };
        buf.set_style(tile, Style::default().bg(color).fg(theme.background));
        let arrow = if slice.change >= 0.0 { "↑" } else { "↓" };
        spread_at(
            buf,
            tile,
            0,
            Line::from(vec![
                Span::styled(format!(" {} ", slice.name), Style::default().bold()),
                Span::raw(format!("{}%", slice.weight)),
            ]),
            Line::from(Span::raw(format!("{}{}{}% ", arrow, sign_prefix(slice.change), slice.change))),
        );
    }
}

impl BoardWidget for MoneyMove {
    fn kind(&self) -> WidgetKind {
        WidgetKind::MoneyMove
    }

    fn tick(&mut self, _rng: &mut dyn RngCore, _now: Duration) {}

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let style = match self.flow.direction {
            FlowDirection::RiskOn => PanelStyle::GlowGreen,
            FlowDirection::RiskOff => PanelStyle::GlowGold,
            FlowDirection::Neutral => PanelStyle::GlowBlue,
        };
        let inner = Panel::new(theme)
            .title("Capital Flow Visualizer")
            .subtitle("Real-time money movement across asset classes")
            .style(style)
            .live(true)
            .render(area, buf);
        if inner.width < 12 || inner.height == 0 {
            return;
        }

        let color = direction_color(self.flow.direction, theme);
        line_at(
            buf,
            inner,
            0,
            Line::from(vec![
                Span::styled(self.flow.direction.label(), Style::default().fg(color).bold()),
                Span::styled("  ", Style::default()),
                Span::styled(self.flow.description, Style::default().fg(theme.text_muted)),
            ]),
        );
        if inner.height > 1 {
            let label = "Strength ";
            line_at(
                buf,
                inner,
                1,
                Line::from(Span::styled(label, Style::default().fg(theme.text_muted))),
            );
            Meter::new(theme, self.flow.strength, color).render(
                Rect {
                    x: inner.x + label.len() as u16,
                    y: inner.y + 1,
                    width: inner.width.saturating_sub(label.len() as u16),
                    height: 1,
                },
                buf,
            );
        }
        if inner.height < 4 {
            return;
        }

        let body = Rect {
            y: inner.y + 3,
            height: inner.height - 3,
            ..inner
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(10), Constraint::Percentage(45)])
            .split(body);
        render_tiles(
            &self.slices,
            AllocationCategory::RiskOn,
            "Risk-On Assets",
            theme.neon_green,
            columns[0],
            buf,
            theme,
        );
        render_tiles(
            &self.slices,
            AllocationCategory::Safe,
            "Safe Havens",
            theme.neon_gold,
            columns[2],
            buf,
            theme,
        );
        let arrow_color = match self.flow.direction {
            FlowDirection::Neutral => theme.text_muted,
            _ => color,
        };
        line_at(
            buf,
            columns[1],
            columns[1].height / 2,
            Line::from(Span::styled(flow_arrow(self.flow.direction), Style::default().fg(arrow_color).bold()))
                .centered(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    #[test]
    fn test_tile_width_scales_with_weight() {
        assert_eq!(tile_width(0.0, 140), 60);
        assert_eq!(tile_width(40.0, 140), 140);
        assert_eq!(tile_width(80.0, 140), 140);
        assert!(tile_width(35.0, 40) > tile_width(5.0, 40));
    }

    #[test]
    fn test_seed_flow_is_risk_on() {
        let widget = MoneyMove::new();
        assert_eq!(widget.flow().direction, FlowDirection::RiskOn);
        assert!((widget.flow().strength - 71.0).abs() < 1e-9);
    }

    #[test]
    fn test_seed_render() {
        let theme = Theme::default();
        let mut widget = MoneyMove::new();
        let area = Rect::new(0, 0, 100, 12);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("RISK ON  Capital flowing into Risk Assets"));
        assert!(text.contains("71%"));
        assert!(text.contains("RISK-ON ASSETS"));
        assert!(text.contains("US Stocks 35%"));
        assert!(text.contains("↑+4.2%"));
        assert!(text.contains("SAFE HAVENS"));
        assert!(text.contains("USD Cash 7%"));
        assert!(text.contains("◀━━"));
    }
}
